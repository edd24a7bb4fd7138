//! CherryMX-style switch cutout geometry.
//!
//! All point sets are tool centerline coordinates relative to the
//! cutout's center: inner profiles are inset by half the endmill
//! diameter, outer profiles outset by it, so the cut edge lands on the
//! nominal dimensions. Points are listed clockwise and implicitly
//! closed.

use keymill_core::geometry::{rotate_points, Point};
use keymill_core::motion::MotionCommand;
use keymill_toolpath::profile::{ProfileGenerator, ProfileParameters};
use keymill_toolpath::ToolpathResult;
use serde::{Deserialize, Serialize};

/// Parameters for the cross-shaped keystem cutout that a keycap's stem
/// mount presses into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeycrossParameters {
    /// Overall height of the cross (mm).
    pub height: f64,
    /// Overall width of the cross (mm).
    pub width: f64,
    /// Thickness of the vertical spar (mm).
    pub height_thk: f64,
    /// Thickness of the horizontal spar (mm).
    pub width_thk: f64,
    /// Endmill diameter (mm).
    pub endmill: f64,
}

impl Default for KeycrossParameters {
    fn default() -> Self {
        Self {
            height: 4.5,
            width: 4.5,
            height_thk: 1.1,
            width_thk: 1.3,
            endmill: 1.0,
        }
    }
}

impl KeycrossParameters {
    /// The twelve vertices of the cross, clockwise from the top of the
    /// left spar junction.
    pub fn points(&self) -> Vec<Point> {
        let inner_x = self.height_thk / 2.0 - self.endmill / 2.0;
        let outer_x = self.width / 2.0 - self.endmill / 2.0;
        let inner_y = self.width_thk / 2.0 - self.endmill / 2.0;
        let outer_y = self.height / 2.0 - self.endmill / 2.0;

        vec![
            // Up spar
            Point::new(-inner_x, inner_y),
            Point::new(-inner_x, outer_y),
            Point::new(inner_x, outer_y),
            // Right spar
            Point::new(inner_x, inner_y),
            Point::new(outer_x, inner_y),
            Point::new(outer_x, -inner_y),
            // Down spar
            Point::new(inner_x, -inner_y),
            Point::new(inner_x, -outer_y),
            Point::new(-inner_x, -outer_y),
            // Left spar
            Point::new(-inner_x, -inner_y),
            Point::new(-outer_x, -inner_y),
            Point::new(-outer_x, inner_y),
        ]
    }
}

/// Parameters for the square support cutout that surrounds a keystem so
/// the keycap skirt can seat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysupParameters {
    /// Height of the support square (mm).
    pub height: f64,
    /// Width of the support square (mm).
    pub width: f64,
    /// Endmill diameter (mm).
    pub endmill: f64,
}

impl Default for KeysupParameters {
    fn default() -> Self {
        Self {
            height: 5.2,
            width: 6.8,
            endmill: 1.0,
        }
    }
}

impl KeysupParameters {
    /// The four corners of the support square, clockwise from top-left.
    /// The tool rides outside the square, so the corners are outset.
    pub fn points(&self) -> Vec<Point> {
        let x = self.width / 2.0 + self.endmill / 2.0;
        let y = self.height / 2.0 + self.endmill / 2.0;
        vec![
            Point::new(-x, y),
            Point::new(x, y),
            Point::new(x, -y),
            Point::new(-x, -y),
        ]
    }
}

/// Parameters for the square plate cutout a switch body clips into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchCutoutParameters {
    /// Side length of the square cutout (mm).
    pub width: f64,
    /// Endmill diameter (mm).
    pub endmill: f64,
    /// Rotation of the cutout about its center (radians).
    pub rotation: f64,
}

impl Default for SwitchCutoutParameters {
    fn default() -> Self {
        Self {
            width: 13.25,
            endmill: 1.0,
            rotation: 0.0,
        }
    }
}

impl SwitchCutoutParameters {
    /// The four corners of the cutout, clockwise from top-left, inset
    /// by half the endmill and rotated about the center.
    pub fn points(&self) -> Vec<Point> {
        let half = self.width / 2.0 - self.endmill / 2.0;
        let square = vec![
            Point::new(-half, half),
            Point::new(half, half),
            Point::new(half, -half),
            Point::new(-half, -half),
        ];
        rotate_points(&square, Point::new(0.0, 0.0), self.rotation)
    }
}

/// Parameters for cutting one complete keystem site: the cross cutout
/// followed by its surrounding support square.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeystemParameters {
    pub cross: KeycrossParameters,
    pub support: KeysupParameters,
    /// Depth of both cutouts (mm).
    pub depth: f64,
    /// Depth removed per pass (mm).
    pub pitch: f64,
    /// Feed rate while cutting (mm/min).
    pub feed_rate: f64,
    /// Feed rate while plunging (mm/min).
    pub plunge_rate: f64,
    /// Transit height above the surface (mm).
    pub clearance: f64,
    /// Preload backlash before each profile.
    pub anti_backlash: bool,
}

impl Default for KeystemParameters {
    fn default() -> Self {
        Self {
            cross: KeycrossParameters::default(),
            support: KeysupParameters::default(),
            depth: 3.5,
            pitch: 1.0,
            feed_rate: 200.0,
            plunge_rate: 100.0,
            clearance: 5.0,
            anti_backlash: true,
        }
    }
}

impl KeystemParameters {
    /// Synthesizes the commands for one keystem site, both profiles
    /// chained from the site center at clearance height.
    pub fn commands(&self) -> ToolpathResult<Vec<MotionCommand>> {
        let mut commands = self.profile(self.cross.points())?;
        commands.extend(self.profile(self.support.points())?);
        Ok(commands)
    }

    fn profile(&self, points: Vec<Point>) -> ToolpathResult<Vec<MotionCommand>> {
        ProfileGenerator::new(ProfileParameters {
            points,
            depth: self.depth,
            pitch: self.pitch,
            feed_rate: self.feed_rate,
            plunge_rate: self.plunge_rate,
            clearance: self.clearance,
            anti_backlash: self.anti_backlash,
        })
        .generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_keycross_point_count_and_symmetry() {
        let points = KeycrossParameters::default().points();
        assert_eq!(points.len(), 12);
        // The cross is symmetric about both axes: every vertex has a
        // mirrored partner.
        for p in &points {
            assert!(points
                .iter()
                .any(|q| (q.x + p.x).abs() < EPS && (q.y - p.y).abs() < EPS));
            assert!(points
                .iter()
                .any(|q| (q.x - p.x).abs() < EPS && (q.y + p.y).abs() < EPS));
        }
    }

    #[test]
    fn test_keycross_inset_by_half_endmill() {
        let params = KeycrossParameters::default();
        let points = params.points();
        // Spar tips sit at half the nominal extent minus the tool inset.
        let outer_y = points.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        assert!((outer_y - (params.height / 2.0 - params.endmill / 2.0)).abs() < EPS);
        let outer_x = points.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert!((outer_x - (params.width / 2.0 - params.endmill / 2.0)).abs() < EPS);
    }

    #[test]
    fn test_keysup_outset_by_half_endmill() {
        let params = KeysupParameters::default();
        let points = params.points();
        assert_eq!(points.len(), 4);
        assert!((points[0].x + (params.width + params.endmill) / 2.0).abs() < EPS);
        assert!((points[0].y - (params.height + params.endmill) / 2.0).abs() < EPS);
    }

    #[test]
    fn test_switch_cutout_rotation() {
        let params = SwitchCutoutParameters {
            rotation: std::f64::consts::FRAC_PI_2,
            ..SwitchCutoutParameters::default()
        };
        let rotated = params.points();
        let flat = SwitchCutoutParameters::default().points();
        // A quarter turn maps each corner onto the previous one.
        for (r, f) in rotated.iter().zip(flat.iter()) {
            assert!((r.x + f.y).abs() < EPS);
            assert!((r.y - f.x).abs() < EPS);
        }
    }

    #[test]
    fn test_keystem_commands_cover_both_profiles() {
        let params = KeystemParameters {
            anti_backlash: false,
            ..KeystemParameters::default()
        };
        let commands = params.commands().unwrap();
        // depth 3.5 at pitch 1.0: remainder + 3 full passes per profile.
        // Cross: rapid + engage + 4*(1 + 12) + retract + return = 56.
        // Support: rapid + engage + 4*(1 + 4) + retract + return = 24.
        assert_eq!(commands.len(), 80);

        // Both profiles chain from the site center: the sequence is
        // net-zero in all axes.
        let (x, y, z) = keymill_core::motion::net_displacement(&commands);
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
        assert!(z.abs() < 1e-9);
    }
}
