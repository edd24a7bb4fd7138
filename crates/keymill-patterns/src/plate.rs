//! Ergonomic keyboard plate layout and machining program composition.
//!
//! Models the left-hand switch-mount plate of a split ergonomic board:
//! seven staggered finger columns on a fixed switch pitch, a rotated
//! six-switch thumb cluster, a hexagonal ring of fixing holes, and a
//! circular outer boundary. The right-hand plate is the mirror image
//! around X = 0 and is not generated separately.
//!
//! The whole design is centered about the origin so the operator can
//! zero the machine in the middle of a stock sheet with little margin
//! for error.

use keymill_core::geometry::{regular_polygon_points, rotate_points, translate_points, Point};
use keymill_core::program::{Program, Statement};
use keymill_toolpath::bore::{BoreGenerator, BoreParameters};
use keymill_toolpath::drill::{DrillGenerator, DrillParameters};
use keymill_toolpath::profile::{ProfileGenerator, ProfileParameters};
use keymill_toolpath::ToolpathResult;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI};
use tracing::info;

use crate::keyswitch::SwitchCutoutParameters;

/// Spacing between centers of neighbouring switches (mm).
pub const SWITCH_PITCH: f64 = 19.0;

/// Rotation of the thumb cluster (radians).
const THUMB_ROTATE: f64 = -25.0 * PI / 180.0;

/// Number of fixing holes around the plate.
const FIXING_HOLES: usize = 6;

/// Rotation of the fixing ring on the switch-mount plate relative to
/// the base plate (radians).
const FIXING_RING_OFFSET: f64 = 11.0 * PI / 180.0;

/// One switch position on the plate.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SwitchSite {
    pub center: Point,
    /// Rotation of the cutout about its center (radians).
    pub rotation: f64,
}

/// The computed plate layout: switch sites, fixing holes, and the
/// circular outer boundary.
#[derive(Debug, Clone, Serialize)]
pub struct PlateLayout {
    pub switches: Vec<SwitchSite>,
    pub fixing_holes: Vec<Point>,
    pub boundary_center: Point,
    pub boundary_diameter: f64,
}

impl PlateLayout {
    /// Computes the left-hand plate layout.
    pub fn left_hand() -> Self {
        let spc = SWITCH_PITCH;

        // Ergonomic per-column Y stagger for the finger cluster, outer
        // 1.5x column first.
        let col_y = [0.0, 0.0, 3.0, 4.5, 3.0, 1.5, 1.5];
        let mut col_x = [0.0; 7];
        col_x[1] = col_x[0] + 1.25 * spc;
        for i in 2..7 {
            col_x[i] = col_x[i - 1] + spc;
        }

        // Columns are built top row down; alternate columns reverse so
        // the cut order snakes across the cluster.
        let mut c0: Vec<SwitchSite> = [4.0, 3.0, 2.0, 1.0]
            .iter()
            .map(|row| site(col_x[0], row * spc + col_y[0], 0.0))
            .collect();
        c0.push(site(col_x[0] + 0.25 * spc, col_y[0], 0.0));
        let top_left = c0[0].center;
        c0.reverse();

        let column = |x: f64, y_off: f64, rows: &[f64]| -> Vec<SwitchSite> {
            rows.iter().map(|row| site(x, row * spc + y_off, 0.0)).collect()
        };

        let c1 = column(col_x[1], col_y[1], &[4.0, 3.0, 2.0, 1.0, 0.0]);
        let mut c2 = column(col_x[2], col_y[2], &[4.0, 3.0, 2.0, 1.0, 0.0]);
        c2.reverse();
        let c3 = column(col_x[3], col_y[3], &[4.0, 3.0, 2.0, 1.0, 0.0]);
        let mut c4 = column(col_x[4], col_y[4], &[4.0, 3.0, 2.0, 1.0, 0.0]);
        c4.reverse();
        let c5 = column(col_x[5], col_y[5], &[4.0, 3.0, 2.0, 1.0]);

        // The inner 1.5x column holds three rotated switches.
        let mut c6 = vec![
            site(col_x[6], 4.0 * spc + col_y[6], 0.0),
            site(col_x[6], 2.75 * spc + col_y[6], FRAC_PI_2),
            site(col_x[6], 1.25 * spc + col_y[6], FRAC_PI_2),
        ];
        c6.reverse();

        // Thumb cluster, rotated as one block and moved below the inner
        // columns; its lower-left switch is the block origin.
        let thumb_origin = Point::new(col_x[5] + 0.5 * spc, -0.5 * spc);
        let thumb_points = [
            Point::new(0.0, 0.0),
            Point::new(spc, 0.0),
            Point::new(2.0 * spc, -0.5 * spc),
            Point::new(2.0 * spc, 0.5 * spc),
            Point::new(2.0 * spc, 1.5 * spc),
            Point::new(spc, 1.5 * spc),
        ];
        let thumb_points = rotate_points(&thumb_points, Point::new(0.0, 0.0), THUMB_ROTATE);
        let thumb_points = translate_points(&thumb_points, thumb_origin);
        let mut thumb: Vec<SwitchSite> = thumb_points
            .iter()
            .map(|p| SwitchSite {
                center: *p,
                rotation: THUMB_ROTATE,
            })
            .collect();
        thumb[0].rotation += FRAC_PI_2;
        thumb[1].rotation += FRAC_PI_2;
        let bottom_right = thumb[2].center;

        let mut switches = thumb;
        switches.extend(c6);
        switches.extend(c5);
        switches.extend(c4);
        switches.extend(c3);
        switches.extend(c2);
        switches.extend(c1);
        switches.extend(c0);

        // Boundary circle spans the extreme switch centers plus margin.
        let center = top_left.midpoint(&bottom_right);
        let radius = top_left.distance_to(&center) + 0.75 * spc;

        // Re-center the whole design about the origin.
        let offset = Point::new(-center.x, -center.y);
        for s in &mut switches {
            s.center = s.center.translate(offset);
        }
        let center = Point::new(0.0, 0.0);

        let ring = regular_polygon_points(FIXING_HOLES, center, radius - 0.5 * spc);
        let ring = rotate_points(&ring, center, 3.0 * 2.0 * PI / FIXING_HOLES as f64);
        let fixing_holes = rotate_points(&ring, center, FIXING_RING_OFFSET);

        Self {
            switches,
            fixing_holes,
            boundary_center: center,
            boundary_diameter: 2.0 * radius,
        }
    }
}

fn site(x: f64, y: f64, rotation: f64) -> SwitchSite {
    SwitchSite {
        center: Point::new(x, y),
        rotation,
    }
}

/// Machining parameters for cutting a full plate.
#[derive(Debug, Clone, Serialize)]
pub struct PlateParameters {
    /// Transit height above the surface (mm).
    pub clearance: f64,
    /// Plate thickness to cut through (mm).
    pub depth: f64,
    /// Depth per pass for the switch cutouts (mm). Acrylic wants 0.8,
    /// MDF takes 1.0.
    pub pitch: f64,
    /// Feed rate while cutting (mm/min).
    pub feed_rate: f64,
    /// Feed rate while plunging (mm/min).
    pub plunge_rate: f64,
    /// Side length of the switch cutouts (mm).
    pub cutout_width: f64,
    /// Endmill diameter (mm).
    pub endmill: f64,
    /// Depth per revolution for the boundary cut (mm).
    pub boundary_pitch: f64,
}

impl Default for PlateParameters {
    fn default() -> Self {
        Self {
            clearance: 5.0,
            depth: 3.8,
            pitch: 0.8,
            feed_rate: 480.0,
            plunge_rate: 100.0,
            cutout_width: 13.25,
            endmill: 1.0,
            boundary_pitch: 1.0,
        }
    }
}

/// Composes the complete machining program for a plate: every switch
/// cutout, the fixing holes, and finally the outer boundary.
pub fn compose_plate_program(
    layout: &PlateLayout,
    params: &PlateParameters,
) -> ToolpathResult<Program> {
    let mut program = Program::new();

    program.push(Statement::PlaneXY);
    program.push(Statement::UnitsMillimeters);
    program.push(Statement::AbsolutePositioning);
    program.push(Statement::RapidAbsolute {
        x: None,
        y: None,
        z: Some(params.clearance),
    });
    program.push(Statement::RapidAbsolute {
        x: Some(0.0),
        y: Some(0.0),
        z: None,
    });

    // Switch cutouts, one relative profile per site.
    for switch in &layout.switches {
        program.push(Statement::RapidAbsolute {
            x: Some(switch.center.x),
            y: Some(switch.center.y),
            z: None,
        });
        program.push(Statement::RelativePositioning);
        let cutout = SwitchCutoutParameters {
            width: params.cutout_width,
            endmill: params.endmill,
            rotation: switch.rotation,
        };
        let commands = ProfileGenerator::new(ProfileParameters {
            points: cutout.points(),
            depth: params.depth,
            pitch: params.pitch,
            feed_rate: params.feed_rate,
            plunge_rate: params.plunge_rate,
            clearance: params.clearance,
            anti_backlash: false,
        })
        .generate()?;
        program.extend_motion(commands);
        program.push(Statement::AbsolutePositioning);
    }

    // Fixing holes, drilled as one relative cycle from the plate center.
    program.push(Statement::RapidAbsolute {
        x: Some(layout.boundary_center.x),
        y: Some(layout.boundary_center.y),
        z: None,
    });
    program.push(Statement::RelativePositioning);
    let drill = DrillGenerator::new(DrillParameters {
        points: layout.fixing_holes.clone(),
        depth: params.depth,
        plunge_rate: params.plunge_rate,
        clearance: params.clearance,
    })
    .generate()?;
    program.extend_motion(drill);
    program.push(Statement::AbsolutePositioning);

    // Outer boundary last so the plate stays attached while the inner
    // features are cut. The tool rides outside the circle: widening the
    // bore by a full kerf keeps the plate at its nominal diameter.
    program.push(Statement::RapidAbsolute {
        x: Some(layout.boundary_center.x),
        y: Some(layout.boundary_center.y),
        z: None,
    });
    program.push(Statement::RelativePositioning);
    let boundary = BoreGenerator::new(BoreParameters {
        diameter: layout.boundary_diameter + 2.0 * params.endmill,
        depth: params.depth,
        pitch: params.boundary_pitch,
        feed_rate: params.feed_rate,
        endmill_diameter: params.endmill,
        direction: keymill_core::motion::ArcDirection::Cw,
    })
    .generate()?;
    program.extend_motion(boundary);
    program.push(Statement::AbsolutePositioning);

    info!(
        switches = layout.switches.len(),
        fixing_holes = layout.fixing_holes.len(),
        statements = program.len(),
        "composed plate program"
    );

    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_switch_count() {
        let layout = PlateLayout::left_hand();
        // 6 thumb + 3 + 4 + 5 + 5 + 5 + 5 + 5 finger switches.
        assert_eq!(layout.switches.len(), 38);
        assert_eq!(layout.fixing_holes.len(), 6);
    }

    #[test]
    fn test_layout_is_centered() {
        let layout = PlateLayout::left_hand();
        assert_eq!(layout.boundary_center, Point::new(0.0, 0.0));
        // Every switch center sits inside the boundary circle.
        let r = layout.boundary_diameter / 2.0;
        for s in &layout.switches {
            assert!(s.center.distance_to(&layout.boundary_center) < r);
        }
    }

    #[test]
    fn test_fixing_holes_on_ring() {
        let layout = PlateLayout::left_hand();
        let expected = layout.boundary_diameter / 2.0 - 0.5 * SWITCH_PITCH;
        for hole in &layout.fixing_holes {
            let d = hole.distance_to(&layout.boundary_center);
            assert!((d - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rotated_switches_present() {
        let layout = PlateLayout::left_hand();
        let rotated = layout
            .switches
            .iter()
            .filter(|s| s.rotation.abs() > 1e-12)
            .count();
        // All 6 thumb switches plus the two rotated inner-column sites.
        assert_eq!(rotated, 8);
    }
}
