//! Relative motion commands emitted by the toolpath generators.
//!
//! All commands are interpreted under relative positioning (G91): targets
//! are deltas from the current tool position, and arc centers are offsets
//! from the move's start point. This is what makes a generated sequence
//! callable from any position on the work surface.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Winding of a circular move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcDirection {
    /// Clockwise (G2).
    Cw,
    /// Counter-clockwise (G3).
    Ccw,
}

impl ArcDirection {
    /// Returns the opposite winding.
    pub fn flipped(&self) -> Self {
        match self {
            Self::Cw => Self::Ccw,
            Self::Ccw => Self::Cw,
        }
    }
}

impl fmt::Display for ArcDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cw => write!(f, "cw"),
            Self::Ccw => write!(f, "ccw"),
        }
    }
}

impl FromStr for ArcDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cw" => Ok(Self::Cw),
            "ccw" => Ok(Self::Ccw),
            _ => Err(format!("Unknown arc direction: {} (expected cw or ccw)", s)),
        }
    }
}

/// A single machine motion, relative to the current position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionCommand {
    /// Non-cutting positioning move at maximum traverse speed.
    Rapid { dx: f64, dy: f64, dz: f64 },
    /// Straight cutting move at a controlled feed rate (mm/min).
    Linear {
        dx: f64,
        dy: f64,
        dz: f64,
        feed_rate: f64,
    },
    /// Circular cutting move. `(i, j)` is the arc center offset from the
    /// start point; a zero XY delta is a full revolution, and a nonzero
    /// `dz` distributes the descent over the arc (helical).
    Arc {
        dx: f64,
        dy: f64,
        dz: f64,
        i: f64,
        j: f64,
        feed_rate: f64,
        direction: ArcDirection,
    },
}

impl MotionCommand {
    /// Net displacement of this command as `(dx, dy, dz)`.
    pub fn delta(&self) -> (f64, f64, f64) {
        match *self {
            Self::Rapid { dx, dy, dz } => (dx, dy, dz),
            Self::Linear { dx, dy, dz, .. } => (dx, dy, dz),
            Self::Arc { dx, dy, dz, .. } => (dx, dy, dz),
        }
    }

    /// Feed rate of a controlled move, `None` for rapids.
    pub fn feed_rate(&self) -> Option<f64> {
        match *self {
            Self::Rapid { .. } => None,
            Self::Linear { feed_rate, .. } | Self::Arc { feed_rate, .. } => Some(feed_rate),
        }
    }

    /// Whether the tool is engaged with material during this move.
    pub fn is_cutting(&self) -> bool {
        !matches!(self, Self::Rapid { .. })
    }
}

/// Sums the deltas of a command sequence into a net displacement.
pub fn net_displacement(commands: &[MotionCommand]) -> (f64, f64, f64) {
    commands.iter().fold((0.0, 0.0, 0.0), |(x, y, z), c| {
        let (dx, dy, dz) = c.delta();
        (x + dx, y + dy, z + dz)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!("cw".parse::<ArcDirection>().unwrap(), ArcDirection::Cw);
        assert_eq!("CCW".parse::<ArcDirection>().unwrap(), ArcDirection::Ccw);
        assert!("clockwise".parse::<ArcDirection>().is_err());
    }

    #[test]
    fn test_direction_flipped() {
        assert_eq!(ArcDirection::Cw.flipped(), ArcDirection::Ccw);
        assert_eq!(ArcDirection::Ccw.flipped(), ArcDirection::Cw);
    }

    #[test]
    fn test_net_displacement() {
        let commands = vec![
            MotionCommand::Rapid {
                dx: 1.0,
                dy: 2.0,
                dz: 0.0,
            },
            MotionCommand::Linear {
                dx: -1.0,
                dy: 0.0,
                dz: -3.0,
                feed_rate: 100.0,
            },
            MotionCommand::Rapid {
                dx: 0.0,
                dy: -2.0,
                dz: 3.0,
            },
        ];
        let (x, y, z) = net_displacement(&commands);
        assert!(x.abs() < 1e-12);
        assert!(y.abs() < 1e-12);
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn test_feed_rate_accessor() {
        let rapid = MotionCommand::Rapid {
            dx: 0.0,
            dy: 0.0,
            dz: 5.0,
        };
        assert_eq!(rapid.feed_rate(), None);
        assert!(!rapid.is_cutting());

        let arc = MotionCommand::Arc {
            dx: 0.0,
            dy: 0.0,
            dz: -1.0,
            i: 0.0,
            j: 3.5,
            feed_rate: 500.0,
            direction: ArcDirection::Cw,
        };
        assert_eq!(arc.feed_rate(), Some(500.0));
        assert!(arc.is_cutting());
    }
}
