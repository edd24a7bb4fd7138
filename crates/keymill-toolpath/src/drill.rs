//! Straight plunge drilling of point sets.

use keymill_core::geometry::Point;
use keymill_core::motion::MotionCommand;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{require_positive, ParameterError, ParameterResult, ToolpathResult};

/// Parameters for drilling a sequence of holes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillParameters {
    /// Hole centers, drilled in order, relative to the reference origin (mm).
    pub points: Vec<Point>,
    /// Depth of each hole below the surface (mm).
    pub depth: f64,
    /// Feed rate while plunging (mm/min).
    pub plunge_rate: f64,
    /// Height above the surface used for transits between holes (mm).
    pub clearance: f64,
}

/// Generator for point drilling toolpaths.
pub struct DrillGenerator {
    params: DrillParameters,
}

impl DrillGenerator {
    /// Creates a new generator with the given parameters.
    pub fn new(params: DrillParameters) -> Self {
        Self { params }
    }

    /// Synthesizes the command sequence for the drill cycle.
    ///
    /// The tool is assumed to sit at the reference origin at clearance
    /// height; it ends over the last hole at the same height.
    pub fn generate(&self) -> ToolpathResult<Vec<MotionCommand>> {
        self.validate()?;
        let p = &self.params;
        debug!(holes = p.points.len(), "planned drill cycle");

        let stroke = p.clearance + p.depth;
        let mut commands = Vec::new();
        let mut position = Point::new(0.0, 0.0);

        for point in &p.points {
            if point.x != position.x || point.y != position.y {
                commands.push(MotionCommand::Rapid {
                    dx: point.x - position.x,
                    dy: point.y - position.y,
                    dz: 0.0,
                });
            }
            commands.push(MotionCommand::Linear {
                dx: 0.0,
                dy: 0.0,
                dz: -stroke,
                feed_rate: p.plunge_rate,
            });
            commands.push(MotionCommand::Rapid {
                dx: 0.0,
                dy: 0.0,
                dz: stroke,
            });
            position = *point;
        }

        Ok(commands)
    }

    fn validate(&self) -> ParameterResult<()> {
        let p = &self.params;
        if p.points.is_empty() {
            return Err(ParameterError::InvalidValue {
                name: "points",
                reason: "no holes to drill".to_string(),
            });
        }
        for point in &p.points {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(ParameterError::InvalidValue {
                    name: "points",
                    reason: format!("non-finite hole center ({}, {})", point.x, point.y),
                });
            }
        }
        require_positive("depth", p.depth)?;
        require_positive("plunge_rate", p.plunge_rate)?;
        require_positive("clearance", p.clearance)?;
        Ok(())
    }
}
