//! Multi-pass polygon profile cutting.
//!
//! Traverses a closed polygon once per depth pass, stepping down by the
//! pitch between passes. The command sequence starts and ends at the
//! caller's current position and height, so profiles can be chained with
//! plain repositioning rapids between them.

use keymill_core::geometry::Point;
use keymill_core::motion::MotionCommand;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::depth::DepthPlan;
use crate::error::{require_positive, ParameterError, ParameterResult, ToolpathResult};

/// Distance travelled past the start vertex when preloading backlash (mm).
const BACKLASH_PRELOAD: f64 = 0.5;

/// Parameters for a multi-pass polygon profile cut.
///
/// The polygon is implicitly closed: the last vertex connects back to
/// the first. Winding order is traversed as given; coordinates are tool
/// centerline positions relative to the shape's reference origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileParameters {
    /// Vertices of the profile, in traversal order (mm).
    pub points: Vec<Point>,
    /// Total depth of cut below the surface (mm).
    pub depth: f64,
    /// Depth removed per pass (mm).
    pub pitch: f64,
    /// Feed rate while cutting (mm/min).
    pub feed_rate: f64,
    /// Feed rate while plunging (mm/min).
    pub plunge_rate: f64,
    /// Height above the surface the tool starts and ends at (mm).
    pub clearance: f64,
    /// Preload mechanical backlash before the first pass so the loop
    /// starts from a repeatable position.
    pub anti_backlash: bool,
}

/// Generator for depth-stepped polygon profile toolpaths.
pub struct ProfileGenerator {
    params: ProfileParameters,
}

impl ProfileGenerator {
    /// Creates a new generator with the given parameters.
    pub fn new(params: ProfileParameters) -> Self {
        Self { params }
    }

    /// Synthesizes the command sequence for the profile cut.
    ///
    /// The tool is assumed to sit at the shape's reference origin, at
    /// clearance height, and returns there when the sequence
    /// completes.
    pub fn generate(&self) -> ToolpathResult<Vec<MotionCommand>> {
        self.validate()?;
        let p = &self.params;

        let plan = DepthPlan::new(p.depth, p.pitch);
        debug!(
            vertices = p.points.len(),
            passes = plan.pass_count(),
            "planned profile cut"
        );

        let mut commands = Vec::new();
        let first = p.points[0];

        // Position over the start vertex, then engage down through the
        // clearance gap. Profiles whose first vertex is the reference
        // origin need no repositioning.
        if first.x != 0.0 || first.y != 0.0 {
            commands.push(MotionCommand::Rapid {
                dx: first.x,
                dy: first.y,
                dz: 0.0,
            });
        }
        commands.push(MotionCommand::Linear {
            dx: 0.0,
            dy: 0.0,
            dz: -p.clearance,
            feed_rate: p.plunge_rate,
        });

        if p.anti_backlash {
            self.push_backlash_preload(&mut commands);
        }

        for increment in plan.increments() {
            commands.push(MotionCommand::Linear {
                dx: 0.0,
                dy: 0.0,
                dz: -increment,
                feed_rate: p.plunge_rate,
            });
            self.push_traversal(&mut commands);
        }

        // Retract to the pre-engagement height and undo the start
        // offset, so the sequence is net-zero and profiles can be
        // chained back to back.
        commands.push(MotionCommand::Rapid {
            dx: 0.0,
            dy: 0.0,
            dz: p.depth + p.clearance,
        });
        if first.x != 0.0 || first.y != 0.0 {
            commands.push(MotionCommand::Rapid {
                dx: -first.x,
                dy: -first.y,
                dz: 0.0,
            });
        }

        Ok(commands)
    }

    fn validate(&self) -> ParameterResult<()> {
        let p = &self.params;
        if p.points.len() < 3 {
            return Err(ParameterError::DegeneratePolygon {
                count: p.points.len(),
            });
        }
        for point in &p.points {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(ParameterError::InvalidValue {
                    name: "points",
                    reason: format!("non-finite vertex ({}, {})", point.x, point.y),
                });
            }
        }
        for i in 0..p.points.len() {
            let next = p.points[(i + 1) % p.points.len()];
            if p.points[i] == next {
                return Err(ParameterError::InvalidValue {
                    name: "points",
                    reason: format!("duplicate consecutive vertex at index {}", i),
                });
            }
        }
        require_positive("depth", p.depth)?;
        require_positive("pitch", p.pitch)?;
        require_positive("feed_rate", p.feed_rate)?;
        require_positive("plunge_rate", p.plunge_rate)?;
        require_positive("clearance", p.clearance)?;
        Ok(())
    }

    /// One full closed traversal of the polygon at cutting feed.
    fn push_traversal(&self, commands: &mut Vec<MotionCommand>) {
        let points = &self.params.points;
        for i in 0..points.len() {
            let from = points[i];
            let to = points[(i + 1) % points.len()];
            commands.push(MotionCommand::Linear {
                dx: to.x - from.x,
                dy: to.y - from.y,
                dz: 0.0,
                feed_rate: self.params.feed_rate,
            });
        }
    }

    /// Overshoot past the start vertex along the first edge and come
    /// back, so the drive train is loaded in the direction of travel
    /// before the first cutting move.
    fn push_backlash_preload(&self, commands: &mut Vec<MotionCommand>) {
        let points = &self.params.points;
        let (a, b) = (points[0], points[1]);
        let length = a.distance_to(&b);
        let dx = (b.x - a.x) / length * BACKLASH_PRELOAD;
        let dy = (b.y - a.y) / length * BACKLASH_PRELOAD;
        commands.push(MotionCommand::Linear {
            dx,
            dy,
            dz: 0.0,
            feed_rate: self.params.feed_rate,
        });
        commands.push(MotionCommand::Linear {
            dx: -dx,
            dy: -dy,
            dz: 0.0,
            feed_rate: self.params.feed_rate,
        });
    }
}
