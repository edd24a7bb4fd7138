//! Helical boring of round holes.
//!
//! Cuts a hole larger than the endmill by spiralling the tool down along
//! the hole wall: one full-revolution helical arc per depth pass, then a
//! flat finishing revolution to clean up the final step's seam.

use keymill_core::motion::{ArcDirection, MotionCommand};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::depth::DepthPlan;
use crate::error::{require_positive, ParameterError, ParameterResult, ToolpathResult};

/// Parameters for boring a round hole with a helical toolpath.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoreParameters {
    /// Finished diameter of the hole (mm).
    pub diameter: f64,
    /// Total depth of the hole (mm).
    pub depth: f64,
    /// Descent per revolution (mm).
    pub pitch: f64,
    /// Feed rate along the helix (mm/min).
    pub feed_rate: f64,
    /// Diameter of the endmill (mm). May be zero to generate a
    /// centerline path for a non-cylindrical cutter.
    pub endmill_diameter: f64,
    /// Winding of every revolution.
    pub direction: ArcDirection,
}

impl Default for BoreParameters {
    fn default() -> Self {
        Self {
            diameter: 10.0,
            depth: 8.0,
            pitch: 2.0,
            feed_rate: 500.0,
            endmill_diameter: 3.0,
            direction: ArcDirection::Cw,
        }
    }
}

/// Generator for helical bore toolpaths.
pub struct BoreGenerator {
    params: BoreParameters,
}

impl BoreGenerator {
    /// Creates a new generator with the given parameters.
    pub fn new(params: BoreParameters) -> Self {
        Self { params }
    }

    /// Synthesizes the command sequence for the bore.
    ///
    /// The tool is assumed to sit over the hole center; it returns there
    /// at its original height when the sequence completes.
    pub fn generate(&self) -> ToolpathResult<Vec<MotionCommand>> {
        self.validate()?;
        let p = &self.params;

        // Offset from the hole center so the cutting edge, not the tool
        // centerline, traces the requested diameter.
        let radius = (p.diameter - p.endmill_diameter) / 2.0;

        let plan = DepthPlan::new(p.depth, p.pitch);
        debug!(
            radius,
            revolutions = plan.pass_count(),
            direction = %p.direction,
            "planned helical bore"
        );

        let mut commands = Vec::new();

        // Off-center to the spiral start point.
        commands.push(MotionCommand::Rapid {
            dx: 0.0,
            dy: -radius,
            dz: 0.0,
        });

        // One helical revolution per pass, descending over the arc.
        for increment in plan.increments() {
            commands.push(self.revolution(-increment, radius));
        }

        // Finishing revolution with no depth change to even out the
        // entry/exit seam of the last helical pass.
        commands.push(self.revolution(0.0, radius));

        // Retract and undo the radial offset.
        commands.push(MotionCommand::Rapid {
            dx: 0.0,
            dy: 0.0,
            dz: p.depth,
        });
        commands.push(MotionCommand::Rapid {
            dx: 0.0,
            dy: radius,
            dz: 0.0,
        });

        Ok(commands)
    }

    fn validate(&self) -> ParameterResult<()> {
        let p = &self.params;
        require_positive("diameter", p.diameter)?;
        require_positive("depth", p.depth)?;
        require_positive("pitch", p.pitch)?;
        require_positive("feed_rate", p.feed_rate)?;
        if !p.endmill_diameter.is_finite() {
            return Err(ParameterError::InvalidValue {
                name: "endmill_diameter",
                reason: format!("must be finite, got {}", p.endmill_diameter),
            });
        }
        if p.endmill_diameter >= p.diameter {
            return Err(ParameterError::ToolTooLarge {
                endmill: p.endmill_diameter,
                diameter: p.diameter,
            });
        }
        Ok(())
    }

    /// A full 360° arc centered back toward the hole center.
    fn revolution(&self, dz: f64, radius: f64) -> MotionCommand {
        MotionCommand::Arc {
            dx: 0.0,
            dy: 0.0,
            dz,
            i: 0.0,
            j: radius,
            feed_rate: self.params.feed_rate,
            direction: self.params.direction,
        }
    }
}
