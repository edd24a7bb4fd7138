//! # Keymill Toolpath
//!
//! Toolpath synthesis for the Keymill CAM toolkit. Turns abstract 2D
//! geometry and machining parameters into ordered sequences of relative
//! [`MotionCommand`](keymill_core::MotionCommand)s:
//!
//! - **Profile**: depth-stepped multi-pass outline cuts of closed
//!   polygons, with optional anti-backlash preload of the start point.
//! - **Bore**: continuous helical plunge-and-cut for round holes, with a
//!   closing finishing revolution.
//! - **Drill**: straight plunge drilling of point sets.
//!
//! All generators validate their parameters up front and emit nothing on
//! failure; once validation passes, synthesis is pure and deterministic.

pub mod bore;
pub mod depth;
pub mod drill;
pub mod error;
pub mod profile;

pub use bore::{BoreGenerator, BoreParameters};
pub use depth::DepthPlan;
pub use drill::{DrillGenerator, DrillParameters};
pub use error::{ParameterError, ParameterResult, ToolpathError, ToolpathResult};
pub use profile::{ProfileGenerator, ProfileParameters};
