//! # Keymill
//!
//! A CAM toolpath generator for milling ergonomic keyboard plates on
//! hobby CNC machines. Everything is in millimeters.
//!
//! ## Architecture
//!
//! Keymill is organized as a workspace with multiple crates:
//!
//! 1. **keymill-core** - Geometry primitives, the relative motion
//!    command model, and the G-code program serializer
//! 2. **keymill-toolpath** - Toolpath synthesis: multi-pass polygon
//!    profiles, helical bores, and point drilling
//! 3. **keymill-patterns** - Switch cutout geometry, batch arrays, and
//!    the ergonomic plate layout
//! 4. **keymill** - Main binary tying the generators to a command line
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keymill::{BoreGenerator, BoreParameters};
//!
//! let commands = BoreGenerator::new(BoreParameters::default()).generate()?;
//! ```

pub use keymill_core::{
    format_mm, regular_polygon_points, rotate_points, translate_points, ArcDirection,
    MotionCommand, Point, Program, Statement,
};

pub use keymill_toolpath::{
    BoreGenerator, BoreParameters, DepthPlan, DrillGenerator, DrillParameters, ParameterError,
    ProfileGenerator, ProfileParameters, ToolpathError, ToolpathResult,
};

pub use keymill_patterns::{
    compose_plate_program, keystem_array_step, serpentine_array_points, KeycrossParameters,
    KeystemParameters, KeysupParameters, PlateLayout, PlateParameters, SwitchCutoutParameters,
    SwitchSite, SWITCH_PITCH,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging on stderr (generated G-code goes to
/// stdout) with RUST_LOG environment variable support.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
