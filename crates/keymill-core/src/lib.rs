//! # Keymill Core
//!
//! Core types for the Keymill CAM toolkit. Provides the 2D geometry
//! primitives, the relative motion-command model emitted by the toolpath
//! generators, and the G-code program representation that serializes
//! command sequences into machine-control text.
//!
//! Everything is in millimeters.

pub mod geometry;
pub mod motion;
pub mod program;

pub use geometry::{regular_polygon_points, rotate_points, translate_points, Point};
pub use motion::{ArcDirection, MotionCommand};
pub use program::{format_mm, Program, Statement};
