//! # Keymill Patterns
//!
//! Point-set generators and layout composition for milled keyboard
//! plates: CherryMX-style switch cutouts, serpentine batch arrays, and
//! the full ergonomic plate layout with its fixing holes and boundary.
//!
//! Point generators produce geometry; the plate module feeds it
//! through the [`keymill-toolpath`](keymill_toolpath) generators and
//! composes the result into complete machining programs.

pub mod array;
pub mod keyswitch;
pub mod plate;

pub use array::{keystem_array_step, serpentine_array_points};
pub use keyswitch::{
    KeycrossParameters, KeystemParameters, KeysupParameters, SwitchCutoutParameters,
};
pub use plate::{compose_plate_program, PlateLayout, PlateParameters, SwitchSite, SWITCH_PITCH};
