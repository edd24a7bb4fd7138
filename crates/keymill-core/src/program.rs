//! G-code program assembly and serialization.
//!
//! A [`Program`] is an ordered list of [`Statement`]s, each of which
//! renders to exactly one line of machine-control text. Toolpath
//! generators produce [`MotionCommand`] sequences; a composition layer
//! wraps them in mode statements (units, plane, positioning mode) and
//! absolute repositioning rapids between shapes.

use crate::motion::{ArcDirection, MotionCommand};
use serde::{Deserialize, Serialize};

/// Formats a millimeter value to at most 4 decimal places with trailing
/// zeros (and a dangling decimal point) trimmed: `8.0 -> "8"`,
/// `3.5 -> "3.5"`, `0.30000000000000004 -> "0.3"`.
pub fn format_mm(value: f64) -> String {
    let s = format!("{:.4}", value);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// One line of a machining program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// G21 - interpret coordinates as millimeters.
    UnitsMillimeters,
    /// G17 - select the XY working plane.
    PlaneXY,
    /// G90 - absolute positioning.
    AbsolutePositioning,
    /// G91 - relative positioning.
    RelativePositioning,
    /// G0 under absolute positioning; any subset of axes may be given.
    RapidAbsolute {
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    },
    /// A relative motion command (G0/G1/G2/G3 under G91).
    Motion(MotionCommand),
}

impl Statement {
    /// Renders this statement as a single G-code line.
    pub fn to_line(&self) -> String {
        match self {
            Self::UnitsMillimeters => "G21".to_string(),
            Self::PlaneXY => "G17".to_string(),
            Self::AbsolutePositioning => "G90".to_string(),
            Self::RelativePositioning => "G91".to_string(),
            Self::RapidAbsolute { x, y, z } => {
                let mut line = String::from("G0");
                if let Some(x) = x {
                    line.push_str(&format!(" X{}", format_mm(*x)));
                }
                if let Some(y) = y {
                    line.push_str(&format!(" Y{}", format_mm(*y)));
                }
                if let Some(z) = z {
                    line.push_str(&format!(" Z{}", format_mm(*z)));
                }
                line
            }
            Self::Motion(command) => render_motion(command),
        }
    }
}

fn render_motion(command: &MotionCommand) -> String {
    match *command {
        MotionCommand::Rapid { dx, dy, dz } => {
            let mut line = String::from("G0");
            push_axis_words(&mut line, dx, dy, dz);
            line
        }
        MotionCommand::Linear {
            dx,
            dy,
            dz,
            feed_rate,
        } => {
            let mut line = String::from("G1");
            push_axis_words(&mut line, dx, dy, dz);
            line.push_str(&format!(" F{}", format_mm(feed_rate)));
            line
        }
        MotionCommand::Arc {
            dx,
            dy,
            dz,
            i,
            j,
            feed_rate,
            direction,
        } => {
            // Arcs always carry the full word set so a full revolution
            // (zero XY delta) stays unambiguous to the controller.
            let mnemonic = match direction {
                ArcDirection::Cw => "G2",
                ArcDirection::Ccw => "G3",
            };
            format!(
                "{} X{} Y{} Z{} I{} J{} F{}",
                mnemonic,
                format_mm(dx),
                format_mm(dy),
                format_mm(dz),
                format_mm(i),
                format_mm(j),
                format_mm(feed_rate)
            )
        }
    }
}

/// Axis words for linear moves: XY emitted together when either is
/// nonzero, Z only when it moves.
fn push_axis_words(line: &mut String, dx: f64, dy: f64, dz: f64) {
    if dx != 0.0 || dy != 0.0 {
        line.push_str(&format!(" X{} Y{}", format_mm(dx), format_mm(dy)));
    }
    if dz != 0.0 {
        line.push_str(&format!(" Z{}", format_mm(dz)));
    }
}

/// An ordered machining program.
#[derive(Debug, Clone, Default)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    /// Creates a new empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a statement.
    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Appends a sequence of relative motion commands.
    pub fn extend_motion<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = MotionCommand>,
    {
        self.statements
            .extend(commands.into_iter().map(Statement::Motion));
    }

    /// The statements in program order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Renders the program as machine-control text, one line per
    /// statement, with a trailing newline.
    pub fn to_gcode(&self) -> String {
        let mut out = String::new();
        for statement in &self.statements {
            out.push_str(&statement.to_line());
            out.push('\n');
        }
        out
    }
}
