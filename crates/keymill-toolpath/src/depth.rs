//! Depth pass planning shared by the profile and bore generators.

/// Tolerance for deciding that a depth divides evenly into pitches.
const REMAINDER_EPSILON: f64 = 1e-9;

/// The per-pass depth increments for a stepped cut.
///
/// A plan is one remainder increment of `depth mod pitch`, omitted when
/// the remainder is zero, followed by `floor(depth / pitch)` increments
/// of exactly `pitch`. The increments always sum to the requested depth;
/// a zero-size pass is never planned.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthPlan {
    increments: Vec<f64>,
}

impl DepthPlan {
    /// Plans the passes for a cut of `depth` at `pitch` per pass.
    pub fn new(depth: f64, pitch: f64) -> Self {
        debug_assert!(
            depth.is_finite() && depth > 0.0,
            "depth must be positive and finite, got {depth}"
        );
        debug_assert!(
            pitch.is_finite() && pitch > 0.0,
            "pitch must be positive and finite, got {pitch}"
        );

        let mut full_passes = (depth / pitch).floor() as usize;
        let mut remainder = depth - full_passes as f64 * pitch;

        // Floating noise near an exact multiple resolves to the exact
        // multiple: a remainder within epsilon of 0 or of the pitch
        // itself means the depth divides evenly.
        if (remainder - pitch).abs() < REMAINDER_EPSILON {
            full_passes += 1;
            remainder = 0.0;
        }
        if remainder < REMAINDER_EPSILON {
            remainder = 0.0;
        }

        let mut increments = Vec::with_capacity(full_passes + 1);
        if remainder > 0.0 {
            increments.push(remainder);
        }
        increments.extend(std::iter::repeat(pitch).take(full_passes));

        Self { increments }
    }

    /// The planned increments, remainder pass first.
    pub fn increments(&self) -> &[f64] {
        &self.increments
    }

    /// Number of passes, including the remainder pass when present.
    pub fn pass_count(&self) -> usize {
        self.increments.len()
    }

    /// Sum of all increments.
    pub fn total(&self) -> f64 {
        self.increments.iter().sum()
    }
}
