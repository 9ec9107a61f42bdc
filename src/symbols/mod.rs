//! Vector symbols for fixtures, openings and stairs.
//!
//! Every builder here is pure and total: degenerate or non-finite input
//! produces a degraded drawing, never an error.

mod furniture;
mod opening;
mod stairs;

pub use furniture::{fallback, furniture_symbol, recipe_for, Recipe};
pub use opening::{opening_symbol, DOOR_WIDTH, WINDOW_WIDTH};
pub use stairs::{stair_treads, step_count, STEP_DEPTH};

/// Stroke width of symbol linework, in plan units.
pub const SYMBOL_STROKE: f64 = 0.2;

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}
