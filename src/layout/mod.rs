//! Card layout engine.
//!
//! Computes the two home positions every card can occupy: a slot on a
//! Fibonacci-lattice sphere and a cell in a centered row-major grid. Both
//! depend only on the card count (and layout options), so they are
//! computed once when the card set is built.

/// Row-major grid arrangement.
pub mod grid;
/// Fibonacci-lattice sphere arrangement.
pub mod sphere;

pub use grid::{GridCell, GridLayout};
pub use sphere::{sphere_position, sphere_positions};
