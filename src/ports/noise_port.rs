//! Random noise port trait.
//!
//! The price process draws its stochastic term through this seam so that
//! production code can use a real RNG while tests substitute fixed draws.

/// Source of independent standard-normal variates.
///
/// `Send` is required because the interactive session runs the price ticker
/// on a background thread.
pub trait NoisePort: Send {
    /// Draw the next standard-normal variate. Draws are independent across calls.
    fn next_standard_normal(&mut self) -> f64;
}
