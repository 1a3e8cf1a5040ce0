//! Geometric Brownian Motion price generator.
//!
//! One discrete step of the closed-form GBM solution:
//!
//! ```text
//! S' = S * exp((mu - sigma^2/2) * dt + sigma * Z * sqrt(dt))
//! ```
//!
//! The multiplicative update keeps the price strictly positive for any
//! drift, any volatility >= 0, and any time step > 0.

use super::ledger::round2;
use crate::ports::noise_port::NoisePort;

/// GBM parameters. Defaults model a daily step against an annualized
/// 252-trading-day year.
#[derive(Debug, Clone, PartialEq)]
pub struct GbmParams {
    /// Drift (mu): expected rate of return per year.
    pub drift: f64,
    /// Volatility (sigma): standard deviation of returns per year, >= 0.
    pub volatility: f64,
    /// Time step (dt): fraction of a year per tick, > 0.
    pub time_step: f64,
}

impl Default for GbmParams {
    fn default() -> Self {
        GbmParams {
            drift: 0.1,
            volatility: 0.2,
            time_step: 1.0 / 252.0,
        }
    }
}

/// Stateful price generator. The internal price stays unrounded between
/// steps; only the emitted value is rounded to 2 decimal places.
pub struct PriceProcess {
    price: f64,
    params: GbmParams,
    noise: Box<dyn NoisePort>,
}

impl PriceProcess {
    /// Create a process starting at `initial_price`.
    ///
    /// `initial_price` must be > 0, `volatility` >= 0, `time_step` > 0;
    /// callers validate at the config boundary.
    pub fn new(initial_price: f64, params: GbmParams, noise: Box<dyn NoisePort>) -> Self {
        PriceProcess {
            price: initial_price,
            params,
            noise,
        }
    }

    /// Current price, rounded to 2 decimal places.
    pub fn price(&self) -> f64 {
        round2(self.price)
    }

    /// Apply one GBM step and return the new price rounded to 2 decimal
    /// places. With zero volatility the process degenerates to pure drift.
    pub fn advance(&mut self) -> f64 {
        let GbmParams {
            drift,
            volatility,
            time_step,
        } = self.params;
        let z = self.noise.next_standard_normal();
        let exponent =
            (drift - 0.5 * volatility * volatility) * time_step + volatility * z * time_step.sqrt();
        self.price *= exponent.exp();
        round2(self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    /// Noise stub replaying a fixed sequence of draws, then zeros.
    struct FixedNoise {
        draws: Vec<f64>,
        next: usize,
    }

    impl FixedNoise {
        fn new(draws: Vec<f64>) -> Self {
            FixedNoise { draws, next: 0 }
        }
    }

    impl NoisePort for FixedNoise {
        fn next_standard_normal(&mut self) -> f64 {
            let z = self.draws.get(self.next).copied().unwrap_or(0.0);
            self.next += 1;
            z
        }
    }

    #[test]
    fn zero_drift_zero_volatility_is_stationary() {
        let params = GbmParams {
            drift: 0.0,
            volatility: 0.0,
            time_step: 1.0 / 252.0,
        };
        let mut process = PriceProcess::new(100.0, params, Box::new(FixedNoise::new(vec![])));
        for _ in 0..10 {
            assert_abs_diff_eq!(process.advance(), 100.0);
        }
    }

    #[test]
    fn zero_volatility_degenerates_to_pure_drift() {
        let params = GbmParams {
            drift: 0.1,
            volatility: 0.0,
            time_step: 1.0,
        };
        let mut process = PriceProcess::new(100.0, params, Box::new(FixedNoise::new(vec![5.0])));
        // The noise draw is multiplied by sigma = 0, so only drift applies.
        assert_abs_diff_eq!(process.advance(), round2(100.0 * 0.1f64.exp()));
    }

    #[test]
    fn advance_matches_closed_form_step() {
        let params = GbmParams::default();
        let mut process =
            PriceProcess::new(100.0, params.clone(), Box::new(FixedNoise::new(vec![1.5])));
        let expected = 100.0
            * ((params.drift - 0.5 * params.volatility * params.volatility) * params.time_step
                + params.volatility * 1.5 * params.time_step.sqrt())
            .exp();
        assert_abs_diff_eq!(process.advance(), round2(expected));
    }

    #[test]
    fn emitted_price_is_rounded_but_internal_state_is_not() {
        let params = GbmParams::default();
        let draws = vec![0.7, -0.3];
        let mut stepped =
            PriceProcess::new(100.0, params.clone(), Box::new(FixedNoise::new(draws.clone())));
        stepped.advance();
        stepped.advance();

        // Recompute both steps without intermediate rounding.
        let step = |price: f64, z: f64| {
            price
                * ((params.drift - 0.5 * params.volatility * params.volatility) * params.time_step
                    + params.volatility * z * params.time_step.sqrt())
                .exp()
        };
        let unrounded = step(step(100.0, draws[0]), draws[1]);
        assert_abs_diff_eq!(stepped.price(), round2(unrounded));
    }

    #[test]
    fn extreme_negative_draw_keeps_price_positive() {
        let params = GbmParams {
            drift: 0.0,
            volatility: 3.0,
            time_step: 1.0,
        };
        let mut process = PriceProcess::new(0.01, params, Box::new(FixedNoise::new(vec![-8.0])));
        process.advance();
        // The emitted value may round to 0.00 but the process itself never
        // reaches or crosses zero.
        assert!(process.price > 0.0);
    }

    proptest! {
        #[test]
        fn price_stays_positive(
            initial in 0.01f64..10_000.0,
            drift in -1.0f64..1.0,
            volatility in 0.0f64..2.0,
            time_step in 1.0e-4f64..1.0,
            draws in proptest::collection::vec(-6.0f64..6.0, 1..50),
        ) {
            let params = GbmParams { drift, volatility, time_step };
            let mut process = PriceProcess::new(initial, params, Box::new(FixedNoise::new(draws.clone())));
            for _ in 0..draws.len() {
                process.advance();
                prop_assert!(process.price > 0.0);
            }
        }
    }
}
