//! Simulation configuration: build from a config port and validate.

use std::path::PathBuf;

use super::error::MarketSimError;
use super::price_process::GbmParams;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_STATE_FILE: &str = "marketsim.json";

/// Fully resolved simulation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub initial_price: f64,
    pub initial_cash: f64,
    pub params: GbmParams,
    /// Wall-time milliseconds between price ticks in the interactive loop.
    pub tick_ms: u64,
    pub state_file: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            initial_price: 100.0,
            initial_cash: 10000.0,
            params: GbmParams::default(),
            tick_ms: 1000,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

/// Resolve a [`SimConfig`] from `[simulation]`, `[portfolio]`, and `[state]`
/// sections, falling back to defaults for missing keys, then validate it.
pub fn build_sim_config(config: &dyn ConfigPort) -> Result<SimConfig, MarketSimError> {
    let defaults = SimConfig::default();
    let tick_ms = config.get_int("simulation", "tick_ms", defaults.tick_ms as i64);
    if tick_ms < 1 {
        return Err(invalid("simulation", "tick_ms", "must be at least 1"));
    }
    let sim = SimConfig {
        initial_price: config.get_double("simulation", "initial_price", defaults.initial_price),
        initial_cash: config.get_double("portfolio", "initial_cash", defaults.initial_cash),
        params: GbmParams {
            drift: config.get_double("simulation", "drift", defaults.params.drift),
            volatility: config.get_double("simulation", "volatility", defaults.params.volatility),
            time_step: config.get_double("simulation", "time_step", defaults.params.time_step),
        },
        tick_ms: tick_ms as u64,
        state_file: config
            .get_string("state", "file")
            .map(PathBuf::from)
            .unwrap_or(defaults.state_file),
    };
    validate_sim_config(&sim)?;
    Ok(sim)
}

fn validate_sim_config(sim: &SimConfig) -> Result<(), MarketSimError> {
    if !(sim.initial_price > 0.0) {
        return Err(invalid("simulation", "initial_price", "must be positive"));
    }
    if !sim.params.drift.is_finite() {
        return Err(invalid("simulation", "drift", "must be a finite number"));
    }
    if !(sim.params.volatility >= 0.0) || !sim.params.volatility.is_finite() {
        return Err(invalid("simulation", "volatility", "must be non-negative"));
    }
    if !(sim.params.time_step > 0.0) || !sim.params.time_step.is_finite() {
        return Err(invalid("simulation", "time_step", "must be positive"));
    }
    if !(sim.initial_cash >= 0.0) {
        return Err(invalid("portfolio", "initial_cash", "must be non-negative"));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> MarketSimError {
    MarketSimError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("{key} {reason}"),
    }
}
