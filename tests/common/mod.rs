#![allow(dead_code)]

use marketsim::domain::error::MarketSimError;
use marketsim::domain::price_process::GbmParams;
use marketsim::domain::session::Session;
use marketsim::ports::noise_port::NoisePort;
use marketsim::ports::state_port::{SavedState, StatePort};
use std::sync::{Arc, Mutex};

/// Noise stub replaying a fixed sequence of draws, then zeros.
pub struct FixedNoise {
    draws: Vec<f64>,
    next: usize,
}

impl FixedNoise {
    pub fn new(draws: Vec<f64>) -> Self {
        FixedNoise { draws, next: 0 }
    }

    pub fn zeros() -> Self {
        FixedNoise::new(Vec::new())
    }
}

impl NoisePort for FixedNoise {
    fn next_standard_normal(&mut self) -> f64 {
        let z = self.draws.get(self.next).copied().unwrap_or(0.0);
        self.next += 1;
        z
    }
}

/// In-memory state port recording every save for inspection.
pub struct MockStatePort {
    initial: SavedState,
    saved: Arc<Mutex<Vec<SavedState>>>,
    fail_saves: bool,
}

impl MockStatePort {
    pub fn new(initial: SavedState) -> (Self, Arc<Mutex<Vec<SavedState>>>) {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let port = MockStatePort {
            initial,
            saved: Arc::clone(&saved),
            fail_saves: false,
        };
        (port, saved)
    }

    pub fn failing(initial: SavedState) -> Self {
        MockStatePort {
            initial,
            saved: Arc::new(Mutex::new(Vec::new())),
            fail_saves: true,
        }
    }
}

impl StatePort for MockStatePort {
    fn load(&self) -> SavedState {
        self.initial.clone()
    }

    fn save(&self, state: &SavedState) -> Result<(), MarketSimError> {
        if self.fail_saves {
            return Err(MarketSimError::Persistence {
                reason: "mock write failure".to_string(),
            });
        }
        self.saved.lock().unwrap().push(state.clone());
        Ok(())
    }
}

/// Deterministic parameters: no drift, no noise, daily step.
pub fn flat_params() -> GbmParams {
    GbmParams {
        drift: 0.0,
        volatility: 0.0,
        time_step: 1.0 / 252.0,
    }
}

/// Open a deterministic session over a recording mock store.
pub fn open_flat_session(initial: SavedState) -> (Session, Arc<Mutex<Vec<SavedState>>>) {
    let (port, saved) = MockStatePort::new(initial);
    let session = Session::open(flat_params(), Box::new(FixedNoise::zeros()), Box::new(port));
    (session, saved)
}
