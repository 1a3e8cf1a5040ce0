//! JSON file persistence adapter.
//!
//! The durable record is a single JSON object:
//! `{ "cash": <number>, "shares": <integer>, "stock_price": <number> }`.
//! Saves write a sibling temp file and rename it over the target so a
//! concurrent or interrupted save never exposes a partial record.

use crate::domain::error::MarketSimError;
use crate::ports::state_port::{SavedState, StatePort};
use std::fs;
use std::path::PathBuf;

pub struct JsonStateAdapter {
    path: PathBuf,
}

impl JsonStateAdapter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StatePort for JsonStateAdapter {
    fn load(&self) -> SavedState {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => SavedState::default(),
        }
    }

    fn save(&self, state: &SavedState) -> Result<(), MarketSimError> {
        let json = serde_json::to_string(state).map_err(|e| MarketSimError::Persistence {
            reason: format!("serialize state: {e}"),
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| MarketSimError::Persistence {
            reason: format!("write {}: {e}", tmp.display()),
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| MarketSimError::Persistence {
            reason: format!("rename {} -> {}: {e}", tmp.display(), self.path.display()),
        })?;
        Ok(())
    }
}
