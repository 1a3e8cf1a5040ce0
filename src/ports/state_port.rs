//! Durable session state port trait.

use crate::domain::error::MarketSimError;
use serde::{Deserialize, Serialize};

/// The durable record persisted across sessions.
///
/// Written after every successful trade and at orderly shutdown; read exactly
/// once, at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    pub cash: f64,
    pub shares: u64,
    pub stock_price: f64,
}

impl Default for SavedState {
    /// First-run values: $10,000 cash, no shares, price at 100.00.
    fn default() -> Self {
        SavedState {
            cash: 10000.0,
            shares: 0,
            stock_price: 100.0,
        }
    }
}

/// Port for loading and saving the durable session record.
///
/// `Send` is required because the interactive session is shared with a
/// background ticker thread.
pub trait StatePort: Send {
    /// Read the durable record. A missing or unparseable record yields
    /// [`SavedState::default`] — that is first-run behavior, not an error.
    fn load(&self) -> SavedState;

    /// Overwrite the durable record. No partially written state may ever be
    /// visible to a subsequent `load`.
    fn save(&self, state: &SavedState) -> Result<(), MarketSimError>;
}
