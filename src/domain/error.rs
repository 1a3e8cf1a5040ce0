//! Domain error types.

/// Top-level error type for marketsim.
#[derive(Debug, thiserror::Error)]
pub enum MarketSimError {
    #[error("invalid quantity: {reason}")]
    InvalidQuantity { reason: String },

    #[error("insufficient funds: cost {cost:.2} exceeds cash {cash:.2}")]
    InsufficientFunds { cost: f64, cash: f64 },

    #[error("insufficient shares: tried to sell {requested}, holding {held}")]
    InsufficientShares { requested: u64, held: u64 },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("persistence error: {reason}")]
    Persistence { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MarketSimError {
    /// True for errors that reject a single trade and leave all state
    /// untouched. The interactive loop surfaces these as transient notices
    /// rather than terminating.
    pub fn is_rejected_trade(&self) -> bool {
        matches!(
            self,
            MarketSimError::InvalidQuantity { .. }
                | MarketSimError::InsufficientFunds { .. }
                | MarketSimError::InsufficientShares { .. }
        )
    }
}

impl From<&MarketSimError> for std::process::ExitCode {
    fn from(err: &MarketSimError) -> Self {
        let code: u8 = match err {
            MarketSimError::Io(_) => 1,
            MarketSimError::ConfigParse { .. } | MarketSimError::ConfigInvalid { .. } => 2,
            MarketSimError::Persistence { .. } => 3,
            MarketSimError::InvalidQuantity { .. }
            | MarketSimError::InsufficientFunds { .. }
            | MarketSimError::InsufficientShares { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
