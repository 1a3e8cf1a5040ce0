//! Session orchestration: ties the price process, ledger, event log, and
//! durable state together behind explicit methods.
//!
//! Every mutation runs as one load-validate-mutate-emit unit. The session is
//! single-actor; callers that drive it from more than one thread (the
//! interactive ticker loop does) wrap it in a `Mutex` so each method executes
//! with mutual exclusion.

use super::error::MarketSimError;
use super::event_log::EventLog;
use super::ledger::{Ledger, Snapshot, round2};
use super::price_process::{GbmParams, PriceProcess};
use crate::ports::noise_port::NoisePort;
use crate::ports::state_port::{SavedState, StatePort};

/// Result of a successful trade.
///
/// Persistence is best-effort durability: a failed save never fails the
/// trade, it is carried here as a warning for the caller to surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcome {
    pub snapshot: Snapshot,
    pub persist_warning: Option<String>,
}

/// One simulation session over a single instrument.
pub struct Session {
    process: PriceProcess,
    ledger: Ledger,
    events: EventLog,
    store: Box<dyn StatePort>,
    current_price: f64,
}

impl Session {
    /// Open a session from the durable record (read exactly once, here).
    /// A missing or corrupt record starts the default first-run state.
    pub fn open(params: GbmParams, noise: Box<dyn NoisePort>, store: Box<dyn StatePort>) -> Self {
        let state = store.load();
        let current_price = round2(state.stock_price);
        Session {
            process: PriceProcess::new(state.stock_price, params, noise),
            ledger: Ledger::new(state.cash, state.shares),
            events: EventLog::new(current_price),
            store,
            current_price,
        }
    }

    /// Advance the price by one tick and record it. Returns the new price.
    pub fn tick(&mut self) -> f64 {
        let price = self.process.advance();
        self.current_price = price;
        self.events.record_price(price);
        price
    }

    /// Buy `quantity` shares at the current price.
    pub fn buy(&mut self, quantity: i64) -> Result<TradeOutcome, MarketSimError> {
        let snapshot = self.ledger.buy(quantity, self.current_price)?;
        self.events
            .record_buy(self.events.last_index(), self.current_price);
        Ok(TradeOutcome {
            snapshot,
            persist_warning: self.persist(),
        })
    }

    /// Sell `quantity` shares at the current price.
    pub fn sell(&mut self, quantity: i64) -> Result<TradeOutcome, MarketSimError> {
        let snapshot = self.ledger.sell(quantity, self.current_price)?;
        self.events
            .record_sell(self.events.last_index(), self.current_price);
        Ok(TradeOutcome {
            snapshot,
            persist_warning: self.persist(),
        })
    }

    /// Final flush at orderly shutdown, so the last price is captured even
    /// when no trade followed it. Returns a warning on failure.
    pub fn shutdown(&mut self) -> Option<String> {
        self.persist()
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn snapshot(&self) -> Snapshot {
        self.ledger.snapshot()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The record that `persist` writes.
    pub fn saved_state(&self) -> SavedState {
        SavedState {
            cash: self.ledger.cash(),
            shares: self.ledger.shares(),
            stock_price: self.current_price,
        }
    }

    fn persist(&self) -> Option<String> {
        self.store
            .save(&self.saved_state())
            .err()
            .map(|e| e.to_string())
    }
}
