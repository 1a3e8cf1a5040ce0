//! Append-only record of the price path and trade markers.
//!
//! In-memory only: the log exists for the lifetime of one session and is not
//! persisted across restarts. Insertion order is the timeline.

/// A trade marker: the tick at which the trade executed and its price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeEvent {
    pub time_index: usize,
    pub price: f64,
}

/// Price history plus buy/sell markers, all append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog {
    price_history: Vec<f64>,
    buy_events: Vec<TradeEvent>,
    sell_events: Vec<TradeEvent>,
}

impl EventLog {
    /// Create a log seeded with the initial price at tick 0.
    pub fn new(initial_price: f64) -> Self {
        EventLog {
            price_history: vec![initial_price],
            buy_events: Vec::new(),
            sell_events: Vec::new(),
        }
    }

    pub fn record_price(&mut self, price: f64) {
        self.price_history.push(price);
    }

    /// Record a buy at `time_index`. The caller passes the current tick,
    /// i.e. [`last_index`](EventLog::last_index) at execution time.
    pub fn record_buy(&mut self, time_index: usize, price: f64) {
        self.buy_events.push(TradeEvent { time_index, price });
    }

    pub fn record_sell(&mut self, time_index: usize, price: f64) {
        self.sell_events.push(TradeEvent { time_index, price });
    }

    pub fn price_history(&self) -> &[f64] {
        &self.price_history
    }

    pub fn buy_events(&self) -> &[TradeEvent] {
        &self.buy_events
    }

    pub fn sell_events(&self) -> &[TradeEvent] {
        &self.sell_events
    }

    /// The current tick index (the history is never empty).
    pub fn last_index(&self) -> usize {
        self.price_history.len() - 1
    }
}
