//! Cash and share accounting with trade validation.
//!
//! Cash is stored rounded to 2 decimal places after every arithmetic update,
//! mirroring currency precision. Repeated small trades can therefore
//! accumulate rounding drift; that behavior is intentional and covered by
//! tests.

use super::error::MarketSimError;

/// Round a currency amount to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The `{cash, shares}` pair emitted after every ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub cash: f64,
    pub shares: u64,
}

/// Holds the cash balance and share count for the single simulated account.
///
/// All mutation goes through [`buy`](Ledger::buy) and [`sell`](Ledger::sell);
/// a rejected trade leaves both balances untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    cash: f64,
    shares: u64,
}

impl Ledger {
    pub fn new(initial_cash: f64, initial_shares: u64) -> Self {
        Ledger {
            cash: round2(initial_cash),
            shares: initial_shares,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn shares(&self) -> u64 {
        self.shares
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cash: self.cash,
            shares: self.shares,
        }
    }

    /// Buy `quantity` shares at `unit_price`.
    ///
    /// Fails with `InvalidQuantity` for a non-positive quantity and
    /// `InsufficientFunds` when the total cost exceeds available cash.
    pub fn buy(&mut self, quantity: i64, unit_price: f64) -> Result<Snapshot, MarketSimError> {
        let quantity = validate_quantity(quantity)?;
        let cost = unit_price * quantity as f64;
        if cost > self.cash {
            return Err(MarketSimError::InsufficientFunds {
                cost,
                cash: self.cash,
            });
        }
        self.cash = round2(self.cash - cost);
        self.shares += quantity;
        Ok(self.snapshot())
    }

    /// Sell `quantity` shares at `unit_price`.
    ///
    /// Fails with `InvalidQuantity` for a non-positive quantity and
    /// `InsufficientShares` when the quantity exceeds the held share count.
    pub fn sell(&mut self, quantity: i64, unit_price: f64) -> Result<Snapshot, MarketSimError> {
        let quantity = validate_quantity(quantity)?;
        if quantity > self.shares {
            return Err(MarketSimError::InsufficientShares {
                requested: quantity,
                held: self.shares,
            });
        }
        let revenue = unit_price * quantity as f64;
        self.cash = round2(self.cash + revenue);
        self.shares -= quantity;
        Ok(self.snapshot())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(10000.0, 0)
    }
}

fn validate_quantity(quantity: i64) -> Result<u64, MarketSimError> {
    if quantity <= 0 {
        return Err(MarketSimError::InvalidQuantity {
            reason: format!("quantity must be a positive integer, got {quantity}"),
        });
    }
    Ok(quantity as u64)
}
