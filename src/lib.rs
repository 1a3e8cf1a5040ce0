//! marketsim — single-instrument market simulator.
//!
//! A Geometric Brownian Motion price process, a cash/shares ledger with
//! validated trades, an append-only event log, and a JSON-file persistence
//! store, driven by a thin CLI collaborator.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
