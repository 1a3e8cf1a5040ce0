//! CLI definition and dispatch.
//!
//! The CLI is the reference collaborator for the core: `run` drives price
//! ticks on a background cadence and forwards trade intents from stdin,
//! `simulate` exercises the price process headlessly, `show` and `reset`
//! operate on the durable record.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_state_adapter::JsonStateAdapter;
use crate::adapters::rand_noise_adapter::RandNoiseAdapter;
use crate::domain::config_validation::{SimConfig, build_sim_config};
use crate::domain::error::MarketSimError;
use crate::domain::event_log::EventLog;
use crate::domain::price_process::PriceProcess;
use crate::domain::session::Session;
use crate::ports::noise_port::NoisePort;
use crate::ports::state_port::{SavedState, StatePort};

#[derive(Parser, Debug)]
#[command(name = "marketsim", about = "Single-instrument market simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run an interactive trading session
    Run {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Advance the price process without trading and print a path summary
    Simulate {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of price ticks to generate
        #[arg(long, default_value_t = 252)]
        ticks: u64,
        /// Seed for a reproducible path
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the persisted session state
    Show {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Reset the persisted session state to configured initial values
    Reset {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run { config } => run_session(config.as_ref()),
        Command::Simulate {
            config,
            ticks,
            seed,
        } => run_simulate(config.as_ref(), ticks, seed),
        Command::Show { config } => run_show(config.as_ref()),
        Command::Reset { config } => run_reset(config.as_ref()),
    }
}

/// Resolve the simulation config; no `--config` means all defaults.
pub fn load_sim_config(path: Option<&PathBuf>) -> Result<SimConfig, MarketSimError> {
    match path {
        Some(path) => {
            let adapter =
                FileConfigAdapter::from_file(path).map_err(|e| MarketSimError::ConfigParse {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            build_sim_config(&adapter)
        }
        None => Ok(SimConfig::default()),
    }
}

fn load_config_or_exit(path: Option<&PathBuf>) -> Result<SimConfig, ExitCode> {
    load_sim_config(path).map_err(|e| {
        eprintln!("error: {e}");
        (&e).into()
    })
}

fn run_session(config_path: Option<&PathBuf>) -> ExitCode {
    let config = match load_config_or_exit(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let store = JsonStateAdapter::new(&config.state_file);
    if !config.state_file.exists() {
        // First run: seed the durable record from the configured initial
        // values so the session opens with them.
        let seeded = SavedState {
            cash: config.initial_cash,
            shares: 0,
            stock_price: config.initial_price,
        };
        if let Err(e) = store.save(&seeded) {
            eprintln!("warning: {e}");
        }
    }

    let session = Session::open(
        config.params.clone(),
        Box::new(RandNoiseAdapter::from_entropy()),
        Box::new(store),
    );
    let snapshot = session.snapshot();
    println!(
        "price {:.2}  cash {:.2}  shares {}",
        session.current_price(),
        snapshot.cash,
        snapshot.shares
    );
    println!("commands: buy <qty>, sell <qty>, status, quit");

    let session = Arc::new(Mutex::new(session));
    let running = Arc::new(AtomicBool::new(true));

    let ticker = {
        let session = Arc::clone(&session);
        let running = Arc::clone(&running);
        let interval = Duration::from_millis(config.tick_ms);
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                thread::sleep(interval);
                session.lock().unwrap().tick();
            }
        })
    };

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if !handle_command(&session, line.trim()) {
            break;
        }
    }

    running.store(false, Ordering::Relaxed);
    ticker.join().ok();

    let mut session = session.lock().unwrap();
    if let Some(warning) = session.shutdown() {
        eprintln!("warning: {warning}");
    }
    let events = session.events();
    println!(
        "session closed after {} ticks, {} buys, {} sells",
        events.last_index(),
        events.buy_events().len(),
        events.sell_events().len()
    );
    ExitCode::SUCCESS
}

/// Handle one interactive command. Returns false when the session should end.
fn handle_command(session: &Mutex<Session>, line: &str) -> bool {
    let mut words = line.split_whitespace();
    match words.next() {
        None => true,
        Some("quit") | Some("exit") => false,
        Some("status") => {
            let session = session.lock().unwrap();
            let snapshot = session.snapshot();
            println!(
                "price {:.2}  cash {:.2}  shares {}",
                session.current_price(),
                snapshot.cash,
                snapshot.shares
            );
            true
        }
        Some(verb @ ("buy" | "sell")) => {
            let arg = words.next().unwrap_or("");
            let quantity: i64 = match arg.parse() {
                Ok(q) => q,
                Err(_) => {
                    let err = MarketSimError::InvalidQuantity {
                        reason: format!("'{arg}' is not an integer"),
                    };
                    eprintln!("trade rejected: {err}");
                    return true;
                }
            };
            let mut session = session.lock().unwrap();
            let result = if verb == "buy" {
                session.buy(quantity)
            } else {
                session.sell(quantity)
            };
            match result {
                Ok(outcome) => {
                    println!(
                        "{verb} {} at {:.2}: cash {:.2}  shares {}",
                        quantity,
                        session.current_price(),
                        outcome.snapshot.cash,
                        outcome.snapshot.shares
                    );
                    if let Some(warning) = outcome.persist_warning {
                        eprintln!("warning: {warning}");
                    }
                }
                Err(e) => eprintln!("trade rejected: {e}"),
            }
            true
        }
        Some(other) => {
            eprintln!("unknown command: {other}");
            true
        }
    }
}

fn run_simulate(config_path: Option<&PathBuf>, ticks: u64, seed: Option<u64>) -> ExitCode {
    let config = match load_config_or_exit(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let noise: Box<dyn NoisePort> = match seed {
        Some(seed) => Box::new(RandNoiseAdapter::from_seed(seed)),
        None => Box::new(RandNoiseAdapter::from_entropy()),
    };
    let mut process = PriceProcess::new(config.initial_price, config.params.clone(), noise);
    let mut log = EventLog::new(process.price());
    for _ in 0..ticks {
        log.record_price(process.advance());
    }

    let history = log.price_history();
    let low = history.iter().cloned().fold(f64::INFINITY, f64::min);
    let high = history.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    println!(
        "{} ticks: open {:.2}  close {:.2}  low {:.2}  high {:.2}",
        ticks,
        history[0],
        history[history.len() - 1],
        low,
        high
    );
    ExitCode::SUCCESS
}

fn run_show(config_path: Option<&PathBuf>) -> ExitCode {
    let config = match load_config_or_exit(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let state = JsonStateAdapter::new(&config.state_file).load();
    println!(
        "cash {:.2}  shares {}  price {:.2}",
        state.cash, state.shares, state.stock_price
    );
    ExitCode::SUCCESS
}

fn run_reset(config_path: Option<&PathBuf>) -> ExitCode {
    let config = match load_config_or_exit(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let store = JsonStateAdapter::new(&config.state_file);
    let state = SavedState {
        cash: config.initial_cash,
        shares: 0,
        stock_price: config.initial_price,
    };
    if let Err(e) = store.save(&state) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    println!(
        "reset {} to cash {:.2}  shares {}  price {:.2}",
        config.state_file.display(),
        state.cash,
        state.shares,
        state.stock_price
    );
    ExitCode::SUCCESS
}
