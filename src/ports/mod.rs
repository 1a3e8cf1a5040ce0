pub mod config_port;
pub mod noise_port;
pub mod state_port;
