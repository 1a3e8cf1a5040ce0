pub mod file_config_adapter;
pub mod json_state_adapter;
pub mod rand_noise_adapter;
