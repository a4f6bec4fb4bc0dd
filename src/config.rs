use std::path::PathBuf;

/// Data file used when `VEHICLES_CSV` is not set at build time.
pub const DEFAULT_DATA_PATH: &str = "vehicles_us.csv";

/// Startup configuration. The data path is fixed when the crate is compiled.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub window_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(option_env!("VEHICLES_CSV").unwrap_or(DEFAULT_DATA_PATH)),
            window_title: "Used Vehicle Sales Explorer".to_string(),
            inner_size: [1200.0, 900.0],
            min_inner_size: [640.0, 480.0],
        }
    }
}
