use crate::cli::Args;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub engine: String,
    pub max_file_size: usize,
    pub solve_timeout_ms: u64,
    pub tessdata_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 65435,
            engine: "ocrs".to_string(),
            max_file_size: 5 * 1024 * 1024,
            solve_timeout_ms: 15_000,
            tessdata_path: None,
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
            engine: args.engine.clone(),
            max_file_size: args.max_file_size,
            solve_timeout_ms: args.solve_timeout_ms,
            tessdata_path: args.tessdata_path.clone(),
        }
    }
}
