//! Environment-backed configuration
//!
//! Loaded once at process start and passed by reference into components
//! that need network access. Credential presence is NOT validated here;
//! the MiniMax client checks lazily at call time so no network call is
//! ever attempted with missing credentials.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "MiniMax-M2";
pub const DEFAULT_BENCHMARKS_PATH: &str = "benchmarks.json";
pub const DEFAULT_MEMO_PATH: &str = "diligence_memo.md";

#[derive(Debug, Clone)]
pub struct Config {
    pub minimax_api_key: String,
    pub minimax_group_id: String,
    pub model: String,
    pub benchmarks_path: PathBuf,
    pub memo_path: PathBuf,
}

impl Config {
    /// Snapshot the environment. Missing credentials become empty strings
    /// and surface as a configuration error on first model call.
    pub fn from_env() -> Self {
        Self {
            minimax_api_key: env::var("MINIMAX_API_KEY").unwrap_or_default(),
            minimax_group_id: env::var("MINIMAX_GROUP_ID").unwrap_or_default(),
            model: env::var("MINIMAX_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            benchmarks_path: env::var("BENCHMARKS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_BENCHMARKS_PATH)),
            memo_path: env::var("MEMO_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MEMO_PATH)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            minimax_api_key: String::new(),
            minimax_group_id: String::new(),
            model: DEFAULT_MODEL.to_string(),
            benchmarks_path: PathBuf::from(DEFAULT_BENCHMARKS_PATH),
            memo_path: PathBuf::from(DEFAULT_MEMO_PATH),
        }
    }
}
