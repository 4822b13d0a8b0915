use confy::ConfyError;
use serde::{Deserialize, Serialize};
use std::env::home_dir;
use std::path::PathBuf;

const LAZYBLOCK_CLI: &str = "lazyblock-cli";

#[derive(Serialize, Deserialize)]
pub struct LazyBlockConfig {
    pub blocks_root: String,
}

impl Default for LazyBlockConfig {
    fn default() -> Self {
        let blocks_root = home_dir()
            .map(|p| p.join("lazyblock").join("blocks"))
            .unwrap_or_else(|| PathBuf::from("lazyblock/blocks"));

        Self {
            blocks_root: blocks_root.display().to_string(),
        }
    }
}

pub fn blocks_root() -> PathBuf {
    let config: Result<LazyBlockConfig, ConfyError> = confy::load(LAZYBLOCK_CLI, None);
    match config {
        Ok(config) => PathBuf::from(config.blocks_root),
        _ => {
            eprintln!("Error: Problem loading config. Exiting...");
            std::process::exit(exitcode::CONFIG);
        }
    }
}
