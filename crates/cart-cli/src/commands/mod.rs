//! Command handler modules for the `cart` CLI.
//!
//! Shared setup (config loading, session opening) lives here.
//! Command-specific logic lives in the submodules.

pub mod cart;
pub mod config;
pub mod dialog;
pub mod project;

use anyhow::{Context, Result};
use cart_config::{load_layered_yaml, report_unused_keys, CartConfig, UnusedKeyPolicy};
use cart_view::CartSession;
use std::path::Path;
use tracing::{info, warn};

use crate::session_file::SessionFile;

pub type Session = CartSession<SessionFile>;

/// Load layered config (defaults when no paths are given) and warn about
/// keys nothing reads.
pub fn load_config(paths: &[String]) -> Result<CartConfig> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered_yaml(&path_refs)?;

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    for pointer in &report.unused_leaf_pointers {
        warn!(%pointer, "config key is not used");
    }

    let cfg = CartConfig::from_config_json(&loaded.config_json)
        .context("invalid cart configuration")?;
    info!(
        config_hash = %loaded.config_hash,
        layers = paths.len(),
        storage_key = %cfg.storage_key,
        "config loaded"
    );
    Ok(cfg)
}

pub fn open_session(session_path: &Path, config_paths: &[String]) -> Result<Session> {
    let cfg = load_config(config_paths)?;
    let storage = SessionFile::open(session_path)?;
    info!(session = %storage.path().display(), "session opened");
    Ok(CartSession::new(storage, cfg))
}

/// `key=value` with `none` for absent values.
pub fn opt<T: std::fmt::Display>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "none".to_string())
}
