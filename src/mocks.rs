//! Mock response cache
//!
//! Loads pre-recorded API response bodies from the content root, once, before
//! the listener starts. Slots left unset fall back to built-in literals in
//! the router.

use crate::logger;
use std::path::Path;
use tokio::fs;

// Locations of the pre-recorded response files, relative to the content root.
const GAME_SERVICE_FILE: &str = "mock/gameService.txt";
const RELOAD_BALANCE_FILE: &str = "mock/reloadBalance.txt";
const SAVE_SETTINGS_FILE: &str = "mock/saveSettings.txt";
const STATS_FILE: &str = "mock/stats.txt";

/// Pre-recorded mock bodies. Write-once at startup, read-only afterwards.
#[derive(Debug, Default)]
pub struct MockStore {
    pub game_service: Option<String>,
    pub reload_balance: Option<String>,
    pub save_settings: Option<String>,
    pub stats: Option<String>,
}

impl MockStore {
    /// Load all four slots from `root`. A missing or unreadable file leaves
    /// its slot unset; the server still starts.
    pub async fn load(root: &Path) -> Self {
        Self {
            game_service: load_slot(root, GAME_SERVICE_FILE).await,
            reload_balance: load_slot(root, RELOAD_BALANCE_FILE).await,
            save_settings: load_slot(root, SAVE_SETTINGS_FILE).await,
            stats: load_slot(root, STATS_FILE).await,
        }
    }

    /// Number of slots that were actually loaded from disk.
    pub fn loaded_count(&self) -> usize {
        [
            &self.game_service,
            &self.reload_balance,
            &self.save_settings,
            &self.stats,
        ]
        .iter()
        .filter(|slot| slot.is_some())
        .count()
    }
}

async fn load_slot(root: &Path, rel: &str) -> Option<String> {
    match fs::read_to_string(root.join(rel)).await {
        Ok(content) => Some(content),
        Err(e) => {
            logger::log_warning(&format!("Mock file '{rel}' not loaded: {e}"));
            None
        }
    }
}
