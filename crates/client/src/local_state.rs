//! Legacy local snapshot.
//!
//! Earlier releases persisted the whole ledger as a single JSON document on
//! disk. The backend is the source of truth now, but the document format is
//! kept readable and writable so existing files can still be imported and
//! exported. Dates serialize as ISO `YYYY-MM-DD` strings.

use std::{fs, path::Path};

use api_types::budget::BudgetView;
use api_types::goal::GoalView;
use api_types::transaction::TransactionView;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_STATE_PATH: &str = "config/masruf_state.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalSnapshot {
    #[serde(default)]
    pub transactions: Vec<TransactionView>,
    #[serde(default)]
    pub budgets: Vec<BudgetView>,
    #[serde(default)]
    pub goals: Vec<GoalView>,
}

impl LocalSnapshot {
    /// A missing file reads as an empty snapshot.
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }
}

pub fn default_state_path() -> &'static str {
    DEFAULT_STATE_PATH
}
