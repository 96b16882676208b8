use crate::share::Share;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Append-only store of shares keyed by sequential ids starting at 1.
///
/// Stands in for the storage contract shares were written to: every stored
/// share gets the next id, and ids outside `1..=shares_count()` do not exist.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct ShareLedger {
    shares: Vec<Share>,
}

impl ShareLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a share and return its id.
    pub fn store_share(&mut self, share: Share) -> u64 {
        let x = share.x();
        self.shares.push(share);
        let id = self.shares_count();
        info!(share_id = id, x, "share stored");
        id
    }

    pub fn get_share(&self, id: u64) -> Result<Share> {
        if id == 0 || id > self.shares_count() {
            return Err(anyhow!("share {} does not exist", id));
        }
        Ok(self.shares[(id - 1) as usize].clone())
    }

    /// Fetch several shares, failing on the first missing id.
    pub fn get_shares(&self, ids: &[u64]) -> Result<Vec<Share>> {
        ids.iter().map(|&id| self.get_share(id)).collect()
    }

    pub fn shares_count(&self) -> u64 {
        self.shares.len() as u64
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &Share)> {
        self.shares
            .iter()
            .enumerate()
            .map(|(idx, share)| (idx as u64 + 1, share))
    }

    /// Load a ledger file. A missing file is an empty ledger.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ledger '{}'", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed ledger '{}'", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write ledger '{}'", path.display()))
    }
}
