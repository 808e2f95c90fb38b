//! Durable vault storage: a single JSON file holding the record array.
//!
//! The file layout is deliberately simple - one named slot, a serialized
//! array of records, no versioning. Records are written in plaintext. That
//! is a known limitation of this tool, preserved on purpose: encrypting or
//! hashing would change observable behavior (stored passwords must stay
//! recoverable, and the PIN gate is only a brute-force delay).
//!
//! Writes go to a temp file first and rename into place, so a crash
//! mid-write never corrupts the previous copy.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PassVaultError, Result};
use crate::vault::record::CredentialRecord;

/// Vault file name inside the data directory.
pub const VAULT_FILE_NAME: &str = "passwords.json";

/// Handle to the on-disk vault slot.
#[derive(Debug, Clone)]
pub struct VaultFile {
    path: PathBuf,
}

impl VaultFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional location inside a data directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(VAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the stored record array.
    ///
    /// A missing file is a fresh vault and yields an empty list. An existing
    /// but unparseable file yields [`PassVaultError::StorageCorrupt`]; the
    /// store recovers from that by starting empty rather than crashing.
    pub fn load(&self) -> Result<Vec<CredentialRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no vault file, starting empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let records: Vec<CredentialRecord> = serde_json::from_str(&content)
            .map_err(|e| PassVaultError::StorageCorrupt(e.to_string()))?;

        debug!(count = records.len(), "loaded vault file");
        Ok(records)
    }

    /// Write the full record array, replacing whatever was stored before.
    pub fn save(&self, records: &[CredentialRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(records)?;

        // Write atomically (write to temp file, then rename)
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        debug!(count = records.len(), path = %self.path.display(), "vault file written");
        Ok(())
    }
}
