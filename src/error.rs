use thiserror::Error;

#[derive(Error, Debug)]
pub enum PassVaultError {
    /// A required form field was empty on save.
    #[error("All fields are required")]
    Validation,

    /// The stored vault data exists but could not be parsed.
    /// Recovered by starting with an empty vault.
    #[error("Vault data is corrupted: {0}")]
    StorageCorrupt(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// The PIN gate has not reached `Unlocked` yet.
    #[error("Vault is locked")]
    NotUnlocked,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PassVaultError>;
