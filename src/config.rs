use serde::{Deserialize, Serialize};

/// Number of PIN attempts allowed before the gate locks out.
pub const DEFAULT_MAX_ATTEMPTS: u8 = 3;

/// Lockout duration in seconds after the attempts are exhausted.
pub const DEFAULT_LOCKOUT_SECS: u32 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// The PIN guarding the vault. Stored and compared in plaintext;
    /// this gate is a brute-force delay, not cryptographic protection.
    pub pin: String,
    pub max_attempts: u8,
    pub lockout_secs: u32,
    /// Notification duration on the PIN screen.
    pub gate_toast_duration_ms: u64,
    /// Notification duration inside the unlocked vault.
    pub vault_toast_duration_ms: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            pin: "627426".to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            lockout_secs: DEFAULT_LOCKOUT_SECS,
            gate_toast_duration_ms: 3000,
            vault_toast_duration_ms: 2000,
        }
    }
}
