//! Session wiring: the PIN gate in front of the vault store.
//!
//! `VaultSession` owns both components and enforces the access contract:
//! the store is only constructed once the gate reaches `Unlocked`, and
//! every vault access re-checks the gate first. It also owns the lockout
//! ticker lifecycle, starting the countdown when the gate locks out.
//!
//! All operations are discrete events that run to completion; the one
//! second countdown tick is the only time-based suspension point.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{OwnedRwLockMappedWriteGuard, OwnedRwLockWriteGuard, RwLock};
use tracing::info;

use crate::clipboard::Clipboard;
use crate::config::VaultConfig;
use crate::error::{PassVaultError, Result};
use crate::gate::{GateStatus, LockoutTicker, PinGate, SubmitOutcome};
use crate::notify::{Notifier, NotifyLevel};
use crate::vault::{VaultFile, VaultStore};

/// Write guard over the unlocked store, handed out by [`VaultSession::vault`].
pub type VaultGuard = OwnedRwLockMappedWriteGuard<Option<VaultStore>, VaultStore>;

pub struct VaultSession {
    config: VaultConfig,
    data_dir: PathBuf,
    gate: Arc<RwLock<PinGate>>,
    ticker: LockoutTicker,
    store: Arc<RwLock<Option<VaultStore>>>,
    notifier: Arc<dyn Notifier>,
    clipboard: Arc<dyn Clipboard>,
}

impl VaultSession {
    pub fn new(
        config: VaultConfig,
        data_dir: impl Into<PathBuf>,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        let gate = PinGate::from_config(&config);
        Self {
            config,
            data_dir: data_dir.into(),
            gate: Arc::new(RwLock::new(gate)),
            ticker: LockoutTicker::new(),
            store: Arc::new(RwLock::new(None)),
            notifier,
            clipboard,
        }
    }

    pub async fn status(&self) -> GateStatus {
        self.gate.read().await.status()
    }

    pub async fn attempts_remaining(&self) -> u8 {
        self.gate.read().await.attempts_remaining()
    }

    /// Seconds left on the lockout, for the host's "Wait Ns" display.
    pub async fn lockout_remaining_secs(&self) -> u32 {
        self.gate.read().await.lockout_remaining_secs()
    }

    /// Submit a PIN candidate and emit the matching notification.
    ///
    /// A `WrongPin` or `LockedOut` outcome also tells the host to clear its
    /// PIN input field. Entering lockout starts the countdown task; it stops
    /// on its own when the gate leaves `LockedOut`.
    pub async fn submit_pin(&self, candidate: &str) -> SubmitOutcome {
        let outcome = self.gate.write().await.submit(candidate);
        let duration = self.config.gate_toast_duration_ms;

        match outcome {
            SubmitOutcome::Unlocked => {
                self.notifier
                    .notify(NotifyLevel::Success, "Welcome back!", duration);
                self.open_store().await;
            }
            SubmitOutcome::WrongPin { tries_left } => {
                let noun = if tries_left == 1 { "try" } else { "tries" };
                self.notifier.notify(
                    NotifyLevel::Error,
                    &format!("Wrong PIN! {} {} left", tries_left, noun),
                    duration,
                );
            }
            SubmitOutcome::LockedOut { .. } => {
                self.notifier.notify(
                    NotifyLevel::Error,
                    &format!("Too many tries! Wait {}s", self.config.lockout_secs),
                    duration,
                );
                self.ticker.start(self.gate.clone()).await;
            }
            SubmitOutcome::Ignored => {}
        }

        outcome
    }

    /// Access the vault store. Refused until the gate is `Unlocked`.
    pub async fn vault(&self) -> Result<VaultGuard> {
        if !self.gate.read().await.is_unlocked() {
            return Err(PassVaultError::NotUnlocked);
        }

        let guard = self.store.clone().write_owned().await;
        OwnedRwLockWriteGuard::try_map(guard, |store| store.as_mut())
            .map_err(|_| PassVaultError::NotUnlocked)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn open_store(&self) {
        let mut store = self.store.write().await;
        if store.is_some() {
            return;
        }

        info!(dir = %self.data_dir.display(), "opening vault store");
        *store = Some(VaultStore::open(
            VaultFile::in_dir(&self.data_dir),
            self.notifier.clone(),
            self.clipboard.clone(),
            self.config.vault_toast_duration_ms,
        ));
    }
}
