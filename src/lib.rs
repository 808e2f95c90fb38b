//! passvault - a local, single-user secrets vault.
//!
//! A PIN gate with bounded retries and a timed lockout stands in front of
//! a credential store (site, username, password) persisted as plaintext
//! JSON. Rendering, toasts, and the system clipboard are the host's
//! business, reached through the `Notifier` and `Clipboard` seams.
//!
//! ```no_run
//! use std::sync::Arc;
//! use passvault::{MemoryClipboard, TracingNotifier, VaultConfig, VaultSession};
//!
//! # async fn demo() -> passvault::Result<()> {
//! let session = VaultSession::new(
//!     VaultConfig::default(),
//!     "/tmp/passvault",
//!     Arc::new(TracingNotifier),
//!     Arc::new(MemoryClipboard::new()),
//! );
//! session.submit_pin("627426").await;
//! let mut vault = session.vault().await?;
//! vault.draft_mut().site = "example.com".into();
//! # Ok(())
//! # }
//! ```

pub mod clipboard;
pub mod config;
pub mod error;
pub mod gate;
pub mod notify;
pub mod session;
pub mod vault;

pub use clipboard::{Clipboard, MemoryClipboard, NullClipboard};
pub use config::VaultConfig;
pub use error::{PassVaultError, Result};
pub use gate::{GateStatus, LockoutTicker, PinGate, SubmitOutcome};
pub use notify::{MemoryNotifier, Notifier, NotifyEvent, NotifyLevel, TracingNotifier};
pub use session::{VaultGuard, VaultSession};
pub use vault::{CredentialForm, CredentialRecord, VaultFile, VaultStore, VAULT_FILE_NAME};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for hosts that don't bring their own subscriber.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passvault=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
