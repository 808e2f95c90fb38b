//! Credential vault: the record set, its durable JSON copy, and the
//! create/update/delete/edit-session logic.
//!
//! Every successful mutation is written through to disk before the
//! operation is considered complete. Records and the PIN are stored in
//! plaintext; see `storage` for why that weakness is preserved.

pub mod record;
pub mod storage;
pub mod store;

pub use record::{CredentialForm, CredentialRecord};
pub use storage::{VaultFile, VAULT_FILE_NAME};
pub use store::VaultStore;
