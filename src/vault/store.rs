//! VaultStore - the CRUD surface over the credential records.
//!
//! The store owns the in-memory record list, the draft form, and the
//! edit session. Durable storage always reflects the last successful
//! mutation: every create, update, and delete serializes the full record
//! list back to disk before the operation is considered complete
//! (write-through, no batching).

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clipboard::Clipboard;
use crate::error::Result;
use crate::notify::{Notifier, NotifyLevel};
use crate::vault::record::{CredentialForm, CredentialRecord};
use crate::vault::storage::VaultFile;

pub struct VaultStore {
    file: VaultFile,
    records: Vec<CredentialRecord>,
    editing_id: Option<String>,
    draft: CredentialForm,
    notifier: Arc<dyn Notifier>,
    clipboard: Arc<dyn Clipboard>,
    toast_duration_ms: u64,
}

impl VaultStore {
    /// Open the store, loading whatever the vault file holds.
    ///
    /// A corrupt or unreadable file never prevents startup: the failure is
    /// logged and notified, and the store starts empty. The corrupt file is
    /// left in place; the next successful save overwrites it.
    pub fn open(
        file: VaultFile,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
        toast_duration_ms: u64,
    ) -> Self {
        let records = match file.load() {
            Ok(records) => records,
            Err(e) => {
                warn!("failed to load vault file: {}", e);
                notifier.notify(
                    NotifyLevel::Error,
                    "Failed to load passwords",
                    toast_duration_ms,
                );
                Vec::new()
            }
        };

        Self {
            file,
            records,
            editing_id: None,
            draft: CredentialForm::default(),
            notifier,
            clipboard,
            toast_duration_ms,
        }
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn draft(&self) -> &CredentialForm {
        &self.draft
    }

    /// Mutable access to the draft form; hosts bind their inputs here.
    pub fn draft_mut(&mut self) -> &mut CredentialForm {
        &mut self.draft
    }

    pub fn set_draft(&mut self, form: CredentialForm) {
        self.draft = form;
    }

    /// Id of the record currently in edit, if any.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Commit the draft: update the record in edit, or append a new one.
    ///
    /// Validation failure leaves everything untouched (no mutation, no
    /// write) and returns the error after notifying. On success the full
    /// record list is persisted and the draft is reset.
    pub fn save(&mut self) -> Result<()> {
        let form = match self.draft.validated() {
            Ok(form) => form,
            Err(e) => {
                self.notifier.notify(
                    NotifyLevel::Error,
                    "All fields are required",
                    self.toast_duration_ms,
                );
                return Err(e);
            }
        };

        match self.editing_id.take() {
            Some(id) => match self.records.iter_mut().find(|r| r.id == id) {
                Some(record) => {
                    record.site = form.site;
                    record.username = form.username;
                    record.password = form.password;
                    info!(id = %id, "updated credential record");
                    self.persist();
                    self.notifier.notify(
                        NotifyLevel::Success,
                        "Password updated!",
                        self.toast_duration_ms,
                    );
                }
                None => {
                    // The edited record vanished underneath us. Keep the
                    // user's input by saving it as a new record.
                    warn!(id = %id, "edit target no longer exists, saving as new");
                    self.append_record(form);
                }
            },
            None => self.append_record(form),
        }

        self.draft.clear();
        Ok(())
    }

    fn append_record(&mut self, form: CredentialForm) {
        let record = CredentialRecord::new(form.site, form.username, form.password);
        debug!(id = %record.id, "created credential record");
        self.records.push(record);
        self.persist();
        self.notifier.notify(
            NotifyLevel::Success,
            "Password saved!",
            self.toast_duration_ms,
        );
    }

    /// Start editing the given record: copy its fields into the draft.
    ///
    /// A stale id is silently ignored.
    pub fn begin_edit(&mut self, id: &str) {
        match self.records.iter().find(|r| r.id == id) {
            Some(record) => {
                self.draft = CredentialForm::new(
                    record.site.clone(),
                    record.username.clone(),
                    record.password.clone(),
                );
                self.editing_id = Some(id.to_string());
                debug!(id = %id, "editing credential record");
            }
            None => {
                debug!(id = %id, "begin_edit on unknown id ignored");
            }
        }
    }

    /// Abandon the edit session. Nothing is persisted.
    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.draft.clear();
    }

    /// Remove the record with the given id and persist.
    ///
    /// The yes/no confirmation belongs to the caller; by the time this is
    /// invoked the decision has been made. A stale id is a no-op.
    pub fn delete(&mut self, id: &str) {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);

        if self.records.len() == before {
            debug!(id = %id, "delete on unknown id ignored");
            return;
        }

        if self.editing_id.as_deref() == Some(id) {
            self.cancel_edit();
        }

        info!(id = %id, "deleted credential record");
        self.persist();
        self.notifier.notify(
            NotifyLevel::Success,
            "Password deleted!",
            self.toast_duration_ms,
        );
    }

    /// Copy a field value to the clipboard collaborator. Never touches
    /// the records.
    pub fn copy(&self, value: &str) {
        match self.clipboard.copy(value) {
            Ok(()) => {
                self.notifier.notify(
                    NotifyLevel::Success,
                    "Copied to clipboard!",
                    self.toast_duration_ms,
                );
            }
            Err(e) => {
                warn!("clipboard copy failed: {}", e);
                self.notifier.notify(
                    NotifyLevel::Error,
                    "Failed to copy to clipboard",
                    self.toast_duration_ms,
                );
            }
        }
    }

    /// Write-through: serialize the full record list to disk.
    ///
    /// Failures are reported via notification and otherwise swallowed;
    /// there is no write-failure recovery, the in-memory state stands.
    fn persist(&self) {
        if let Err(e) = self.file.save(&self.records) {
            warn!("failed to persist vault: {}", e);
            self.notifier.notify(
                NotifyLevel::Error,
                "Failed to save passwords",
                self.toast_duration_ms,
            );
        }
    }
}

impl std::fmt::Debug for VaultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultStore")
            .field("records", &self.records.len())
            .field("editing_id", &self.editing_id)
            .finish()
    }
}
