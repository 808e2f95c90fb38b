use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PassVaultError, Result};

/// A stored credential: where, who, and the secret itself.
///
/// `id` is assigned at creation and never changes. The password is a
/// retrievable secret, stored verbatim, never a hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: String,
    pub site: String,
    pub username: String,
    pub password: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    pub fn new(
        site: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            site: site.into(),
            username: username.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }

    /// The site as an openable URL: bare hostnames get an `https://` prefix.
    pub fn site_url(&self) -> String {
        if self.site.starts_with("http") {
            self.site.clone()
        } else {
            format!("https://{}", self.site)
        }
    }
}

impl std::fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The password never appears in rendered output
        write!(f, "{} ({})", self.site, self.username)
    }
}

/// The draft form bound to the create/edit inputs. Transient session state,
/// distinct from committed records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialForm {
    pub site: String,
    pub username: String,
    pub password: String,
}

impl CredentialForm {
    pub fn new(
        site: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Validate and normalize the form for saving.
    ///
    /// `site` and `username` are trimmed; the password is kept verbatim so
    /// intentional whitespace in secrets survives. All three must be
    /// non-empty after that.
    pub fn validated(&self) -> Result<CredentialForm> {
        let site = self.site.trim();
        let username = self.username.trim();
        if site.is_empty() || username.is_empty() || self.password.is_empty() {
            return Err(PassVaultError::Validation);
        }
        Ok(CredentialForm {
            site: site.to_string(),
            username: username.to_string(),
            password: self.password.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = CredentialForm::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_gets_unique_ids() {
        let a = CredentialRecord::new("example.com", "alice", "p@ss1");
        let b = CredentialRecord::new("example.com", "alice", "p@ss1");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn site_url_prefixes_bare_hosts() {
        let record = CredentialRecord::new("example.com", "alice", "x");
        assert_eq!(record.site_url(), "https://example.com");

        let record = CredentialRecord::new("http://example.com", "alice", "x");
        assert_eq!(record.site_url(), "http://example.com");

        let record = CredentialRecord::new("https://example.com", "alice", "x");
        assert_eq!(record.site_url(), "https://example.com");
    }

    #[test]
    fn validated_trims_site_and_username_but_not_password() {
        let form = CredentialForm::new("  example.com  ", " alice ", "  spaced pass  ");
        let validated = form.validated().unwrap();
        assert_eq!(validated.site, "example.com");
        assert_eq!(validated.username, "alice");
        assert_eq!(validated.password, "  spaced pass  ");
    }

    #[test]
    fn validated_rejects_empty_fields() {
        assert!(CredentialForm::new("", "alice", "x").validated().is_err());
        assert!(CredentialForm::new("example.com", "   ", "x").validated().is_err());
        assert!(CredentialForm::new("example.com", "alice", "").validated().is_err());
    }

    #[test]
    fn whitespace_only_password_is_accepted() {
        // Whitespace is a legal secret; only truly empty passwords fail.
        let form = CredentialForm::new("example.com", "alice", "   ");
        assert!(form.validated().is_ok());
    }

    #[test]
    fn record_without_created_at_still_parses() {
        // Blobs written before the timestamp existed must stay readable.
        let json = r#"{"id":"1","site":"example.com","username":"alice","password":"x"}"#;
        let record: CredentialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.site, "example.com");
    }

    #[test]
    fn display_never_shows_password() {
        let record = CredentialRecord::new("example.com", "alice", "hunter2");
        let rendered = format!("{}", record);
        assert!(!rendered.contains("hunter2"));
    }
}
