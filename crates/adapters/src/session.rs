//! Admin session gate adapters
//!
//! The browser original kept an authenticated flag in session storage;
//! the CLI analog is a marker file. Only the flag and a timestamp are
//! stored - never credentials. Expected credentials are injected from
//! configuration; nothing here embeds a secret.

use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use time::format_description::well_known::Rfc3339;
use trading_insights_domain::ports::{Clock, SessionError, SessionGate, SystemClock};

/// Expected admin credential pair, injected from configuration
#[derive(Clone)]
pub struct AdminCredentials {
    email: String,
    password: SecretString,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }

    fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password.expose_secret() == password
    }
}

/// File-backed session gate
///
/// A marker file records the authenticated flag between CLI invocations.
/// Without configured credentials the gate can still report and drop the
/// flag, but every login is rejected.
pub struct FileSessionGate {
    credentials: Option<AdminCredentials>,
    marker_path: PathBuf,
    clock: Box<dyn Clock>,
}

impl FileSessionGate {
    /// A gate with no expected credentials; logins always fail
    pub fn new(marker_path: impl AsRef<Path>) -> Self {
        Self {
            credentials: None,
            marker_path: marker_path.as_ref().to_path_buf(),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_credentials(
        credentials: AdminCredentials,
        marker_path: impl AsRef<Path>,
    ) -> Self {
        Self::with_clock(credentials, marker_path, Box::new(SystemClock))
    }

    pub fn with_clock(
        credentials: AdminCredentials,
        marker_path: impl AsRef<Path>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            credentials: Some(credentials),
            marker_path: marker_path.as_ref().to_path_buf(),
            clock,
        }
    }
}

impl SessionGate for FileSessionGate {
    fn login(&self, email: &str, password: &str) -> Result<bool, SessionError> {
        let matched = match &self.credentials {
            Some(expected) => expected.matches(email, password),
            None => {
                tracing::warn!("No admin credentials configured");
                false
            }
        };
        if !matched {
            tracing::warn!(email = %email, "Rejected admin login");
            return Ok(false);
        }

        if let Some(parent) = self.marker_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::Storage(e.to_string()))?;
        }

        let stamp = self
            .clock
            .now()
            .format(&Rfc3339)
            .map_err(|e| SessionError::Storage(e.to_string()))?;

        std::fs::write(&self.marker_path, format!("authenticated {}\n", stamp))
            .map_err(|e| SessionError::Storage(e.to_string()))?;

        tracing::info!("Admin session opened");
        Ok(true)
    }

    fn is_authenticated(&self) -> Result<bool, SessionError> {
        match std::fs::metadata(&self.marker_path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SessionError::Storage(e.to_string())),
        }
    }

    fn logout(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.marker_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(e.to_string())),
        }
    }
}

/// In-memory session gate for tests
pub struct InMemorySessionGate {
    credentials: AdminCredentials,
    authenticated: RwLock<bool>,
}

impl InMemorySessionGate {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self {
            credentials,
            authenticated: RwLock::new(false),
        }
    }
}

impl SessionGate for InMemorySessionGate {
    fn login(&self, email: &str, password: &str) -> Result<bool, SessionError> {
        let ok = self.credentials.matches(email, password);
        if ok {
            *self
                .authenticated
                .write()
                .map_err(|e| SessionError::Storage(e.to_string()))? = true;
        }
        Ok(ok)
    }

    fn is_authenticated(&self) -> Result<bool, SessionError> {
        Ok(*self
            .authenticated
            .read()
            .map_err(|e| SessionError::Storage(e.to_string()))?)
    }

    fn logout(&self) -> Result<(), SessionError> {
        *self
            .authenticated
            .write()
            .map_err(|e| SessionError::Storage(e.to_string()))? = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn credentials() -> AdminCredentials {
        AdminCredentials::new("admin@example.com", SecretString::new("open-sesame".into()))
    }

    #[test]
    fn file_gate_accepts_matching_pair() {
        let dir = TempDir::new().unwrap();
        let gate = FileSessionGate::with_credentials(credentials(), dir.path().join("session"));

        assert!(!gate.is_authenticated().unwrap());
        assert!(gate.login("admin@example.com", "open-sesame").unwrap());
        assert!(gate.is_authenticated().unwrap());
    }

    #[test]
    fn file_gate_rejects_wrong_pair_without_opening_session() {
        let dir = TempDir::new().unwrap();
        let gate = FileSessionGate::with_credentials(credentials(), dir.path().join("session"));

        assert!(!gate.login("admin@example.com", "wrong").unwrap());
        assert!(!gate.login("intruder@example.com", "open-sesame").unwrap());
        assert!(!gate.is_authenticated().unwrap());
    }

    #[test]
    fn marker_file_never_contains_the_password() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("session");
        let gate = FileSessionGate::with_credentials(credentials(), &marker);

        gate.login("admin@example.com", "open-sesame").unwrap();
        let contents = std::fs::read_to_string(&marker).unwrap();
        assert!(!contents.contains("open-sesame"));
        assert!(contents.starts_with("authenticated "));
    }

    #[test]
    fn gate_without_credentials_rejects_every_login() {
        let dir = TempDir::new().unwrap();
        let gate = FileSessionGate::new(dir.path().join("session"));

        assert!(!gate.login("admin@example.com", "open-sesame").unwrap());
        assert!(!gate.is_authenticated().unwrap());
        gate.logout().unwrap();
    }

    #[test]
    fn logout_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let gate = FileSessionGate::with_credentials(credentials(), dir.path().join("session"));

        gate.logout().unwrap();
        gate.login("admin@example.com", "open-sesame").unwrap();
        gate.logout().unwrap();
        assert!(!gate.is_authenticated().unwrap());
        gate.logout().unwrap();
    }

    #[test]
    fn login_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("state").join("nested").join("session");
        let gate = FileSessionGate::with_credentials(credentials(), &marker);

        assert!(gate.login("admin@example.com", "open-sesame").unwrap());
        assert!(marker.is_file());
    }

    #[test]
    fn memory_gate_tracks_the_flag() {
        let gate = InMemorySessionGate::new(credentials());

        assert!(!gate.is_authenticated().unwrap());
        assert!(!gate.login("admin@example.com", "nope").unwrap());
        assert!(!gate.is_authenticated().unwrap());
        assert!(gate.login("admin@example.com", "open-sesame").unwrap());
        assert!(gate.is_authenticated().unwrap());
        gate.logout().unwrap();
        assert!(!gate.is_authenticated().unwrap());
    }
}
