//! Session Context
//!
//! Holds the bearer credential and the signed-in identity. The repository
//! reads the token from here on every request and invalidates it on 401;
//! interested parties learn about it through [`Session::subscribe`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::broadcast;

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user: UserIdentity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
    /// A request was answered with 401
    Expired,
}

/// Persistence for the credential/identity pair
pub trait CredentialStore: Send + Sync {
    /// Both halves or nothing
    fn load(&self) -> Option<Credentials>;
    fn save(&self, credentials: &Credentials) -> Result<(), String>;
    fn clear(&self) -> Result<(), String>;
}

#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credentials: Credentials) -> Self {
        Self {
            slot: Mutex::new(Some(credentials)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credentials> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, credentials: &Credentials) -> Result<(), String> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Stores the token and the identity record as two files in one directory
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_field(&self, name: &str) -> Option<String> {
        let raw = std::fs::read_to_string(self.dir.join(name)).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "undefined" {
            return None;
        }
        Some(trimmed.to_string())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<Credentials> {
        let token = self.read_field(TOKEN_FILE)?;
        let user_raw = self.read_field(USER_FILE)?;
        match serde_json::from_str::<UserIdentity>(&user_raw) {
            Ok(user) => Some(Credentials { token, user }),
            Err(e) => {
                log::warn!("Discarding unreadable session identity: {}", e);
                if let Err(e) = self.clear() {
                    log::warn!("Failed to clear session files: {}", e);
                }
                None
            }
        }
    }

    fn save(&self, credentials: &Credentials) -> Result<(), String> {
        std::fs::create_dir_all(&self.dir).map_err(|e| e.to_string())?;
        let user = serde_json::to_string(&credentials.user).map_err(|e| e.to_string())?;
        std::fs::write(self.dir.join(TOKEN_FILE), &credentials.token).map_err(|e| e.to_string())?;
        std::fs::write(self.dir.join(USER_FILE), user).map_err(|e| e.to_string())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        for name in [TOKEN_FILE, USER_FILE] {
            match std::fs::remove_file(self.dir.join(name)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.to_string()),
            }
        }
        Ok(())
    }
}

/// Explicit session context shared by the auth client and the repository
pub struct Session {
    store: Arc<dyn CredentialStore>,
    current: RwLock<Option<Credentials>>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Restores whatever the store holds
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let current = store.load();
        let (events, _) = broadcast::channel(16);
        Self {
            store,
            current: RwLock::new(current),
            events,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|c| c.token.clone())
    }

    pub fn user(&self) -> Option<UserIdentity> {
        self.read().as_ref().map(|c| c.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn sign_in(&self, credentials: Credentials) {
        if let Err(e) = self.store.save(&credentials) {
            log::warn!("Session not persisted: {}", e);
        }
        *self.write() = Some(credentials);
        let _ = self.events.send(SessionEvent::SignedIn);
    }

    pub fn sign_out(&self) {
        self.clear();
        let _ = self.events.send(SessionEvent::SignedOut);
    }

    /// Called on any 401. Clears stored state and tells subscribers to
    /// send the user back to the login surface.
    pub fn invalidate(&self) {
        log::warn!("Session rejected by the backend, clearing credentials");
        self.clear();
        let _ = self.events.send(SessionEvent::Expired);
    }

    fn clear(&self) {
        if let Err(e) = self.store.clear() {
            log::warn!("Failed to clear stored session: {}", e);
        }
        *self.write() = None;
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Credentials>> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Credentials>> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn creds() -> Credentials {
        Credentials {
            token: "abc".to_string(),
            user: UserIdentity {
                id: "1".to_string(),
                username: "chef".to_string(),
            },
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path());
        assert!(store.load().is_none());
        store.save(&creds()).unwrap();
        assert_eq!(store.load(), Some(creds()));
        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_needs_both_halves() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TOKEN_FILE), "abc").unwrap();
        let store = FileCredentialStore::new(dir.path());
        assert!(store.load().is_none());

        std::fs::write(dir.path().join(USER_FILE), "undefined").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_corrupt_identity_is_cleared() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TOKEN_FILE), "abc").unwrap();
        std::fs::write(dir.path().join(USER_FILE), "{not json").unwrap();
        let store = FileCredentialStore::new(dir.path());
        assert!(store.load().is_none());
        assert!(!dir.path().join(TOKEN_FILE).exists());
        assert!(!dir.path().join(USER_FILE).exists());
    }

    #[test]
    fn test_session_restores_from_store() {
        let session = Session::new(Arc::new(MemoryCredentialStore::with(creds())));
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert_eq!(session.user().map(|u| u.username), Some("chef".to_string()));
    }

    #[test]
    fn test_invalidate_clears_store_and_notifies() {
        let store = Arc::new(MemoryCredentialStore::with(creds()));
        let session = Session::new(store.clone());
        let mut events = session.subscribe();

        session.invalidate();

        assert!(!session.is_authenticated());
        assert!(store.load().is_none());
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
    }

    #[test]
    fn test_sign_in_then_out() {
        let session = Session::in_memory();
        let mut events = session.subscribe();
        session.sign_in(creds());
        assert!(session.is_authenticated());
        session.sign_out();
        assert!(!session.is_authenticated());
        assert_eq!(events.try_recv().unwrap(), SessionEvent::SignedIn);
        assert_eq!(events.try_recv().unwrap(), SessionEvent::SignedOut);
    }
}
