//! Menu Board Client
//!
//! Layered architecture:
//! - domain: Menu → Meal → MealItem and their invariants
//! - wire: backend JSON shapes and transforms
//! - repository: transport, session and backend operations
//! - store / calendar: the client-side collection and date lookups

pub mod calendar;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod store;
pub mod wire;

use std::sync::Arc;

use config::ClientConfig;
use error::ClientResult;
use repository::{AuthClient, FileCredentialStore, HttpMenuRepository, ReqwestTransport, Session};

pub use error::{ClientError, ErrorKind};

/// Everything a surface needs to talk to the backend, wired from config
pub struct MenuClient {
    pub session: Arc<Session>,
    pub auth: AuthClient<ReqwestTransport>,
    pub menus: HttpMenuRepository<ReqwestTransport>,
}

impl MenuClient {
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let store = Arc::new(FileCredentialStore::new(&config.session_dir));
        let session = Arc::new(Session::new(store));
        let transport = ReqwestTransport::new(&config.api_url, config.timeout())?;
        log::info!("Menu client targeting {}", transport.base_url());

        Ok(Self {
            auth: AuthClient::new(transport.clone(), session.clone()),
            menus: HttpMenuRepository::new(transport, session.clone()),
            session,
        })
    }
}
