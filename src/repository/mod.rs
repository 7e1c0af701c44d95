//! Repository Layer
//!
//! Backend access: transport, session, login and the menu repository.

mod auth;
mod http_repo;
mod session;
mod traits;
mod transport;


pub use auth::AuthClient;
pub use http_repo::HttpMenuRepository;
pub use session::{
    CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore, Session, SessionEvent,
    UserIdentity,
};
pub use traits::MenuRepository;
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport, DEFAULT_TIMEOUT};
