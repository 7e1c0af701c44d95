//! Login
//!
//! Exchanges a username/password pair for an opaque bearer token. The token is
//! stored in the [`Session`]; nothing here inspects it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::session::{Credentials, Session, UserIdentity};
use super::transport::{ApiRequest, Method, Transport};
use crate::error::{ClientError, ClientResult};

#[derive(Serialize)]
struct LoginArgs<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: Option<UserIdentity>,
}

pub struct AuthClient<T: Transport> {
    transport: T,
    session: Arc<Session>,
}

impl<T: Transport> AuthClient<T> {
    pub fn new(transport: T, session: Arc<Session>) -> Self {
        Self { transport, session }
    }

    /// Signs the session in on success
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Credentials> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::validation("username and password are required"));
        }

        let request = ApiRequest::new(Method::Post, "/auth/login")
            .with_body(&LoginArgs { username, password })?;
        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("Login request failed: {}", e);
            e
        })?;

        match response.status {
            401 => return Err(ClientError::InvalidCredentials),
            404 => return Err(ClientError::service(404, "authentication service unavailable")),
            s if !response.is_success() => return Err(ClientError::service(s, response.body)),
            _ => {}
        }

        let body: LoginResponse = response.json()?;
        if body.token.trim().is_empty() {
            return Err(ClientError::decode("login response carried an empty token"));
        }
        // Some deployments answer with the token alone
        let user = body.user.unwrap_or_else(|| UserIdentity {
            id: "1".to_string(),
            username: username.to_string(),
        });
        let credentials = Credentials {
            token: body.token,
            user,
        };

        log::info!("Signed in as {}", credentials.user.username);
        self.session.sign_in(credentials.clone());
        Ok(credentials)
    }

    pub fn logout(&self) {
        self.session.sign_out();
    }
}
