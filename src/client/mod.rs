pub mod config;
pub mod device;
pub mod factory;
pub mod fetch;

use log::info;
use reqwest::Method;
use thiserror::Error;

use crate::api::device::FoodStatus;
use crate::api::schedule::FeedSchedule;
use crate::api::user::{RegisterForm, TokenResponse, LOGIN_PATH, REGISTER_PATH};
use crate::api::{Ack, FeedAck};
use crate::session::{Session, SessionStore};

use device::{DeviceApi, UnionDevice};
use fetch::AuthFetch;

/// Error types that can occur during client requests
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Authentication required, please login first")]
    AuthRequired,

    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The server refused the request and explained why; shown verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Validation(String),

    #[error("Server error: code {code}, {}", .message.as_deref().unwrap_or("no detail"))]
    Server { code: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The feeder API as seen by the app: account calls go to the backend,
/// device calls go through the configured [`DeviceApi`].
pub struct FeederClient {
    fetch: AuthFetch,
    device: UnionDevice,
}

impl FeederClient {
    const REGISTER_FAILED: &'static str = "Registration failed";

    pub fn new(fetch: AuthFetch, device: UnionDevice) -> Self {
        Self { fetch, device }
    }

    pub fn session(&self) -> &SessionStore {
        self.fetch.session()
    }

    /// Exchanges credentials for a token and stores the new session.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, RequestError> {
        let req = self
            .fetch
            .transport()
            .request(Method::POST, LOGIN_PATH)
            .form(&[("username", username), ("password", password)]);

        let resp: TokenResponse = match self.fetch.transport().execute(req).await {
            Ok(resp) => resp,
            Err(RequestError::Server { code: 401, .. }) => {
                return Err(RequestError::InvalidCredentials)
            }
            Err(err) => return Err(err),
        };
        if resp.access_token.is_empty() {
            return Err(RequestError::InvalidResponse(String::from(
                "empty access_token in login response",
            )));
        }

        let session = Session::new(username, resp.access_token.clone());
        self.session().save(&session)?;
        info!("Login as '{username}' success");
        Ok(resp.access_token)
    }

    pub async fn register(&self, form: RegisterForm) -> Result<(), RequestError> {
        form.validate()
            .map_err(|e| RequestError::Validation(e.to_string()))?;

        let username = form.username.clone();
        let req = self
            .fetch
            .transport()
            .request(Method::POST, REGISTER_PATH)
            .json(&form.into_request());

        match self
            .fetch
            .transport()
            .execute::<serde_json::Value>(req)
            .await
        {
            Ok(_) => {
                info!("Registered user '{username}'");
                Ok(())
            }
            Err(RequestError::Server { message, .. }) => Err(RequestError::Rejected(
                message.unwrap_or_else(|| String::from(Self::REGISTER_FAILED)),
            )),
            Err(err) => Err(err),
        }
    }

    pub fn logout(&self) -> Result<(), RequestError> {
        self.session().clear()?;
        Ok(())
    }

    pub async fn provision_device(&self, device_id: &str) -> Result<Ack, RequestError> {
        let device_id = device_id.trim();
        if device_id.is_empty() {
            return Err(RequestError::Validation(String::from(
                "Device id cannot be empty",
            )));
        }
        self.device.provision(device_id).await
    }

    pub async fn get_food_status(&self) -> Result<FoodStatus, RequestError> {
        self.device.food_status().await
    }

    pub async fn feed_now(&self) -> Result<FeedAck, RequestError> {
        self.device.feed_now().await
    }

    /// Submits the whole list in one call. There is no per-entry result.
    pub async fn submit_schedule(&self, entries: &[FeedSchedule]) -> Result<Ack, RequestError> {
        self.device.submit_schedule(entries).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::storage::{MemoryStorage, UnionStorage};

    use super::device::MockDevice;
    use super::fetch::Transport;
    use super::*;

    fn build_client() -> FeederClient {
        let storage = Arc::new(UnionStorage::Memory(MemoryStorage::new()));
        let transport = Transport::new("http://127.0.0.1:9").unwrap();
        let fetch = AuthFetch::new(transport, SessionStore::new(storage));
        FeederClient::new(fetch, UnionDevice::Mock(MockDevice))
    }

    #[tokio::test]
    async fn test_mock_submit_schedule() {
        let client = build_client();

        let ack = client.submit_schedule(&[]).await.unwrap();
        assert!(ack.success);

        let entries = [FeedSchedule::with_defaults(1), FeedSchedule::with_defaults(2)];
        let ack = client.submit_schedule(&entries).await.unwrap();
        assert!(ack.success);
    }

    #[tokio::test]
    async fn test_provision_empty_id() {
        let client = build_client();
        let err = client.provision_device("  ").await.unwrap_err();
        assert!(matches!(err, RequestError::Validation(_)));

        let ack = client.provision_device("feeder-01").await.unwrap();
        assert!(ack.success);
    }

    #[tokio::test]
    async fn test_register_validates_locally() {
        let client = build_client();
        let form = RegisterForm {
            username: String::from("alice"),
            email: String::from("alice@example.com"),
            password: String::from("short"),
            confirm_password: String::from("short"),
        };
        // Fails before touching the (unreachable) server
        let err = client.register(form).await.unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters");
    }

    #[test]
    fn test_error_display() {
        let err = RequestError::Server {
            code: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Server error: code 500, no detail");

        let err = RequestError::Rejected(String::from("User with email 'a@b.c' already exists."));
        assert_eq!(err.to_string(), "User with email 'a@b.c' already exists.");
    }
}
