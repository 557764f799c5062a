use anyhow::Context;
use log::debug;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ErrorResponse, HEADER_AUTHORIZATION};
use crate::session::SessionStore;

use super::RequestError;

/// Plain HTTP access to the backend, without any credentials attached.
#[derive(Debug, Clone)]
pub struct Transport {
    url: String,
    client: reqwest::Client,
}

impl Transport {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let url = url.trim_end_matches('/').to_string();
        let parsed = match Url::parse(&url) {
            Ok(parsed) => parsed,
            Err(_) => anyhow::bail!("invalid server url '{url}'"),
        };

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => anyhow::bail!("invalid url scheme, expect 'http' or 'https', not '{scheme}'"),
        }

        let client = reqwest::Client::builder()
            .build()
            .context("build http client")?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.url, path);
        debug!("Request server: {method} {url}");
        self.client.request(method, url)
    }

    /// Sends the request and decodes a JSON body. Any non-2xx status becomes
    /// [`RequestError::Server`] carrying the server's `detail`, if it sent one.
    pub async fn execute<T>(&self, req: RequestBuilder) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
    {
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        debug!("Server response: {status}, {} bytes", text.len());

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|resp| resp.message());
            return Err(RequestError::Server {
                code: status.as_u16(),
                message,
            });
        }

        // Some endpoints answer with an empty body, let unit-like types decode from null
        let text = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(text).map_err(|e| RequestError::InvalidResponse(e.to_string()))
    }
}

/// Attaches the session's bearer token to every request. A missing token
/// fails the call before anything is sent.
#[derive(Clone)]
pub struct AuthFetch {
    transport: Transport,
    session: SessionStore,
}

impl AuthFetch {
    pub fn new(transport: Transport, session: SessionStore) -> Self {
        Self { transport, session }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Builds an authenticated request. Headers and body added to the
    /// returned builder are merged with the `Authorization` header.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, RequestError> {
        let token = match self.session.token()? {
            Some(token) => token,
            None => return Err(RequestError::AuthRequired),
        };
        Ok(self
            .transport
            .request(method, path)
            .header(HEADER_AUTHORIZATION, format!("Bearer {token}")))
    }

    pub async fn fetch<T>(&self, req: RequestBuilder) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
    {
        self.transport.execute(req).await
    }

    pub async fn get<T>(&self, path: &str) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
    {
        let req = self.request(Method::GET, path)?;
        self.fetch(req).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(Method::POST, path)?.json(body);
        self.fetch(req).await
    }
}
