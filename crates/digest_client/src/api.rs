use std::fmt;
use std::time::Duration;

use digest_core::{Error, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Thin JSON client: one attempt per call, non-2xx is a transport failure.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let mut base_url = Url::parse(base_url)?;
        // Paths are resolved beneath the base, so it must read as a directory
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        let response = self.client.get(url).send().await.map_err(log_failure)?;
        read_json(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        let response = self.client.post(url).json(body).send().await.map_err(log_failure)?;
        read_json(response).await
    }

    /// Posts `fields` as `application/x-www-form-urlencoded`.
    pub async fn post_form<T: DeserializeOwned>(&self, path: &str, fields: &[(String, String)]) -> Result<T> {
        let url = self.url(path)?;
        tracing::debug!("POST {} with {} form fields", url, fields.len());
        let response = self.client.post(url).form(fields).send().await.map_err(log_failure)?;
        read_json(response).await
    }
}

fn log_failure(err: reqwest::Error) -> Error {
    tracing::error!("API Error: {}", err);
    Error::Http(err)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = format!("HTTP error! status: {}", status.as_u16());
        tracing::error!("API Error: {}", message);
        return Err(Error::Transport(message));
    }

    let body = response.bytes().await.map_err(log_failure)?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("API Error: unreadable response body: {}", e);
        Error::MalformedResponse(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest_core::FailureKind;

    #[test]
    fn test_url_joins_paths() {
        let api = ApiClient::new("http://127.0.0.1:5000", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url("/update_timeframe").unwrap().as_str(), "http://127.0.0.1:5000/update_timeframe");
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        for base in ["http://127.0.0.1:5000/app", "http://127.0.0.1:5000/app/"] {
            let api = ApiClient::new(base, Duration::from_secs(1)).unwrap();
            assert_eq!(
                api.url("/update_timeframe").unwrap().as_str(),
                "http://127.0.0.1:5000/app/update_timeframe"
            );
            assert_eq!(api.url("update_timeframe").unwrap().as_str(), "http://127.0.0.1:5000/app/update_timeframe");
        }
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = ApiClient::new("no scheme", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        // Bind then drop a listener to get a port nobody is serving
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = ApiClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        let err = api.get_json::<serde_json::Value>("/").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Transport);
    }
}
