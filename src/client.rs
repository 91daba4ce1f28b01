use std::future::Future;

use anyhow::Result;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::constants::{NWS_ACCEPT, OPEN_METEO_ACCEPT, REQUEST_TIMEOUT, USER_AGENT};

/// Upstream provider a request is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Nws,
    OpenMeteo,
}

impl Upstream {
    fn accept(self) -> &'static str {
        match self {
            Upstream::Nws => NWS_ACCEPT,
            Upstream::OpenMeteo => OPEN_METEO_ACCEPT,
        }
    }
}

/// Source of upstream JSON documents.
///
/// Implementations fail closed: any failure yields `None`.
pub trait Fetch: Send + Sync {
    fn fetch<T>(&self, upstream: Upstream, url: &str) -> impl Future<Output = Option<T>> + Send
    where
        T: DeserializeOwned + Send;
}

/// HTTP implementation backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: DeserializeOwned>(&self, upstream: Upstream, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, upstream.accept())
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Request failed with status: {}", response.status());
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }
}

impl Fetch for HttpFetcher {
    async fn fetch<T>(&self, upstream: Upstream, url: &str) -> Option<T>
    where
        T: DeserializeOwned + Send,
    {
        match self.make_request(upstream, url).await {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!(?upstream, url, error = %e, "upstream request failed");
                None
            }
        }
    }
}

/// Joins `params` onto `base` as `key=value` pairs in order, unescaped
pub fn build_open_meteo_url(base: &str, params: &[(&str, String)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Answers a single request with `response` and hands back the raw request
    fn serve_once(response: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/forecast", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            let _ = tx.send(String::from_utf8_lossy(&request).to_lowercase());
        });

        (url, rx)
    }

    #[tokio::test]
    async fn unreachable_host_yields_none() {
        let fetcher = HttpFetcher::new().unwrap();
        let data: Option<Value> = fetcher.fetch(Upstream::Nws, "http://127.0.0.1:1/").await;
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn error_status_yields_none() {
        let (url, _) = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let fetcher = HttpFetcher::new().unwrap();
        let data: Option<Value> = fetcher.fetch(Upstream::OpenMeteo, &url).await;
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn undecodable_body_yields_none() {
        let (url, _) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 8\r\nConnection: close\r\n\r\nnot json",
        );
        let fetcher = HttpFetcher::new().unwrap();
        let data: Option<Value> = fetcher.fetch(Upstream::OpenMeteo, &url).await;
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn success_sends_identity_headers() {
        let (url, request) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/geo+json\r\nContent-Length: 16\r\nConnection: close\r\n\r\n{\"features\": []}",
        );
        let fetcher = HttpFetcher::new().unwrap();
        let data: Option<Value> = fetcher.fetch(Upstream::Nws, &url).await;
        assert_eq!(data, Some(serde_json::json!({"features": []})));

        let request = request.recv().unwrap();
        assert!(request.contains("accept: application/geo+json"));
        assert!(request.contains("user-agent: mcp-regional-weather/0.1.0"));
    }

    #[test]
    fn query_keeps_order_and_skips_escaping() {
        let url = build_open_meteo_url(
            "https://api.open-meteo.com/v1/forecast",
            &[
                ("latitude", 51.5074_f64.to_string()),
                ("longitude", (-0.1278_f64).to_string()),
                ("current", "temperature_2m,wind_speed_10m".to_string()),
                ("timezone", "Europe/London".to_string()),
            ],
        );
        assert_eq!(
            url,
            "https://api.open-meteo.com/v1/forecast?latitude=51.5074&longitude=-0.1278&current=temperature_2m,wind_speed_10m&timezone=Europe/London"
        );
    }

    #[test]
    fn accept_header_per_upstream() {
        assert_eq!(Upstream::Nws.accept(), "application/geo+json");
        assert_eq!(Upstream::OpenMeteo.accept(), "application/json");
    }
}
