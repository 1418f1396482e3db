use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::{debug, info};

use crate::error::{CoderankError, Result};

const AGENT: &str = concat!("coderank/", env!("CARGO_PKG_VERSION"), " (leaderboard digest)");
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

/// Fetches the leaderboard page.
pub struct LeaderboardClient {
    http: Client,
    url: String,
    timeout: Duration,
}

impl LeaderboardClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            url: url.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_error(&self, e: reqwest::Error) -> CoderankError {
        if e.is_timeout() {
            CoderankError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            CoderankError::Http(e)
        }
    }

    /// GET the page and return its body. Non-2xx responses become
    /// `Api { status, body }`.
    pub async fn fetch_html(&self) -> Result<String> {
        debug!(url = %self.url, "fetching leaderboard");
        let resp = self
            .http
            .get(&self.url)
            .header(USER_AGENT, AGENT)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CoderankError::Api { status, body });
        }

        let html = resp.text().await.map_err(|e| self.request_error(e))?;
        info!(url = %self.url, bytes = html.len(), "fetched leaderboard");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serve one connection on a local port; `respond` gets the accepted stream.
    fn one_shot_server(respond: impl FnOnce(std::net::TcpStream) + Send + 'static) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                respond(stream);
            }
        });
        format!("http://{addr}/leaderboard")
    }

    #[tokio::test]
    async fn stalled_server_is_timeout() {
        let url = one_shot_server(|mut stream| {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            thread::sleep(Duration::from_secs(5));
        });
        let client = LeaderboardClient::new(url, Duration::from_secs(1)).unwrap();
        let err = client.fetch_html().await.unwrap_err();
        assert!(matches!(err, CoderankError::Timeout { secs: 1 }), "{err}");
        assert!(err.is_source_unavailable());
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let url = one_shot_server(|mut stream| {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(
                b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 4\r\nConnection: close\r\n\r\nbusy",
            );
        });
        let client = LeaderboardClient::new(url, Duration::from_secs(5)).unwrap();
        let err = client.fetch_html().await.unwrap_err();
        match &err {
            CoderankError::Api { status, body } => {
                assert_eq!(*status, 503);
                assert_eq!(body, "busy");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert!(err.is_source_unavailable());
    }

    #[tokio::test]
    async fn unreachable_host_is_source_unavailable() {
        let client = LeaderboardClient::new("http://127.0.0.1:9/leaderboard", Duration::from_secs(2))
            .unwrap();
        let err = client.fetch_html().await.unwrap_err();
        assert!(err.is_source_unavailable(), "{err}");
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn fetch_live_leaderboard() {
        let client =
            LeaderboardClient::new(crate::config::DEFAULT_LEADERBOARD_URL, Duration::from_secs(30))
                .unwrap();
        let html = client.fetch_html().await.unwrap();
        assert!(html.contains("<table") || html.contains("<html"));
    }
}
