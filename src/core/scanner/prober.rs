// src/core/scanner/prober.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::core::models::{AddressSet, ProbeOutcome};

/// Performs a single plain-HTTP reachability check against a domain.
///
/// `addresses` is what the resolver adapter returned for the domain. It is
/// context only; implementations are free to dial the name directly.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, domain: &str, addresses: &AddressSet, timeout: Duration) -> ProbeOutcome;
}

/// Prober backed by a shared `reqwest` client.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Builds the HTTP client once; it is reused by every probe of a scan.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("DomainReach/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            // Probes go straight to the domain; environment proxies would mask interference.
            .no_proxy()
            .build()?;
        Ok(Self { client })
    }
}

/// The only URL ever probed: the root path over unencrypted HTTP.
pub fn probe_url(domain: &str) -> String {
    format!("http://{}/", domain)
}

/// Status policy: 200 is success, every other completed exchange is an HTTP error.
pub fn outcome_for_status(status: StatusCode) -> ProbeOutcome {
    if status == StatusCode::OK {
        ProbeOutcome::Success(status.as_u16())
    } else {
        ProbeOutcome::HttpError(status.as_u16())
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, domain: &str, _addresses: &AddressSet, timeout: Duration) -> ProbeOutcome {
        let url = probe_url(domain);
        debug!(url = %url, "Sending HTTP probe.");

        match self.client.get(&url).timeout(timeout).send().await {
            Ok(response) => {
                debug!(domain, status = %response.status(), "Received HTTP response.");
                outcome_for_status(response.status())
            }
            Err(e) => {
                debug!(url = %url, error = %e, "HTTP probe failed.");
                let reason = if e.is_timeout() {
                    "timed out".to_string()
                } else if e.is_connect() {
                    "could not connect".to_string()
                } else {
                    e.to_string()
                };
                ProbeOutcome::TransportFailure(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::CapturedLogs;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tracing::Level;
    use tokio::net::TcpListener;

    /// Serves exactly one canned HTTP response on a loopback port and returns
    /// `host:port` for use as the probed "domain".
    async fn serve_once(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response = format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        addr.to_string()
    }

    #[test]
    fn probe_url_targets_root_over_http() {
        assert_eq!(probe_url("example.test"), "http://example.test/");
    }

    #[test]
    fn only_200_counts_as_success() {
        assert_eq!(outcome_for_status(StatusCode::OK), ProbeOutcome::Success(200));
        assert_eq!(outcome_for_status(StatusCode::NOT_FOUND), ProbeOutcome::HttpError(404));
        assert_eq!(outcome_for_status(StatusCode::NO_CONTENT), ProbeOutcome::HttpError(204));
    }

    #[tokio::test]
    async fn probe_reports_success_on_200() {
        let target = serve_once("HTTP/1.1 200 OK").await;
        let prober = HttpProber::new(Duration::from_secs(3)).unwrap();
        let outcome = prober.probe(&target, &AddressSet::default(), Duration::from_secs(3)).await;
        assert_eq!(outcome, ProbeOutcome::Success(200));
    }

    #[tokio::test]
    async fn probe_reports_http_error_on_403() {
        let target = serve_once("HTTP/1.1 403 Forbidden").await;
        let prober = HttpProber::new(Duration::from_secs(3)).unwrap();
        let outcome = prober.probe(&target, &AddressSet::default(), Duration::from_secs(3)).await;
        assert_eq!(outcome, ProbeOutcome::HttpError(403));
    }

    #[tokio::test]
    async fn probe_reports_transport_failure_on_refused_connection() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let target = listener.local_addr().unwrap().to_string();
        drop(listener);

        let prober = HttpProber::new(Duration::from_secs(3)).unwrap();
        let outcome = prober.probe(&target, &AddressSet::default(), Duration::from_secs(3)).await;
        assert!(matches!(outcome, ProbeOutcome::TransportFailure(_)), "got {outcome:?}");
    }

    #[tokio::test]
    async fn responses_are_not_logged_at_info() {
        let logs = CapturedLogs::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber(Level::INFO));
        let target = serve_once("HTTP/1.1 200 OK").await;
        let prober = HttpProber::new(Duration::from_secs(3)).unwrap();

        let outcome = prober.probe(&target, &AddressSet::default(), Duration::from_secs(3)).await;

        assert_eq!(outcome, ProbeOutcome::Success(200));
        assert!(!logs.contents().contains("Received HTTP response"));
    }

    #[tokio::test]
    async fn responses_are_logged_at_debug() {
        let logs = CapturedLogs::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber(Level::DEBUG));
        let target = serve_once("HTTP/1.1 204 No Content").await;
        let prober = HttpProber::new(Duration::from_secs(3)).unwrap();

        prober.probe(&target, &AddressSet::default(), Duration::from_secs(3)).await;

        assert!(logs.contents().contains("Received HTTP response"));
    }

    #[tokio::test]
    async fn probe_times_out_on_silent_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let target = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            // Accept and hold the connection without ever answering.
            if let Ok((socket, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(10)).await;
                drop(socket);
            }
        });

        let prober = HttpProber::new(Duration::from_millis(200)).unwrap();
        let outcome = prober.probe(&target, &AddressSet::default(), Duration::from_millis(200)).await;
        assert_eq!(outcome, ProbeOutcome::TransportFailure("timed out".to_string()));
    }
}
