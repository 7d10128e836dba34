//! Backend readiness probe.
//!
//! The backend may be asleep on a free hosting tier. A single unauthenticated ping wakes it; any
//! HTTP answer counts as awake. A failed ping only delays startup by a bounded fallback, and the
//! whole probe is bounded by a timeout.

use std::time::{Duration, Instant};

use humanize_duration::{Truncate, prelude::DurationExt};
use reqwest::{Client, StatusCode, Url};
use tracing::{info, warn};

/// Shown while the probe is waiting.
pub const WAKING_NOTICE: &str = "Waking up backend server...";

/// Default wait after a failed ping.
pub const DEFAULT_FALLBACK: Duration = Duration::from_secs(5);

/// Default upper bound for the ping itself.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Outcome of a readiness probe. Every outcome means "proceed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// The backend answered, with any status.
    Awake(StatusCode),

    /// The ping failed; the fallback delay has elapsed.
    FellBack,

    /// The backend did not answer within the timeout.
    TimedOut,
}

impl Readiness {
    /// The backend answered the ping.
    pub fn is_awake(self) -> bool {
        matches!(self, Self::Awake(_))
    }
}

/// One-shot wake-up ping.
#[derive(Debug, Clone)]
pub struct ReadinessProbe {
    http: Client,
    url: Url,
    fallback: Duration,
    timeout: Duration,
}

impl ReadinessProbe {
    /// Probe `url` with the default fallback and timeout.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            http: Client::new(),
            url,
            fallback: DEFAULT_FALLBACK,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Delay applied after a failed ping.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Duration) -> Self {
        self.fallback = fallback;
        self
    }

    /// Upper bound for the ping.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ping the backend once. Never fails.
    #[tracing::instrument(name = "readiness.wait", skip(self), fields(url = %self.url))]
    pub async fn wait(&self) -> Readiness {
        let start = Instant::now();
        let ping = self.http.get(self.url.clone()).send();

        match tokio::time::timeout(self.timeout, ping).await {
            Ok(Ok(response)) => {
                let status = response.status();

                info!(
                    %status,
                    elapsed = %start.elapsed().human(Truncate::Nano),
                    "backend is awake"
                );

                Readiness::Awake(status)
            }
            Ok(Err(source)) => {
                warn!(
                    fallback = %self.fallback.human(Truncate::Nano),
                    "wake-up ping failed: {source}"
                );

                tokio::time::sleep(self.fallback).await;

                Readiness::FellBack
            }
            Err(_elapsed) => {
                warn!(
                    timeout = %self.timeout.human(Truncate::Nano),
                    "backend did not answer the wake-up ping in time"
                );

                Readiness::TimedOut
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;

    #[tokio::test]
    async fn any_status_counts_as_awake() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let readiness = ReadinessProbe::new(Url::parse(&server.uri())?).wait().await;

        assert_eq!(readiness, Readiness::Awake(StatusCode::SERVICE_UNAVAILABLE));
        assert!(readiness.is_awake(), "503 is still an answer");

        Ok(())
    }

    #[tokio::test]
    async fn refused_connection_waits_for_fallback() -> TestResult {
        let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
        let fallback = Duration::from_millis(50);

        let start = Instant::now();
        let readiness = ReadinessProbe::new(Url::parse(&format!("http://127.0.0.1:{port}/"))?)
            .with_fallback(fallback)
            .with_timeout(Duration::from_secs(5))
            .wait()
            .await;

        assert_eq!(readiness, Readiness::FellBack);
        assert!(start.elapsed() >= fallback, "fallback delay was skipped");

        Ok(())
    }

    #[tokio::test]
    async fn slow_backend_is_bounded_by_timeout() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
            .mount(&server)
            .await;

        let start = Instant::now();
        let readiness = ReadinessProbe::new(Url::parse(&server.uri())?)
            .with_timeout(Duration::from_millis(100))
            .wait()
            .await;

        assert_eq!(readiness, Readiness::TimedOut);
        assert!(start.elapsed() < Duration::from_secs(5), "probe was not bounded");

        Ok(())
    }
}
