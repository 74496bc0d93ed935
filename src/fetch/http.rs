// src/fetch/http.rs
// Blocking HTTP GET with a browser-like header set, a cookie jar, polite
// pacing between requests and retry with exponential backoff.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use super::{Fetch, FetchError};
use crate::config::FetchOptions;

pub struct HttpFetcher {
    client: Client,
    opts: FetchOptions,
    last_request: Option<Instant>,
    warmed_up: bool,
}

enum Attempt {
    Done(String),
    Retry(FetchError),
    Fail(FetchError),
}

impl HttpFetcher {
    pub fn new(opts: &FetchOptions) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, header_value("Accept", &opts.accept)?);
        headers.insert(header::ACCEPT_LANGUAGE, header_value("Accept-Language", &opts.accept_language)?);
        if let Some(referer) = &opts.referer {
            headers.insert(header::REFERER, header_value("Referer", referer)?);
        }

        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client, opts: opts.clone(), last_request: None, warmed_up: false })
    }

    /// One GET to the warm-up URL so the session cookie is set before the
    /// first docket request. Failure is logged and otherwise ignored.
    fn warm_up(&mut self) {
        if self.warmed_up {
            return;
        }
        self.warmed_up = true;
        let Some(url) = self.opts.warmup_url.clone() else { return };

        self.pause();
        match self.client.get(&url).send() {
            Ok(resp) => debug!(%url, status = resp.status().as_u16(), "session warm-up"),
            Err(e) => warn!(%url, error = %e, "session warm-up failed"),
        }
        self.last_request = Some(Instant::now());
    }

    /// Sleep until `delay_ms` (+ jitter) has passed since the last request.
    fn pause(&self) {
        let Some(last) = self.last_request else { return };
        let wait = Duration::from_millis(self.opts.delay_ms + jitter(self.opts.jitter_ms));
        let elapsed = last.elapsed();
        if elapsed < wait {
            thread::sleep(wait - elapsed);
        }
    }

    fn attempt(&mut self, url: &str) -> Attempt {
        self.pause();
        let sent = self.client.get(url).send();
        self.last_request = Some(Instant::now());

        let resp = match sent {
            Ok(r) => r,
            Err(source) => {
                let err = FetchError::Transport { url: url.to_string(), source };
                return Attempt::Retry(err);
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let err = FetchError::Status { url: url.to_string(), status: status.as_u16() };
            return if self.opts.retry_statuses.contains(&status.as_u16()) {
                Attempt::Retry(err)
            } else {
                Attempt::Fail(err)
            };
        }

        match resp.text() {
            Ok(body) => Attempt::Done(body),
            Err(source) => Attempt::Retry(FetchError::Transport { url: url.to_string(), source }),
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        self.warm_up();

        let mut backoff = Duration::from_millis(self.opts.backoff_ms);
        let mut attempt = 0u32;
        loop {
            match self.attempt(url) {
                Attempt::Done(body) => {
                    debug!(url, bytes = body.len(), attempt, "fetched");
                    return Ok(body);
                }
                Attempt::Fail(err) => return Err(err),
                Attempt::Retry(err) if attempt >= self.opts.retries => return Err(err),
                Attempt::Retry(err) => {
                    attempt += 1;
                    warn!(url, error = %err, attempt, retries = self.opts.retries, "retrying");
                    thread::sleep(backoff);
                    backoff = backoff.saturating_mul(2);
                }
            }
        }
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|_| FetchError::InvalidHeader { name })
}

/// 0..=max ms, seeded from the clock's sub-second part.
fn jitter(max_ms: u64) -> u64 {
    if max_ms == 0 {
        return 0;
    }
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    nanos % (max_ms + 1)
}
