// src/core/net.rs
//! Detail-page fetching.
//!
//! The site serves a certificate that does not validate, so verification is
//! off. Every request carries the same desktop-browser User-Agent.

use std::{thread, time::Duration};

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};

use crate::config::consts::{FETCH_RETRIES, FETCH_TIMEOUT_SECS, USER_AGENT as UA};
use crate::error::{Error, Result};

/// "Fetch resource with headers": the only network capability the engines need.
pub trait Fetch {
    /// GET `url` and return the body. Non-2xx statuses are errors.
    fn get(&self, url: &str) -> Result<String>;
}

pub struct FetchClient {
    client: Client,
    retries: u32,
}

impl FetchClient {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(UA));

        let client = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, retries: FETCH_RETRIES })
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }
}

/// Connection-level failures are worth another try; HTTP statuses are not.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout() || e.is_request()
}

impl Fetch for FetchClient {
    fn get(&self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if !status.is_success() {
                        return Err(Error::Status { url: url.to_string(), status: status.as_u16() });
                    }
                    let body = resp.text()?;
                    debug!(url, bytes = body.len(), "fetched");
                    return Ok(body);
                }
                Err(e) if attempt < self.retries && is_transient(&e) => {
                    attempt += 1;
                    warn!(url, attempt, error = %e, "fetch failed, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn get(&self, url: &str) -> Result<String> {
        (**self).get(url)
    }
}

/// Politeness delay between requests. Zero skips the sleep.
pub fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}
