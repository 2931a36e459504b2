// src/browser/webdriver.rs
//! Minimal W3C WebDriver client (chromedriver, headless Chrome).
//!
//! Only the commands the crawl uses: new session, timeouts, navigate, find
//! element(s), click, read attribute, delete session.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::Browser;
use crate::config::consts::IMPLICIT_WAIT_MS;
use crate::error::{Error, Result};

/// Key under which WebDriver returns element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

const CHROME_ARGS: [&str; 5] = [
    "--disable-extensions",
    "--disable-gpu",
    "--no-sandbox",
    "--log-level=3",
    "--headless",
];

#[derive(Deserialize)]
struct Reply {
    value: Value,
}

#[derive(Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

pub struct WebDriver {
    http: Client,
    base: String,
    session: String,
}

impl WebDriver {
    /// Open a new browser session on the driver listening at `base`.
    pub fn connect(base: &str) -> Result<Self> {
        let http = Client::builder().timeout(Duration::from_secs(120)).build()?;
        let base = base.trim_end_matches('/').to_string();

        let caps = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": { "args": CHROME_ARGS }
                }
            }
        });
        let value = send(&http, Method::POST, &format!("{base}/session"), Some(caps), "new session")?;
        let session = value["sessionId"]
            .as_str()
            .ok_or_else(|| Error::WebDriver {
                command: "new session".into(),
                message: format!("no sessionId in {value}"),
            })?
            .to_string();
        debug!(%session, "webdriver session opened");

        let driver = Self { http, base, session };
        driver.command(Method::POST, "timeouts", Some(json!({ "implicit": IMPLICIT_WAIT_MS })))?;
        Ok(driver)
    }

    fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}/session/{}/{}", self.base, self.session, path);
        send(&self.http, method, &url, body, path)
    }

    fn find_element(&self, xpath: &str) -> Result<String> {
        let found = self.command(Method::POST, "element", Some(json!({ "using": "xpath", "value": xpath })));
        match found {
            Ok(v) => element_id(&v),
            Err(Error::ControlNotFound { .. }) => Err(Error::ControlNotFound { selector: xpath.to_string() }),
            Err(e) => Err(e),
        }
    }

    fn click(&self, element: &str) -> Result<()> {
        self.command(Method::POST, &format!("element/{element}/click"), Some(json!({})))?;
        Ok(())
    }
}

impl Browser for WebDriver {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.command(Method::POST, "url", Some(json!({ "url": url })))?;
        Ok(())
    }

    fn select_option(&mut self, select_id: &str, text: &str) -> Result<()> {
        let xpath = format!(
            "//select[@id={}]/option[normalize-space(.)={}]",
            xpath_literal(select_id),
            xpath_literal(text)
        );
        let option = self.find_element(&xpath)?;
        self.click(&option)
    }

    fn click_control(&mut self, value: &str) -> Result<()> {
        let xpath = format!("//input[@value={}]", xpath_literal(value));
        let control = self.find_element(&xpath)?;
        self.click(&control)
    }

    fn extract_links(&mut self, link_text: &str) -> Result<Vec<String>> {
        let found = self.command(
            Method::POST,
            "elements",
            Some(json!({ "using": "partial link text", "value": link_text })),
        )?;
        let elements = found.as_array().cloned().unwrap_or_default();

        let mut hrefs = Vec::with_capacity(elements.len());
        for el in &elements {
            let id = element_id(el)?;
            let href = self.command(Method::GET, &format!("element/{id}/attribute/href"), None)?;
            if let Some(h) = href.as_str() {
                hrefs.push(h.to_string());
            }
        }
        Ok(hrefs)
    }
}

impl Drop for WebDriver {
    fn drop(&mut self) {
        let url = format!("{}/session/{}", self.base, self.session);
        if let Err(e) = send(&self.http, Method::DELETE, &url, None, "delete session") {
            warn!(error = %e, "could not close webdriver session");
        }
    }
}

fn send(http: &Client, method: Method, url: &str, body: Option<Value>, command: &str) -> Result<Value> {
    let mut req = http.request(method, url);
    if let Some(b) = body {
        req = req.json(&b);
    }
    let resp = req.send()?;
    let ok = resp.status().is_success();
    let reply: Reply = resp.json()?;
    if ok {
        return Ok(reply.value);
    }

    let err: WireError = serde_json::from_value(reply.value)?;
    if err.error == "no such element" {
        return Err(Error::ControlNotFound { selector: err.message });
    }
    Err(Error::WebDriver { command: command.to_string(), message: format!("{}: {}", err.error, err.message) })
}

fn element_id(v: &Value) -> Result<String> {
    v[ELEMENT_KEY]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::WebDriver { command: "find element".into(), message: format!("no element reference in {v}") })
}

/// Quote `s` as an XPath string literal.
fn xpath_literal(s: &str) -> String {
    match (s.contains('\''), s.contains('"')) {
        (false, _) => format!("'{s}'"),
        (true, false) => format!("\"{s}\""),
        // XPath 1.0 has no escapes; splice the apostrophes in with concat()
        (true, true) => {
            let parts: Vec<String> = s.split('\'').map(|p| format!("'{p}'")).collect();
            format!("concat({})", parts.join(", \"'\", "))
        }
    }
}
