// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;

use empleo_scrape::browser::Browser;
use empleo_scrape::core::Fetch;
use empleo_scrape::error::{Error, Result};
use empleo_scrape::region::Region;

pub const DETAIL_URL: &str = "https://vun.empleo.gob.mx/contenido/publico/segob/oferta/detalleOferta.jsf?ofertaId=";

pub fn detail_url(id: &str) -> String {
    format!("{DETAIL_URL}{id}")
}

/// A listing page shaped like the real ones, padded past the repair threshold.
pub fn listing_page(title: &str, education: Option<&str>) -> String {
    let education = education
        .map(|e| format!("<div class=\"row\"><strong>Estudios Solicitados:</strong><div>{e}</div></div>"))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html><html><head><title>Oferta</title></head><body>
        <div class="panel"><h3><small>{title}</small></h3>
          <p><strong>Salario neto mensual:</strong> <span>$10,500.00</span></p>
          <p><strong>Horario de trabajo:</strong> <span>09:00 a 18:00</span></p>
          <p><strong>Días laborales:</strong> <span>L, Ma, Mi, J, V</span></p>
          <p><strong>Ubicación:</strong> <span>Jalisco, Guadalajara</span></p>
          {education}
          <div class="row"><strong>Idiomas:</strong><div>Ninguno</div></div>
          <div class="row"><strong>Experiencia:</strong><div>1 año</div></div>
          <p><strong>Tipo de contrato:</strong> <span>Por tiempo indeterminado</span></p>
        </div>
        <!-- {pad} -->
        </body></html>"#,
        pad = "x".repeat(20_000),
    )
}

/// Search UI over a fixed set of result pages per region.
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<Region, Vec<Vec<String>>>,
    region: Option<Region>,
    page: usize,
    pub clicks: Vec<String>,
}

impl FakeSite {
    pub fn with_region(mut self, region: Region, pages: Vec<Vec<&str>>) -> Self {
        let pages = pages
            .into_iter()
            .map(|ids| ids.into_iter().map(detail_url).collect())
            .collect();
        self.pages.insert(region, pages);
        self
    }
}

impl Browser for FakeSite {
    fn navigate(&mut self, _url: &str) -> Result<()> {
        self.region = None;
        self.page = 0;
        Ok(())
    }

    fn select_option(&mut self, _select_id: &str, text: &str) -> Result<()> {
        self.region = Some(text.parse()?);
        Ok(())
    }

    fn click_control(&mut self, value: &str) -> Result<()> {
        self.clicks.push(value.to_string());
        if value == "Buscar" {
            return Ok(());
        }
        let n: usize = value.parse().map_err(|_| Error::ControlNotFound { selector: value.into() })?;
        let available = self.region.and_then(|r| self.pages.get(&r)).map_or(0, Vec::len);
        if n == 0 || n > available {
            return Err(Error::ControlNotFound { selector: value.into() });
        }
        self.page = n;
        Ok(())
    }

    fn extract_links(&mut self, _link_text: &str) -> Result<Vec<String>> {
        Ok(self
            .region
            .and_then(|r| self.pages.get(&r))
            .and_then(|p| p.get(self.page.wrapping_sub(1)))
            .cloned()
            .unwrap_or_default())
    }
}

/// Serves canned bodies by URL and records every request.
#[derive(Default)]
pub struct FakeFetch {
    bodies: HashMap<String, String>,
    broken: HashSet<String>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeFetch {
    pub fn serve(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Requests for `url` fail before any response arrives.
    pub fn fail(mut self, url: impl Into<String>) -> Self {
        self.broken.insert(url.into());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Fetch for FakeFetch {
    fn get(&self, url: &str) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());
        if self.broken.contains(url) {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset").into());
        }
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Status { url: url.to_string(), status: 404 })
    }
}
