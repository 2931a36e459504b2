// src/browser/mod.rs
//! Search-UI automation as a capability.
//!
//! The crawl only needs four interactions with the search page, so the engine
//! is written against this trait and tested with a scripted fake. The shipped
//! implementation drives a real browser over the WebDriver protocol.

mod webdriver;

pub use webdriver::WebDriver;

use crate::error::Result;

pub trait Browser {
    /// Load `url` in the current window.
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// Choose the option whose visible text is `text` in the `<select id=select_id>`.
    fn select_option(&mut self, select_id: &str, text: &str) -> Result<()>;

    /// Click the input control whose `value` is `value` (the search button,
    /// a page number). `Error::ControlNotFound` when there is none.
    fn click_control(&mut self, value: &str) -> Result<()>;

    /// `href`s of every link whose text contains `link_text`, in page order.
    fn extract_links(&mut self, link_text: &str) -> Result<Vec<String>>;
}

impl<B: Browser + ?Sized> Browser for &mut B {
    fn navigate(&mut self, url: &str) -> Result<()> {
        (**self).navigate(url)
    }
    fn select_option(&mut self, select_id: &str, text: &str) -> Result<()> {
        (**self).select_option(select_id, text)
    }
    fn click_control(&mut self, value: &str) -> Result<()> {
        (**self).click_control(value)
    }
    fn extract_links(&mut self, link_text: &str) -> Result<Vec<String>> {
        (**self).extract_links(link_text)
    }
}
