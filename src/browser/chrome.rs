use super::{Driver, Element, Session};
use crate::error::{Result, ScrapeError};
use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::{Browser, LaunchOptions, Tab};
use log::debug;
use std::sync::Arc;
use std::time::Duration;

const WINDOW_SIZE: (u32, u32) = (1920, 1080);

fn browser_err(e: anyhow::Error) -> ScrapeError {
    ScrapeError::Browser(format!("{e:#}"))
}

/// Launches a fresh Chrome process for every session.
#[derive(Debug, Clone)]
pub struct ChromeDriver {
    headless: bool,
}

impl ChromeDriver {
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }
}

impl Default for ChromeDriver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Driver for ChromeDriver {
    type Session = ChromeSession;

    fn open(&self) -> Result<ChromeSession> {
        let options = LaunchOptions::default_builder()
            .headless(self.headless)
            .window_size(Some(WINDOW_SIZE))
            .build()
            .map_err(|e| ScrapeError::Browser(e.to_string()))?;
        let browser = Browser::new(options).map_err(browser_err)?;
        let tab = browser.new_tab().map_err(browser_err)?;
        debug!("opened chrome session");
        Ok(ChromeSession { browser, tab })
    }
}

/// The browser process lives as long as this value; dropping it kills Chrome.
pub struct ChromeSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl Session for ChromeSession {
    type Element<'a> = headless_chrome::Element<'a>;

    fn navigate(&mut self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(browser_err)?;
        Ok(())
    }

    fn wait_for_element(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<headless_chrome::Element<'_>> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|e| {
                debug!("wait for `{selector}` failed: {e:#}");
                ScrapeError::Timeout {
                    selector: selector.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                }
            })
    }

    fn find_all(&self, selector: &str) -> Result<Vec<headless_chrome::Element<'_>>> {
        match self.tab.find_elements(selector) {
            Ok(elements) => Ok(elements),
            Err(e) if e.is::<NoElementFound>() => Ok(Vec::new()),
            Err(e) => Err(browser_err(e)),
        }
    }

    fn close(self) -> Result<()> {
        let closed = self.tab.close(true).map_err(browser_err);
        drop(self.browser);
        debug!("closed chrome session");
        closed.map(|_| ())
    }
}

impl<'a> Element for headless_chrome::Element<'a> {
    fn click(&self) -> Result<()> {
        headless_chrome::Element::click(self).map_err(browser_err)?;
        Ok(())
    }

    fn text(&self) -> Result<String> {
        self.get_inner_text().map_err(browser_err)
    }

    fn attribute(&self, name: &str) -> Result<Option<String>> {
        // Flat `[name, value, name, value, ..]` list.
        let attributes = self.get_attributes().map_err(browser_err)?.unwrap_or_default();
        Ok(attributes
            .chunks(2)
            .find(|pair| pair[0] == name)
            .and_then(|pair| pair.get(1).cloned()))
    }

    fn find(&self, selector: &str) -> Result<Option<Self>> {
        match self.find_element(selector) {
            Ok(element) => Ok(Some(element)),
            Err(e) if e.is::<NoElementFound>() => Ok(None),
            Err(e) => Err(browser_err(e)),
        }
    }
}
