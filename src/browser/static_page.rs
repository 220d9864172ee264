use super::{Driver, Element, Session};
use crate::error::{Result, ScrapeError};
use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| ScrapeError::Selector(selector.to_string()))
}

/// Serves pre-rendered HTML keyed by URL. Waits resolve immediately and
/// clicks do nothing, so a page must already contain whatever a click would
/// reveal.
#[derive(Clone, Default)]
pub struct StaticDriver {
    pages: Rc<RefCell<IndexMap<String, String>>>,
    opened: Rc<Cell<usize>>,
    closed: Rc<Cell<usize>>,
    visits: Rc<RefCell<Vec<String>>>,
}

impl StaticDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.set_page(url, html);
        self
    }

    /// Add or replace the page served for `url`.
    pub fn set_page(&self, url: &str, html: &str) {
        self.pages
            .borrow_mut()
            .insert(url.to_string(), html.to_string());
    }

    pub fn opened(&self) -> usize {
        self.opened.get()
    }

    pub fn closed(&self) -> usize {
        self.closed.get()
    }

    /// URLs navigated to, in order.
    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Driver for StaticDriver {
    type Session = StaticSession;

    fn open(&self) -> Result<StaticSession> {
        self.opened.set(self.opened.get() + 1);
        Ok(StaticSession {
            driver: self.clone(),
            page: None,
        })
    }
}

pub struct StaticSession {
    driver: StaticDriver,
    page: Option<Html>,
}

impl StaticSession {
    fn document(&self) -> Result<&Html> {
        self.page
            .as_ref()
            .ok_or_else(|| ScrapeError::Browser("no page loaded".into()))
    }
}

impl Session for StaticSession {
    type Element<'a> = ElementRef<'a>;

    fn navigate(&mut self, url: &str) -> Result<()> {
        self.driver.visits.borrow_mut().push(url.to_string());
        let html = self
            .driver
            .pages
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Browser(format!("no page for {url}")))?;
        self.page = Some(Html::parse_document(&html));
        Ok(())
    }

    fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<ElementRef<'_>> {
        let sel = parse_selector(selector)?;
        self.document()?
            .select(&sel)
            .next()
            .ok_or_else(|| ScrapeError::Timeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
    }

    fn find_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.document()?.select(&sel).collect())
    }

    fn close(self) -> Result<()> {
        self.driver.closed.set(self.driver.closed.get() + 1);
        Ok(())
    }
}

impl<'a> Element for ElementRef<'a> {
    fn click(&self) -> Result<()> {
        Ok(())
    }

    fn text(&self) -> Result<String> {
        Ok(ElementRef::text(self).collect())
    }

    fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.value().attr(name).map(str::to_string))
    }

    fn find(&self, selector: &str) -> Result<Option<Self>> {
        let sel = parse_selector(selector)?;
        Ok(self.select(&sel).next())
    }
}
