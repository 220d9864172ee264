//! Browser Driver
//!
//! The extractor and the phases only talk to these traits. `ChromeDriver`
//! drives a real headless Chrome; `StaticDriver` serves pre-rendered HTML
//! from memory.

mod chrome;
mod static_page;

pub use chrome::{ChromeDriver, ChromeSession};
pub use static_page::{StaticDriver, StaticSession};

use crate::error::Result;
use log::warn;
use std::time::Duration;

/// Hands out browser sessions. One session per page fetch.
pub trait Driver {
    type Session: Session;

    fn open(&self) -> Result<Self::Session>;
}

pub trait Session: Sized {
    type Element<'a>: Element
    where
        Self: 'a;

    fn navigate(&mut self, url: &str) -> Result<()>;

    /// Poll until an element matches `selector`, failing with
    /// [`ScrapeError::Timeout`](crate::error::ScrapeError::Timeout) after `timeout`.
    fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<Self::Element<'_>>;

    /// All current matches; empty when nothing matches.
    fn find_all(&self, selector: &str) -> Result<Vec<Self::Element<'_>>>;

    fn close(self) -> Result<()>;
}

pub trait Element: Sized {
    fn click(&self) -> Result<()>;
    fn text(&self) -> Result<String>;
    fn attribute(&self, name: &str) -> Result<Option<String>>;
    /// First descendant matching `selector`.
    fn find(&self, selector: &str) -> Result<Option<Self>>;
}

/// Open a session, run `f` on it, then close it whether `f` failed or not.
pub fn with_session<D, T, F>(driver: &D, f: F) -> Result<T>
where
    D: Driver,
    F: FnOnce(&mut D::Session) -> Result<T>,
{
    let mut session = driver.open()?;
    let result = f(&mut session);
    if let Err(e) = session.close() {
        warn!("failed to close browser session: {e}");
    }
    result
}
