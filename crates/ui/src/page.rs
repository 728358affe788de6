//! Browser boundary.
//!
//! The operations mirror what an acceptance-test actor offers on an admin
//! page. Implementations own the driver session; every call blocks until the
//! driver answers.

use core::fmt;
use std::time::Duration;

use crate::error::UiResult;
use crate::xpath::Locator;

/// How to find an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Css(String),
    XPath(Locator),
}

impl Selector {
    pub fn css(selector: impl Into<String>) -> Self {
        Selector::Css(selector.into())
    }

    /// Query string for the driver (CSS as given, XPath rendered).
    pub fn to_query(&self) -> String {
        match self {
            Selector::Css(css) => css.clone(),
            Selector::XPath(locator) => locator.render(),
        }
    }

    pub fn is_xpath(&self) -> bool {
        matches!(self, Selector::XPath(_))
    }
}

impl From<Locator> for Selector {
    fn from(locator: Locator) -> Self {
        Selector::XPath(locator)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

/// An open admin page.
pub trait AdminPage {
    /// Open a path relative to the admin root (e.g. `post.php?post=1&action=edit`).
    fn navigate(&mut self, admin_path: &str) -> UiResult<()>;

    fn click(&mut self, selector: &Selector) -> UiResult<()>;

    /// Click the element with the given visible text inside `context`.
    fn click_text(&mut self, text: &str, context: &Selector) -> UiResult<()>;

    /// Assert that `text` is visible inside `selector`.
    fn see(&mut self, text: &str, selector: &Selector) -> UiResult<()>;

    /// Block until the element is visible, or fail with a timeout.
    fn wait_for_element_visible(&mut self, selector: &Selector, timeout: Duration) -> UiResult<()>;

    /// Block until no matching element is visible, or fail with a timeout.
    fn wait_for_element_not_visible(&mut self, selector: &Selector, timeout: Duration) -> UiResult<()>;

    /// Scroll the element into view, shifted by the given offsets in pixels.
    fn scroll_to(&mut self, selector: &Selector, offset_x: i32, offset_y: i32) -> UiResult<()>;

    /// Attribute value of the first match; `None` if the attribute is absent.
    fn grab_attribute(&mut self, selector: &Selector, attribute: &str) -> UiResult<Option<String>>;
}

impl<P> AdminPage for &mut P
where
    P: AdminPage + ?Sized,
{
    fn navigate(&mut self, admin_path: &str) -> UiResult<()> {
        (**self).navigate(admin_path)
    }

    fn click(&mut self, selector: &Selector) -> UiResult<()> {
        (**self).click(selector)
    }

    fn click_text(&mut self, text: &str, context: &Selector) -> UiResult<()> {
        (**self).click_text(text, context)
    }

    fn see(&mut self, text: &str, selector: &Selector) -> UiResult<()> {
        (**self).see(text, selector)
    }

    fn wait_for_element_visible(&mut self, selector: &Selector, timeout: Duration) -> UiResult<()> {
        (**self).wait_for_element_visible(selector, timeout)
    }

    fn wait_for_element_not_visible(&mut self, selector: &Selector, timeout: Duration) -> UiResult<()> {
        (**self).wait_for_element_not_visible(selector, timeout)
    }

    fn scroll_to(&mut self, selector: &Selector, offset_x: i32, offset_y: i32) -> UiResult<()> {
        (**self).scroll_to(selector, offset_x, offset_y)
    }

    fn grab_attribute(&mut self, selector: &Selector, attribute: &str) -> UiResult<Option<String>> {
        (**self).grab_attribute(selector, attribute)
    }
}
