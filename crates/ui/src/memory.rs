//! In-memory model of the product edit screen for tests/dev.
//!
//! It knows three kinds of elements: collapsed variation panels (with their
//! hidden id markers), the loading overlay, and plain elements registered by
//! CSS selector. XPath selectors are matched by comparing them with the
//! locators [`VariationLocator`] builds, so anything else is "not found".
//!
//! The model renders a screen once per navigation; clicking a panel records
//! that it was expanded but does not re-render its classes.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use shopkit_core::ProductId;

use crate::error::{UiError, UiResult};
use crate::page::{AdminPage, Selector};
use crate::route::AdminRoute;
use crate::variation::{MARKER_PREFIX, OVERLAY_SELECTOR, VARIATIONS_TAB_SELECTOR, VariationLocator};
use crate::wait::poll_until;

/// A call the page received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCall {
    Navigate(String),
    Click(String),
    ClickText { text: String, context: String },
    See { text: String, selector: String },
    WaitVisible(String),
    WaitNotVisible(String),
    ScrollTo { selector: String, x: i32, y: i32 },
    GrabAttribute { selector: String, attribute: String },
}

/// A plain element addressed by CSS selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticElement {
    pub text: String,
    pub attributes: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct Panel {
    variation: ProductId,
    /// Polls before the panel becomes visible after the tab opens.
    hidden_polls: usize,
    expanded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Panel(usize),
    Marker(usize),
    Overlay,
}

#[derive(Debug, Default)]
pub struct InMemoryAdminPage {
    poll_interval: Duration,
    location: Option<String>,
    /// Variation render order per product edit path.
    screens: HashMap<String, Vec<ProductId>>,
    panels: Vec<Panel>,
    tab_open: bool,
    overlay_polls: usize,
    marker_names: HashMap<ProductId, Option<String>>,
    elements: HashMap<String, StaticElement>,
    calls: Vec<PageCall>,
}

impl InMemoryAdminPage {
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_millis(1),
            ..Self::default()
        }
    }

    /// Register the variation panels the edit screen of `parent` renders,
    /// in render order.
    pub fn render_variations(
        &mut self,
        parent: ProductId,
        order: impl IntoIterator<Item = ProductId>,
    ) -> &mut Self {
        let path = AdminRoute::ProductEdit(parent).path();
        self.screens.insert(path.clone(), order.into_iter().collect());
        if self.location.as_deref() == Some(path.as_str()) {
            self.load_screen();
        }
        self
    }

    /// Navigate to `parent`'s edit screen with the variations tab open.
    pub fn show_variations(&mut self, parent: ProductId) -> UiResult<()> {
        self.navigate(&AdminRoute::ProductEdit(parent).path())?;
        self.tab_open = true;
        Ok(())
    }

    /// Keep the panel for `variation` hidden for this many polls.
    pub fn delay_panel(&mut self, variation: ProductId, polls: usize) -> &mut Self {
        if let Some(panel) = self.panels.iter_mut().find(|p| p.variation == variation) {
            panel.hidden_polls = polls;
        }
        self
    }

    /// Keep the loading overlay up for this many polls.
    pub fn show_overlay(&mut self, polls: usize) -> &mut Self {
        self.overlay_polls = polls;
        self
    }

    /// Render the marker for `variation` with a custom name (`None` drops the
    /// attribute).
    pub fn override_marker_name(&mut self, variation: ProductId, name: Option<&str>) -> &mut Self {
        self.marker_names.insert(variation, name.map(str::to_string));
        self
    }

    pub fn add_element(&mut self, css: impl Into<String>, element: StaticElement) -> &mut Self {
        self.elements.insert(css.into(), element);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn calls(&self) -> &[PageCall] {
        &self.calls
    }

    pub fn is_expanded(&self, variation: ProductId) -> bool {
        self.panels.iter().any(|p| p.variation == variation && p.expanded)
    }

    fn load_screen(&mut self) {
        let order = self
            .location
            .as_ref()
            .and_then(|path| self.screens.get(path))
            .cloned()
            .unwrap_or_default();

        self.panels = order
            .into_iter()
            .map(|variation| Panel {
                variation,
                hidden_polls: 0,
                expanded: false,
            })
            .collect();
        self.tab_open = false;
    }

    fn resolve(&self, selector: &Selector) -> Option<Target> {
        match selector {
            Selector::Css(css) if css == OVERLAY_SELECTOR => Some(Target::Overlay),
            Selector::Css(_) => None,
            Selector::XPath(locator) => {
                let query = locator.render();
                self.panels.iter().enumerate().find_map(|(i, p)| {
                    if query == VariationLocator::panel(p.variation).render() {
                        Some(Target::Panel(i))
                    } else if query == VariationLocator::scoped_marker(p.variation).render() {
                        Some(Target::Marker(i))
                    } else {
                        None
                    }
                })
            }
        }
    }

    /// One visibility probe; hidden panels count down per probe.
    fn probe_visible(&mut self, selector: &Selector) -> bool {
        match self.resolve(selector) {
            Some(Target::Panel(i)) | Some(Target::Marker(i)) => {
                if !self.tab_open {
                    return false;
                }
                let panel = &mut self.panels[i];
                if panel.hidden_polls == 0 {
                    true
                } else {
                    panel.hidden_polls -= 1;
                    false
                }
            }
            Some(Target::Overlay) => {
                if self.overlay_polls == 0 {
                    false
                } else {
                    self.overlay_polls -= 1;
                    true
                }
            }
            None => matches!(selector, Selector::Css(css) if self.elements.contains_key(css)),
        }
    }

    fn not_found(selector: &Selector) -> UiError {
        UiError::Driver(format!("no element matches {selector}"))
    }

    fn element(&self, selector: &Selector) -> UiResult<&StaticElement> {
        match selector {
            Selector::Css(css) => self.elements.get(css).ok_or_else(|| Self::not_found(selector)),
            Selector::XPath(_) => Err(Self::not_found(selector)),
        }
    }
}

impl AdminPage for InMemoryAdminPage {
    fn navigate(&mut self, admin_path: &str) -> UiResult<()> {
        self.calls.push(PageCall::Navigate(admin_path.to_string()));
        self.location = Some(admin_path.to_string());
        self.load_screen();
        debug!(path = admin_path, panels = self.panels.len(), "navigated");
        Ok(())
    }

    fn click(&mut self, selector: &Selector) -> UiResult<()> {
        self.calls.push(PageCall::Click(selector.to_query()));
        match self.resolve(selector) {
            Some(Target::Panel(i)) if self.tab_open => {
                self.panels[i].expanded = true;
                Ok(())
            }
            Some(_) => Err(UiError::Driver(format!("{selector} is not clickable"))),
            None => self.element(selector).map(|_| ()),
        }
    }

    fn click_text(&mut self, text: &str, context: &Selector) -> UiResult<()> {
        self.calls.push(PageCall::ClickText {
            text: text.to_string(),
            context: context.to_query(),
        });
        if text == "Variations" && context.to_query() == VARIATIONS_TAB_SELECTOR {
            self.tab_open = true;
            return Ok(());
        }
        let element = self.element(context)?;
        if element.text.contains(text) {
            Ok(())
        } else {
            Err(UiError::Driver(format!("no {text:?} inside {context}")))
        }
    }

    fn see(&mut self, text: &str, selector: &Selector) -> UiResult<()> {
        self.calls.push(PageCall::See {
            text: text.to_string(),
            selector: selector.to_query(),
        });
        let element = self.element(selector)?;
        if element.text.contains(text) {
            Ok(())
        } else {
            Err(UiError::Assertion {
                expected: text.to_string(),
                actual: element.text.clone(),
            })
        }
    }

    fn wait_for_element_visible(&mut self, selector: &Selector, timeout: Duration) -> UiResult<()> {
        let query = selector.to_query();
        self.calls.push(PageCall::WaitVisible(query.clone()));
        let interval = self.poll_interval;
        poll_until(&query, timeout, interval, || Ok(self.probe_visible(selector)))
    }

    fn wait_for_element_not_visible(&mut self, selector: &Selector, timeout: Duration) -> UiResult<()> {
        let query = selector.to_query();
        self.calls.push(PageCall::WaitNotVisible(query.clone()));
        let interval = self.poll_interval;
        poll_until(&query, timeout, interval, || Ok(!self.probe_visible(selector)))
    }

    fn scroll_to(&mut self, selector: &Selector, offset_x: i32, offset_y: i32) -> UiResult<()> {
        self.calls.push(PageCall::ScrollTo {
            selector: selector.to_query(),
            x: offset_x,
            y: offset_y,
        });
        match self.resolve(selector) {
            Some(_) => Ok(()),
            None => self.element(selector).map(|_| ()),
        }
    }

    fn grab_attribute(&mut self, selector: &Selector, attribute: &str) -> UiResult<Option<String>> {
        self.calls.push(PageCall::GrabAttribute {
            selector: selector.to_query(),
            attribute: attribute.to_string(),
        });
        match self.resolve(selector) {
            Some(Target::Marker(i)) => {
                let variation = self.panels[i].variation;
                Ok(match attribute {
                    "name" => match self.marker_names.get(&variation) {
                        Some(custom) => custom.clone(),
                        None => Some(format!("{MARKER_PREFIX}[{i}]")),
                    },
                    "value" => Some(variation.to_string()),
                    "type" => Some("hidden".to_string()),
                    _ => None,
                })
            }
            Some(_) => Ok(None),
            None => Ok(self.element(selector)?.attributes.get(attribute).cloned()),
        }
    }
}
