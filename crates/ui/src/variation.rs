//! Resolve a variation to the render position of its panel on the product
//! edit screen.
//!
//! Render order is chosen by the screen, not by creation order, and may
//! change when the screen re-renders (e.g. after adding a variation). A
//! position is only good until the next interaction that could re-render;
//! call [`VariationLocator::locate`] again after such interactions.

use tracing::{debug, info, instrument};

use shopkit_catalog::Variation;
use shopkit_core::{Entity, ProductId};

use crate::config::UiConfig;
use crate::error::{UiError, UiResult};
use crate::page::{AdminPage, Selector};
use crate::route::AdminRoute;
use crate::xpath::{Axis, Locator, Predicate};

/// Name prefix of the hidden input carrying a variation's id.
pub const MARKER_PREFIX: &str = "variable_post_id";

/// Classes of a collapsed variation panel.
pub const PANEL_CLASSES: [&str; 3] = ["woocommerce_variation", "wc-metabox", "closed"];

/// Loading overlay shown while the screen fetches variations.
pub const OVERLAY_SELECTOR: &str = ".blockOverlay";

/// Tab link that reveals the variations list.
pub const VARIATIONS_TAB_SELECTOR: &str = ".variations_tab";

#[derive(Debug, Clone, Default)]
pub struct VariationLocator {
    config: UiConfig,
}

impl VariationLocator {
    pub fn new(config: UiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Hidden input whose value is `id`, relative to its panel.
    pub fn marker(id: ProductId) -> Locator {
        Locator::relative("input").with(
            Predicate::attr_starts_with("name", MARKER_PREFIX)
                .and(Predicate::attr_equals("value", id.get())),
        )
    }

    /// The collapsed panel holding the marker for `id`.
    ///
    /// Scoping the marker to a panel keeps the match unique even if the id
    /// shows up in some other input on the page.
    pub fn panel(id: ProductId) -> Locator {
        Locator::anywhere("div")
            .with(Predicate::has_classes(PANEL_CLASSES))
            .with(Predicate::contains(Self::marker(id)))
    }

    /// The marker for `id`, anywhere on the page but only inside a panel.
    ///
    /// Other inputs carrying the same value (e.g. a bulk-edit form) are not
    /// matched.
    pub fn scoped_marker(id: ProductId) -> Locator {
        Self::marker(id)
            .with_axis(Axis::Anywhere)
            .with(Predicate::within(Locator::relative("div").with(Predicate::has_classes(PANEL_CLASSES))))
    }

    /// Open the variation's panel and return its 0-based render position.
    ///
    /// The page must already show the parent's edit screen with the
    /// variations tab open.
    #[instrument(skip(self, page, variation), fields(variation_id = tracing::field::Empty))]
    pub fn locate<P>(&self, page: &mut P, variation: &Variation) -> UiResult<usize>
    where
        P: AdminPage + ?Sized,
    {
        let id = persisted_id(variation)?;
        tracing::Span::current().record("variation_id", id.get());

        let panel = Selector::from(Self::panel(id));
        let (dx, dy) = self.config.scroll_offset;

        page.wait_for_element_visible(&panel, self.config.element_timeout)?;
        page.wait_for_element_not_visible(&Selector::css(OVERLAY_SELECTOR), self.config.overlay_timeout)?;
        page.scroll_to(&panel, dx, dy)?;
        page.click(&panel)?;
        debug!(panel = %panel, "variation panel opened");

        let marker = Selector::from(Self::scoped_marker(id));
        let name = page
            .grab_attribute(&marker, "name")?
            .ok_or_else(|| UiError::unexpected_dom(format!("marker {marker} has no name attribute")))?;

        let position = parse_marker_name(&name)?;
        info!(variation_id = %id, position, "variation located");
        Ok(position)
    }

    /// Open the parent's edit screen, switch to the variations tab, and
    /// locate the variation there.
    pub fn open_variation<P>(&self, page: &mut P, variation: &Variation) -> UiResult<usize>
    where
        P: AdminPage + ?Sized,
    {
        persisted_id(variation)?;
        page.navigate(&AdminRoute::ProductEdit(variation.parent_id()).path())?;
        page.click_text("Variations", &Selector::css(VARIATIONS_TAB_SELECTOR))?;
        self.locate(page, variation)
    }
}

fn persisted_id(variation: &Variation) -> UiResult<ProductId> {
    variation
        .id()
        .ok_or_else(|| UiError::invalid_state("variation has not been persisted"))
}

/// `variable_post_id[3]` -> `3`.
pub fn parse_marker_name(name: &str) -> UiResult<usize> {
    let malformed = || UiError::unexpected_dom(format!("malformed marker name: {name:?}"));

    let index = name
        .trim()
        .strip_prefix(MARKER_PREFIX)
        .ok_or_else(malformed)?
        .trim_matches(|c: char| c == '[' || c == ']');

    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    index.parse().map_err(|_| malformed())
}
