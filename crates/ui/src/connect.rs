//! Connect-button check: the button must point at the connection URL the
//! plugin would generate, ignoring the per-request nonce.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{UiError, UiResult};
use crate::page::{AdminPage, Selector};

static NONCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"nonce[^&]+").expect("nonce pattern is a valid regex"));

/// Remove every `nonce...` run up to the next `&`.
pub fn strip_nonce(url: &str) -> String {
    NONCE.replace_all(url, "").into_owned()
}

/// Assert that `selector` shows `text` and links to `connect_url`.
pub fn see_connect_button<P>(page: &mut P, text: &str, selector: &Selector, connect_url: &str) -> UiResult<()>
where
    P: AdminPage + ?Sized,
{
    page.see(text, selector)?;

    let href = page
        .grab_attribute(selector, "href")?
        .ok_or_else(|| UiError::unexpected_dom(format!("{selector} has no href")))?;

    let expected = strip_nonce(connect_url);
    let actual = strip_nonce(&href);
    if expected != actual {
        return Err(UiError::Assertion { expected, actual });
    }
    Ok(())
}
