//! Structured XPath 1.0 locators.
//!
//! Locators are built as a small tree and rendered once, so attribute values
//! never get spliced into query strings by hand.
//!
//! ```ignore
//! let marker = Locator::relative("input")
//!     .with(Predicate::attr_starts_with("name", "variable_post_id")
//!         .and(Predicate::attr_equals("value", Literal::Number(42))));
//! let panel = Locator::anywhere("div")
//!     .with(Predicate::has_classes(["woocommerce_variation", "closed"]))
//!     .with(Predicate::contains(marker));
//! ```

use core::fmt;

/// A literal in a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    Number(u64),
}

impl Literal {
    pub fn str(value: impl Into<String>) -> Self {
        Literal::Str(value.into())
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        Literal::Number(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Str(s) => f.write_str(&quote(s)),
        }
    }
}

/// Quote a string as an XPath 1.0 literal.
///
/// XPath 1.0 has no escape sequences, so a value holding both quote kinds is
/// rendered as a `concat()` of alternately quoted pieces.
pub fn quote(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }

    let parts: Vec<String> = value
        .split('\'')
        .map(|piece| format!("'{piece}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// Where a locator step searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Anywhere in the document (`//tag`).
    Anywhere,
    /// Direct child of the context node (`tag`).
    Relative,
    /// Any descendant of the context node (`descendant::tag`).
    Descendant,
    /// Any ancestor of the context node (`ancestor::tag`).
    Ancestor,
}

/// A predicate inside `[...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    AttrEquals { name: String, value: Literal },
    AttrStartsWith { name: String, prefix: String },
    /// Element carries every class token, in any order.
    HasClasses(Vec<String>),
    /// Element has a descendant matching the locator.
    Contains(Box<Locator>),
    /// Element sits inside an ancestor matching the locator.
    Within(Box<Locator>),
    /// 1-based position among the matched siblings.
    Position(usize),
    And(Vec<Predicate>),
}

impl Predicate {
    pub fn attr_equals(name: impl Into<String>, value: impl Into<Literal>) -> Self {
        Predicate::AttrEquals {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn attr_starts_with(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Predicate::AttrStartsWith {
            name: name.into(),
            prefix: prefix.into(),
        }
    }

    pub fn has_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::HasClasses(classes.into_iter().map(Into::into).collect())
    }

    pub fn contains(locator: Locator) -> Self {
        Predicate::Contains(Box::new(locator.with_axis(Axis::Descendant)))
    }

    pub fn within(locator: Locator) -> Self {
        Predicate::Within(Box::new(locator.with_axis(Axis::Ancestor)))
    }

    pub fn and(self, other: Predicate) -> Self {
        match self {
            Predicate::And(mut all) => {
                all.push(other);
                Predicate::And(all)
            }
            first => Predicate::And(vec![first, other]),
        }
    }

    fn render(&self, out: &mut String) {
        match self {
            Predicate::AttrEquals { name, value } => {
                out.push_str(&format!("@{name} = {value}"));
            }
            Predicate::AttrStartsWith { name, prefix } => {
                out.push_str(&format!("starts-with(@{name}, {})", quote(prefix)));
            }
            Predicate::HasClasses(classes) => {
                let tests: Vec<String> = classes
                    .iter()
                    .map(|class| {
                        format!(
                            "contains(concat(' ', normalize-space(@class), ' '), {})",
                            quote(&format!(" {class} "))
                        )
                    })
                    .collect();
                out.push_str(&tests.join(" and "));
            }
            Predicate::Contains(locator) | Predicate::Within(locator) => locator.render_into(out),
            Predicate::Position(n) => out.push_str(&n.to_string()),
            Predicate::And(all) => {
                for (i, p) in all.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" and ");
                    }
                    p.render(out);
                }
            }
        }
    }
}

/// One location step: axis, element name and predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    axis: Axis,
    tag: String,
    predicates: Vec<Predicate>,
}

impl Locator {
    pub fn anywhere(tag: impl Into<String>) -> Self {
        Self::new(Axis::Anywhere, tag)
    }

    pub fn relative(tag: impl Into<String>) -> Self {
        Self::new(Axis::Relative, tag)
    }

    fn new(axis: Axis, tag: impl Into<String>) -> Self {
        Self {
            axis,
            tag: tag.into(),
            predicates: Vec::new(),
        }
    }

    /// Append a predicate as its own `[...]` block.
    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Narrow to the `n`-th match (1-based, XPath convention).
    pub fn nth(self, n: usize) -> Self {
        self.with(Predicate::Position(n))
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self.axis {
            Axis::Anywhere => out.push_str("//"),
            Axis::Relative => {}
            Axis::Descendant => out.push_str("descendant::"),
            Axis::Ancestor => out.push_str("ancestor::"),
        }
        out.push_str(&self.tag);
        for p in &self.predicates {
            out.push('[');
            p.render(out);
            out.push(']');
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_literals_safely() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("it's"), "\"it's\"");
        assert_eq!(quote(r#"a'b"c"#), r#"concat('a', "'", 'b"c')"#);
    }

    #[test]
    fn renders_attribute_predicates() {
        let marker = Locator::relative("input").with(
            Predicate::attr_starts_with("name", "variable_post_id")
                .and(Predicate::attr_equals("value", 42u64)),
        );
        assert_eq!(
            marker.render(),
            "input[starts-with(@name, 'variable_post_id') and @value = 42]"
        );
        assert_eq!(
            marker.clone().with_axis(Axis::Anywhere).render(),
            "//input[starts-with(@name, 'variable_post_id') and @value = 42]"
        );
    }

    #[test]
    fn renders_class_tokens_and_descendant_containment() {
        let panel = Locator::anywhere("div")
            .with(Predicate::has_classes(["a", "b"]))
            .with(Predicate::contains(
                Locator::relative("input").with(Predicate::attr_equals("type", "hidden")),
            ));

        assert_eq!(
            panel.render(),
            "//div[contains(concat(' ', normalize-space(@class), ' '), ' a ') and \
             contains(concat(' ', normalize-space(@class), ' '), ' b ')]\
             [descendant::input[@type = 'hidden']]"
        );
    }

    #[test]
    fn renders_ancestor_scoping() {
        let scoped = Locator::anywhere("input")
            .with(Predicate::attr_equals("value", 7u64))
            .with(Predicate::within(Locator::relative("form").with(Predicate::has_classes(["edit"]))));

        assert_eq!(
            scoped.render(),
            "//input[@value = 7][ancestor::form[contains(concat(' ', normalize-space(@class), ' '), ' edit ')]]"
        );
    }

    #[test]
    fn renders_position_index() {
        let second = Locator::anywhere("tr").nth(2);
        assert_eq!(second.to_string(), "//tr[2]");
    }

    #[test]
    fn string_values_cannot_break_out_of_predicates() {
        let loc = Locator::anywhere("a").with(Predicate::attr_equals("title", "x'] | //*['"));
        assert_eq!(loc.render(), r#"//a[@title = "x'] | //*['"]"#);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        /// Undo `quote` for the three shapes it produces.
        fn unquote(rendered: &str) -> String {
            if let Some(inner) = rendered.strip_prefix("concat(").and_then(|r| r.strip_suffix(')')) {
                inner
                    .split(", ")
                    .map(|part| part[1..part.len() - 1].to_string())
                    .collect()
            } else {
                rendered[1..rendered.len() - 1].to_string()
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: quoting is lossless for any mix of quote characters.
            #[test]
            fn quote_round_trips(value in "[a-z'\"]{0,16}") {
                prop_assert_eq!(unquote(&quote(&value)), value);
            }
        }
    }
}
