// SPDX-License-Identifier: MPL-2.0
//! Core notice data structures.
//!
//! This module defines the `Notice` struct, its `Severity` and the
//! `Content` it carries.

use std::fmt;

/// Unique identifier for a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoticeId(u64);

impl NoticeId {
    /// Creates a new unique notice ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NoticeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity only selects presentation; it has no effect on timing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Log,
    Error,
    Info,
    Success,
    /// Any other tag; rendered with the class `humane-<name>`.
    Custom(String),
}

impl Severity {
    /// Name used to build the presentation class.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Severity::Log => "log",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Custom(name) => name,
        }
    }

    /// Parses a severity name; unknown names become [`Severity::Custom`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "log" => Severity::Log,
            "error" => Severity::Error,
            "info" => Severity::Info,
            "success" => Severity::Success,
            other => Severity::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a notice says.
///
/// Text is trusted markup and is rendered untouched. A list is rendered as a
/// bulleted list, one entry per item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Content {
    Text(String),
    List(Vec<String>),
}

impl Content {
    /// Markup for a document-like surface.
    ///
    /// ```
    /// use humane::notifications::Content;
    ///
    /// assert_eq!(Content::from("hello").to_markup(), "hello");
    /// assert_eq!(Content::from(["a", "b"]).to_markup(), "<ul><li>a<li>b</ul>");
    /// ```
    #[must_use]
    pub fn to_markup(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::List(items) => format!("<ul><li>{}</ul>", items.join("<li>")),
        }
    }

    /// Plain lines for surfaces that draw text directly.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Content::Text(text) => vec![text.as_str()],
            Content::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Content::List(_))
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Vec<String>> for Content {
    fn from(items: Vec<String>) -> Self {
        Content::List(items)
    }
}

impl From<Vec<&str>> for Content {
    fn from(items: Vec<&str>) -> Self {
        Content::List(items.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Content {
    fn from(items: [&str; N]) -> Self {
        Content::List(items.iter().map(|item| (*item).to_string()).collect())
    }
}

/// A queued message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    id: NoticeId,
    severity: Severity,
    content: Content,
}

impl Notice {
    pub fn new(severity: Severity, content: impl Into<Content>) -> Self {
        Self {
            id: NoticeId::new(),
            severity,
            content: content.into(),
        }
    }

    pub fn log(content: impl Into<Content>) -> Self {
        Self::new(Severity::Log, content)
    }

    pub fn error(content: impl Into<Content>) -> Self {
        Self::new(Severity::Error, content)
    }

    pub fn info(content: impl Into<Content>) -> Self {
        Self::new(Severity::Info, content)
    }

    pub fn success(content: impl Into<Content>) -> Self {
        Self::new(Severity::Success, content)
    }

    #[must_use]
    pub fn id(&self) -> NoticeId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> &Severity {
        &self.severity
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_ids_are_unique_and_increasing() {
        let n1 = Notice::log("test");
        let n2 = Notice::log("test");
        assert_ne!(n1.id(), n2.id());
        assert!(n1.id() < n2.id());
    }

    #[test]
    fn notice_constructors_set_correct_severity() {
        assert_eq!(Notice::log("").severity(), &Severity::Log);
        assert_eq!(Notice::error("").severity(), &Severity::Error);
        assert_eq!(Notice::info("").severity(), &Severity::Info);
        assert_eq!(Notice::success("").severity(), &Severity::Success);
    }

    #[test]
    fn severity_names_round_trip() {
        for severity in [
            Severity::Log,
            Severity::Error,
            Severity::Info,
            Severity::Success,
            Severity::Custom("warning".into()),
        ] {
            assert_eq!(Severity::from_name(severity.name()), severity);
        }
    }

    #[test]
    fn text_content_is_rendered_verbatim() {
        let content = Content::from("<b>saved</b> & done");
        assert_eq!(content.to_markup(), "<b>saved</b> & done");
        assert!(!content.is_list());
    }

    #[test]
    fn list_content_wraps_items_in_order() {
        let content = Content::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(content.to_markup(), "<ul><li>a<li>b</ul>");
        assert_eq!(content.lines(), vec!["a", "b"]);
    }

    #[test]
    fn empty_list_still_renders_a_list() {
        let content = Content::from(Vec::<&str>::new());
        assert_eq!(content.to_markup(), "<ul><li></ul>");
    }
}
