// SPDX-License-Identifier: MPL-2.0
//! The single on-screen element notices are rendered into.
//!
//! A [`Surface`] is whatever the host view layer offers: a DOM node, a
//! retained widget model, a terminal cell region. The notification center
//! owns exactly one, bound once through
//! [`NotificationCenter::attach`](crate::notifications::NotificationCenter::attach).
//!
//! [`SharedSurface`] is a ready-made retained implementation. Its
//! [`Snapshot`] can be rendered each frame, for instance with
//! [`ui::toast::view`](crate::ui::toast::view).

use crate::notifications::{Content, Severity};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Class names making up the styling contract.
///
/// The element always carries [`BASE`](class::BASE). While a notice is on
/// screen it also carries `humane-<severity>` and [`SHOW`](class::SHOW).
pub mod class {
    use crate::notifications::Severity;

    /// Element id and base class.
    pub const BASE: &str = "humane";

    /// Marks the element visible.
    pub const SHOW: &str = "humane-show";

    /// `humane-<severity>`.
    #[must_use]
    pub fn severity(severity: &Severity) -> String {
        format!("{BASE}-{}", severity.name())
    }

    /// Full class name of an element showing a notice of `severity`.
    #[must_use]
    pub fn shown(severity: &Severity) -> String {
        format!("{BASE} {} {SHOW}", self::severity(severity))
    }

    /// `class_name` with the visible marker removed.
    #[must_use]
    pub fn hidden(class_name: &str) -> String {
        class_name
            .split_whitespace()
            .filter(|token| *token != SHOW)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether `class_name` carries the visible marker.
    #[must_use]
    pub fn is_shown(class_name: &str) -> bool {
        class_name.split_whitespace().any(|token| token == SHOW)
    }

    /// Severity encoded in `class_name`, if any.
    #[must_use]
    pub fn severity_of(class_name: &str) -> Option<Severity> {
        let prefix = format!("{BASE}-");
        class_name
            .split_whitespace()
            .filter(|token| *token != SHOW)
            .find_map(|token| token.strip_prefix(prefix.as_str()))
            .map(Severity::from_name)
    }
}

/// Rendering operations the notification center needs from the host.
pub trait Surface: Send {
    fn set_id(&mut self, id: &str);

    /// Replaces the element's content.
    fn set_content(&mut self, content: &Content);

    fn set_class_name(&mut self, class_name: &str);

    fn class_name(&self) -> String;

    /// Sets the element opacity, `0.0..=1.0`. Only the manual animation uses it.
    fn set_opacity(&mut self, opacity: f32);

    fn opacity(&self) -> f32;

    /// Whether the host animates class changes itself.
    ///
    /// Probed once, when the surface is attached.
    fn supports_transitions(&self) -> bool;
}

/// Everything a view needs to draw the element.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub id: String,
    pub class_name: String,
    pub content: Option<Content>,
    pub opacity: f32,
    pub transitions: bool,
}

impl Snapshot {
    #[must_use]
    pub fn is_shown(&self) -> bool {
        class::is_shown(&self.class_name)
    }

    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        class::severity_of(&self.class_name)
    }

    /// Content as markup; empty before the first notice.
    #[must_use]
    pub fn markup(&self) -> String {
        self.content
            .as_ref()
            .map(Content::to_markup)
            .unwrap_or_default()
    }

    /// How opaque the element should be drawn.
    ///
    /// With native transitions the host interpolates between hidden and
    /// shown; without them the stepped opacity is authoritative.
    #[must_use]
    pub fn visibility(&self) -> f32 {
        if self.transitions {
            if self.is_shown() {
                1.0
            } else {
                0.0
            }
        } else {
            self.opacity.clamp(0.0, 1.0)
        }
    }
}

/// Retained surface shared between the notification center and a view.
///
/// Cloning yields another handle to the same element.
#[derive(Debug, Clone)]
pub struct SharedSurface {
    inner: Arc<Mutex<Snapshot>>,
}

impl SharedSurface {
    /// Creates an empty element. `transitions` is what the capability probe
    /// will report.
    #[must_use]
    pub fn new(transitions: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Snapshot {
                id: String::new(),
                class_name: String::new(),
                content: None,
                opacity: 1.0,
                transitions,
            })),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Surface for SharedSurface {
    fn set_id(&mut self, id: &str) {
        self.lock().id = id.to_string();
    }

    fn set_content(&mut self, content: &Content) {
        self.lock().content = Some(content.clone());
    }

    fn set_class_name(&mut self, class_name: &str) {
        self.lock().class_name = class_name.to_string();
    }

    fn class_name(&self) -> String {
        self.lock().class_name.clone()
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.lock().opacity = opacity;
    }

    fn opacity(&self) -> f32 {
        self.lock().opacity
    }

    fn supports_transitions(&self) -> bool {
        self.lock().transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shown_class_encodes_severity_and_marker() {
        assert_eq!(
            class::shown(&Severity::Error),
            "humane humane-error humane-show"
        );
        assert_eq!(
            class::shown(&Severity::Custom("warning".into())),
            "humane humane-warning humane-show"
        );
    }

    #[test]
    fn hidden_strips_only_the_marker() {
        let shown = class::shown(&Severity::Success);
        assert_eq!(class::hidden(&shown), "humane humane-success");
        assert_eq!(class::hidden("humane"), "humane");
    }

    #[test]
    fn severity_is_recovered_from_class_name() {
        assert_eq!(
            class::severity_of("humane humane-info humane-show"),
            Some(Severity::Info)
        );
        assert_eq!(class::severity_of("humane"), None);
    }

    #[test]
    fn shared_surface_handles_see_the_same_element() {
        let surface = SharedSurface::new(false);
        let mut writer = surface.clone();

        writer.set_id(class::BASE);
        writer.set_class_name(&class::shown(&Severity::Log));
        writer.set_content(&Content::from(["a", "b"]));
        writer.set_opacity(0.4);

        let snapshot = surface.snapshot();
        assert_eq!(snapshot.id, "humane");
        assert!(snapshot.is_shown());
        assert_eq!(snapshot.severity(), Some(Severity::Log));
        assert_eq!(snapshot.markup(), "<ul><li>a<li>b</ul>");
        assert_eq!(snapshot.visibility(), 0.4);
    }

    #[test]
    fn visibility_follows_class_with_native_transitions() {
        let surface = SharedSurface::new(true);
        let mut writer = surface.clone();
        writer.set_opacity(0.3);
        assert_eq!(surface.snapshot().visibility(), 0.0);

        writer.set_class_name(&class::shown(&Severity::Info));
        assert_eq!(surface.snapshot().visibility(), 1.0);
    }
}
