// SPDX-License-Identifier: MPL-2.0
//! Queued, animated notices.
//!
//! Notices are shown one at a time on a single element, each for a dwell
//! period, optionally held until the user does something, then faded out.
//!
//! # Components
//!
//! - [`notice`] - `Notice`, `Severity` and `Content`
//! - [`queue`] - FIFO of notices waiting for the element
//! - [`activity`] - Activity signals that dismiss a waiting notice
//! - [`animation`] - Native and manual enter/exit strategies
//! - [`center`] - `NotificationCenter`, the run loop and notifier API
//!
//! # Usage
//!
//! ```no_run
//! use humane::notifications::{ActivityHub, NotificationCenter};
//! use humane::surface::SharedSurface;
//!
//! # async fn demo() {
//! let hub = ActivityHub::new();
//! let center = NotificationCenter::new(hub.clone());
//!
//! // Queued until the element exists.
//! center.info("Connecting");
//!
//! let surface = SharedSurface::new(false);
//! center.attach(surface.clone());
//!
//! center.error("disk full");
//! center.success(["saved a.txt", "saved b.txt"]);
//! center.wait_idle().await;
//! # }
//! ```

pub mod activity;
pub mod animation;
pub mod center;
pub mod notice;
pub mod queue;

pub use activity::{ActivityHub, ActivityKind, ActivitySource, Listener, ListenerId};
pub use animation::{Fade, Strategy};
pub use center::{Builder, Event, NotificationCenter, Phase, RunState};
pub use notice::{Content, Notice, NoticeId, Severity};
pub use queue::Queue;
