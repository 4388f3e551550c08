// SPDX-License-Identifier: MPL-2.0
//! `humane` shows short, humanized notices one at a time on a single
//! element, with enter/exit animation and auto-dismissal.
//!
//! The engine is host-agnostic: it drives any [`surface::Surface`] and
//! listens for activity through any [`notifications::ActivitySource`].
//! [`ui::toast`] renders the element inside an iced application.

#![doc(html_root_url = "https://docs.rs/humane/0.1.0")]

pub mod config;
pub mod error;
pub mod notifications;
pub mod surface;
pub mod ui;

pub use notifications::{Content, NotificationCenter, Notice, Severity};
