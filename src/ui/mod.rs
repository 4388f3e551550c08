// SPDX-License-Identifier: MPL-2.0
//! Presentation of the notice element with iced.
//!
//! - [`toast`] - Toast widget rendering a [`Snapshot`](crate::surface::Snapshot)
//! - [`design_tokens`] - Colors, spacing and sizing used by the toast

pub mod design_tokens;
pub mod toast;
