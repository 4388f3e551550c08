// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering the notice element in an iced application.
//!
//! The view is a pure function of a [`Snapshot`]: call it from your `view`
//! with `surface.snapshot()` and the element fades and swaps content as the
//! notification center drives it. Redraws are the host's business; a
//! subscription ticking at the fade interval while a notice is live is
//! enough for the manual strategy.

use super::design_tokens::{border, palette, radius, shadow, sizing, spacing, typography};
use crate::notifications::{Content, Severity};
use crate::surface::Snapshot;
use iced::widget::{container, text, Column, Container, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Accent color for a severity. Unknown and log notices use a neutral gray.
#[must_use]
pub fn accent(severity: Option<&Severity>) -> Color {
    match severity {
        Some(Severity::Error) => palette::ERROR_500,
        Some(Severity::Success) => palette::SUCCESS_500,
        Some(Severity::Info) => palette::INFO_500,
        Some(Severity::Log | Severity::Custom(_)) | None => palette::GRAY_400,
    }
}

/// Renders the notice card, or nothing while it is fully hidden.
pub fn view<'a, Message: 'a>(snapshot: &Snapshot) -> Element<'a, Message> {
    let alpha = snapshot.visibility();
    let Some(content) = snapshot.content.as_ref().filter(|_| alpha > 0.0) else {
        return empty();
    };

    let lines: Vec<Element<'a, Message>> = match content {
        Content::Text(body) => vec![Text::new(body.clone()).size(typography::BODY).into()],
        Content::List(items) => items
            .iter()
            .map(|item| Text::new(format!("\u{2022} {item}")).size(typography::BODY).into())
            .collect(),
    };

    let accent_color = accent(snapshot.severity().as_ref());
    Container::new(Column::with_children(lines).spacing(spacing::XXS))
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |theme: &Theme| toast_container_style(theme, accent_color, alpha))
        .into()
}

/// Renders the notice card centered at the top of the available space.
pub fn view_overlay<'a, Message: 'a>(snapshot: &Snapshot) -> Element<'a, Message> {
    Container::new(view(snapshot))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Top)
        .padding(spacing::MD)
        .into()
}

fn empty<'a, Message: 'a>() -> Element<'a, Message> {
    Container::new(text(""))
        .width(Length::Shrink)
        .height(Length::Shrink)
        .into()
}

fn faded(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha,
        ..color
    }
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent_color: Color, alpha: f32) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(faded(bg_color, alpha))),
        border: iced::Border {
            color: faded(accent_color, alpha),
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: iced::Shadow {
            color: faded(shadow::MD.color, alpha),
            ..shadow::MD
        },
        text_color: Some(faded(theme.palette().text, alpha)),
        ..Default::default()
    }
}
