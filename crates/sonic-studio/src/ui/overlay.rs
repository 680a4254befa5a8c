//! Processing overlay and notification toasts

use iced::widget::{button, column, container, progress_bar, row, text, Column, Space};
use iced::{Alignment, Border, Color, Element, Length};
use sonic_core::{Notification, NotificationLevel, ProcessingState};
use sonic_widgets::palette;

use super::message::Message;

/// Modal card showing the running script's stage
pub fn processing(state: &ProcessingState) -> Element<'_, Message> {
    let content = column![
        text(state.status.label()).size(20).color(palette().primary()),
        progress_bar(0.0..=100.0, state.progress),
        row![
            text(&state.message).size(13).width(Length::Fill),
            text(format!("{:.0}%", state.progress)).size(13).color(palette().muted()),
        ],
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .width(Length::Fixed(380.0));

    container(content)
        .padding(24)
        .style(|_theme| container::Style {
            background: Some(palette().card().into()),
            border: Border {
                color: palette().primary().scale_alpha(0.5),
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        })
        .into()
}

/// Toast stack in the top-right corner, newest last
pub fn notifications(notifications: &[Notification]) -> Element<'_, Message> {
    let toasts = notifications
        .iter()
        .enumerate()
        .map(|(index, notification)| toast(index, notification));

    row![
        Space::new().width(Length::Fill),
        Column::with_children(toasts).spacing(8).width(Length::Fixed(320.0)),
    ]
    .padding(16)
    .into()
}

fn toast(index: usize, notification: &Notification) -> Element<'_, Message> {
    let accent = level_color(notification.level);

    let mut body = column![text(&notification.title).size(14)].spacing(2);
    if let Some(description) = &notification.description {
        body = body.push(text(description).size(12).color(palette().muted()));
    }

    let dismiss = button(text("×").size(14))
        .on_press(Message::DismissNotification(index))
        .style(button::text);

    container(row![body.width(Length::Fill), dismiss].align_y(Alignment::Center))
        .padding(12)
        .width(Length::Fill)
        .style(move |_theme| container::Style {
            background: Some(palette().card().into()),
            border: Border {
                color: accent,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn level_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Success => palette().primary(),
        NotificationLevel::Info => palette().secondary(),
        NotificationLevel::Error => Color::from_rgb(0.9, 0.3, 0.3),
    }
}
