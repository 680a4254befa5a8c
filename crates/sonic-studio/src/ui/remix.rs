//! Style selector and remix controls
//!
//! Everything here is locked while a processing script runs.

use iced::widget::{button, column, row, slider, text, toggler, Column};
use iced::{Alignment, Element, Length};
use sonic_core::{catalog, RemixStyle, Studio};
use sonic_widgets::palette;

use super::message::Message;
use super::transport::panel;

/// Styles per selector row
const STYLES_PER_ROW: usize = 2;

/// Grid of catalog styles
pub fn styles(studio: &Studio) -> Element<'_, Message> {
    let enabled = !studio.is_busy();
    let selected = studio.settings().style_id();

    let rows = catalog().chunks(STYLES_PER_ROW).map(|chunk| {
        row(chunk
            .iter()
            .map(|style| style_button(style, selected == Some(style.id.as_str()), enabled)))
        .spacing(8)
        .into()
    });

    panel(
        column![text("Remix Style").size(16), Column::with_children(rows).spacing(8)]
            .spacing(10)
            .into(),
    )
}

fn style_button(style: &'static RemixStyle, is_selected: bool, enabled: bool) -> Element<'static, Message> {
    let content = column![
        text(style.to_string()).size(14),
        text(&style.description).size(11).color(palette().muted()),
    ]
    .spacing(2);

    button(content)
        .on_press_maybe(enabled.then(|| Message::SelectStyle(style.id.clone())))
        .width(Length::Fill)
        .style(if is_selected { button::primary } else { button::secondary })
        .into()
}

/// Intensity, randomness, toggles and the action buttons
pub fn controls(studio: &Studio) -> Element<'_, Message> {
    let settings = studio.settings();
    let enabled = !studio.is_busy();

    let intensity = column![
        row![
            text("Intensity").size(13).width(Length::Fill),
            text(format!("{:.0}%", settings.intensity)).size(13).color(palette().muted()),
        ],
        slider(0.0..=100.0, settings.intensity, Message::SetIntensity).step(1.0),
    ]
    .spacing(4);

    let randomness = column![
        row![
            text("Randomness").size(13).width(Length::Fill),
            text(format!("{:.0}%", settings.randomness)).size(13).color(palette().muted()),
        ],
        slider(0.0..=100.0, settings.randomness, Message::SetRandomness).step(1.0),
    ]
    .spacing(4);

    let preserve_vocals = toggler(settings.preserve_vocals)
        .label("Preserve vocals")
        .on_toggle_maybe(enabled.then_some(Message::SetPreserveVocals as fn(bool) -> Message));

    let auto_arrange = toggler(settings.auto_arrange)
        .label("Auto arrange")
        .on_toggle_maybe(enabled.then_some(Message::SetAutoArrange as fn(bool) -> Message));

    let target: Element<Message> = match (settings.style, studio.analysis()) {
        (Some(style), Some(analysis)) => text(format!(
            "{} BPM → {:.0} BPM",
            analysis.bpm,
            style.target_bpm(analysis.bpm)
        ))
        .size(12)
        .color(palette().muted())
        .into(),
        _ => text("").size(12).into(),
    };

    let generate_btn = button(text("Generate Remix"))
        .on_press_maybe(enabled.then_some(Message::GenerateRemix))
        .width(Length::Fill)
        .style(button::primary);

    let actions = row![
        button(text("Randomize"))
            .on_press_maybe(enabled.then_some(Message::Randomize))
            .style(button::secondary),
        button(text("Export"))
            .on_press_maybe(enabled.then_some(Message::Export))
            .style(button::secondary),
        button(text("Save defaults"))
            .on_press(Message::SaveDefaults)
            .style(button::secondary),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    panel(
        column![
            text("Remix Controls").size(16),
            intensity,
            randomness,
            preserve_vocals,
            auto_arrange,
            target,
            generate_btn,
            actions,
        ]
        .spacing(10)
        .into(),
    )
}
