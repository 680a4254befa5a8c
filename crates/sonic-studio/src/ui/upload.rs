//! Header and upload zone

use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Alignment, Border, Element, Length};
use sonic_core::studio::SUPPORTED_EXTENSIONS;
use sonic_core::AudioFile;
use sonic_widgets::palette;

use super::message::Message;

/// App title row
pub fn header(file: Option<&AudioFile>) -> Element<'_, Message> {
    let subtitle = match file {
        Some(_) => "Shape your remix",
        None => "Drop a track to get started",
    };

    row![
        text("Sonic Remix Studio").size(24).color(palette().primary()),
        Space::new().width(Length::Fill),
        text(subtitle).size(14).color(palette().muted()),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Drop zone shown while no file is loaded
pub fn view(path_input: &str) -> Element<'_, Message> {
    let formats = SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(", ");

    let path_field = text_input("/path/to/song.mp3", path_input)
        .on_input(Message::PathInputChanged)
        .on_submit(Message::SubmitPath)
        .width(Length::Fill);

    let load_btn = button(text("Load"))
        .on_press_maybe((!path_input.trim().is_empty()).then_some(Message::SubmitPath))
        .style(button::primary);

    let content = column![
        text("Drop your track here").size(20),
        text(format!("Supports {}", formats)).size(13).color(palette().muted()),
        row![path_field, load_btn].spacing(8).align_y(Alignment::Center),
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .max_width(560);

    container(content)
        .width(Length::Fill)
        .padding(40)
        .center_x(Length::Fill)
        .style(|_theme| iced::widget::container::Style {
            background: Some(palette().card().into()),
            border: Border {
                color: palette().primary().scale_alpha(0.4),
                width: 2.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        })
        .into()
}

/// Loaded file summary with a clear button
pub fn file_bar(file: &AudioFile, busy: bool) -> Element<'_, Message> {
    let details = format!("{} • Ready to process", file.size_label());

    let clear_btn = button(text("×").size(18))
        .on_press_maybe((!busy).then_some(Message::ClearFile))
        .style(button::secondary);

    container(
        row![
            column![
                text(&file.name).size(16),
                text(details).size(12).color(palette().muted()),
            ]
            .spacing(2),
            Space::new().width(Length::Fill),
            clear_btn,
        ]
        .align_y(Alignment::Center),
    )
    .padding(12)
    .style(|_theme| iced::widget::container::Style {
        background: Some(palette().card().into()),
        border: Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    })
    .into()
}
