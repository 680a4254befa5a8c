//! Master waveform, transport row and song analysis

use iced::widget::{button, column, container, row, slider, text, Column, Space};
use iced::{Alignment, Border, Element, Length};
use sonic_core::config::DisplayConfig;
use sonic_core::{format_time, SongAnalysis, Studio};
use sonic_widgets::{palette, waveform, WaveformState};

use super::message::Message;

/// Accent of the mixed-down master waveform
const MASTER_ACCENT: &str = "hsl(var(--primary))";

/// Render the master section
pub fn view<'a>(studio: &'a Studio, display: &DisplayConfig) -> Element<'a, Message> {
    let transport = studio.transport();
    let state = WaveformState::new(
        studio.master_waveform(),
        studio.progress() as f32,
        transport.is_playing(),
    )
    .with_pixel_ratio(display.pixel_ratio);

    let master = waveform(
        state,
        MASTER_ACCENT,
        palette(),
        display.master_height,
        Some(Message::Seek),
    );

    let has_track = transport.duration_secs() > 0.0;

    let play_label = if transport.is_playing() { "▮▮" } else { "▶" };
    let play_btn = button(text(play_label).size(20))
        .on_press_maybe(has_track.then_some(Message::TogglePlayback))
        .width(Length::Fixed(56.0))
        .style(button::primary);

    let back_btn = button(text("⏮").size(16))
        .on_press_maybe(has_track.then_some(Message::SkipBack))
        .style(button::secondary);

    let forward_btn = button(text("⏭").size(16))
        .on_press_maybe(has_track.then_some(Message::SkipForward))
        .style(button::secondary);

    let clock = text(format!(
        "{} / {}",
        format_time(transport.position_secs()),
        format_time(transport.duration_secs())
    ))
    .size(14)
    .color(palette().muted());

    let volume = transport.master_volume();
    let volume_slider = slider(0.0..=100.0, volume as f32, |v| {
        Message::SetMasterVolume(v.round() as u8)
    })
    .step(1.0)
    .width(Length::Fixed(120.0));

    let controls = row![
        back_btn,
        play_btn,
        forward_btn,
        clock,
        Space::new().width(Length::Fill),
        text("Vol").size(12),
        volume_slider,
        text(format!("{}%", volume)).size(12),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut content = column![text("Master").size(16), master, controls].spacing(10);
    if let Some(analysis) = studio.analysis() {
        content = content.push(analysis_row(analysis));
    }

    panel(content.into())
}

fn analysis_row(analysis: &SongAnalysis) -> Element<'_, Message> {
    let stat = |label: &'static str, value: String| -> Column<'static, Message> {
        column![
            text(label).size(11).color(palette().muted()),
            text(value).size(15),
        ]
        .spacing(2)
        .width(Length::Fill)
    };

    row![
        stat("BPM", analysis.bpm.to_string()),
        stat("Key", analysis.key.to_string()),
        stat("Energy", format!("{:.0}%", analysis.energy)),
        stat("Danceability", format!("{:.0}%", analysis.danceability)),
        stat("Mood", analysis.mood.to_string()),
        stat("Duration", format_time(analysis.duration as f64)),
    ]
    .spacing(8)
    .into()
}

/// Card container shared by the studio sections
pub fn panel(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(palette().card().into()),
            border: Border {
                color: palette().muted().scale_alpha(0.2),
                width: 1.0,
                radius: 10.0.into(),
            },
            ..Default::default()
        })
        .into()
}
