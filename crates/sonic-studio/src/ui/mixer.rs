//! Stem mixer rows and the effects panel of the selected stem

use iced::widget::{button, column, pick_list, row, slider, text, Column};
use iced::{Alignment, Element, Length};
use sonic_core::config::DisplayConfig;
use sonic_core::{EffectParam, Filter, FilterType, Stem, Studio, MAX_STEM_VOLUME};
use sonic_widgets::{palette, theme, waveform, WaveformState};

use super::message::Message;
use super::transport::panel;

/// Render one row per stem
pub fn stems<'a>(studio: &'a Studio, display: &DisplayConfig) -> Element<'a, Message> {
    let progress = studio.progress() as f32;
    let is_playing = studio.transport().is_playing();
    let selected = studio.selected_stem_id();

    let rows = studio.stems().iter().map(|stem| {
        let state = WaveformState::new(&stem.waveform, progress, is_playing)
            .with_pixel_ratio(display.pixel_ratio);
        stem_row(stem, state, display.stem_height, selected == Some(stem.id.as_str()))
    });

    let content = Column::with_children(rows).spacing(10);
    panel(column![text("Stems").size(16), content].spacing(10).into())
}

fn stem_row<'a>(
    stem: &'a Stem,
    state: WaveformState<'a>,
    height: f32,
    is_selected: bool,
) -> Element<'a, Message> {
    let accent = theme().stems.for_kind(stem.kind);

    let name_btn = button(text(&stem.name).size(13))
        .on_press(Message::SelectStem(stem.id.clone()))
        .width(Length::Fixed(90.0))
        .style(if is_selected { button::primary } else { button::secondary });

    let display = waveform(state, accent, palette(), height, None::<fn(f32) -> Message>);

    let id = stem.id.clone();
    let volume = slider(0.0..=MAX_STEM_VOLUME, stem.volume, move |v| {
        Message::SetStemVolume(id.clone(), v)
    })
    .step(1.0)
    .width(Length::Fixed(100.0));

    let mute_btn = button(text("M").size(12))
        .on_press(Message::ToggleMute(stem.id.clone()))
        .style(if stem.muted { button::danger } else { button::secondary });

    let solo_btn = button(text("S").size(12))
        .on_press(Message::ToggleSolo(stem.id.clone()))
        .style(if stem.solo { button::success } else { button::secondary });

    row![
        name_btn,
        display,
        column![
            volume,
            text(format!("{:.0}%", stem.volume)).size(11).color(palette().muted()),
        ]
        .spacing(2)
        .align_x(Alignment::Center),
        mute_btn,
        solo_btn,
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

/// Effect controls for the selected stem
pub fn effects(studio: &Studio) -> Element<'_, Message> {
    let Some(stem) = studio.selected_stem() else {
        return panel(
            column![
                text("Effects").size(16),
                text("Select a stem to edit its effects").size(13).color(palette().muted()),
            ]
            .spacing(10)
            .into(),
        );
    };

    let header = row![
        text(format!("Effects: {}", stem.name)).size(16).width(Length::Fill),
        button(text("Reset").size(12))
            .on_press(Message::ResetEffects(stem.id.clone()))
            .style(button::secondary),
    ]
    .align_y(Alignment::Center);

    let sliders = EffectParam::ALL.iter().map(|&param| {
        let value = stem.effects.get(param);
        let id = stem.id.clone();
        labeled_slider(
            param.label(),
            param.format_value(value),
            slider(param.range(), value, move |v| Message::SetEffect(id.clone(), param, v))
                .step(param.step())
                .into(),
        )
    });

    panel(
        column![header, filter_controls(&stem.id, stem.effects.filter)]
            .extend(sliders)
            .spacing(10)
            .into(),
    )
}

fn filter_controls(stem_id: &str, filter: Filter) -> Element<'_, Message> {
    let type_id = stem_id.to_string();
    let filter_type = pick_list(FilterType::ALL, Some(filter.filter_type), move |t| {
        Message::SetFilterType(type_id.clone(), t)
    })
    .text_size(13);

    let frequency_id = stem_id.to_string();
    let frequency = slider(
        Filter::MIN_FREQUENCY..=Filter::MAX_FREQUENCY,
        filter.frequency,
        move |v| Message::SetFilterFrequency(frequency_id.clone(), v),
    )
    .step(10.0);

    let resonance_id = stem_id.to_string();
    let resonance = slider(0.0..=100.0, filter.resonance, move |v| {
        Message::SetFilterResonance(resonance_id.clone(), v)
    })
    .step(1.0);

    column![
        row![text("Filter").size(13).width(Length::Fill), filter_type].align_y(Alignment::Center),
        labeled_slider("Frequency", format!("{:.0} Hz", filter.frequency), frequency.into()),
        labeled_slider("Resonance", format!("{:.0}%", filter.resonance), resonance.into()),
    ]
    .spacing(6)
    .into()
}

fn labeled_slider<'a>(label: &'a str, value: String, control: Element<'a, Message>) -> Element<'a, Message> {
    column![
        row![
            text(label).size(12).width(Length::Fill),
            text(value).size(12).color(palette().muted()),
        ],
        control,
    ]
    .spacing(2)
    .into()
}
