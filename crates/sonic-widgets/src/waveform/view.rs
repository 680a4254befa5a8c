//! Waveform view function
//!
//! Same shape as any other iced 0.14 view helper: a plain function taking the
//! state and an optional callback, returning an `Element`.

use iced::widget::Canvas;
use iced::{Element, Length};

use super::canvas::WaveformCanvas;
use super::WaveformState;
use crate::color::AccentColor;
use crate::theme::Palette;

/// Create a waveform element
///
/// `accent` is any color string [`AccentColor`] accepts, resolved against
/// `palette`. Passing `on_seek` makes the waveform interactive: hover
/// highlighting, a pointer cursor and click-to-seek with the clicked
/// fraction in `[0, 1]`.
///
/// ```ignore
/// let stem = waveform(
///     WaveformState::new(&stem.waveform, progress, is_playing),
///     &stem.color,
///     palette(),
///     48.0,
///     None::<fn(f32) -> Message>,
/// );
/// ```
pub fn waveform<'a, Message, F>(
    state: WaveformState<'a>,
    accent: &str,
    palette: &Palette,
    height: f32,
    on_seek: Option<F>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
    F: Fn(f32) -> Message + 'a,
{
    Canvas::new(WaveformCanvas {
        state,
        accent: AccentColor::parse(accent, palette),
        fallback: palette.fallback,
        on_seek,
    })
    .width(Length::Fill)
    .height(Length::Fixed(height))
    .into()
}
