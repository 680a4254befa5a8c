//! Canvas program for the bar waveform
//!
//! Takes an optional `on_seek` closure. Without one the waveform is display
//! only: no hover highlight, no pointer cursor and clicks are ignored.

use iced::widget::canvas::{self, gradient, Event, Frame, Geometry, Gradient, Path, Program};
use iced::{mouse, Color, Point, Rectangle, Size, Theme};

use super::layout::{
    hover_fraction, seek_fraction, WaveformLayout, BAR_RADIUS, PLAYHEAD_GLOW, PLAYHEAD_WIDTH,
};
use super::WaveformState;
use crate::color::AccentColor;

/// Glow radius of the scan line drawn at the playhead while playing
const SCAN_LINE_GLOW: f32 = 10.0;

/// Peak opacity of the scan line
const SCAN_LINE_ALPHA: f32 = 0.5;

/// Translucent layers used to approximate a blurred glow
const GLOW_LAYERS: u32 = 3;

/// Peak opacity of the innermost glow layer
const GLOW_ALPHA: f32 = 0.18;

/// Pointer state kept by iced between events
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveformInteraction {
    /// Pointer position as a fraction of the width, while over the canvas
    pub hover: Option<f32>,
    pub is_dragging: bool,
}

pub struct WaveformCanvas<'a, Message, F>
where
    F: Fn(f32) -> Message,
{
    pub state: WaveformState<'a>,
    pub accent: AccentColor,
    /// Drawn when `accent` could not be resolved
    pub fallback: Color,
    pub on_seek: Option<F>,
}

impl<'a, Message, F> WaveformCanvas<'a, Message, F>
where
    F: Fn(f32) -> Message,
{
    fn is_interactive(&self) -> bool {
        self.on_seek.is_some()
    }

    fn seek(&self, x: f32, bounds: Rectangle) -> Option<canvas::Action<Message>> {
        let on_seek = self.on_seek.as_ref()?;
        let fraction = seek_fraction(x, 0.0, bounds.width)?;
        Some(canvas::Action::publish(on_seek(fraction)))
    }
}

impl<'a, Message, F> Program<Message> for WaveformCanvas<'a, Message, F>
where
    Message: Clone,
    F: Fn(f32) -> Message,
{
    type State = WaveformInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        if !self.is_interactive() {
            return None;
        }

        let Some(position) = cursor.position_in(bounds) else {
            // Pointer left the canvas
            interaction.is_dragging = false;
            return interaction
                .hover
                .take()
                .map(|_| canvas::Action::request_redraw());
        };

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                interaction.is_dragging = true;
                return self.seek(position.x, bounds);
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                interaction.is_dragging = false;
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                interaction.hover = hover_fraction(position.x, 0.0, bounds.width);
                if interaction.is_dragging {
                    return self.seek(position.x, bounds);
                }
                return Some(canvas::Action::request_redraw());
            }
            _ => {}
        }

        None
    }

    fn mouse_interaction(
        &self,
        _interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.is_interactive() && cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let size = bounds.size();
        let grid = self.state.pixel_grid;
        let hover = if self.is_interactive() { interaction.hover } else { None };

        let layout = WaveformLayout::compute(self.state.samples, size, self.state.progress, hover);

        for bar in &layout.bars {
            let rect = grid.snap_rect(bar.bounds);
            if rect.height <= 0.0 {
                continue;
            }
            let paint = bar.paint(self.state.is_playing);

            if paint.glow > 0.0 {
                self.draw_glow(&mut frame, rect, paint.glow);
            }

            let path = Path::rounded_rectangle(
                Point::new(rect.x, rect.y),
                Size::new(rect.width, rect.height),
                BAR_RADIUS.min(rect.width / 2.0).into(),
            );
            let fill = paint.stops.iter().fold(
                gradient::Linear::new(
                    Point::new(rect.x, rect.y),
                    Point::new(rect.x, rect.y + rect.height),
                ),
                |linear, &(offset, alpha)| {
                    linear.add_stop(offset, self.accent.with_alpha(alpha, self.fallback))
                },
            );
            frame.fill(&path, Gradient::Linear(fill));
        }

        if self.state.is_playing {
            self.draw_scan_line(&mut frame, size);
        }

        if let Some(x) = layout.playhead {
            let x = grid.snap(x);
            let rect = Rectangle {
                x: x - PLAYHEAD_WIDTH / 2.0,
                y: 0.0,
                width: PLAYHEAD_WIDTH,
                height: size.height,
            };
            self.draw_glow(&mut frame, rect, PLAYHEAD_GLOW);
            frame.fill_rectangle(
                Point::new(rect.x, rect.y),
                Size::new(rect.width, rect.height),
                self.accent.solid(self.fallback),
            );
        }

        vec![frame.into_geometry()]
    }
}

impl<'a, Message, F> WaveformCanvas<'a, Message, F>
where
    F: Fn(f32) -> Message,
{
    /// Approximate a blurred shadow with widening translucent rounded rects
    fn draw_glow(&self, frame: &mut Frame, rect: Rectangle, radius: f32) {
        // A literal color has no alpha to fade
        if !self.accent.is_resolved() {
            return;
        }
        for layer in (1..=GLOW_LAYERS).rev() {
            let spread = radius * layer as f32 / GLOW_LAYERS as f32 / 2.0;
            let alpha = GLOW_ALPHA / layer as f32;
            let path = Path::rounded_rectangle(
                Point::new(rect.x - spread, rect.y - spread),
                Size::new(rect.width + spread * 2.0, rect.height + spread * 2.0),
                (BAR_RADIUS + spread).into(),
            );
            frame.fill(&path, self.accent.with_alpha(alpha, self.fallback));
        }
    }

    /// Thin vertical highlight at the playhead, fading out at both ends
    fn draw_scan_line(&self, frame: &mut Frame, size: Size) {
        let x = self.state.pixel_grid.snap(self.state.progress.clamp(0.0, 1.0) * size.width);
        let rect = Rectangle {
            x: x - 0.5,
            y: 0.0,
            width: 1.0,
            height: size.height,
        };
        self.draw_glow(frame, rect, SCAN_LINE_GLOW);

        let line = gradient::Linear::new(Point::new(x, 0.0), Point::new(x, size.height))
            .add_stop(0.0, Color::TRANSPARENT)
            .add_stop(0.5, self.accent.with_alpha(SCAN_LINE_ALPHA, self.fallback))
            .add_stop(1.0, Color::TRANSPARENT);
        frame.fill(
            &Path::rectangle(Point::new(rect.x, rect.y), Size::new(rect.width, rect.height)),
            Gradient::Linear(line),
        );
    }
}
