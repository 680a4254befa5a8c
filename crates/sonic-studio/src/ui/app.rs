//! Main application state and iced implementation

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use iced::widget::{center, column, container, opaque, row, scrollable, stack, Space};
use iced::{event, time, window, Color, Element, Event, Length, Subscription, Task, Theme};
use sonic_core::config::{self, RemixDefaults, StudioConfig, CONFIG_FILE};
use sonic_core::{AudioFile, Notification, Studio};
use sonic_widgets::{palette, AnimationLoop};

use super::message::Message;

/// Most notifications kept on screen; older ones are dropped first
const MAX_NOTIFICATIONS: usize = 4;

/// Sonic Studio application state
pub struct StudioApp {
    pub(super) studio: Studio,
    pub(super) config: StudioConfig,
    config_path: PathBuf,
    /// Redraw loop for the waveforms while playing
    animation: AnimationLoop,
    /// Contents of the upload path field
    pub(super) path_input: String,
    pub(super) notifications: Vec<Notification>,
}

impl StudioApp {
    /// Create a new application instance
    pub fn new() -> (Self, Task<Message>) {
        let config_path = config::default_config_path(CONFIG_FILE);
        let config: StudioConfig = config::load_config(&config_path);
        log::info!(
            "Loaded config: style {}, intensity {}, randomness {}",
            config.remix.style_id,
            config.remix.intensity,
            config.remix.randomness
        );

        let app = Self {
            studio: Studio::new(&config),
            config,
            config_path,
            animation: AnimationLoop::new(),
            path_input: String::new(),
            notifications: Vec::new(),
        };
        (app, Task::none())
    }

    /// Window title
    pub fn title(&self) -> String {
        match self.studio.file() {
            Some(file) => format!("Sonic Studio - {}", file.name),
            None => String::from("Sonic Studio - AI Remix"),
        }
    }

    /// Update application state based on messages
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // Upload
            Message::PathInputChanged(value) => {
                self.path_input = value;
            }
            Message::SubmitPath => {
                let input = self.path_input.trim().to_string();
                if !input.is_empty() {
                    self.load_upload(Path::new(&input));
                }
            }
            Message::FileDropped(path) => {
                self.load_upload(&path);
            }
            Message::ClearFile => {
                report(self.studio.clear_file());
            }

            // Timers
            Message::ProgressTick => self.studio.progress_tick(),
            Message::PlaybackTick => self.studio.playback_tick(),
            Message::Frame => {
                self.animation.on_frame();
            }

            // Transport
            Message::TogglePlayback => {
                self.studio.toggle_playback();
            }
            Message::SkipBack => self.studio.skip_back(),
            Message::SkipForward => self.studio.skip_forward(),
            Message::Seek(fraction) => self.studio.seek_fraction(fraction),
            Message::SetMasterVolume(volume) => self.studio.set_master_volume(volume),

            // Stem mixer
            Message::SelectStem(id) => report(self.studio.select_stem(&id)),
            Message::SetStemVolume(id, volume) => report(self.studio.set_stem_volume(&id, volume)),
            Message::ToggleMute(id) => report(self.studio.toggle_mute(&id)),
            Message::ToggleSolo(id) => report(self.studio.toggle_solo(&id)),
            Message::SetEffect(id, param, value) => report(self.studio.set_effect(&id, param, value)),
            Message::SetFilterType(id, filter_type) => {
                if let Some(mut filter) = self.stem_filter(&id) {
                    filter.filter_type = filter_type;
                    report(self.studio.set_filter(&id, filter));
                }
            }
            Message::SetFilterFrequency(id, frequency) => {
                if let Some(mut filter) = self.stem_filter(&id) {
                    filter.frequency = frequency;
                    report(self.studio.set_filter(&id, filter));
                }
            }
            Message::SetFilterResonance(id, resonance) => {
                if let Some(mut filter) = self.stem_filter(&id) {
                    filter.resonance = resonance;
                    report(self.studio.set_filter(&id, filter));
                }
            }
            Message::ResetEffects(id) => report(self.studio.reset_effects(&id)),

            // Remix controls (locked while a pipeline runs)
            Message::SelectStyle(id) => {
                if !self.studio.is_busy() {
                    report(self.studio.select_style(&id));
                }
            }
            Message::SetIntensity(value) => {
                if !self.studio.is_busy() {
                    self.studio.set_intensity(value);
                }
            }
            Message::SetRandomness(value) => {
                if !self.studio.is_busy() {
                    self.studio.set_randomness(value);
                }
            }
            Message::SetPreserveVocals(enabled) => self.studio.set_preserve_vocals(enabled),
            Message::SetAutoArrange(enabled) => self.studio.set_auto_arrange(enabled),
            Message::Randomize => report(self.studio.randomize_settings()),
            Message::GenerateRemix => report(self.studio.generate_remix()),
            Message::Export => report(self.studio.export()),
            Message::SaveDefaults => self.save_defaults(),

            // Notifications
            Message::DismissNotification(index) => {
                if index < self.notifications.len() {
                    self.notifications.remove(index);
                }
            }
        }

        self.collect_notifications();
        self.animation.sync(self.studio.transport().is_playing());
        Task::none()
    }

    /// Build the view
    pub fn view(&self) -> Element<'_, Message> {
        let header = super::upload::header(self.studio.file());

        let intake: Element<Message> = match self.studio.file() {
            None => super::upload::view(&self.path_input),
            Some(file) => super::upload::file_bar(file, self.studio.is_busy()),
        };

        let mut main = column![header, intake].spacing(16);

        if self.studio.has_workspace() {
            let left = column![
                super::transport::view(&self.studio, &self.config.display),
                super::mixer::stems(&self.studio, &self.config.display),
            ]
            .spacing(16)
            .width(Length::FillPortion(3));

            let right = column![
                super::remix::styles(&self.studio),
                super::remix::controls(&self.studio),
                super::mixer::effects(&self.studio),
            ]
            .spacing(16)
            .width(Length::FillPortion(2));

            main = main.push(row![left, right].spacing(16));
        }

        let base: Element<Message> = container(scrollable(main.padding(20)))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(palette().background().into()),
                ..Default::default()
            })
            .into();

        let notifications = super::overlay::notifications(&self.notifications);

        let processing = self.studio.processing();
        if processing.is_visible() {
            // Blocks interaction with the studio while a script runs
            let backdrop = opaque(
                container(Space::new())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(|_theme| container::Style {
                        background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.6).into()),
                        ..Default::default()
                    }),
            );

            let modal = center(opaque(super::overlay::processing(processing)))
                .width(Length::Fill)
                .height(Length::Fill);

            stack![base, backdrop, modal, notifications].into()
        } else {
            stack![base, notifications].into()
        }
    }

    /// Application theme
    pub fn theme(&self) -> Theme {
        palette().iced_theme()
    }

    /// Timers run only while there is something to advance
    pub fn subscription(&self) -> Subscription<Message> {
        let timing = self.studio.timing();
        let mut subscriptions = vec![event::listen_with(file_drop)];

        if self.studio.is_busy() {
            subscriptions.push(
                time::every(Duration::from_millis(timing.progress_tick_ms)).map(|_| Message::ProgressTick),
            );
        }

        if self.studio.transport().is_playing() {
            subscriptions.push(
                time::every(Duration::from_millis(timing.playback_tick_ms)).map(|_| Message::PlaybackTick),
            );
        }

        // Dropping this subscription is what stops the redraw loop
        if self.animation.is_animating() {
            subscriptions.push(window::frames().map(|_| Message::Frame));
        }

        Subscription::batch(subscriptions)
    }

    fn stem_filter(&self, stem_id: &str) -> Option<sonic_core::Filter> {
        self.studio
            .stems()
            .iter()
            .find(|stem| stem.id == stem_id)
            .map(|stem| stem.effects.filter)
    }

    fn load_upload(&mut self, path: &Path) {
        match read_upload(path) {
            Ok(file) => {
                log::info!("Upload requested: {} ({})", file.name, file.size_label());
                if self.studio.accept_file(&file.name, file.size_bytes).is_ok() {
                    self.path_input.clear();
                }
            }
            Err(e) => {
                log::warn!("Upload failed: {:#}", e);
                self.push_notification(Notification::error(format!("{:#}", e)));
            }
        }
    }

    fn save_defaults(&mut self) {
        self.config.remix = RemixDefaults::from_settings(self.studio.settings());
        match config::save_config(&self.config, &self.config_path) {
            Ok(()) => self.push_notification(Notification::success(
                "Defaults saved",
                self.config_path.display().to_string(),
            )),
            Err(e) => {
                log::warn!("Failed to save defaults: {:#}", e);
                self.push_notification(Notification::error(format!("Failed to save defaults: {}", e)));
            }
        }
    }

    fn collect_notifications(&mut self) {
        for notification in self.studio.drain_notifications() {
            self.push_notification(notification);
        }
    }

    fn push_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }
}

/// Name and size of a file picked for upload
///
/// Only metadata is read; the audio itself is never opened.
fn read_upload(path: &Path) -> Result<AudioFile> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Not a file: {}", path.display()))?;
    let metadata = std::fs::metadata(path).with_context(|| format!("Cannot read {}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }
    Ok(AudioFile::new(name, metadata.len()))
}

/// Map window file drops to upload messages
fn file_drop(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    }
}

/// Rejected operations already queued an error notification in the session
fn report(result: sonic_core::Result<()>) {
    if let Err(e) = result {
        log::debug!("Operation rejected: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_upload_takes_name_and_size() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("Song.MP3");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let file = read_upload(&path).unwrap();
        assert_eq!(file.name, "Song.MP3");
        assert_eq!(file.size_bytes, 2048);
        assert!(AudioFile::is_supported(&file.name));
    }

    #[test]
    fn test_read_upload_rejects_missing_and_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(read_upload(&temp_dir.path().join("missing.wav")).is_err());
        assert!(read_upload(temp_dir.path()).is_err());
    }

    #[test]
    fn test_file_drop_maps_to_upload() {
        let path = PathBuf::from("/tmp/track.flac");
        let event = Event::Window(window::Event::FileDropped(path.clone()));
        match file_drop(event, event::Status::Ignored, window::Id::unique()) {
            Some(Message::FileDropped(dropped)) => assert_eq!(dropped, path),
            other => panic!("unexpected {:?}", other),
        }

        let other = Event::Window(window::Event::Focused);
        assert!(file_drop(other, event::Status::Ignored, window::Id::unique()).is_none());
    }
}
