//! Studio session
//!
//! The headless state machine behind the desktop shell. It owns the loaded
//! file, the stems, the song analysis, the remix settings, the processing
//! pipeline and the transport. The host drives it with two timers
//! ([`Studio::progress_tick`] and [`Studio::playback_tick`]) and collects
//! user-facing messages with [`Studio::drain_notifications`].
//!
//! Every operation that rejects its input returns the error and also queues
//! an error notification; session state is left unchanged.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::analysis::{analyze_song, SongAnalysis};
use crate::catalog::find_style;
use crate::config::{StudioConfig, TimingConfig};
use crate::effects::{EffectParam, Filter};
use crate::error::{Result, StudioError};
use crate::processing::{
    export_script, remix_script, upload_script, Pipeline, PipelineAction, ProcessingState, Step,
};
use crate::random::RandomSource;
use crate::stem::{self, create_default_stems, Stem};
use crate::transform::{self, apply_remix_transformations, RemixSettings};
use crate::transport::Transport;
use crate::waveform::mix_master_waveform;

/// Audio extensions accepted by the upload zone (lower case)
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["mp3", "wav", "flac", "aac", "ogg", "m4a"];

const REMIX_PRECONDITION: &str = "Please upload a song and select a remix style";

/// An accepted upload. Only the name and size are ever read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    pub name: String,
    pub size_bytes: u64,
}

impl AudioFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Lower-case extension of a file name
    pub fn extension_of(name: &str) -> Option<String> {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// Whether a file name carries a supported audio extension
    pub fn is_supported(name: &str) -> bool {
        Self::extension_of(name)
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }

    /// Size for display, e.g. `4.20 MB`
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size_mb())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// Toast-style message for the host to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: None,
        }
    }
}

/// The remix studio session
pub struct Studio {
    timing: TimingConfig,
    waveform_len: usize,
    file: Option<AudioFile>,
    stems: Vec<Stem>,
    selected_stem: Option<String>,
    analysis: Option<SongAnalysis>,
    master_waveform: Vec<f32>,
    settings: RemixSettings,
    pipeline: Pipeline,
    transport: Transport,
    notifications: Vec<Notification>,
    rng: Box<dyn RandomSource + Send>,
}

impl Studio {
    /// Session seeded from the operating system
    pub fn new(config: &StudioConfig) -> Self {
        Self::with_rng(config, Box::new(StdRng::from_os_rng()))
    }

    /// Session drawing from a caller-supplied random source
    pub fn with_rng(config: &StudioConfig, rng: Box<dyn RandomSource + Send>) -> Self {
        Self {
            timing: config.timing.clone(),
            waveform_len: config.display.waveform_length,
            file: None,
            stems: Vec::new(),
            selected_stem: None,
            analysis: None,
            master_waveform: Vec::new(),
            settings: config.remix.to_settings(),
            pipeline: Pipeline::new(config.timing.progress_step),
            transport: Transport::new(config.timing.playback_step_secs, config.display.master_volume),
            notifications: Vec::new(),
            rng,
        }
    }

    // ---- accessors ----

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn file(&self) -> Option<&AudioFile> {
        self.file.as_ref()
    }

    pub fn stems(&self) -> &[Stem] {
        &self.stems
    }

    pub fn selected_stem_id(&self) -> Option<&str> {
        self.selected_stem.as_deref()
    }

    pub fn selected_stem(&self) -> Option<&Stem> {
        let id = self.selected_stem.as_deref()?;
        self.stems.iter().find(|s| s.id == id)
    }

    pub fn analysis(&self) -> Option<&SongAnalysis> {
        self.analysis.as_ref()
    }

    pub fn master_waveform(&self) -> &[f32] {
        &self.master_waveform
    }

    pub fn settings(&self) -> &RemixSettings {
        &self.settings
    }

    pub fn processing(&self) -> &ProcessingState {
        self.pipeline.state()
    }

    /// Whether a processing script is running
    pub fn is_busy(&self) -> bool {
        self.pipeline.is_running()
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Playback position as a fraction of the track
    pub fn progress(&self) -> f64 {
        self.transport.progress()
    }

    /// Whether the remix workspace (stems, mixer, controls) is available
    pub fn has_workspace(&self) -> bool {
        self.file.is_some() && !self.stems.is_empty()
    }

    /// Take all queued notifications
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ---- file intake ----

    /// Accept an uploaded file and start the upload script
    ///
    /// Stems, analysis and master waveform of a previous file are discarded.
    pub fn accept_file(&mut self, name: &str, size_bytes: u64) -> Result<()> {
        self.ensure_idle()?;
        if !AudioFile::is_supported(name) {
            log::warn!("studio: rejected file '{}' (unsupported format)", name);
            return self.reject(StudioError::UnsupportedFormat { name: name.to_string() });
        }

        let file = AudioFile::new(name, size_bytes);
        log::info!("studio: accepted '{}' ({})", file.name, file.size_label());

        self.file = Some(file);
        self.discard_session();
        self.start(upload_script(&self.timing))
    }

    /// Drop the loaded file and everything derived from it
    pub fn clear_file(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if let Some(file) = self.file.take() {
            log::info!("studio: cleared '{}'", file.name);
        }
        self.discard_session();
        Ok(())
    }

    fn discard_session(&mut self) {
        self.stems.clear();
        self.selected_stem = None;
        self.analysis = None;
        self.master_waveform.clear();
        self.transport.unload();
    }

    // ---- stem mixer ----

    pub fn select_stem(&mut self, stem_id: &str) -> Result<()> {
        if !self.stems.iter().any(|s| s.id == stem_id) {
            return self.reject(StudioError::UnknownStem(stem_id.to_string()));
        }
        self.selected_stem = Some(stem_id.to_string());
        Ok(())
    }

    pub fn set_stem_volume(&mut self, stem_id: &str, volume: f32) -> Result<()> {
        let found = stem::set_volume(&mut self.stems, stem_id, volume);
        self.require_stem(found, stem_id)
    }

    pub fn toggle_mute(&mut self, stem_id: &str) -> Result<()> {
        let found = stem::toggle_mute(&mut self.stems, stem_id);
        self.require_stem(found, stem_id)
    }

    pub fn toggle_solo(&mut self, stem_id: &str) -> Result<()> {
        let found = stem::toggle_solo(&mut self.stems, stem_id);
        self.require_stem(found, stem_id)
    }

    pub fn set_effect(&mut self, stem_id: &str, param: EffectParam, value: f32) -> Result<()> {
        let found = stem::set_effect(&mut self.stems, stem_id, param, value);
        self.require_stem(found, stem_id)
    }

    pub fn set_filter(&mut self, stem_id: &str, filter: Filter) -> Result<()> {
        let found = stem::set_filter(&mut self.stems, stem_id, filter);
        self.require_stem(found, stem_id)
    }

    pub fn reset_effects(&mut self, stem_id: &str) -> Result<()> {
        let found = stem::reset_effects(&mut self.stems, stem_id);
        self.require_stem(found, stem_id)
    }

    fn require_stem(&mut self, found: bool, stem_id: &str) -> Result<()> {
        if found {
            Ok(())
        } else {
            self.reject(StudioError::UnknownStem(stem_id.to_string()))
        }
    }

    // ---- remix settings ----

    pub fn select_style(&mut self, style_id: &str) -> Result<()> {
        match find_style(style_id) {
            Some(style) => {
                log::debug!("studio: selected style {}", style.id);
                self.settings.style = Some(style);
                Ok(())
            }
            None => self.reject(StudioError::UnknownStyle(style_id.to_string())),
        }
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.settings.intensity = intensity.clamp(0.0, 100.0);
    }

    pub fn set_randomness(&mut self, randomness: f32) {
        self.settings.randomness = randomness.clamp(0.0, 100.0);
    }

    pub fn set_preserve_vocals(&mut self, enabled: bool) {
        self.settings.preserve_vocals = enabled;
    }

    pub fn set_auto_arrange(&mut self, enabled: bool) {
        self.settings.auto_arrange = enabled;
    }

    /// Shuffle every remix control
    pub fn randomize_settings(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.settings = transform::randomize_settings(&mut *self.rng);

        let name = self.settings.style.map(|s| s.name.as_str()).unwrap_or_default();
        log::info!(
            "studio: randomized settings (style={}, intensity={}, randomness={})",
            name,
            self.settings.intensity,
            self.settings.randomness
        );
        self.notifications
            .push(Notification::info("Settings randomized!", format!("Selected: {}", name)));
        Ok(())
    }

    // ---- processing ----

    /// Start the remix script; needs a selected style and loaded stems
    pub fn generate_remix(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.settings.style.is_none() {
            return self.reject(StudioError::NoStyleSelected);
        }
        if self.stems.is_empty() {
            return self.reject(StudioError::NoStems);
        }
        self.start(remix_script(&self.timing))
    }

    /// Start the simulated export render
    pub fn export(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if self.stems.is_empty() {
            return self.reject(StudioError::NoStems);
        }
        log::info!("studio: exporting");
        self.start(export_script(&self.timing))
    }

    /// Advance the processing pipeline by one progress tick
    pub fn progress_tick(&mut self) {
        for action in self.pipeline.tick() {
            self.run_action(action);
        }
    }

    fn start(&mut self, script: Vec<Step>) -> Result<()> {
        match self.pipeline.start(script) {
            Ok(actions) => {
                for action in actions {
                    self.run_action(action);
                }
                Ok(())
            }
            Err(e) => self.reject(e),
        }
    }

    fn run_action(&mut self, action: PipelineAction) {
        match action {
            PipelineAction::Analyze => {
                let analysis = analyze_song(&mut *self.rng);
                log::info!(
                    "studio: analysis {} BPM, {}, {}, {}s",
                    analysis.bpm,
                    analysis.key,
                    analysis.mood,
                    analysis.duration
                );
                self.transport.load(analysis.duration as f64);
                self.analysis = Some(analysis);
            }
            PipelineAction::Separate => {
                self.stems = create_default_stems(&mut *self.rng, self.waveform_len);
                self.master_waveform = self
                    .stems
                    .first()
                    .map(|s| s.waveform.clone())
                    .unwrap_or_default();
                log::info!("studio: separated {} stems", self.stems.len());

                let description = match &self.analysis {
                    Some(a) => format!("Detected {} BPM in {}", a.bpm, a.key),
                    None => String::new(),
                };
                self.notifications
                    .push(Notification::success("Audio processed successfully!", description));
            }
            PipelineAction::Remix => {
                match apply_remix_transformations(&self.stems, &self.settings, &mut *self.rng) {
                    Ok(stems) => {
                        let name = self.settings.style.map(|s| s.name.as_str()).unwrap_or_default();
                        log::info!(
                            "studio: remix applied (style={}, intensity={}, randomness={})",
                            self.settings.style_id().unwrap_or_default(),
                            self.settings.intensity,
                            self.settings.randomness
                        );
                        self.master_waveform = mix_master_waveform(&stems);
                        self.stems = stems;
                        self.notifications.push(Notification::success(
                            format!("{} remix created!", name),
                            "Your track has been transformed",
                        ));
                    }
                    Err(e) => {
                        log::warn!("studio: remix failed: {}", e);
                        self.notifications.push(Notification::error(e.to_string()));
                    }
                }
            }
            PipelineAction::ExportFinished => {
                log::info!("studio: export finished");
                self.notifications.push(Notification::success(
                    "Export complete!",
                    "Your remix has been rendered (simulated)",
                ));
            }
        }
    }

    // ---- transport ----

    /// Flip play/pause, returning the new playing state
    pub fn toggle_playback(&mut self) -> bool {
        self.transport.toggle()
    }

    pub fn seek(&mut self, secs: f64) {
        self.transport.seek(secs);
    }

    pub fn seek_fraction(&mut self, fraction: f32) {
        self.transport.seek_fraction(fraction as f64);
    }

    pub fn skip_back(&mut self) {
        self.transport.skip_back();
    }

    pub fn skip_forward(&mut self) {
        self.transport.skip_forward();
    }

    pub fn set_master_volume(&mut self, volume: u8) {
        self.transport.set_master_volume(volume);
    }

    /// Advance playback by one tick
    pub fn playback_tick(&mut self) {
        self.transport.tick();
    }

    // ---- errors ----

    fn ensure_idle(&mut self) -> Result<()> {
        if self.pipeline.is_running() {
            let stage = self.pipeline.state().status;
            return self.reject(StudioError::Busy { stage });
        }
        Ok(())
    }

    fn reject<T>(&mut self, err: StudioError) -> Result<T> {
        let title = match &err {
            StudioError::NoStyleSelected | StudioError::NoStems => REMIX_PRECONDITION.to_string(),
            other => other.to_string(),
        };
        log::debug!("studio: rejected: {}", err);
        self.notifications.push(Notification::error(title));
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ProcessingStatus;
    use crate::random::FixedSequence;
    use crate::types::StemKind;

    fn studio() -> Studio {
        let mut config = StudioConfig::default();
        config.display.waveform_length = 32;
        Studio::with_rng(&config, Box::new(rand::rngs::StdRng::seed_from_u64(42)))
    }

    fn run_pipeline(studio: &mut Studio) {
        let mut guard = 0;
        while studio.is_busy() {
            studio.progress_tick();
            guard += 1;
            assert!(guard < 10_000, "pipeline never finished");
        }
    }

    fn loaded() -> Studio {
        let mut studio = studio();
        studio.accept_file("track.mp3", 4 * 1024 * 1024).unwrap();
        run_pipeline(&mut studio);
        studio.drain_notifications();
        studio
    }

    #[test]
    fn test_audio_file_helpers() {
        assert!(AudioFile::is_supported("Song.FLAC"));
        assert!(AudioFile::is_supported("a.b.m4a"));
        assert!(!AudioFile::is_supported("notes.txt"));
        assert!(!AudioFile::is_supported("mp3"));
        assert_eq!(AudioFile::new("x.wav", 4_404_019).size_label(), "4.20 MB");
    }

    #[test]
    fn test_upload_flow_produces_stems_and_analysis() {
        let mut studio = studio();
        studio.accept_file("track.WAV", 1024).unwrap();
        assert_eq!(studio.processing().status, ProcessingStatus::Uploading);
        assert!(studio.is_busy());
        assert!(!studio.has_workspace());

        run_pipeline(&mut studio);
        assert_eq!(studio.processing().status, ProcessingStatus::Idle);
        assert!(studio.has_workspace());
        assert_eq!(studio.stems().len(), 4);
        assert_eq!(studio.master_waveform(), studio.stems()[0].waveform.as_slice());
        assert_eq!(studio.master_waveform().len(), 32);

        let analysis = *studio.analysis().unwrap();
        assert_eq!(studio.transport().duration_secs(), analysis.duration as f64);

        let notes = studio.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Success);
        assert_eq!(notes[0].title, "Audio processed successfully!");
        assert_eq!(
            notes[0].description.as_deref(),
            Some(format!("Detected {} BPM in {}", analysis.bpm, analysis.key).as_str())
        );
        assert!(studio.drain_notifications().is_empty());
    }

    #[test]
    fn test_unsupported_file_is_rejected() {
        let mut studio = studio();
        let err = studio.accept_file("cover.png", 10).unwrap_err();
        assert!(matches!(err, StudioError::UnsupportedFormat { .. }));
        assert!(studio.file().is_none());
        assert!(!studio.is_busy());
        let notes = studio.drain_notifications();
        assert_eq!(notes[0].level, NotificationLevel::Error);
    }

    #[test]
    fn test_busy_session_rejects_new_work() {
        let mut studio = studio();
        studio.accept_file("track.mp3", 10).unwrap();
        studio.progress_tick();

        assert!(matches!(studio.accept_file("other.mp3", 10), Err(StudioError::Busy { .. })));
        assert!(matches!(studio.generate_remix(), Err(StudioError::Busy { .. })));
        assert!(matches!(studio.randomize_settings(), Err(StudioError::Busy { .. })));
        assert!(matches!(studio.clear_file(), Err(StudioError::Busy { .. })));
        assert_eq!(studio.file().unwrap().name, "track.mp3");
        assert_eq!(studio.processing().status, ProcessingStatus::Uploading);
    }

    #[test]
    fn test_remix_requires_stems_and_style() {
        let mut studio = studio();
        assert_eq!(studio.generate_remix(), Err(StudioError::NoStems));
        let notes = studio.drain_notifications();
        assert_eq!(notes[0].title, "Please upload a song and select a remix style");

        let mut studio = loaded();
        studio.settings.style = None;
        assert_eq!(studio.generate_remix(), Err(StudioError::NoStyleSelected));
        assert!(!studio.is_busy());
    }

    #[test]
    fn test_remix_flow_transforms_stems_and_mixes_master() {
        let mut studio = loaded();
        studio.select_style("trap-flip").unwrap();
        studio.set_intensity(100.0);
        studio.set_randomness(0.0);
        studio.toggle_mute("stem-3").unwrap();

        studio.generate_remix().unwrap();
        assert_eq!(studio.processing().message, "Initializing remix engine...");
        run_pipeline(&mut studio);

        let bass = studio.stems().iter().find(|s| s.kind == StemKind::Bass).unwrap();
        assert_eq!(bass.effects.distortion, 60.0);
        assert_eq!(bass.volume, 150.0);
        assert_eq!(studio.master_waveform(), mix_master_waveform(studio.stems()).as_slice());

        let notes = studio.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Trap Flip remix created!");
    }

    #[test]
    fn test_export_notifies_after_overlay_closes() {
        let mut studio = loaded();
        studio.export().unwrap();
        assert_eq!(studio.processing().message, "Rendering audio...");
        run_pipeline(&mut studio);
        let notes = studio.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Export complete!");
        assert_eq!(notes[0].description.as_deref(), Some("Your remix has been rendered (simulated)"));
    }

    #[test]
    fn test_randomize_settings_notifies_selection() {
        let mut studio = Studio::with_rng(&StudioConfig::default(), Box::new(FixedSequence::constant(0.0)));
        studio.randomize_settings().unwrap();
        assert_eq!(studio.settings().style_id(), Some("trap-flip"));
        assert_eq!(studio.settings().intensity, 40.0);
        let notes = studio.drain_notifications();
        assert_eq!(notes[0].level, NotificationLevel::Info);
        assert_eq!(notes[0].description.as_deref(), Some("Selected: Trap Flip"));
    }

    #[test]
    fn test_mixer_edits_and_unknown_ids() {
        let mut studio = loaded();
        studio.select_stem("stem-2").unwrap();
        studio.set_effect("stem-2", EffectParam::Reverb, 140.0).unwrap();
        assert_eq!(studio.selected_stem().unwrap().effects.reverb, 100.0);
        studio.toggle_solo("stem-2").unwrap();
        assert!(studio.stems().iter().filter(|s| s.id != "stem-2").all(|s| s.muted));

        assert_eq!(studio.select_stem("stem-9"), Err(StudioError::UnknownStem("stem-9".into())));
        assert!(studio.set_stem_volume("stem-9", 10.0).is_err());
        assert_eq!(studio.select_style("polka"), Err(StudioError::UnknownStyle("polka".into())));
        assert_eq!(studio.selected_stem_id(), Some("stem-2"));
        assert_eq!(studio.drain_notifications().len(), 3);
    }

    #[test]
    fn test_clear_file_discards_session() {
        let mut studio = loaded();
        studio.select_stem("stem-0").unwrap();
        studio.toggle_playback();
        studio.clear_file().unwrap();
        assert!(studio.file().is_none());
        assert!(studio.stems().is_empty());
        assert!(studio.analysis().is_none());
        assert!(studio.master_waveform().is_empty());
        assert!(studio.selected_stem().is_none());
        assert!(!studio.transport().is_playing());
    }

    #[test]
    fn test_playback_ticks_advance_position() {
        let mut studio = loaded();
        studio.seek_fraction(0.0);
        assert!(studio.toggle_playback());
        for _ in 0..10 {
            studio.playback_tick();
        }
        assert!((studio.transport().position_secs() - 1.0).abs() < 1e-9);
        assert!(studio.progress() > 0.0);
        studio.set_master_volume(120);
        assert_eq!(studio.transport().master_volume(), 100);
    }
}
