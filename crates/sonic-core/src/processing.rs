//! Simulated processing pipeline
//!
//! Upload, remix and export are scripted progress-bar animations. A
//! [`Pipeline`] holds a queue of [`Step`]s and is advanced by a fixed-rate
//! progress tick from the host. Steps that do not need time (status changes,
//! hooks) run as soon as they reach the front of the queue; the hooks come
//! back to the caller as [`PipelineAction`]s so the session performs the
//! actual work.
//!
//! Only one script runs at a time. Starting another while one is queued is
//! rejected with [`StudioError::Busy`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::TimingConfig;
use crate::error::{Result, StudioError};

/// Processing stage shown by the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Uploading,
    Analyzing,
    Separating,
    Remixing,
    Exporting,
    Complete,
    Error,
}

impl ProcessingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProcessingStatus::Idle => "Idle",
            ProcessingStatus::Uploading => "Uploading",
            ProcessingStatus::Analyzing => "Analyzing",
            ProcessingStatus::Separating => "Separating Stems",
            ProcessingStatus::Remixing => "Remixing",
            ProcessingStatus::Exporting => "Exporting",
            ProcessingStatus::Complete => "Complete",
            ProcessingStatus::Error => "Error",
        }
    }
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot rendered by the processing overlay
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessingState {
    pub status: ProcessingStatus,
    /// 0-100
    pub progress: f32,
    pub message: String,
}

impl ProcessingState {
    /// Whether the overlay should be visible
    pub fn is_visible(&self) -> bool {
        self.status != ProcessingStatus::Idle
    }
}

/// Hooks the session runs when the script reaches them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineAction {
    /// Draw the song analysis
    Analyze,
    /// Synthesize the separated stems
    Separate,
    /// Run the transform engine
    Remix,
    /// Export render finished and the overlay is gone
    ExportFinished,
}

/// One step of a processing script
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Jump to a status, progress and message (instant)
    Set {
        status: ProcessingStatus,
        progress: f32,
        message: &'static str,
    },
    /// Show `message` and advance progress one step per tick until `target`
    Ramp { target: f32, message: &'static str },
    /// Keep the current state for a number of ticks
    Wait { ticks: u32 },
    /// Hand a hook back to the caller (instant)
    Action(PipelineAction),
    /// Return to idle (instant)
    Idle,
}

/// Upload, analysis and separation script
pub fn upload_script(timing: &TimingConfig) -> Vec<Step> {
    use ProcessingStatus::*;
    vec![
        Step::Set { status: Uploading, progress: 0.0, message: "Reading audio file..." },
        Step::Ramp { target: 20.0, message: "Uploading audio data..." },
        Step::Set { status: Analyzing, progress: 20.0, message: "Detecting tempo and key..." },
        Step::Ramp { target: 40.0, message: "Analyzing frequency spectrum..." },
        Step::Action(PipelineAction::Analyze),
        Step::Set { status: Separating, progress: 40.0, message: "Isolating vocals..." },
        Step::Ramp { target: 60.0, message: "Extracting drum patterns..." },
        Step::Ramp { target: 80.0, message: "Separating bass frequencies..." },
        Step::Ramp { target: 95.0, message: "Isolating melodic elements..." },
        Step::Action(PipelineAction::Separate),
        Step::Set { status: Complete, progress: 100.0, message: "Ready to remix!" },
        Step::Wait { ticks: timing.complete_hold_ticks() },
        Step::Idle,
    ]
}

/// Remix generation script
pub fn remix_script(timing: &TimingConfig) -> Vec<Step> {
    use ProcessingStatus::*;
    vec![
        Step::Set { status: Remixing, progress: 0.0, message: "Initializing remix engine..." },
        Step::Ramp { target: 30.0, message: "Applying stem transformations..." },
        Step::Ramp { target: 60.0, message: "Processing effects chains..." },
        Step::Ramp { target: 85.0, message: "Generating new arrangements..." },
        Step::Action(PipelineAction::Remix),
        Step::Set { status: Complete, progress: 100.0, message: "Remix generated!" },
        Step::Wait { ticks: timing.complete_hold_ticks() },
        Step::Idle,
    ]
}

/// Export render script
pub fn export_script(timing: &TimingConfig) -> Vec<Step> {
    use ProcessingStatus::*;
    vec![
        Step::Set { status: Exporting, progress: 0.0, message: "Rendering audio..." },
        Step::Wait { ticks: timing.export_render_ticks() },
        Step::Set { status: Complete, progress: 100.0, message: "Export ready!" },
        Step::Wait { ticks: timing.complete_hold_ticks() },
        Step::Idle,
        Step::Action(PipelineAction::ExportFinished),
    ]
}

/// Tick-driven script runner
#[derive(Debug, Clone)]
pub struct Pipeline {
    state: ProcessingState,
    steps: VecDeque<Step>,
    progress_step: f32,
}

impl Pipeline {
    pub fn new(progress_step: f32) -> Self {
        Self {
            state: ProcessingState::default(),
            steps: VecDeque::new(),
            progress_step: progress_step.max(f32::EPSILON),
        }
    }

    pub fn state(&self) -> &ProcessingState {
        &self.state
    }

    /// Whether a script is still queued
    pub fn is_running(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Queue a script and run its leading instant steps
    pub fn start(&mut self, script: Vec<Step>) -> Result<Vec<PipelineAction>> {
        if self.is_running() {
            return Err(StudioError::Busy { stage: self.state.status });
        }
        self.steps.extend(script);
        log::debug!("pipeline: started with {} steps", self.steps.len());

        let mut actions = Vec::new();
        self.run_instant(&mut actions);
        Ok(actions)
    }

    /// Advance one progress tick, returning the hooks reached
    pub fn tick(&mut self) -> Vec<PipelineAction> {
        let mut actions = Vec::new();

        match self.steps.front_mut() {
            Some(Step::Ramp { target, message }) => {
                let target = *target;
                self.state.message = message.to_string();
                self.state.progress = (self.state.progress + self.progress_step).min(target);
                if self.state.progress >= target {
                    self.steps.pop_front();
                }
            }
            Some(Step::Wait { ticks }) => {
                *ticks = ticks.saturating_sub(1);
                if *ticks == 0 {
                    self.steps.pop_front();
                }
            }
            Some(_) | None => {}
        }

        self.run_instant(&mut actions);
        actions
    }

    fn run_instant(&mut self, actions: &mut Vec<PipelineAction>) {
        while let Some(step) = self.steps.front() {
            match step {
                Step::Set { status, progress, message } => {
                    if *status != self.state.status {
                        log::info!("pipeline: {} -> {}", self.state.status, status);
                    }
                    self.state = ProcessingState {
                        status: *status,
                        progress: *progress,
                        message: message.to_string(),
                    };
                }
                Step::Action(action) => actions.push(*action),
                Step::Idle => {
                    log::info!("pipeline: {} -> {}", self.state.status, ProcessingStatus::Idle);
                    self.state = ProcessingState::default();
                }
                Step::Ramp { target, .. } if self.state.progress >= *target => {}
                Step::Wait { ticks: 0 } => {}
                Step::Ramp { .. } | Step::Wait { .. } => break,
            }
            self.steps.pop_front();
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(TimingConfig::default().progress_step)
    }
}
