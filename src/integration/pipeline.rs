//! TrackingPipeline for driving the state machine from a live frame stream.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::UiConfig;
use crate::debug_log::DebugLog;
use crate::error::PipelineError;
use crate::frame::Frame;
use crate::tracker::{TickReport, TrackingSession, TrackingStateMachine};

use super::{
    BackgroundSubtractor, ContourFinder, FrameSource, KeyCommand, Overlay, Recorder,
    RecordingSink, RenderSink, SingleObjectTracker,
};

/// Result of one `process_frame` call.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Frame tracked and rendered
    Continue(TickReport),
    /// The source ran dry
    EndOfStream,
    /// The operator asked to quit
    Quit,
}

/// One sequential tick per frame: read, handle the key, track, draw, record.
///
/// Owns the `TrackingSession`; all mutation of it goes through the state
/// machine.
pub struct TrackingPipeline<S, T, B, F, R, W> {
    source: S,
    machine: TrackingStateMachine<T, B, F>,
    session: TrackingSession,
    renderer: R,
    recorder: Recorder<W>,
    debug_log: Arc<DebugLog>,
    ui: UiConfig,
}

impl<S, T, B, F, R, W> TrackingPipeline<S, T, B, F, R, W>
where
    S: FrameSource,
    T: SingleObjectTracker,
    B: BackgroundSubtractor,
    F: ContourFinder,
    R: RenderSink,
    W: RecordingSink,
{
    /// Create a pipeline with a fresh session and default UI settings.
    pub fn new(
        source: S,
        machine: TrackingStateMachine<T, B, F>,
        renderer: R,
        recorder: Recorder<W>,
        debug_log: Arc<DebugLog>,
    ) -> Self {
        Self {
            source,
            machine,
            session: TrackingSession::new(),
            renderer,
            recorder,
            debug_log,
            ui: UiConfig::default(),
        }
    }

    pub fn with_ui_config(mut self, ui: UiConfig) -> Self {
        self.ui = ui;
        self
    }

    /// Process a single frame with an optional operator key code.
    ///
    /// Render and source failures are returned; recording failures are
    /// logged and the frame still counts as processed.
    pub fn process_frame(&mut self, key: Option<i32>) -> Result<FrameOutcome, PipelineError> {
        let next = self
            .source
            .next_frame()
            .map_err(|err| PipelineError::Source(err.to_string()))?;
        let Some(frame) = next else {
            self.recorder.finish();
            return Ok(FrameOutcome::EndOfStream);
        };

        if let Some(command) = key.and_then(KeyCommand::from_key_code) {
            if self.apply_command(command, &frame) {
                self.recorder.finish();
                return Ok(FrameOutcome::Quit);
            }
        }

        let report = self.machine.tick(&mut self.session, &frame);

        let overlay = Overlay::build(
            &self.session,
            &report,
            self.recorder.elapsed(),
            &self.debug_log,
            &self.ui,
        );
        self.renderer
            .render(&frame, &overlay)
            .map_err(|err| PipelineError::Render(err.to_string()))?;

        if let Err(err) = self.recorder.write_frame(&frame) {
            warn!("Recording error: {}", err);
        }

        Ok(FrameOutcome::Continue(report))
    }

    /// Run until end of stream or quit; returns the number of frames tracked.
    pub fn run<K>(&mut self, mut next_key: K) -> Result<u64, PipelineError>
    where
        K: FnMut() -> Option<i32>,
    {
        let mut frames = 0;
        loop {
            match self.process_frame(next_key())? {
                FrameOutcome::Continue(_) => frames += 1,
                FrameOutcome::EndOfStream | FrameOutcome::Quit => return Ok(frames),
            }
        }
    }

    /// Apply one operator command. Returns `true` when the pipeline should quit.
    fn apply_command(&mut self, command: KeyCommand, frame: &Frame) -> bool {
        let session = &mut self.session;
        let machine = &mut self.machine;

        if command.is_selection_command() && !session.mode().is_selecting() {
            return false;
        }

        match command {
            KeyCommand::Escape if session.mode().is_selecting() => machine.cancel_selection(session),
            KeyCommand::Escape | KeyCommand::Quit => return true,
            KeyCommand::StartSelection => machine.begin_selection(session, frame.size()),
            KeyCommand::ToggleAutoTracking => machine.toggle_auto_tracking(session),
            KeyCommand::Reset => machine.reset(session),
            KeyCommand::ToggleRecording => {
                if let Err(err) = self.recorder.toggle(frame.size()) {
                    warn!("Recording error: {}", err);
                }
            }
            KeyCommand::ToggleDebug => {
                if self.debug_log.toggle() {
                    info!("Debug mode enabled - logs will appear on screen");
                } else {
                    info!("Debug mode disabled");
                }
            }
            KeyCommand::Nudge(direction) => machine.nudge_selection(session, direction),
            KeyCommand::Grow => machine.grow_selection(session),
            KeyCommand::Shrink => machine.shrink_selection(session),
            KeyCommand::Confirm => {
                machine.confirm_selection(session, frame);
            }
        }
        false
    }

    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    pub fn machine(&self) -> &TrackingStateMachine<T, B, F> {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut TrackingStateMachine<T, B, F> {
        &mut self.machine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn recorder(&self) -> &Recorder<W> {
        &self.recorder
    }

    pub fn debug_log(&self) -> &Arc<DebugLog> {
        &self.debug_log
    }
}
