//! Per-frame tracking state machine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::TrackingConfig;
use crate::frame::Frame;
use crate::integration::{BackgroundSubtractor, ContourFinder, SingleObjectTracker};
use crate::tracker::auto_detect::AutoDetector;
use crate::tracker::constrain::constrain_region;
use crate::tracker::rect::{FrameSize, Rect};
use crate::tracker::recovery::attempt_recovery;
use crate::tracker::roi_selection::{NudgeDirection, RoiSelection};
use crate::tracker::session::TrackingSession;
use crate::tracker::track_state::TrackingMode;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickEvent {
    /// Auto-search paused by the operator
    Idle,
    /// Manual selection in progress; no automatic transitions ran
    Selecting,
    /// Auto-search active but still inside the warm-up window
    Warmup,
    /// Auto-search ran and found nothing trackable
    Searching,
    /// A new target was acquired this frame
    Acquired,
    /// Tracker update succeeded and the constrained region was accepted
    Tracked,
    /// Update succeeded but the size jump looked like a target switch
    DriftSuspected { ratio: f64 },
    /// Update failed; `failures` counts this failure, `recovered` is the
    /// outcome of re-initialization around the last known region
    Recovering { failures: u32, recovered: bool },
    /// Too many consecutive failures; back to auto-search
    Lost,
}

/// Result of one tick: resulting mode, region to draw, and what happened.
///
/// Serializable so hosts can stream per-frame reports to a log or socket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub mode: TrackingMode,
    pub region: Option<Rect>,
    pub event: TickEvent,
}

impl TickReport {
    fn new(mode: TrackingMode, region: Option<Rect>, event: TickEvent) -> Self {
        Self {
            mode,
            region,
            event,
        }
    }

    /// Whether the emitted region came from a trusted tracker result.
    pub fn is_success(&self) -> bool {
        matches!(self.event, TickEvent::Acquired | TickEvent::Tracked)
    }
}

/// Decides every frame whether to search, track, recover or wait for the
/// operator. Sole mutator of a `TrackingSession`.
pub struct TrackingStateMachine<T, B, F> {
    tracker: T,
    detector: AutoDetector<B, F>,
    config: TrackingConfig,
}

impl<T, B, F> TrackingStateMachine<T, B, F>
where
    T: SingleObjectTracker,
    B: BackgroundSubtractor,
    F: ContourFinder,
{
    pub fn new(tracker: T, subtractor: B, finder: F, config: TrackingConfig) -> Self {
        let detector = AutoDetector::new(
            subtractor,
            finder,
            config.min_contour_area,
            config.detection_padding,
        );
        Self {
            tracker,
            detector,
            config,
        }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    pub fn detector(&self) -> &AutoDetector<B, F> {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut AutoDetector<B, F> {
        &mut self.detector
    }

    /// Advance the session by one frame.
    pub fn tick(&mut self, session: &mut TrackingSession, frame: &Frame) -> TickReport {
        session.search_frames = session.search_frames.saturating_add(1);

        match session.mode {
            TrackingMode::ManualSelecting => {
                TickReport::new(session.mode, None, TickEvent::Selecting)
            }
            TrackingMode::ActiveTracking => self.track(session, frame),
            TrackingMode::AutoSearching => self.search(session, frame),
            TrackingMode::Idle if session.auto_paused => {
                TickReport::new(session.mode, None, TickEvent::Idle)
            }
            TrackingMode::Idle => {
                session.start_search();
                debug!("No active mode, falling back to auto-search");
                TickReport::new(session.mode, None, TickEvent::Warmup)
            }
        }
    }

    fn track(&mut self, session: &mut TrackingSession, frame: &Frame) -> TickReport {
        match self.tracker.update(frame) {
            Some(region) => self.accept_update(session, region, frame.size()),
            None => self.handle_failure(session, frame),
        }
    }

    fn accept_update(
        &mut self,
        session: &mut TrackingSession,
        region: Rect,
        frame: FrameSize,
    ) -> TickReport {
        session.consecutive_failures = 0;

        if let Some(last) = session.last_known_region {
            let last_size = last.mean_size();
            if last_size > 0 {
                let ratio = region.mean_size() as f64 / last_size as f64;
                let threshold = self.config.size_change_threshold;
                if ratio > threshold || ratio < 1.0 / threshold {
                    // The tracker keeps its own (suspect) state; only the
                    // reported region falls back to the last trusted one.
                    session.consecutive_failures += 1;
                    session.current_region = Some(last);
                    warn!(
                        "Suspicious size change detected (ratio: {:.2}), keeping last known region",
                        ratio
                    );
                    return TickReport::new(
                        session.mode,
                        Some(last),
                        TickEvent::DriftSuspected { ratio },
                    );
                }
            }
        }

        let constrained = constrain_region(
            region,
            session.initial_region_size,
            self.config.max_growth,
            self.config.min_region_size,
            frame,
        );
        session.last_known_region = Some(constrained);
        session.current_region = Some(constrained);
        TickReport::new(session.mode, Some(constrained), TickEvent::Tracked)
    }

    fn handle_failure(&mut self, session: &mut TrackingSession, frame: &Frame) -> TickReport {
        session.consecutive_failures += 1;
        let failures = session.consecutive_failures;
        debug!(
            "Tracking failure {}/{}",
            failures, self.config.max_tracking_failures
        );

        if failures >= self.config.max_tracking_failures {
            session.drop_target();
            session.mode = TrackingMode::AutoSearching;
            warn!("Tracking lost permanently, re-enabling auto-tracking");
            return TickReport::new(session.mode, None, TickEvent::Lost);
        }

        let Some(last) = session.last_known_region else {
            return TickReport::new(
                session.mode,
                None,
                TickEvent::Recovering {
                    failures,
                    recovered: false,
                },
            );
        };

        let recovered = attempt_recovery(&mut self.tracker, frame, last, self.config.search_radius);
        if recovered {
            info!("Tracking recovery successful at attempt {}", failures);
            session.consecutive_failures = 0;
        }
        session.current_region = Some(last);
        TickReport::new(
            session.mode,
            Some(last),
            TickEvent::Recovering {
                failures,
                recovered,
            },
        )
    }

    fn search(&mut self, session: &mut TrackingSession, frame: &Frame) -> TickReport {
        let idle = TickReport::new(session.mode, None, TickEvent::Searching);

        let Some(mask) = self.detector.foreground(frame) else {
            return idle;
        };
        if session.search_frames <= self.config.warmup_frames {
            return TickReport::new(session.mode, None, TickEvent::Warmup);
        }

        let Some(candidate) = self.detector.detect(&mask, frame.size()) else {
            return idle;
        };
        if !self.tracker.init(frame, candidate) {
            debug!(candidate = ?candidate, "tracker rejected auto-detected region");
            return idle;
        }

        session.acquire(candidate);
        info!(
            "Auto-tracking started! ROI: {}x{} at ({},{})",
            candidate.width, candidate.height, candidate.x, candidate.y
        );
        TickReport::new(session.mode, Some(candidate), TickEvent::Acquired)
    }

    /// Enter manual selection, suspending search and tracking.
    pub fn begin_selection(&mut self, session: &mut TrackingSession, frame: FrameSize) {
        if session.mode.is_selecting() {
            return;
        }
        session.resume_auto = !session.auto_paused;
        session.drop_target();
        session.mode = TrackingMode::ManualSelecting;
        session.selection = Some(RoiSelection::new(frame));
        info!("ROI selection mode. Arrow keys move, +/- resize, ENTER confirms");
    }

    pub fn nudge_selection(&mut self, session: &mut TrackingSession, direction: NudgeDirection) {
        if let Some(selection) = session.selection.as_mut() {
            selection.nudge(direction);
        }
    }

    pub fn grow_selection(&mut self, session: &mut TrackingSession) {
        if let Some(selection) = session.selection.as_mut() {
            selection.grow();
        }
    }

    pub fn shrink_selection(&mut self, session: &mut TrackingSession) {
        if let Some(selection) = session.selection.as_mut() {
            selection.shrink();
        }
    }

    /// Initialize the tracker on the selected region.
    ///
    /// Returns `true` when tracking started. On failure the session returns
    /// to the auto-tracking preference held before selection began.
    pub fn confirm_selection(&mut self, session: &mut TrackingSession, frame: &Frame) -> bool {
        let Some(selection) = session.selection else {
            return false;
        };
        let region = selection.confirm();

        if !region.is_empty() && self.tracker.init(frame, region) {
            session.acquire(region);
            info!(
                "Manual tracking started! ROI: {}x{} at ({},{})",
                region.width, region.height, region.x, region.y
            );
            return true;
        }

        warn!("Failed to initialize tracker on selected region");
        leave_selection(session);
        false
    }

    pub fn cancel_selection(&mut self, session: &mut TrackingSession) {
        if session.mode.is_selecting() {
            leave_selection(session);
            info!("ROI selection cancelled");
        }
    }

    /// Flip the operator's auto-tracking preference. Ignored while selecting.
    pub fn toggle_auto_tracking(&mut self, session: &mut TrackingSession) {
        match session.mode {
            TrackingMode::ManualSelecting => {}
            TrackingMode::AutoSearching => {
                session.drop_target();
                session.mode = TrackingMode::Idle;
                session.auto_paused = true;
                info!("Auto-tracking disabled");
            }
            TrackingMode::Idle | TrackingMode::ActiveTracking => {
                session.start_search();
                info!("Auto-tracking enabled");
            }
        }
    }

    /// Drop everything and start over in auto-search.
    pub fn reset(&mut self, session: &mut TrackingSession) {
        session.selection = None;
        session.start_search();
        info!("Tracking reset, auto-tracking enabled");
    }
}

/// Return from selection to the operator's auto-tracking preference. The
/// warm-up counter is kept, so an elapsed warm-up is not repeated.
fn leave_selection(session: &mut TrackingSession) {
    session.selection = None;
    if session.resume_auto {
        session.mode = TrackingMode::AutoSearching;
        session.auto_paused = false;
    } else {
        session.mode = TrackingMode::Idle;
    }
}
