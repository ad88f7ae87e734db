//! Live tracking context, mutated only by the state machine.

use crate::tracker::rect::Rect;
use crate::tracker::roi_selection::RoiSelection;
use crate::tracker::track_state::TrackingMode;

/// Everything the state machine remembers between frames.
///
/// Invariant: `current_region` is `Some` iff `mode == ActiveTracking`, and
/// `selection` is `Some` iff `mode == ManualSelecting`.
#[derive(Debug, Clone, Default)]
pub struct TrackingSession {
    pub(super) mode: TrackingMode,
    pub(super) current_region: Option<Rect>,
    pub(super) last_known_region: Option<Rect>,
    pub(super) initial_region_size: i32,
    pub(super) consecutive_failures: u32,
    /// Frames seen since auto-search was last enabled or the session reset.
    /// Not cleared on target loss, so search resumes without a new warm-up.
    pub(super) search_frames: u32,
    /// Set when the operator turned auto-search off.
    pub(super) auto_paused: bool,
    pub(super) selection: Option<RoiSelection>,
    /// Whether cancelling or failing a manual selection resumes auto-search.
    pub(super) resume_auto: bool,
}

impl TrackingSession {
    /// Fresh session; the first tick enables auto-search.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    pub fn current_region(&self) -> Option<Rect> {
        self.current_region
    }

    pub fn last_known_region(&self) -> Option<Rect> {
        self.last_known_region
    }

    pub fn initial_region_size(&self) -> i32 {
        self.initial_region_size
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn search_frames(&self) -> u32 {
        self.search_frames
    }

    pub fn is_auto_paused(&self) -> bool {
        self.auto_paused
    }

    pub fn selection(&self) -> Option<&RoiSelection> {
        self.selection.as_ref()
    }

    /// Enter `ActiveTracking` on a freshly initialized target.
    pub(super) fn acquire(&mut self, region: Rect) {
        self.mode = TrackingMode::ActiveTracking;
        self.current_region = Some(region);
        self.last_known_region = Some(region);
        self.initial_region_size = region.mean_size();
        self.consecutive_failures = 0;
        self.selection = None;
    }

    /// Drop the target and start searching again with a fresh warm-up.
    pub(super) fn start_search(&mut self) {
        self.drop_target();
        self.mode = TrackingMode::AutoSearching;
        self.auto_paused = false;
        self.search_frames = 0;
    }

    pub(super) fn drop_target(&mut self) {
        self.current_region = None;
        self.last_known_region = None;
        self.consecutive_failures = 0;
    }
}
