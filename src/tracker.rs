mod auto_detect;
mod constrain;
mod rect;
mod recovery;
mod roi_selection;
mod session;
mod state_machine;
mod track_state;

pub use auto_detect::{AutoDetector, select_candidate};
pub use constrain::constrain_region;
pub use rect::{FrameSize, Rect};
pub use recovery::{attempt_recovery, search_window};
pub use roi_selection::{
    DEFAULT_SELECTION_SIZE, MIN_SELECTION_SIZE, NUDGE_STEP, NudgeDirection, RESIZE_STEP,
    RoiSelection,
};
pub use session::TrackingSession;
pub use state_machine::{TickEvent, TickReport, TrackingStateMachine};
pub use track_state::TrackingMode;
