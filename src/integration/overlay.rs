//! Description of everything drawn on top of a frame.
//!
//! The render sink owns the actual drawing; this module only decides what
//! is shown.

use std::time::Duration;

use crate::config::UiConfig;
use crate::debug_log::DebugLog;
use crate::tracker::{Rect, TickReport, TrackingMode, TrackingSession};

const HELP_SELECTING: &str = "ROI: Arrows=move  +/-=resize  Enter=confirm  Esc=cancel";
const HELP_DEFAULT: &str = "Controls: s=ROI  a=auto  r=reset  v=record  d=debug  q=quit";

/// Color family of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Selecting,
    Searching,
    Idle,
    Tracking,
}

/// Tracked region; `success` is false while recovering or after drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingBox {
    pub rect: Rect,
    pub success: bool,
}

/// Selection rectangle with the crosshair center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBox {
    pub rect: Rect,
    pub center: (i32, i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub tracking: Option<TrackingBox>,
    pub selection: Option<SelectionBox>,
    pub status: &'static str,
    pub tone: StatusTone,
    /// `REC mm:ss` while recording
    pub recording: Option<String>,
    pub help: &'static str,
    /// Empty unless debug mode is on
    pub debug_lines: Vec<String>,
}

impl Overlay {
    pub fn build(
        session: &TrackingSession,
        report: &TickReport,
        recording: Option<Duration>,
        debug_log: &DebugLog,
        ui: &UiConfig,
    ) -> Self {
        let tracking = match (report.mode, report.region) {
            (TrackingMode::ActiveTracking, Some(rect)) if !rect.is_empty() => Some(TrackingBox {
                rect,
                success: report.is_success(),
            }),
            _ => None,
        };

        let selection = session.selection().map(|selection| SelectionBox {
            rect: selection.confirm(),
            center: selection.center(),
        });

        let (status, tone) = match session.mode() {
            TrackingMode::ManualSelecting => (
                "Arrow keys: move, +/-: resize, ENTER: confirm, ESC: cancel",
                StatusTone::Selecting,
            ),
            TrackingMode::AutoSearching => {
                ("Auto-tracking: Looking for objects...", StatusTone::Searching)
            }
            TrackingMode::Idle => ("Press 's' for manual ROI or 'a' for auto", StatusTone::Idle),
            TrackingMode::ActiveTracking => ("Tracking active", StatusTone::Tracking),
        };

        let help = if session.mode().is_selecting() {
            HELP_SELECTING
        } else {
            HELP_DEFAULT
        };

        let debug_lines = if debug_log.is_enabled() {
            debug_log
                .snapshot()
                .iter()
                .map(|line| truncate_line(line, ui.debug_line_max_chars))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            tracking,
            selection,
            status,
            tone,
            recording: recording.map(format_recording_time),
            help,
            debug_lines,
        }
    }
}

/// Cut `line` to `max_chars` characters, ending in "..." when shortened.
pub fn truncate_line(line: &str, max_chars: usize) -> String {
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = line.chars().take(keep).collect();
    out.push_str("...");
    out
}

pub fn format_recording_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("REC {:02}:{:02}", secs / 60, secs % 60)
}
