//! Operator key codes.

use crate::tracker::NudgeDirection;

const KEY_ENTER: i32 = 13;
const KEY_ESCAPE: i32 = 27;
const KEY_UP: i32 = 0;
const KEY_DOWN: i32 = 1;
const KEY_LEFT: i32 = 2;
const KEY_RIGHT: i32 = 3;

/// One discrete operator command, decoded from a key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Cancels selection when selecting, otherwise quits
    Escape,
    Quit,
    StartSelection,
    ToggleAutoTracking,
    Reset,
    ToggleRecording,
    ToggleDebug,
    Nudge(NudgeDirection),
    Grow,
    Shrink,
    Confirm,
}

impl KeyCommand {
    /// Map a key code to a command. Unbound keys yield `None`.
    pub fn from_key_code(code: i32) -> Option<Self> {
        let command = match code {
            KEY_ESCAPE => Self::Escape,
            KEY_ENTER => Self::Confirm,
            KEY_UP => Self::Nudge(NudgeDirection::Up),
            KEY_DOWN => Self::Nudge(NudgeDirection::Down),
            KEY_LEFT => Self::Nudge(NudgeDirection::Left),
            KEY_RIGHT => Self::Nudge(NudgeDirection::Right),
            _ => match u8::try_from(code).ok().map(char::from)? {
                'q' => Self::Quit,
                's' => Self::StartSelection,
                'a' => Self::ToggleAutoTracking,
                'r' => Self::Reset,
                'v' => Self::ToggleRecording,
                'd' => Self::ToggleDebug,
                '+' | '=' => Self::Grow,
                '-' | '_' => Self::Shrink,
                _ => return None,
            },
        };
        Some(command)
    }

    /// Whether the command only has an effect during manual selection.
    pub fn is_selection_command(self) -> bool {
        matches!(
            self,
            Self::Nudge(_) | Self::Grow | Self::Shrink | Self::Confirm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyCommand::from_key_code(27), Some(KeyCommand::Escape));
        assert_eq!(KeyCommand::from_key_code(13), Some(KeyCommand::Confirm));
        assert_eq!(KeyCommand::from_key_code('q' as i32), Some(KeyCommand::Quit));
        assert_eq!(
            KeyCommand::from_key_code(2),
            Some(KeyCommand::Nudge(NudgeDirection::Left))
        );
        assert_eq!(KeyCommand::from_key_code('=' as i32), Some(KeyCommand::Grow));
        assert_eq!(KeyCommand::from_key_code('_' as i32), Some(KeyCommand::Shrink));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(KeyCommand::from_key_code(-1), None);
        assert_eq!(KeyCommand::from_key_code('x' as i32), None);
        assert_eq!(KeyCommand::from_key_code(1000), None);
    }
}
