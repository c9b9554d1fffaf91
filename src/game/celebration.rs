use serde::{Deserialize, Serialize};

use super::lines::WIN_LINE_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelebrationKind {
    Line,
    Win,
}

/// Audio cue played alongside a celebration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SoundCue {
    Tone { frequency_hz: f32, duration_ms: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Confetti {
    Burst { particles: u32, spread: u32 },
    /// Continuous side cannons for the win
    Stream { duration_ms: u32 },
}

/// Effect queued when the completed-line count grows.
/// Fired once the answer dialog is out of the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    pub lines: usize,
    pub kind: CelebrationKind,
}

impl Celebration {
    pub fn for_lines(lines: usize) -> Self {
        let kind = if lines >= WIN_LINE_COUNT {
            CelebrationKind::Win
        } else {
            CelebrationKind::Line
        };
        Self { lines, kind }
    }

    pub fn message(&self) -> &'static str {
        match (self.kind, self.lines) {
            (CelebrationKind::Win, _) => "🎊 INCREDIBLE! You completed 3 lines and won!",
            (CelebrationKind::Line, 1) => "🎉 Amazing! You completed a line!",
            (CelebrationKind::Line, _) => "🌟 Fantastic! That's 2 lines!",
        }
    }

    /// The win plays its chord when the summary opens instead
    pub fn sound(&self) -> Option<SoundCue> {
        match (self.kind, self.lines) {
            (CelebrationKind::Win, _) => None,
            (CelebrationKind::Line, 1) => Some(SoundCue::Tone {
                frequency_hz: 523.25,
                duration_ms: 300,
            }),
            (CelebrationKind::Line, _) => Some(SoundCue::Tone {
                frequency_hz: 659.25,
                duration_ms: 300,
            }),
        }
    }

    pub fn confetti(&self) -> Confetti {
        match (self.kind, self.lines) {
            (CelebrationKind::Win, _) => Confetti::Stream { duration_ms: 3000 },
            (CelebrationKind::Line, 1) => Confetti::Burst {
                particles: 50,
                spread: 60,
            },
            (CelebrationKind::Line, _) => Confetti::Burst {
                particles: 100,
                spread: 90,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_by_line_count() {
        assert_eq!(Celebration::for_lines(1).kind, CelebrationKind::Line);
        assert_eq!(Celebration::for_lines(2).kind, CelebrationKind::Line);
        assert_eq!(Celebration::for_lines(3).kind, CelebrationKind::Win);
        assert_eq!(Celebration::for_lines(5).kind, CelebrationKind::Win);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Celebration::for_lines(1).message(),
            "🎉 Amazing! You completed a line!"
        );
        assert_eq!(
            Celebration::for_lines(2).message(),
            "🌟 Fantastic! That's 2 lines!"
        );
        assert_eq!(
            Celebration::for_lines(4).message(),
            "🎊 INCREDIBLE! You completed 3 lines and won!"
        );
    }

    #[test]
    fn test_win_has_no_sound() {
        assert!(Celebration::for_lines(3).sound().is_none());
        assert!(Celebration::for_lines(1).sound().is_some());
        assert_eq!(
            Celebration::for_lines(3).confetti(),
            Confetti::Stream { duration_ms: 3000 }
        );
    }
}
