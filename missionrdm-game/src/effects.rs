//! Side-effect vocabulary shared by all six level machines.
//!
//! The level logic mutates [`crate::state::SessionState`] synchronously and
//! returns a list of these descriptors; the UI layer executes them (play a
//! sound, render an overlay, schedule a timer) through its own collaborators.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::calls::{CallDirection, Character};
use crate::state::LevelId;

/// How long a feedback banner stays up before the scheduled clear fires.
pub const FEEDBACK_EXPIRY_MS: u64 = 2_000;

/// Overlay notes currently shown, oldest first. Bounded to three slots.
pub type OverlayStack = SmallVec<[OverlayNote; 3]>;

/// Sound cues the UI knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundId {
    StepFound,
    Message,
    Call,
    LevelComplete,
}

impl SoundId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StepFound => "step_found",
            Self::Message => "message",
            Self::Call => "call",
            Self::LevelComplete => "level_complete",
        }
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient submission feedback, auto-expiring after
/// [`FEEDBACK_EXPIRY_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Content of an overlay note. Hint cards are locale-neutral asset ids
/// (`hint1`..`hint17`); the UI picks the localized image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "value")]
pub enum OverlayContent {
    HintCard(&'static str),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayNote {
    pub id: u64,
    pub content: OverlayContent,
}

/// A chat message pushed to the player's phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageNote {
    pub sender: &'static str,
    pub avatar: &'static str,
    /// Translation key of the body; the player name is its only parameter.
    pub body_key: &'static str,
}

/// An in-game phone call, live until the UI ends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallScript {
    pub character: Character,
    pub body_key: &'static str,
    /// Optional roadmap caption shown in the call header.
    pub title_key: Option<&'static str>,
}

/// Richer rejection shown for anticipated wrong riddle answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorOverlay {
    pub title_key: String,
    pub message_key: String,
    pub hint_key: Option<String>,
}

impl ErrorOverlay {
    #[must_use]
    pub fn new(title_key: impl Into<String>, message_key: impl Into<String>) -> Self {
        Self {
            title_key: title_key.into(),
            message_key: message_key.into(),
            hint_key: None,
        }
    }
}

/// A cooperative timer request. The host schedules it and feeds the effect
/// back through `GameSession::fire_delayed` once the delay elapses; requests
/// carrying a stale generation are dropped there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelayedRequest {
    pub delay_ms: u64,
    pub generation: u64,
    pub effect: DelayedEffect,
}

/// What a fired timer does to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DelayedEffect {
    /// Expire the feedback banner.
    ClearFeedback,
    /// Make a character callable, optionally wiping their call history so
    /// the new round of calls starts from a clean sequence.
    UnlockCall {
        character: Character,
        direction: CallDirection,
        reset_history: bool,
    },
    /// Level 3: Inès's follow-up after the calendar click (message, patience
    /// flag, scenario advance, journal entry, incoming call unlock).
    PatienceFollowUp,
    /// Level 4: delayed journal entry with its chime after a story call.
    JournalChime {
        step: &'static str,
        entry: &'static str,
    },
}

/// One executable instruction for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum SideEffect {
    PlaySound {
        sound: SoundId,
    },
    ShowOverlay {
        note: OverlayNote,
    },
    ShowErrorOverlay {
        overlay: ErrorOverlay,
    },
    Feedback {
        kind: FeedbackKind,
    },
    SetCallable {
        character: Character,
        callable: bool,
        direction: CallDirection,
    },
    SendMessage {
        note: MessageNote,
    },
    StartCall {
        script: CallScript,
    },
    ScheduleDelayed {
        request: DelayedRequest,
    },
    /// The level is done; the session coordinator finalizes timing and
    /// records the result.
    CompleteLevel {
        level: LevelId,
    },
    /// Forwarded to the external journal/roadmap collaborator.
    Journal {
        step: &'static str,
        entry: &'static str,
    },
}

impl SideEffect {
    #[must_use]
    pub const fn is_complete_level(&self) -> bool {
        matches!(self, Self::CompleteLevel { .. })
    }
}
