//! Session state for a single level attempt.
//!
//! This is pure data plus mutation primitives. Every business rule (which
//! codes are accepted, when a scenario may advance, duplicate handling)
//! lives in the per-level logic under [`crate::levels`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calls::CallBoard;
use crate::effects::{
    CallScript, FeedbackKind, MessageNote, OverlayContent, OverlayNote, OverlayStack,
};
use crate::session::CompletionData;

pub const MAX_OVERLAYS: usize = 3;

/// Identifier for one of the six playable levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LevelId {
    #[default]
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl LevelId {
    pub const ALL: [Self; 6] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
    ];

    /// One-based level number as shown to the player.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
        }
    }

    #[must_use]
    pub const fn from_number(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            6 => Some(Self::Six),
            _ => None,
        }
    }

    /// The level that follows this one, or `None` after the last level.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::One => Some(Self::Two),
            Self::Two => Some(Self::Three),
            Self::Three => Some(Self::Four),
            Self::Four => Some(Self::Five),
            Self::Five => Some(Self::Six),
            Self::Six => None,
        }
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Level-local narrative position. Each level uses a subset of these; the
/// per-level logic declares which (see [`crate::levels::LevelLogic::scenarios`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    #[default]
    Default,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
    Updated,
    Final,
    Main,
    Congrats,
}

impl Scenario {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
            Self::Fifth => "fifth",
            Self::Sixth => "sixth",
            Self::Seventh => "seventh",
            Self::Eighth => "eighth",
            Self::Ninth => "ninth",
            Self::Updated => "updated",
            Self::Final => "final",
            Self::Main => "main",
            Self::Congrats => "congrats",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "second" => Ok(Self::Second),
            "third" => Ok(Self::Third),
            "fourth" => Ok(Self::Fourth),
            "fifth" => Ok(Self::Fifth),
            "sixth" => Ok(Self::Sixth),
            "seventh" => Ok(Self::Seventh),
            "eighth" => Ok(Self::Eighth),
            "ninth" => Ok(Self::Ninth),
            "updated" => Ok(Self::Updated),
            "final" => Ok(Self::Final),
            "main" => Ok(Self::Main),
            "congrats" => Ok(Self::Congrats),
            _ => Err(()),
        }
    }
}

/// Interface language. The engine is otherwise localization-agnostic, but
/// level 4's final riddle accepts a different code per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level-local boolean predicates set and read by the transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    FirstHintFound,
    SecondHintFound,
    ThirdHintFound,
    RiddleSolved,
    Patience,
    ClickedElement,
    ActiveRiddle,
}

/// Mutable record of player progress for the current level attempt.
///
/// Created fresh at level start, mutated exclusively through the level logic
/// and [`crate::calls`] operations during play, and replaced on level
/// transition. Presentation state (overlays, active message/call, feedback,
/// congrats modal) is transient and not serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub level: LevelId,
    pub locale: Locale,
    pub scenario: Scenario,
    /// Accepted code submissions, in insertion order. The container itself
    /// allows anything; duplicate policy is enforced by the level rules.
    pub entered_codes: Vec<String>,
    pub first_hint_found: bool,
    pub second_hint_found: bool,
    pub third_hint_found: bool,
    pub riddle_solved: bool,
    pub patience: bool,
    pub clicked_element: bool,
    pub active_riddle: bool,
    /// Level 4 only: raised by Santiago's first narrative call so the UI
    /// surfaces his hint card.
    pub show_santiago_hint: bool,
    pub calls: CallBoard,
    /// Bumped on every reset; in-flight delayed effects scheduled under an
    /// older generation are dropped when fired.
    pub generation: u64,
    pub level_start_ms: Option<u64>,
    pub completion: Option<CompletionData>,
    #[serde(skip)]
    pub overlays: OverlayStack,
    #[serde(skip)]
    pub active_message: Option<MessageNote>,
    #[serde(skip)]
    pub active_call: Option<CallScript>,
    #[serde(skip)]
    pub feedback: Option<FeedbackKind>,
    #[serde(skip)]
    pub congrats_open: bool,
    #[serde(skip)]
    next_overlay_id: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(LevelId::One, Locale::En)
    }
}

impl SessionState {
    #[must_use]
    pub fn new(level: LevelId, locale: Locale) -> Self {
        Self {
            level,
            locale,
            scenario: Scenario::Default,
            entered_codes: Vec::new(),
            first_hint_found: false,
            second_hint_found: false,
            third_hint_found: false,
            riddle_solved: false,
            patience: false,
            clicked_element: false,
            active_riddle: false,
            show_santiago_hint: false,
            calls: CallBoard::default(),
            generation: 0,
            level_start_ms: None,
            completion: None,
            overlays: OverlayStack::new(),
            active_message: None,
            active_call: None,
            feedback: None,
            congrats_open: false,
            next_overlay_id: 0,
        }
    }

    /// Append a code unless it is already present.
    pub fn add_code_once(&mut self, code: &str) {
        if !self.has_code(code) {
            self.entered_codes.push(code.to_string());
        }
    }

    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.entered_codes.iter().any(|entry| entry == code)
    }

    pub fn set_scenario(&mut self, scenario: Scenario) {
        self.scenario = scenario;
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::FirstHintFound => self.first_hint_found = value,
            Flag::SecondHintFound => self.second_hint_found = value,
            Flag::ThirdHintFound => self.third_hint_found = value,
            Flag::RiddleSolved => self.riddle_solved = value,
            Flag::Patience => self.patience = value,
            Flag::ClickedElement => self.clicked_element = value,
            Flag::ActiveRiddle => self.active_riddle = value,
        }
    }

    #[must_use]
    pub const fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::FirstHintFound => self.first_hint_found,
            Flag::SecondHintFound => self.second_hint_found,
            Flag::ThirdHintFound => self.third_hint_found,
            Flag::RiddleSolved => self.riddle_solved,
            Flag::Patience => self.patience,
            Flag::ClickedElement => self.clicked_element,
            Flag::ActiveRiddle => self.active_riddle,
        }
    }

    /// Push a note onto the overlay stack, evicting the oldest entry when
    /// the three slots are in use. Returns the new note so callers can also
    /// emit it as a side-effect descriptor.
    pub fn push_overlay(&mut self, content: OverlayContent) -> OverlayNote {
        self.next_overlay_id += 1;
        let note = OverlayNote {
            id: self.next_overlay_id,
            content,
        };
        if self.overlays.len() == MAX_OVERLAYS {
            self.overlays.remove(0);
        }
        self.overlays.push(note.clone());
        note
    }

    /// Remove a single overlay by id; unknown ids are ignored.
    pub fn remove_overlay(&mut self, id: u64) {
        self.overlays.retain(|note| note.id != id);
    }

    pub fn clear_overlays(&mut self) {
        self.overlays.clear();
    }

    pub fn set_feedback(&mut self, kind: FeedbackKind) {
        self.feedback = Some(kind);
    }

    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    /// Dismiss the active message together with any riddle it carried.
    pub fn mark_message_read(&mut self) {
        self.active_message = None;
        self.active_riddle = false;
    }

    /// Restore the level-agnostic defaults, keeping only level and locale.
    /// Idempotent; bumps the timer generation so stale delayed effects are
    /// dropped when they fire.
    pub fn reset_after_level(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::new(self.level, self.locale)
        };
    }
}
