//! Character call bookkeeping.
//!
//! Tracks, per character, whether they can currently be called, in which
//! direction, whether they already have been, and how many times. Level
//! transitions that require "the player spoke to X" read this board.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::effects::SideEffect;
use crate::state::{LevelId, Scenario, SessionState};

/// The three callable characters of the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    Santiago,
    #[serde(rename = "Inès")]
    Ines,
    Jack,
}

impl Character {
    pub const ALL: [Self; 3] = [Self::Santiago, Self::Ines, Self::Jack];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Santiago => "Santiago",
            Self::Ines => "Inès",
            Self::Jack => "Jack",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Santiago => 0,
            Self::Ines => 1,
            Self::Jack => 2,
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Character {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Santiago" => Ok(Self::Santiago),
            "Inès" | "Ines" => Ok(Self::Ines),
            "Jack" => Ok(Self::Jack),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    Incoming,
    #[default]
    Outgoing,
}

impl CallDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }
}

impl fmt::Display for CallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
struct CharEntry {
    callable: bool,
    direction: CallDirection,
    called: bool,
    sequence: u32,
}

/// Per-character call state for the current level attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CallBoard {
    entries: [CharEntry; 3],
}

impl CallBoard {
    /// Set the callable flag and direction. Enabling a character also
    /// resets their called status so a pending call shows up again.
    pub fn set_callable(&mut self, who: Character, value: bool, direction: CallDirection) {
        let entry = &mut self.entries[who.index()];
        entry.callable = value;
        entry.direction = direction;
        if value {
            entry.called = false;
        }
    }

    /// Forget a character's call history (sequence and called status) while
    /// leaving the callable flag alone. Used when a storyline re-arms a
    /// character for a fresh round of calls.
    pub fn reset_history(&mut self, who: Character) {
        let entry = &mut self.entries[who.index()];
        entry.sequence = 0;
        entry.called = false;
    }

    pub fn clear_called(&mut self, who: Character) {
        self.entries[who.index()].called = false;
    }

    #[must_use]
    pub const fn is_callable(&self, who: Character) -> bool {
        self.entries[who.index()].callable
    }

    #[must_use]
    pub const fn has_called(&self, who: Character) -> bool {
        self.entries[who.index()].called
    }

    #[must_use]
    pub const fn call_type(&self, who: Character) -> CallDirection {
        self.entries[who.index()].direction
    }

    #[must_use]
    pub const fn sequence(&self, who: Character) -> u32 {
        self.entries[who.index()].sequence
    }

    /// Whether any character is callable and has not yet been called.
    #[must_use]
    pub fn has_pending_mandatory_call(&self) -> bool {
        self.pending_character().is_some()
    }

    /// First character (in story order) with a call still pending.
    #[must_use]
    pub fn pending_character(&self) -> Option<Character> {
        Character::ALL
            .into_iter()
            .find(|who| self.is_callable(*who) && !self.has_called(*who))
    }

    /// Direction of the first pending call; outgoing when none is pending.
    #[must_use]
    pub fn pending_call_type(&self) -> CallDirection {
        self.pending_character()
            .map_or(CallDirection::Outgoing, |who| self.call_type(who))
    }

    fn record_call(&mut self, who: Character) {
        let entry = &mut self.entries[who.index()];
        entry.called = true;
        entry.sequence += 1;
    }
}

/// Mark a character as called and apply the level-4 narrative auto-advance.
///
/// Deliberately permissive: callers that want the "call unavailable" path
/// check [`CallBoard::is_callable`] first; marking an un-callable character
/// as called is accepted and only updates bookkeeping.
pub fn mark_called(state: &mut SessionState, who: Character) -> Vec<SideEffect> {
    state.calls.record_call(who);
    if state.level == LevelId::Four {
        level4_call_status(state, who)
    } else {
        Vec::new()
    }
}

/// Level-4 policy hook: the first calls to Inès and Santiago advance the
/// scenario directly. This is the one place call bookkeeping is coupled to
/// narrative progression; it stays out of the generic board operations.
fn level4_call_status(state: &mut SessionState, who: Character) -> Vec<SideEffect> {
    let mut effects = Vec::new();
    match who {
        Character::Ines
            if state.calls.sequence(Character::Ines) == 1
                && state.scenario == Scenario::Second =>
        {
            state.set_scenario(Scenario::Third);
            state
                .calls
                .set_callable(Character::Ines, false, CallDirection::Incoming);
            effects.push(SideEffect::SetCallable {
                character: Character::Ines,
                callable: false,
                direction: CallDirection::Incoming,
            });
        }
        Character::Santiago
            if state.calls.sequence(Character::Santiago) == 1
                && state.scenario == Scenario::Fifth =>
        {
            state.set_scenario(Scenario::Sixth);
            state.show_santiago_hint = true;
            state
                .calls
                .set_callable(Character::Santiago, false, CallDirection::Incoming);
            effects.push(SideEffect::SetCallable {
                character: Character::Santiago,
                callable: false,
                direction: CallDirection::Incoming,
            });
        }
        _ => {}
    }
    effects
}
