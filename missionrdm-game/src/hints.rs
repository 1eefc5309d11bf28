//! Step inference for hint and solution lookup.
//!
//! The step is never stored: each level re-derives "where the player
//! logically is" from the same state its forward rules mutate, via a
//! priority-ordered decision list (most advanced state first). The label
//! only ever feeds the `level{N}.hints.{step}` / `level{N}.solutions.{step}`
//! translation keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::levels::logic_for;
use crate::state::SessionState;

/// Ordered narrative step labels. Levels use a prefix of this range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepLabel {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
    Tenth,
    Eleventh,
    Twelfth,
    Thirteenth,
}

impl StepLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
            Self::Fifth => "fifth",
            Self::Sixth => "sixth",
            Self::Seventh => "seventh",
            Self::Eighth => "eighth",
            Self::Ninth => "ninth",
            Self::Tenth => "tenth",
            Self::Eleventh => "eleventh",
            Self::Twelfth => "twelfth",
            Self::Thirteenth => "thirteenth",
        }
    }
}

impl fmt::Display for StepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current step for the state's level. Pure read.
#[must_use]
pub fn current_step(state: &SessionState) -> StepLabel {
    logic_for(state.level).infer_step(state)
}

/// Translation key for the current hint text.
#[must_use]
pub fn hint_key(state: &SessionState) -> String {
    format!(
        "level{}.hints.{}",
        state.level.number(),
        current_step(state)
    )
}

/// Translation key for the current solution text.
#[must_use]
pub fn solution_key(state: &SessionState) -> String {
    format!(
        "level{}.solutions.{}",
        state.level.number(),
        current_step(state)
    )
}
