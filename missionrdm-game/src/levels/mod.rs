//! Per-level transition tables behind a common contract.
//!
//! Each level implements [`LevelLogic`]: an ordered, first-match-wins rule
//! table for submitted codes, plus the level's clickable elements, call
//! handling, and the step-inference decision list used for hint lookup.
//! The only logic shared across levels is the duplicate-submission guard
//! and the side-effect helpers in this module.

use crate::calls::{self, CallDirection, Character};
use crate::effects::{
    CallScript, DelayedEffect, DelayedRequest, ErrorOverlay, FEEDBACK_EXPIRY_MS, FeedbackKind,
    MessageNote, OverlayContent, SideEffect, SoundId,
};
use crate::hints::StepLabel;
use crate::state::{LevelId, Scenario, SessionState};

mod level1;
mod level2;
mod level3;
mod level4;
mod level5;
mod level6;

pub use level1::LevelOne;
pub use level2::LevelTwo;
pub use level3::LevelThree;
pub use level4::LevelFour;
pub use level5::LevelFive;
pub use level6::LevelSix;

/// Clickable elements the UI can report. Each belongs to one level; clicks
/// on elements foreign to the current level fall through as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementId {
    /// Level 1: folder shown once the riddle join resolves.
    FirstFolder,
    /// Level 1: folder that arms Santiago's call.
    SecondFolder,
    /// Level 1: folder that closes out the level.
    ThirdFolder,
    /// Level 2: post-it behind the plant.
    PlantPostIt,
    /// Level 3: the 19 on the wall calendar.
    CalendarDay,
    /// Level 3: post-it on the wall.
    WallPostIt,
    /// Level 4: folder on the screen.
    ScreenFolder,
    /// Level 4: mail received from Santiago.
    SantiagoMail,
    /// Level 5: tablet that closes out the level.
    Tablet,
    /// Level 5: email received from Jack.
    JackEmail,
    /// Level 6: "see more details" link.
    DetailsLink,
}

/// Contract implemented once per level.
pub trait LevelLogic: Sync {
    fn level(&self) -> LevelId;

    /// Scenario identifiers this level may occupy, in narrative order.
    fn scenarios(&self) -> &'static [Scenario];

    /// Codes that may be re-submitted without tripping the duplicate guard
    /// (they re-show a hint instead of advancing state).
    fn hint_codes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Apply the level's rule table to one submitted code. The duplicate
    /// guard has already run by the time this is called.
    fn submit_code(&self, state: &mut SessionState, code: &str) -> Vec<SideEffect>;

    fn click_element(&self, _state: &mut SessionState, _element: ElementId) -> Vec<SideEffect> {
        Vec::new()
    }

    fn call_character(&self, _state: &mut SessionState, _who: Character) -> Vec<SideEffect> {
        Vec::new()
    }

    /// Recompute the step label from current state. Pure; never mutates.
    fn infer_step(&self, state: &SessionState) -> StepLabel;
}

/// Rule table for the state's current level.
#[must_use]
pub fn logic_for(level: LevelId) -> &'static dyn LevelLogic {
    match level {
        LevelId::One => &LevelOne,
        LevelId::Two => &LevelTwo,
        LevelId::Three => &LevelThree,
        LevelId::Four => &LevelFour,
        LevelId::Five => &LevelFive,
        LevelId::Six => &LevelSix,
    }
}

/// Submit a code through the current level's table, applying the shared
/// duplicate-submission guard first.
pub fn submit_code(state: &mut SessionState, code: &str) -> Vec<SideEffect> {
    let logic = logic_for(state.level);
    if state.has_code(code) && !logic.hint_codes().contains(&code) {
        return error_feedback(state);
    }
    logic.submit_code(state, code)
}

pub fn click_element(state: &mut SessionState, element: ElementId) -> Vec<SideEffect> {
    logic_for(state.level).click_element(state, element)
}

pub fn call_character(state: &mut SessionState, who: Character) -> Vec<SideEffect> {
    logic_for(state.level).call_character(state, who)
}

/// External trigger: the player solved the current riddle outside the code
/// path (drag-and-drop puzzle, UI widget). Level 1 re-checks its scenario
/// join; other levels only record the flag.
pub fn mark_riddle_solved(state: &mut SessionState) {
    state.riddle_solved = true;
    if state.level == LevelId::One {
        level1::refresh_scenario(state);
    }
}

/// Execute a fired cooperative timer. Generation staleness has already been
/// checked by the session wrapper.
pub fn apply_delayed(state: &mut SessionState, effect: &DelayedEffect) -> Vec<SideEffect> {
    match effect {
        DelayedEffect::ClearFeedback => {
            state.clear_feedback();
            Vec::new()
        }
        DelayedEffect::UnlockCall {
            character,
            direction,
            reset_history,
        } => {
            if *reset_history {
                state.calls.reset_history(*character);
            }
            state.calls.set_callable(*character, true, *direction);
            vec![SideEffect::SetCallable {
                character: *character,
                callable: true,
                direction: *direction,
            }]
        }
        DelayedEffect::PatienceFollowUp => level3::patience_follow_up(state),
        DelayedEffect::JournalChime { step, entry } => vec![
            SideEffect::Journal { step, entry },
            SideEffect::PlaySound {
                sound: SoundId::StepFound,
            },
        ],
    }
}

// --- shared effect helpers used by the level tables ---

pub(crate) fn set_feedback(state: &mut SessionState, kind: FeedbackKind) -> Vec<SideEffect> {
    let mut effects = Vec::new();
    push_feedback(state, kind, &mut effects);
    effects
}

pub(crate) fn push_feedback(
    state: &mut SessionState,
    kind: FeedbackKind,
    effects: &mut Vec<SideEffect>,
) {
    state.set_feedback(kind);
    effects.push(SideEffect::Feedback { kind });
    effects.push(SideEffect::ScheduleDelayed {
        request: DelayedRequest {
            delay_ms: FEEDBACK_EXPIRY_MS,
            generation: state.generation,
            effect: DelayedEffect::ClearFeedback,
        },
    });
}

pub(crate) fn success_feedback(state: &mut SessionState) -> Vec<SideEffect> {
    set_feedback(state, FeedbackKind::Success)
}

pub(crate) fn error_feedback(state: &mut SessionState) -> Vec<SideEffect> {
    set_feedback(state, FeedbackKind::Error)
}

pub(crate) fn show_hint_card(
    state: &mut SessionState,
    card: &'static str,
    effects: &mut Vec<SideEffect>,
) {
    let note = state.push_overlay(OverlayContent::HintCard(card));
    effects.push(SideEffect::ShowOverlay { note });
}

pub(crate) fn show_error_overlay(overlay: ErrorOverlay, effects: &mut Vec<SideEffect>) {
    effects.push(SideEffect::ShowErrorOverlay { overlay });
}

pub(crate) fn play(sound: SoundId, effects: &mut Vec<SideEffect>) {
    effects.push(SideEffect::PlaySound { sound });
}

pub(crate) fn journal(step: &'static str, entry: &'static str, effects: &mut Vec<SideEffect>) {
    effects.push(SideEffect::Journal { step, entry });
}

pub(crate) fn send_message(
    state: &mut SessionState,
    note: MessageNote,
    effects: &mut Vec<SideEffect>,
) {
    play(SoundId::Message, effects);
    effects.push(SideEffect::SendMessage { note: note.clone() });
    state.active_message = Some(note);
}

pub(crate) fn schedule(
    state: &SessionState,
    delay_ms: u64,
    effect: DelayedEffect,
    effects: &mut Vec<SideEffect>,
) {
    effects.push(SideEffect::ScheduleDelayed {
        request: DelayedRequest {
            delay_ms,
            generation: state.generation,
            effect,
        },
    });
}

pub(crate) fn set_callable(
    state: &mut SessionState,
    who: Character,
    callable: bool,
    direction: CallDirection,
    effects: &mut Vec<SideEffect>,
) {
    state.calls.set_callable(who, callable, direction);
    effects.push(SideEffect::SetCallable {
        character: who,
        callable,
        direction,
    });
}

/// The "call unavailable" path: a call screen opens with the stock refusal
/// line and nothing is marked as called.
pub(crate) fn call_unavailable(state: &mut SessionState, who: Character) -> Vec<SideEffect> {
    let script = CallScript {
        character: who,
        body_key: "phone.callUnavailable",
        title_key: None,
    };
    state.active_call = Some(script.clone());
    vec![SideEffect::StartCall { script }]
}

/// Common front half of answering a call: play the ringtone and record the
/// call (which may trigger the level-4 auto-advance).
pub(crate) fn answer_call(
    state: &mut SessionState,
    who: Character,
    effects: &mut Vec<SideEffect>,
) {
    play(SoundId::Call, effects);
    effects.extend(calls::mark_called(state, who));
}

pub(crate) fn start_call(
    state: &mut SessionState,
    script: CallScript,
    effects: &mut Vec<SideEffect>,
) {
    state.active_call = Some(script.clone());
    effects.push(SideEffect::StartCall { script });
}

pub(crate) fn complete_level(
    state: &mut SessionState,
    effects: &mut Vec<SideEffect>,
) {
    play(SoundId::LevelComplete, effects);
    state.congrats_open = true;
    effects.push(SideEffect::CompleteLevel { level: state.level });
}
