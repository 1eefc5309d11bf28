//! Level 1: the locked office.
//!
//! Two hint codes lead into the post-it riddle; solving it (an external
//! trigger) joins with codes 8 and 4 to open the folder chain, and 28 ends
//! the level once Santiago's call armed the final scenario.

use crate::calls::{CallDirection, Character};
use crate::effects::{CallScript, ErrorOverlay, MessageNote, SideEffect, SoundId};
use crate::hints::StepLabel;
use crate::levels::{
    ElementId, LevelLogic, answer_call, call_unavailable, complete_level, error_feedback, journal,
    play, send_message, set_callable, show_error_overlay, show_hint_card, start_call,
    success_feedback,
};
use crate::state::{LevelId, Scenario, SessionState};

const HINT_CODE: &str = "8";
const COUNT_CODE: &str = "4";
const RIDDLE_CODE: &str = "29";
const FINISH_CODE: &str = "28";
/// Anticipated wrong answers for the final post-it riddle.
const WRONG_FINAL_CODES: [&str; 3] = ["77", "82", "25"];

pub struct LevelOne;

impl LevelLogic for LevelOne {
    fn level(&self) -> LevelId {
        LevelId::One
    }

    fn scenarios(&self) -> &'static [Scenario] {
        &[
            Scenario::Default,
            Scenario::Updated,
            Scenario::Third,
            Scenario::Final,
            Scenario::Congrats,
        ]
    }

    fn submit_code(&self, state: &mut SessionState, code: &str) -> Vec<SideEffect> {
        // First hint: count the post-its. Not recorded until 4 confirms it.
        if code == HINT_CODE && !state.has_code(COUNT_CODE) {
            let mut effects = success_feedback(state);
            state.first_hint_found = true;
            show_hint_card(state, "hint1", &mut effects);
            return effects;
        }

        // Confirmed count: both codes are recorded together.
        if code == COUNT_CODE && state.first_hint_found {
            state.add_code_once(COUNT_CODE);
            state.add_code_once(HINT_CODE);
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            show_hint_card(state, "hint2", &mut effects);
            journal("step1", "step1_3", &mut effects);
            refresh_scenario(state);
            return effects;
        }

        // Santiago's riddle message. Re-submitting after the riddle is
        // solved only re-checks the scenario join.
        if code == RIDDLE_CODE {
            state.clear_overlays();
            if state.riddle_solved {
                let effects = error_feedback(state);
                if !state.has_code(RIDDLE_CODE) {
                    refresh_scenario(state);
                }
                return effects;
            }
            state.second_hint_found = true;
            let mut effects = success_feedback(state);
            send_message(
                state,
                MessageNote {
                    sender: "Santiago",
                    avatar: "char1",
                    body_key: "phone.messageBodylvl1",
                },
                &mut effects,
            );
            return effects;
        }

        if state.scenario == Scenario::Final && code == FINISH_CODE {
            state.add_code_once(FINISH_CODE);
            state.set_scenario(Scenario::Congrats);
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            set_callable(
                state,
                Character::Santiago,
                false,
                CallDirection::Outgoing,
                &mut effects,
            );
            journal("step1", "step1_2", &mut effects);
            return effects;
        }

        if state.scenario == Scenario::Final && WRONG_FINAL_CODES.contains(&code) {
            let mut effects = Vec::new();
            show_error_overlay(
                ErrorOverlay::new("riddle2.title", format!("riddle2.incorrect{code}")),
                &mut effects,
            );
            return effects;
        }

        error_feedback(state)
    }

    fn click_element(&self, state: &mut SessionState, element: ElementId) -> Vec<SideEffect> {
        match element {
            ElementId::FirstFolder if state.scenario == Scenario::Updated => {
                state.clear_overlays();
                state.set_scenario(Scenario::Third);
                state.riddle_solved = false;
                Vec::new()
            }
            ElementId::SecondFolder if state.scenario == Scenario::Third => {
                state.set_scenario(Scenario::Final);
                let mut effects = Vec::new();
                set_callable(
                    state,
                    Character::Santiago,
                    true,
                    CallDirection::Outgoing,
                    &mut effects,
                );
                effects
            }
            ElementId::ThirdFolder if state.scenario == Scenario::Congrats => {
                let mut effects = Vec::new();
                complete_level(state, &mut effects);
                effects
            }
            _ => Vec::new(),
        }
    }

    fn call_character(&self, state: &mut SessionState, who: Character) -> Vec<SideEffect> {
        if !state.calls.is_callable(who) {
            return call_unavailable(state, who);
        }
        let mut effects = Vec::new();
        answer_call(state, who, &mut effects);
        start_call(
            state,
            CallScript {
                character: who,
                body_key: "phone.call1",
                title_key: None,
            },
            &mut effects,
        );
        effects
    }

    fn infer_step(&self, state: &SessionState) -> StepLabel {
        match state.scenario {
            Scenario::Congrats => return StepLabel::Eighth,
            Scenario::Final => return StepLabel::Seventh,
            Scenario::Third => return StepLabel::Sixth,
            Scenario::Updated => return StepLabel::Fifth,
            _ => {}
        }
        if state.second_hint_found && !state.riddle_solved {
            return StepLabel::Fourth;
        }
        if state.has_code("8") && state.has_code("4") && !state.second_hint_found {
            return StepLabel::Third;
        }
        if (state.first_hint_found && !state.has_code("4"))
            || (state.riddle_solved && state.first_hint_found)
        {
            return StepLabel::Second;
        }
        StepLabel::First
    }
}

/// Join condition shared by the forward rules and the external
/// riddle-solved trigger: once 8 and 4 are recorded and the riddle is
/// solved, the scene updates and pending messages are dismissed.
pub(super) fn refresh_scenario(state: &mut SessionState) {
    if state.has_code("8") && state.has_code("4") && state.riddle_solved {
        state.set_scenario(Scenario::Updated);
        state.active_message = None;
        state.active_riddle = false;
    }
}
