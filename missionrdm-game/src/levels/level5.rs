//! Level 5: the repository office.
//!
//! Three call-gated riddles in a row (Santiago, Jack, then Inès), each with
//! its own set of anticipated wrong answers that re-open a titled overlay
//! instead of plain error feedback.

use crate::calls::{CallDirection, Character};
use crate::effects::{CallScript, DelayedEffect, ErrorOverlay, SideEffect, SoundId};
use crate::hints::StepLabel;
use crate::levels::{
    ElementId, LevelLogic, answer_call, call_unavailable, complete_level, error_feedback,
    journal, play, schedule, set_callable, show_error_overlay, show_hint_card, start_call,
    success_feedback,
};
use crate::state::{LevelId, Scenario, SessionState};

const HINT_CODE_1: &str = "3";
const FIRST_CODE: &str = "19";
const SECOND_CODE: &str = "71";
const WRONG_REPOSITORY_CODES: [&str; 2] = ["72", "73"];
const THIRD_CODE: &str = "96";
const WRONG_ACCESS_CODES: [&str; 3] = ["93", "94", "95"];
const HINT_CODE_3: &str = "8";
const FOURTH_CODE: &str = "6";
const WRONG_LICENSE_CODES: [&str; 3] = ["12", "35", "13"];
const FIFTH_CODE: &str = "84";
const WRONG_IDENTIFIER_CODES: [&str; 2] = ["65", "18"];

pub(super) const SANTIAGO_UNLOCK_DELAY_MS: u64 = 3_000;
pub(super) const JACK_UNLOCK_DELAY_MS: u64 = 5_000;
pub(super) const INES_UNLOCK_DELAY_MS: u64 = 3_000;

pub struct LevelFive;

impl LevelLogic for LevelFive {
    fn level(&self) -> LevelId {
        LevelId::Five
    }

    fn scenarios(&self) -> &'static [Scenario] {
        &[
            Scenario::Default,
            Scenario::Second,
            Scenario::Third,
            Scenario::Fourth,
            Scenario::Fifth,
            Scenario::Sixth,
            Scenario::Seventh,
            Scenario::Eighth,
            Scenario::Ninth,
        ]
    }

    fn hint_codes(&self) -> &'static [&'static str] {
        &[HINT_CODE_3, HINT_CODE_1]
    }

    fn submit_code(&self, state: &mut SessionState, code: &str) -> Vec<SideEffect> {
        if code == HINT_CODE_1 && state.entered_codes.is_empty() {
            state.first_hint_found = true;
            state.set_scenario(Scenario::Second);
            let mut effects = success_feedback(state);
            show_hint_card(state, "hint14", &mut effects);
            return effects;
        }

        if code == FIRST_CODE && state.first_hint_found {
            state.clear_overlays();
            state.set_scenario(Scenario::Third);
            state.add_code_once(FIRST_CODE);
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            journal("step5", "step5_1", &mut effects);
            schedule(
                state,
                SANTIAGO_UNLOCK_DELAY_MS,
                DelayedEffect::UnlockCall {
                    character: Character::Santiago,
                    direction: CallDirection::Outgoing,
                    reset_history: false,
                },
                &mut effects,
            );
            return effects;
        }

        if code == SECOND_CODE && state.scenario == Scenario::Fourth {
            state.add_code_once(SECOND_CODE);
            state.set_scenario(Scenario::Fifth);
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            journal("step5", "step5_2", &mut effects);
            set_callable(
                state,
                Character::Santiago,
                false,
                CallDirection::Outgoing,
                &mut effects,
            );
            return effects;
        }

        if WRONG_REPOSITORY_CODES.contains(&code) && state.scenario == Scenario::Fourth {
            let mut effects = Vec::new();
            show_error_overlay(
                ErrorOverlay::new("riddle4.title", "riddle4.incorrect"),
                &mut effects,
            );
            return effects;
        }

        if code == THIRD_CODE && state.scenario == Scenario::Fifth && state.second_hint_found {
            state.clear_overlays();
            state.add_code_once(THIRD_CODE);
            state.set_scenario(Scenario::Sixth);
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            journal("step5", "step5_4", &mut effects);
            schedule(
                state,
                JACK_UNLOCK_DELAY_MS,
                DelayedEffect::UnlockCall {
                    character: Character::Jack,
                    direction: CallDirection::Outgoing,
                    reset_history: false,
                },
                &mut effects,
            );
            return effects;
        }

        if WRONG_ACCESS_CODES.contains(&code)
            && state.scenario == Scenario::Fifth
            && state.second_hint_found
        {
            let mut effects = Vec::new();
            show_error_overlay(
                ErrorOverlay::new("riddle5.title", format!("riddle5.incorrect{code}")),
                &mut effects,
            );
            return effects;
        }

        if code == HINT_CODE_3 && state.scenario == Scenario::Seventh {
            state.third_hint_found = true;
            let mut effects = success_feedback(state);
            show_hint_card(state, "hint16", &mut effects);
            return effects;
        }

        if code == FOURTH_CODE && state.scenario == Scenario::Seventh && state.third_hint_found {
            state.clear_overlays();
            state.add_code_once(FOURTH_CODE);
            state.set_scenario(Scenario::Eighth);
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            journal("step5", "step5_3", &mut effects);
            set_callable(
                state,
                Character::Jack,
                false,
                CallDirection::Outgoing,
                &mut effects,
            );
            schedule(
                state,
                INES_UNLOCK_DELAY_MS,
                DelayedEffect::UnlockCall {
                    character: Character::Ines,
                    direction: CallDirection::Incoming,
                    reset_history: false,
                },
                &mut effects,
            );
            return effects;
        }

        if WRONG_LICENSE_CODES.contains(&code)
            && state.scenario == Scenario::Seventh
            && state.third_hint_found
        {
            let mut effects = Vec::new();
            show_error_overlay(
                ErrorOverlay::new("riddle6.title", "riddle6.incorrect"),
                &mut effects,
            );
            return effects;
        }

        if code == FIFTH_CODE && state.scenario == Scenario::Eighth && state.active_riddle {
            state.add_code_once(FIFTH_CODE);
            state.set_scenario(Scenario::Ninth);
            let mut effects = success_feedback(state);
            set_callable(
                state,
                Character::Ines,
                false,
                CallDirection::Incoming,
                &mut effects,
            );
            return effects;
        }

        if WRONG_IDENTIFIER_CODES.contains(&code)
            && state.scenario == Scenario::Eighth
            && state.active_riddle
        {
            let mut effects = Vec::new();
            show_error_overlay(
                ErrorOverlay::new("riddle6.title", "riddle6.incorrect"),
                &mut effects,
            );
            return effects;
        }

        error_feedback(state)
    }

    fn click_element(&self, state: &mut SessionState, element: ElementId) -> Vec<SideEffect> {
        match element {
            ElementId::Tablet if state.scenario == Scenario::Ninth => {
                let mut effects = Vec::new();
                complete_level(state, &mut effects);
                effects
            }
            ElementId::JackEmail if state.scenario == Scenario::Fifth => {
                state.second_hint_found = true;
                let mut effects = Vec::new();
                show_hint_card(state, "hint15", &mut effects);
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
        match who {
            Character::Santiago => {
                state.set_scenario(Scenario::Fourth);
                start_call(
                    state,
                    CallScript {
                        character: who,
                        body_key: "phone.call7",
                        title_key: None,
                    },
                    &mut effects,
                );
            }
            Character::Jack => {
                state.set_scenario(Scenario::Seventh);
                start_call(
                    state,
                    CallScript {
                        character: who,
                        body_key: "phone.call8",
                        title_key: None,
                    },
                    &mut effects,
                );
            }
            Character::Ines => {
                state.active_riddle = true;
                start_call(
                    state,
                    CallScript {
                        character: who,
                        body_key: "phone.call9",
                        title_key: None,
                    },
                    &mut effects,
                );
            }
        }
        effects
    }

    fn infer_step(&self, state: &SessionState) -> StepLabel {
        match state.scenario {
            Scenario::Ninth if state.has_code(FIFTH_CODE) => StepLabel::Twelfth,
            Scenario::Eighth if state.active_riddle && state.has_code(FOURTH_CODE) => {
                StepLabel::Eleventh
            }
            Scenario::Eighth if !state.active_riddle => StepLabel::Tenth,
            Scenario::Seventh if state.third_hint_found => StepLabel::Ninth,
            Scenario::Seventh => StepLabel::Eighth,
            Scenario::Sixth if state.has_code(THIRD_CODE) => StepLabel::Seventh,
            Scenario::Fifth if state.second_hint_found && state.has_code(SECOND_CODE) => {
                StepLabel::Sixth
            }
            Scenario::Fifth if state.has_code(SECOND_CODE) => StepLabel::Fifth,
            Scenario::Fourth => StepLabel::Fourth,
            Scenario::Third => StepLabel::Third,
            Scenario::Second => StepLabel::Second,
            _ => StepLabel::First,
        }
    }
}
