//! Level 4: the shared drive.
//!
//! Two call-gated branches: Inès walks the player into the naming riddle,
//! then Santiago's two calls bracket the versioning riddle. The final code
//! depends on the interface language (17 in English, 32 in French).

use crate::calls::{CallDirection, Character};
use crate::effects::{CallScript, DelayedEffect, MessageNote, SideEffect, SoundId};
use crate::hints::StepLabel;
use crate::levels::{
    ElementId, LevelLogic, answer_call, call_unavailable, complete_level, error_feedback,
    journal, play, schedule, send_message, set_callable, show_hint_card, start_call,
    success_feedback,
};
use crate::state::{LevelId, Locale, Scenario, SessionState};

const HINT_CODE_1: &str = "4";
const HINT_CODE_2: &str = "51";
const SECOND_CODE: &str = "23";
const THIRD_CODE: &str = "81";
const FOURTH_CODE: &str = "1";
const FIFTH_CODE: &str = "61";
const FINAL_CODE_EN: &str = "17";
const FINAL_CODE_FR: &str = "32";
const MESSAGE_REPLAY_CODE: &str = "99";
const FINISH_CODE: &str = "47";

/// Delay before a storyline call unlocks after its trigger.
pub(super) const UNLOCK_DELAY_MS: u64 = 5_000;
/// Delay before a call's journal entry lands, matching the call pacing.
pub(super) const JOURNAL_DELAY_MS: u64 = 3_000;

const ANNE_MESSAGE: MessageNote = MessageNote {
    sender: "Anne",
    avatar: "char4",
    body_key: "phone.messageBodylvl4",
};

pub struct LevelFour;

impl LevelLogic for LevelFour {
    fn level(&self) -> LevelId {
        LevelId::Four
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
        ]
    }

    fn hint_codes(&self) -> &'static [&'static str] {
        &[HINT_CODE_1, HINT_CODE_2]
    }

    fn submit_code(&self, state: &mut SessionState, code: &str) -> Vec<SideEffect> {
        let ines_called = state.calls.sequence(Character::Ines) >= 1;
        let santiago_calls = state.calls.sequence(Character::Santiago);

        // Naming hints, only once Inès has explained the task. 51 without 4
        // shows the "look again" card and is not recorded.
        if (code == HINT_CODE_1 || code == HINT_CODE_2)
            && state.scenario == Scenario::Third
            && ines_called
        {
            let mut effects = success_feedback(state);
            if code == HINT_CODE_1 {
                show_hint_card(state, "hint9", &mut effects);
                state.add_code_once(HINT_CODE_1);
            } else if state.has_code(HINT_CODE_1) {
                show_hint_card(state, "hint11", &mut effects);
                state.add_code_once(HINT_CODE_2);
            } else {
                show_hint_card(state, "hint10", &mut effects);
            }
            return effects;
        }

        if code == SECOND_CODE
            && state.scenario == Scenario::Third
            && state.has_code(HINT_CODE_1)
            && state.has_code(HINT_CODE_2)
            && ines_called
        {
            state.clear_overlays();
            state.set_scenario(Scenario::Fourth);
            state.add_code_once(SECOND_CODE);
            let mut effects = success_feedback(state);
            send_message(
                state,
                MessageNote {
                    sender: "Inès",
                    avatar: "char2",
                    body_key: "phone.messageBodylvl3",
                },
                &mut effects,
            );
            return effects;
        }

        if code == THIRD_CODE && state.scenario == Scenario::Fourth {
            state.set_scenario(Scenario::Fifth);
            state.add_code_once(THIRD_CODE);
            let mut effects = success_feedback(state);
            schedule(
                state,
                UNLOCK_DELAY_MS,
                DelayedEffect::UnlockCall {
                    character: Character::Santiago,
                    direction: CallDirection::Outgoing,
                    reset_history: true,
                },
                &mut effects,
            );
            return effects;
        }

        if code == FOURTH_CODE && state.scenario == Scenario::Sixth && santiago_calls >= 1 {
            state.clear_overlays();
            state.first_hint_found = true;
            let mut effects = success_feedback(state);
            show_hint_card(state, "hint12", &mut effects);
            return effects;
        }

        if code == FIFTH_CODE
            && state.scenario == Scenario::Sixth
            && state.first_hint_found
            && santiago_calls >= 1
        {
            state.clear_overlays();
            state.add_code_once(FIFTH_CODE);
            let mut effects = success_feedback(state);
            set_callable(
                state,
                Character::Santiago,
                true,
                CallDirection::Incoming,
                &mut effects,
            );
            return effects;
        }

        if (code == FINAL_CODE_EN || code == FINAL_CODE_FR)
            && state.scenario == Scenario::Seventh
            && state.second_hint_found
            && santiago_calls >= 2
        {
            let matches_locale = match state.locale {
                Locale::En => code == FINAL_CODE_EN,
                Locale::Fr => code == FINAL_CODE_FR,
            };
            if !matches_locale {
                return error_feedback(state);
            }
            state.clear_overlays();
            state.set_scenario(Scenario::Eighth);
            state.add_code_once(code);
            let mut effects = success_feedback(state);
            send_message(state, ANNE_MESSAGE, &mut effects);
            set_callable(
                state,
                Character::Santiago,
                false,
                CallDirection::Outgoing,
                &mut effects,
            );
            return effects;
        }

        // Anne's message can be replayed while the exit code is pending.
        if code == MESSAGE_REPLAY_CODE
            && state.scenario == Scenario::Eighth
            && state.first_hint_found
            && santiago_calls >= 2
        {
            let mut effects = success_feedback(state);
            send_message(state, ANNE_MESSAGE, &mut effects);
            return effects;
        }

        if code == FINISH_CODE && state.scenario == Scenario::Eighth {
            state.add_code_once(FINISH_CODE);
            let mut effects = success_feedback(state);
            complete_level(state, &mut effects);
            return effects;
        }

        error_feedback(state)
    }

    fn click_element(&self, state: &mut SessionState, element: ElementId) -> Vec<SideEffect> {
        match element {
            ElementId::ScreenFolder if state.scenario == Scenario::Default => {
                state.set_scenario(Scenario::Second);
                let mut effects = Vec::new();
                play(SoundId::StepFound, &mut effects);
                journal("step4", "step4_1", &mut effects);
                schedule(
                    state,
                    UNLOCK_DELAY_MS,
                    DelayedEffect::UnlockCall {
                        character: Character::Ines,
                        direction: CallDirection::Outgoing,
                        reset_history: true,
                    },
                    &mut effects,
                );
                effects
            }
            ElementId::SantiagoMail if state.scenario == Scenario::Seventh => {
                state.second_hint_found = true;
                let mut effects = Vec::new();
                set_callable(
                    state,
                    Character::Santiago,
                    true,
                    CallDirection::Outgoing,
                    &mut effects,
                );
                show_hint_card(state, "hint13", &mut effects);
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

        match (who, state.calls.sequence(who)) {
            (Character::Ines, 1) => {
                start_call(
                    state,
                    CallScript {
                        character: who,
                        body_key: "phone.call3",
                        title_key: None,
                    },
                    &mut effects,
                );
            }
            (Character::Santiago, 1) => {
                start_call(
                    state,
                    CallScript {
                        character: who,
                        body_key: "phone.call4",
                        title_key: Some("roadmap.step4_2"),
                    },
                    &mut effects,
                );
                schedule(
                    state,
                    JOURNAL_DELAY_MS,
                    DelayedEffect::JournalChime {
                        step: "step4",
                        entry: "step4_2",
                    },
                    &mut effects,
                );
            }
            (Character::Santiago, 2) => {
                start_call(
                    state,
                    CallScript {
                        character: who,
                        body_key: "phone.call5",
                        title_key: Some("roadmap.step4_3"),
                    },
                    &mut effects,
                );
                schedule(
                    state,
                    JOURNAL_DELAY_MS,
                    DelayedEffect::JournalChime {
                        step: "step4",
                        entry: "step4_3",
                    },
                    &mut effects,
                );
                set_callable(
                    state,
                    Character::Santiago,
                    false,
                    CallDirection::Incoming,
                    &mut effects,
                );
                state.set_scenario(Scenario::Seventh);
            }
            (Character::Santiago, _) => {
                start_call(
                    state,
                    CallScript {
                        character: who,
                        body_key: "phone.call6",
                        title_key: None,
                    },
                    &mut effects,
                );
            }
            _ => {}
        }
        effects
    }

    fn infer_step(&self, state: &SessionState) -> StepLabel {
        let santiago_calls = state.calls.sequence(Character::Santiago);
        let ines_called = state.calls.sequence(Character::Ines) >= 1;

        if state.scenario == Scenario::Eighth
            && (state.has_code(FINAL_CODE_EN) || state.has_code(FINAL_CODE_FR))
        {
            return StepLabel::Thirteenth;
        }
        if state.scenario == Scenario::Seventh && state.second_hint_found {
            return if santiago_calls >= 3 {
                StepLabel::Twelfth
            } else {
                StepLabel::Eleventh
            };
        }
        if state.scenario == Scenario::Seventh && santiago_calls >= 2 {
            return StepLabel::Tenth;
        }
        if state.scenario == Scenario::Sixth && santiago_calls >= 1 {
            return if state.first_hint_found {
                StepLabel::Ninth
            } else {
                StepLabel::Eighth
            };
        }
        if state.scenario == Scenario::Fifth && state.has_code(THIRD_CODE) {
            return StepLabel::Seventh;
        }
        if state.scenario == Scenario::Fourth && state.has_code(SECOND_CODE) {
            return StepLabel::Sixth;
        }
        if state.scenario == Scenario::Third && ines_called {
            if state.has_code(HINT_CODE_1) && state.has_code(HINT_CODE_2) {
                return StepLabel::Fifth;
            }
            if state.has_code(HINT_CODE_1) {
                return StepLabel::Fourth;
            }
            return StepLabel::Third;
        }
        if state.scenario == Scenario::Second {
            return StepLabel::Second;
        }
        StepLabel::First
    }
}
