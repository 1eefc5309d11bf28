//! Level 3: the archive room.
//!
//! The calendar click starts a 12-second in-world delay before Inès's
//! message arms the file riddle. All three file hints (57, 58, 59) must be
//! on the table before 77 is accepted, and the wall post-it gates the exit.

use crate::calls::{CallDirection, Character};
use crate::effects::{
    CallScript, DelayedEffect, ErrorOverlay, MessageNote, SideEffect, SoundId,
};
use crate::hints::StepLabel;
use crate::levels::{
    ElementId, LevelLogic, answer_call, call_unavailable, complete_level, error_feedback,
    journal, play, push_feedback, schedule, send_message, set_callable, show_error_overlay,
    show_hint_card, start_call, success_feedback,
};
use crate::state::{LevelId, Scenario, SessionState};

const FIRST_HINT_CODE: &str = "17";
const FIRST_CODE: &str = "33";
const FILE_HINT_CODES: [&str; 3] = ["57", "58", "59"];
const RIDDLE_CODE: &str = "77";
/// Anticipated wrong answers for the file riddle.
const WRONG_RIDDLE_CODES: [&str; 2] = ["76", "78"];
const FOURTH_CODE: &str = "22";
const FIFTH_CODE: &str = "64";
const FINISH_CODE: &str = "99";

/// Delay before Inès follows up on the calendar discovery.
pub(super) const PATIENCE_DELAY_MS: u64 = 12_000;

pub struct LevelThree;

impl LevelLogic for LevelThree {
    fn level(&self) -> LevelId {
        LevelId::Three
    }

    fn scenarios(&self) -> &'static [Scenario] {
        &[
            Scenario::Default,
            Scenario::Second,
            Scenario::Third,
            Scenario::Fourth,
            Scenario::Fifth,
            Scenario::Sixth,
            Scenario::Final,
        ]
    }

    fn hint_codes(&self) -> &'static [&'static str] {
        &FILE_HINT_CODES
    }

    fn submit_code(&self, state: &mut SessionState, code: &str) -> Vec<SideEffect> {
        if code == FIRST_HINT_CODE && state.entered_codes.is_empty() {
            state.first_hint_found = true;
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            journal("step3", "step3_1", &mut effects);
            show_hint_card(state, "hint4", &mut effects);
            return effects;
        }

        // 33 confirms the first hint; both codes are recorded together.
        if code == FIRST_CODE && state.first_hint_found {
            state.add_code_once(FIRST_HINT_CODE);
            state.add_code_once(FIRST_CODE);
            state.first_hint_found = false;
            state.set_scenario(Scenario::Second);
            let effects = success_feedback(state);
            state.clear_overlays();
            return effects;
        }

        if FILE_HINT_CODES.contains(&code) && state.scenario == Scenario::Fourth {
            state.add_code_once(code);
            let card = match code {
                "57" => "hint5",
                "58" => "hint6",
                _ => "hint7",
            };
            let mut effects = success_feedback(state);
            show_hint_card(state, card, &mut effects);
            return effects;
        }

        // The riddle (and its near-misses) stays locked until every file
        // hint has been seen.
        if (code == RIDDLE_CODE || WRONG_RIDDLE_CODES.contains(&code))
            && !FILE_HINT_CODES.iter().all(|hint| state.has_code(hint))
        {
            return error_feedback(state);
        }

        if code == RIDDLE_CODE && state.scenario == Scenario::Fourth {
            state.clear_overlays();
            state.add_code_once(RIDDLE_CODE);
            state.set_scenario(Scenario::Fifth);
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

        if WRONG_RIDDLE_CODES.contains(&code) && state.scenario == Scenario::Fourth {
            let mut effects = Vec::new();
            show_error_overlay(
                ErrorOverlay::new("riddle3.title", format!("riddle3.incorrect{code}")),
                &mut effects,
            );
            // No early return in the table: the catch-all still fires.
            push_feedback(state, crate::effects::FeedbackKind::Error, &mut effects);
            return effects;
        }

        if code == FOURTH_CODE && state.scenario == Scenario::Fifth {
            state.add_code_once(FOURTH_CODE);
            state.set_scenario(Scenario::Sixth);
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            journal("step3", "step3_3", &mut effects);
            return effects;
        }

        if code == FIFTH_CODE && state.scenario == Scenario::Sixth {
            state.add_code_once(FIFTH_CODE);
            state.set_scenario(Scenario::Final);
            return success_feedback(state);
        }

        if code == FINISH_CODE && state.scenario == Scenario::Final && state.second_hint_found {
            state.second_hint_found = false;
            state.add_code_once(FINISH_CODE);
            let mut effects = success_feedback(state);
            complete_level(state, &mut effects);
            return effects;
        }

        error_feedback(state)
    }

    fn click_element(&self, state: &mut SessionState, element: ElementId) -> Vec<SideEffect> {
        match element {
            ElementId::CalendarDay if state.scenario == Scenario::Second => {
                state.clicked_element = true;
                state.set_scenario(Scenario::Third);
                let mut effects = Vec::new();
                schedule(
                    state,
                    PATIENCE_DELAY_MS,
                    DelayedEffect::PatienceFollowUp,
                    &mut effects,
                );
                effects
            }
            ElementId::WallPostIt if state.scenario == Scenario::Final => {
                state.second_hint_found = true;
                let mut effects = Vec::new();
                show_hint_card(state, "hint8", &mut effects);
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
                body_key: "phone.call2",
                title_key: None,
            },
            &mut effects,
        );
        effects
    }

    fn infer_step(&self, state: &SessionState) -> StepLabel {
        if state.second_hint_found {
            return StepLabel::Tenth;
        }
        if state.has_code("64") {
            return StepLabel::Ninth;
        }
        if state.has_code("22") {
            return StepLabel::Eighth;
        }
        if state.has_code("77") {
            return StepLabel::Seventh;
        }
        if FILE_HINT_CODES.iter().all(|hint| state.has_code(hint)) {
            return StepLabel::Sixth;
        }
        if state.clicked_element && state.patience {
            return StepLabel::Fifth;
        }
        if state.clicked_element {
            return StepLabel::Fourth;
        }
        if state.has_code("33") {
            return StepLabel::Third;
        }
        if state.entered_codes.is_empty() && state.first_hint_found {
            return StepLabel::Second;
        }
        StepLabel::First
    }
}

/// Fired 12 seconds after the calendar click: Inès texts the player, the
/// patience flag goes up, and her incoming call unlocks.
pub(super) fn patience_follow_up(state: &mut SessionState) -> Vec<SideEffect> {
    let mut effects = Vec::new();
    send_message(
        state,
        MessageNote {
            sender: "Inès",
            avatar: "char2",
            body_key: "phone.messageBodylvl2",
        },
        &mut effects,
    );
    state.patience = true;
    state.set_scenario(Scenario::Fourth);
    journal("step3", "step3_2", &mut effects);
    set_callable(
        state,
        Character::Ines,
        true,
        CallDirection::Incoming,
        &mut effects,
    );
    effects
}
