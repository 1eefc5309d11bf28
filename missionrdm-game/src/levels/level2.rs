//! Level 2: the reception desk.
//!
//! A straight chain of five codes, a hint code that reveals the hidden
//! post-it scenario, and 11 to finish. No character calls.

use crate::effects::{SideEffect, SoundId};
use crate::hints::StepLabel;
use crate::levels::{
    ElementId, LevelLogic, complete_level, error_feedback, journal, play, show_hint_card,
    success_feedback,
};
use crate::state::{LevelId, Scenario, SessionState};

const FIRST_CODE: &str = "9";
const SECOND_CODE: &str = "15";
const THIRD_CODE: &str = "31";
const FOURTH_CODE: &str = "1";
const FIFTH_CODE: &str = "36";
const HINT_CODE: &str = "7";
const FINISH_CODE: &str = "11";

pub struct LevelTwo;

impl LevelLogic for LevelTwo {
    fn level(&self) -> LevelId {
        LevelId::Two
    }

    fn scenarios(&self) -> &'static [Scenario] {
        &[
            Scenario::Default,
            Scenario::Second,
            Scenario::Third,
            Scenario::Fourth,
            Scenario::Fifth,
            Scenario::Final,
            Scenario::Main,
        ]
    }

    fn submit_code(&self, state: &mut SessionState, code: &str) -> Vec<SideEffect> {
        if code == FIRST_CODE && !state.has_code(HINT_CODE) {
            state.add_code_once(FIRST_CODE);
            state.set_scenario(Scenario::Second);
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            journal("step2", "step2_2", &mut effects);
            return effects;
        }

        if code == SECOND_CODE && state.scenario == Scenario::Second {
            state.add_code_once(SECOND_CODE);
            state.set_scenario(Scenario::Third);
            return success_feedback(state);
        }

        if code == THIRD_CODE && state.scenario == Scenario::Third {
            state.add_code_once(THIRD_CODE);
            state.set_scenario(Scenario::Fourth);
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            journal("step2", "step2_3", &mut effects);
            return effects;
        }

        if code == FOURTH_CODE && state.scenario == Scenario::Fourth {
            state.add_code_once(FOURTH_CODE);
            state.set_scenario(Scenario::Fifth);
            return success_feedback(state);
        }

        if code == FIFTH_CODE && state.scenario == Scenario::Fifth {
            state.add_code_once(FIFTH_CODE);
            state.set_scenario(Scenario::Final);
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            journal("step2", "step2_1", &mut effects);
            return effects;
        }

        // Hint toward the exit code; deliberately not recorded so the
        // opening rule's 7-guard keeps its meaning.
        if code == HINT_CODE && state.scenario == Scenario::Final {
            state.set_scenario(Scenario::Main);
            return success_feedback(state);
        }

        if code == FINISH_CODE && state.scenario == Scenario::Main {
            state.add_code_once(FINISH_CODE);
            let mut effects = success_feedback(state);
            complete_level(state, &mut effects);
            return effects;
        }

        error_feedback(state)
    }

    fn click_element(&self, state: &mut SessionState, element: ElementId) -> Vec<SideEffect> {
        match element {
            ElementId::PlantPostIt if state.scenario == Scenario::Main => {
                state.first_hint_found = true;
                let mut effects = Vec::new();
                show_hint_card(state, "hint3", &mut effects);
                effects
            }
            _ => Vec::new(),
        }
    }

    fn infer_step(&self, state: &SessionState) -> StepLabel {
        if state.scenario == Scenario::Main && state.first_hint_found {
            return StepLabel::Eighth;
        }
        if state.scenario == Scenario::Main {
            return StepLabel::Seventh;
        }
        if state.has_code("36") {
            return StepLabel::Sixth;
        }
        if state.has_code("1") {
            return StepLabel::Fifth;
        }
        if state.has_code("31") {
            return StepLabel::Fourth;
        }
        if state.has_code("15") {
            return StepLabel::Third;
        }
        if state.has_code("9") {
            return StepLabel::Second;
        }
        StepLabel::First
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::FeedbackKind;
    use crate::levels::submit_code;

    fn fresh() -> SessionState {
        SessionState::new(LevelId::Two, Default::default())
    }

    #[test]
    fn code_chain_advances_one_scenario_per_submission() {
        let mut state = fresh();
        let chain = [
            ("9", Scenario::Second),
            ("15", Scenario::Third),
            ("31", Scenario::Fourth),
            ("1", Scenario::Fifth),
            ("36", Scenario::Final),
        ];
        for (code, scenario) in chain {
            let _ = submit_code(&mut state, code);
            assert_eq!(state.scenario, scenario, "after code {code}");
            assert_eq!(state.feedback, Some(FeedbackKind::Success));
            assert!(state.has_code(code));
        }
        assert_eq!(state.entered_codes, vec!["9", "15", "31", "1", "36"]);
    }

    #[test]
    fn out_of_order_codes_are_rejected_without_mutation() {
        let mut state = fresh();
        let _ = submit_code(&mut state, "36");
        assert_eq!(state.feedback, Some(FeedbackKind::Error));
        assert_eq!(state.scenario, Scenario::Default);
        assert!(state.entered_codes.is_empty());

        let _ = submit_code(&mut state, "9");
        let _ = submit_code(&mut state, "31");
        assert_eq!(state.feedback, Some(FeedbackKind::Error));
        assert_eq!(state.scenario, Scenario::Second);
    }

    #[test]
    fn duplicate_resubmission_errors() {
        let mut state = fresh();
        let _ = submit_code(&mut state, "9");
        let effects = submit_code(&mut state, "9");
        assert_eq!(state.feedback, Some(FeedbackKind::Error));
        assert_eq!(state.scenario, Scenario::Second);
        assert!(!effects
            .iter()
            .any(|effect| matches!(effect, SideEffect::Journal { .. })));
    }

    #[test]
    fn hint_code_opens_main_without_being_recorded() {
        let mut state = fresh();
        for code in ["9", "15", "31", "1", "36"] {
            let _ = submit_code(&mut state, code);
        }
        let _ = submit_code(&mut state, "7");
        assert_eq!(state.scenario, Scenario::Main);
        assert!(!state.has_code("7"));
    }

    #[test]
    fn finish_code_completes_the_level() {
        let mut state = fresh();
        for code in ["9", "15", "31", "1", "36", "7"] {
            let _ = submit_code(&mut state, code);
        }
        let effects = submit_code(&mut state, "11");
        assert!(state.congrats_open);
        assert!(state.has_code("11"));
        assert!(effects.iter().any(SideEffect::is_complete_level));
        assert!(effects.iter().any(|effect| matches!(
            effect,
            SideEffect::PlaySound {
                sound: SoundId::LevelComplete
            }
        )));
    }

    #[test]
    fn finish_code_needs_the_main_scenario() {
        let mut state = fresh();
        for code in ["9", "15", "31", "1", "36"] {
            let _ = submit_code(&mut state, code);
        }
        let effects = submit_code(&mut state, "11");
        assert_eq!(state.feedback, Some(FeedbackKind::Error));
        assert!(!effects.iter().any(SideEffect::is_complete_level));
    }

    #[test]
    fn plant_post_it_only_works_in_main() {
        let logic = LevelTwo;
        let mut state = fresh();
        assert!(logic
            .click_element(&mut state, ElementId::PlantPostIt)
            .is_empty());
        assert!(!state.first_hint_found);

        state.set_scenario(Scenario::Main);
        let effects = logic.click_element(&mut state, ElementId::PlantPostIt);
        assert!(state.first_hint_found);
        assert!(matches!(
            effects.as_slice(),
            [SideEffect::ShowOverlay { .. }]
        ));
    }

    #[test]
    fn step_inference_mirrors_the_chain() {
        let logic = LevelTwo;
        let mut state = fresh();
        assert_eq!(logic.infer_step(&state), StepLabel::First);

        let expected = [
            ("9", StepLabel::Second),
            ("15", StepLabel::Third),
            ("31", StepLabel::Fourth),
            ("1", StepLabel::Fifth),
            ("36", StepLabel::Sixth),
            ("7", StepLabel::Seventh),
        ];
        for (code, step) in expected {
            let _ = submit_code(&mut state, code);
            assert_eq!(logic.infer_step(&state), step, "after code {code}");
        }

        let _ = logic.click_element(&mut state, ElementId::PlantPostIt);
        assert_eq!(logic.infer_step(&state), StepLabel::Eighth);
    }
}
