//! Level 6: the exit hall. Two codes, one click, and the door code.

use crate::effects::{SideEffect, SoundId};
use crate::hints::StepLabel;
use crate::levels::{
    ElementId, LevelLogic, complete_level, error_feedback, journal, play, show_hint_card,
    success_feedback,
};
use crate::state::{LevelId, Scenario, SessionState};

const FIRST_CODE: &str = "2";
const HINT_CODE: &str = "1";
const FINISH_CODE: &str = "1323";

pub struct LevelSix;

impl LevelLogic for LevelSix {
    fn level(&self) -> LevelId {
        LevelId::Six
    }

    fn scenarios(&self) -> &'static [Scenario] {
        &[
            Scenario::Default,
            Scenario::Second,
            Scenario::Third,
            Scenario::Fourth,
        ]
    }

    fn hint_codes(&self) -> &'static [&'static str] {
        &[HINT_CODE]
    }

    fn submit_code(&self, state: &mut SessionState, code: &str) -> Vec<SideEffect> {
        if code == FIRST_CODE && state.entered_codes.is_empty() {
            state.add_code_once(FIRST_CODE);
            state.set_scenario(Scenario::Second);
            let mut effects = success_feedback(state);
            play(SoundId::StepFound, &mut effects);
            journal("step6", "step6_1", &mut effects);
            return effects;
        }

        if code == HINT_CODE && state.scenario == Scenario::Second && state.has_code(FIRST_CODE) {
            state.add_code_once(HINT_CODE);
            state.first_hint_found = true;
            state.set_scenario(Scenario::Third);
            let mut effects = success_feedback(state);
            show_hint_card(state, "hint17", &mut effects);
            return effects;
        }

        // The hint stays available once revealed.
        if code == HINT_CODE && state.scenario == Scenario::Third {
            let mut effects = success_feedback(state);
            show_hint_card(state, "hint17", &mut effects);
            return effects;
        }

        if code == FINISH_CODE
            && state.scenario == Scenario::Fourth
            && state.has_code(FIRST_CODE)
            && state.first_hint_found
        {
            let mut effects = success_feedback(state);
            complete_level(state, &mut effects);
            return effects;
        }

        error_feedback(state)
    }

    fn click_element(&self, state: &mut SessionState, element: ElementId) -> Vec<SideEffect> {
        match element {
            ElementId::DetailsLink if state.scenario == Scenario::Third => {
                state.set_scenario(Scenario::Fourth);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn infer_step(&self, state: &SessionState) -> StepLabel {
        match state.scenario {
            Scenario::Fourth => StepLabel::Fourth,
            Scenario::Third => StepLabel::Third,
            Scenario::Second if state.has_code(FIRST_CODE) && !state.first_hint_found => {
                StepLabel::Second
            }
            _ => StepLabel::First,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::FeedbackKind;
    use crate::levels::submit_code;

    fn fresh() -> SessionState {
        SessionState::new(LevelId::Six, Default::default())
    }

    #[test]
    fn opening_code_requires_a_clean_slate() {
        let mut state = fresh();
        let _ = submit_code(&mut state, "2");
        assert_eq!(state.scenario, Scenario::Second);
        assert!(state.has_code("2"));

        let _ = submit_code(&mut state, "2");
        assert_eq!(state.feedback, Some(FeedbackKind::Error));
        assert_eq!(state.scenario, Scenario::Second);
    }

    #[test]
    fn hint_code_reveals_and_stays_available() {
        let mut state = fresh();
        let _ = submit_code(&mut state, "2");
        let _ = submit_code(&mut state, "1");
        assert!(state.first_hint_found);
        assert_eq!(state.scenario, Scenario::Third);
        assert!(state.has_code("1"));

        // Re-entering the hint re-shows the card instead of erroring.
        let effects = submit_code(&mut state, "1");
        assert_eq!(state.feedback, Some(FeedbackKind::Success));
        assert!(effects
            .iter()
            .any(|effect| matches!(effect, SideEffect::ShowOverlay { .. })));
    }

    #[test]
    fn hint_before_opening_code_is_rejected() {
        let mut state = fresh();
        let _ = submit_code(&mut state, "1");
        assert_eq!(state.feedback, Some(FeedbackKind::Error));
        assert!(state.entered_codes.is_empty());
    }

    #[test]
    fn details_click_arms_the_door_code() {
        let logic = LevelSix;
        let mut state = fresh();
        let _ = submit_code(&mut state, "2");
        let _ = submit_code(&mut state, "1");

        // The door code is refused until the details were opened.
        let _ = submit_code(&mut state, "1323");
        assert_eq!(state.feedback, Some(FeedbackKind::Error));

        let _ = logic.click_element(&mut state, ElementId::DetailsLink);
        assert_eq!(state.scenario, Scenario::Fourth);

        let effects = submit_code(&mut state, "1323");
        assert!(state.congrats_open);
        assert!(effects.iter().any(SideEffect::is_complete_level));
        // The door code itself is never recorded.
        assert!(!state.has_code("1323"));
    }

    #[test]
    fn step_inference_tracks_the_walkthrough() {
        let logic = LevelSix;
        let mut state = fresh();
        assert_eq!(logic.infer_step(&state), StepLabel::First);

        let _ = submit_code(&mut state, "2");
        assert_eq!(logic.infer_step(&state), StepLabel::Second);

        let _ = submit_code(&mut state, "1");
        assert_eq!(logic.infer_step(&state), StepLabel::Third);

        let _ = logic.click_element(&mut state, ElementId::DetailsLink);
        assert_eq!(logic.infer_step(&state), StepLabel::Fourth);
    }
}
