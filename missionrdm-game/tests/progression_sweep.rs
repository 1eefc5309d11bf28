use missionrdm_game::levels::{self, ElementId};
use missionrdm_game::{
    Character, DelayedEffect, FeedbackKind, LevelId, Locale, Scenario, SessionState, SideEffect,
    StepLabel, logic_for,
};

/// One UI event in a canonical walkthrough.
#[derive(Debug, Clone, Copy)]
enum Event {
    Code(&'static str),
    Click(ElementId),
    Call(Character),
    RiddleSolved,
    /// Fire the timers the previous events scheduled.
    Timers,
}

use Event::{Call, Click, Code, RiddleSolved, Timers};

/// The shortest winning walkthrough per level. These drive the sweep
/// assertions below; the per-level edge cases live in the unit tests.
fn walkthrough(level: LevelId) -> &'static [Event] {
    match level {
        LevelId::One => &[
            Code("8"),
            Code("4"),
            Code("29"),
            RiddleSolved,
            Click(ElementId::FirstFolder),
            Click(ElementId::SecondFolder),
            Call(Character::Santiago),
            Code("28"),
            Click(ElementId::ThirdFolder),
        ],
        LevelId::Two => &[
            Code("9"),
            Code("15"),
            Code("31"),
            Code("1"),
            Code("36"),
            Code("7"),
            Code("11"),
        ],
        LevelId::Three => &[
            Code("17"),
            Code("33"),
            Click(ElementId::CalendarDay),
            Timers,
            Call(Character::Ines),
            Code("57"),
            Code("58"),
            Code("59"),
            Code("77"),
            Code("22"),
            Code("64"),
            Click(ElementId::WallPostIt),
            Code("99"),
        ],
        LevelId::Four => &[
            Click(ElementId::ScreenFolder),
            Timers,
            Call(Character::Ines),
            Code("4"),
            Code("51"),
            Code("23"),
            Code("81"),
            Timers,
            Call(Character::Santiago),
            Code("1"),
            Code("61"),
            Call(Character::Santiago),
            Click(ElementId::SantiagoMail),
            Code("17"),
            Code("47"),
        ],
        LevelId::Five => &[
            Code("3"),
            Code("19"),
            Timers,
            Call(Character::Santiago),
            Code("71"),
            Click(ElementId::JackEmail),
            Code("96"),
            Timers,
            Call(Character::Jack),
            Code("8"),
            Code("6"),
            Timers,
            Call(Character::Ines),
            Code("84"),
            Click(ElementId::Tablet),
        ],
        LevelId::Six => &[
            Code("2"),
            Code("1"),
            Click(ElementId::DetailsLink),
            Code("1323"),
        ],
    }
}

/// Codes each level rejects with a titled overlay and never records.
fn wrong_answers(level: LevelId) -> &'static [(&'static str, usize)] {
    // (code, index of the walkthrough event after which it applies)
    match level {
        LevelId::One => &[("77", 7), ("82", 7), ("25", 7)],
        LevelId::Two => &[],
        LevelId::Three => &[("76", 8), ("78", 8)],
        LevelId::Four => &[],
        LevelId::Five => &[
            ("72", 4),
            ("73", 4),
            ("93", 6),
            ("94", 6),
            ("95", 6),
            ("12", 10),
            ("35", 10),
            ("13", 10),
            ("65", 13),
            ("18", 13),
        ],
        LevelId::Six => &[],
    }
}

struct Driver {
    state: SessionState,
    pending: Vec<DelayedEffect>,
}

impl Driver {
    fn new(level: LevelId) -> Self {
        Self {
            state: SessionState::new(level, Locale::En),
            pending: Vec::new(),
        }
    }

    fn apply(&mut self, event: Event) -> Vec<SideEffect> {
        let effects = match event {
            Code(code) => levels::submit_code(&mut self.state, code),
            Click(element) => levels::click_element(&mut self.state, element),
            Call(who) => levels::call_character(&mut self.state, who),
            RiddleSolved => {
                levels::mark_riddle_solved(&mut self.state);
                Vec::new()
            }
            Timers => {
                let mut fired = Vec::new();
                let batch: Vec<DelayedEffect> = self.pending.drain(..).collect();
                for effect in batch {
                    fired.extend(levels::apply_delayed(&mut self.state, &effect));
                }
                fired
            }
        };
        for effect in &effects {
            if let SideEffect::ScheduleDelayed { request } = effect {
                if request.effect != DelayedEffect::ClearFeedback {
                    self.pending.push(request.effect.clone());
                }
            }
        }
        effects
    }

    /// Run the walkthrough up to (excluding) `stop`, or all of it.
    fn play(level: LevelId, stop: Option<usize>) -> Self {
        let mut driver = Self::new(level);
        let events = walkthrough(level);
        let end = stop.unwrap_or(events.len());
        for event in &events[..end] {
            driver.apply(*event);
        }
        driver
    }
}

#[test]
fn every_walkthrough_completes_its_level() {
    for level in LevelId::ALL {
        let mut driver = Driver::new(level);
        let events = walkthrough(level);
        let (last, prefix) = events.split_last().unwrap();
        for event in prefix {
            let effects = driver.apply(*event);
            assert!(
                !effects.iter().any(SideEffect::is_complete_level),
                "level {level} completed early"
            );
        }
        let effects = driver.apply(*last);
        assert!(
            effects.iter().any(SideEffect::is_complete_level),
            "level {level} did not complete"
        );
        assert!(driver.state.congrats_open, "level {level} congrats missing");
    }
}

#[test]
fn step_inference_never_regresses_before_completion() {
    // The completing event itself may retire hint flags (level 3 clears
    // its wall post-it flag), so the ratchet is checked up to it.
    for level in LevelId::ALL {
        let logic = logic_for(level);
        let mut driver = Driver::new(level);
        let mut last_step = logic.infer_step(&driver.state);
        assert_eq!(last_step, StepLabel::First, "level {level} starts at first");

        let events = walkthrough(level);
        for (index, event) in events[..events.len() - 1].iter().enumerate() {
            driver.apply(*event);
            let step = logic.infer_step(&driver.state);
            assert!(
                step >= last_step,
                "level {level} step regressed from {last_step} to {step} at event {index}"
            );
            last_step = step;
        }
    }
}

#[test]
fn step_inference_is_pure_at_every_point_of_the_walkthrough() {
    for level in LevelId::ALL {
        let logic = logic_for(level);
        for stop in 0..walkthrough(level).len() {
            let driver = Driver::play(level, Some(stop));
            let snapshot = driver.state.clone();
            let first = logic.infer_step(&driver.state);
            let second = logic.infer_step(&driver.state);
            assert_eq!(first, second);
            assert_eq!(driver.state.entered_codes, snapshot.entered_codes);
            assert_eq!(driver.state.scenario, snapshot.scenario);
            assert_eq!(driver.state.calls, snapshot.calls);
        }
    }
}

#[test]
fn unknown_codes_error_without_touching_progress() {
    for level in LevelId::ALL {
        for stop in 0..walkthrough(level).len() {
            let mut driver = Driver::play(level, Some(stop));
            driver.state.clear_feedback();
            let before_codes = driver.state.entered_codes.clone();
            let before_scenario = driver.state.scenario;

            let effects = levels::submit_code(&mut driver.state, "0000");
            assert_eq!(
                driver.state.feedback,
                Some(FeedbackKind::Error),
                "level {level} event {stop}"
            );
            assert_eq!(driver.state.entered_codes, before_codes);
            assert_eq!(driver.state.scenario, before_scenario);
            assert!(!effects.iter().any(SideEffect::is_complete_level));
        }
    }
}

#[test]
fn recorded_codes_are_rejected_on_resubmission() {
    for level in LevelId::ALL {
        let driver = Driver::play(level, None);
        let hint_codes = logic_for(level).hint_codes();
        for code in driver.state.entered_codes.clone() {
            if hint_codes.contains(&code.as_str()) {
                continue;
            }
            let mut replay = Driver::play(level, None);
            replay.state.clear_feedback();
            let before = replay.state.entered_codes.clone();
            let _ = levels::submit_code(&mut replay.state, &code);
            assert_eq!(
                replay.state.feedback,
                Some(FeedbackKind::Error),
                "level {level} code {code}"
            );
            assert_eq!(replay.state.entered_codes, before);
        }
    }
}

#[test]
fn anticipated_wrong_answers_overlay_and_stay_resubmittable() {
    for level in LevelId::ALL {
        for (code, stop) in wrong_answers(level) {
            let mut driver = Driver::play(level, Some(*stop));
            for _ in 0..2 {
                let effects = levels::submit_code(&mut driver.state, code);
                assert!(
                    effects
                        .iter()
                        .any(|effect| matches!(effect, SideEffect::ShowErrorOverlay { .. })),
                    "level {level} wrong answer {code} missing its overlay"
                );
                assert!(
                    !driver.state.has_code(code),
                    "level {level} recorded wrong answer {code}"
                );
            }
        }
    }
}

#[test]
fn foreign_clicks_are_no_ops_everywhere() {
    let all_elements = [
        ElementId::FirstFolder,
        ElementId::SecondFolder,
        ElementId::ThirdFolder,
        ElementId::PlantPostIt,
        ElementId::CalendarDay,
        ElementId::WallPostIt,
        ElementId::ScreenFolder,
        ElementId::SantiagoMail,
        ElementId::Tablet,
        ElementId::JackEmail,
        ElementId::DetailsLink,
    ];
    // Level 4's screen folder is live from the default scenario; every
    // other element needs progress first.
    for level in LevelId::ALL {
        let mut state = SessionState::new(level, Locale::En);
        for element in all_elements {
            if level == LevelId::Four && element == ElementId::ScreenFolder {
                continue;
            }
            let effects = levels::click_element(&mut state, element);
            assert!(effects.is_empty(), "level {level} click {element:?}");
            assert_eq!(state.scenario, Scenario::Default);
        }
    }
}

#[test]
fn calls_to_uncallable_characters_only_show_the_refusal() {
    // Levels 2 and 6 have no phone at all; their logic ignores calls.
    for level in [LevelId::One, LevelId::Three, LevelId::Four, LevelId::Five] {
        for who in Character::ALL {
            let mut state = SessionState::new(level, Locale::En);
            let effects = levels::call_character(&mut state, who);
            let script = state.active_call.as_ref().expect("refusal call screen");
            assert_eq!(script.body_key, "phone.callUnavailable");
            assert!(!state.calls.has_called(who));
            assert_eq!(state.calls.sequence(who), 0);
            assert_eq!(effects.len(), 1);
        }
    }
}
