use missionrdm_game::{
    CallDirection, Character, CompletionData, FeedbackKind, LevelId, Locale, OverlayContent,
    Scenario, SessionState, SideEffect, SoundId, StepLabel,
};
use serde_json::{Value, json};

#[test]
fn session_state_serializes_with_stable_field_names() {
    let mut state = SessionState::new(LevelId::Three, Locale::Fr);
    state.scenario = Scenario::Fourth;
    state.add_code_once("17");
    state.add_code_once("33");
    state.first_hint_found = true;
    state
        .calls
        .set_callable(Character::Ines, true, CallDirection::Incoming);

    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(value["level"], "three");
    assert_eq!(value["locale"], "fr");
    assert_eq!(value["scenario"], "fourth");
    assert_eq!(value["entered_codes"], json!(["17", "33"]));
    assert_eq!(value["first_hint_found"], Value::Bool(true));
    assert_eq!(value["second_hint_found"], Value::Bool(false));
    // Presentation state never makes it into the wire shape.
    assert!(value.get("overlays").is_none());
    assert!(value.get("feedback").is_none());
    assert!(value.get("active_call").is_none());
}

#[test]
fn session_state_round_trips_through_json() {
    let mut state = SessionState::new(LevelId::Five, Locale::En);
    state.scenario = Scenario::Eighth;
    state.active_riddle = true;
    state.add_code_once("19");
    state.add_code_once("71");
    state.level_start_ms = Some(42_000);
    state.completion = Some(CompletionData {
        time_spent_ms: 90_000,
        average_ms: Some(120_000),
        is_above_average: Some(true),
    });

    let json = serde_json::to_string(&state).unwrap();
    let restored: SessionState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.level, LevelId::Five);
    assert_eq!(restored.scenario, Scenario::Eighth);
    assert!(restored.active_riddle);
    assert_eq!(restored.entered_codes, vec!["19", "71"]);
    assert_eq!(restored.level_start_ms, Some(42_000));
    assert_eq!(restored.completion, state.completion);
    assert_eq!(restored.calls, state.calls);
}

#[test]
fn enums_use_their_story_spellings() {
    assert_eq!(
        serde_json::to_value(Character::Ines).unwrap(),
        Value::String("Inès".to_string())
    );
    assert_eq!(
        serde_json::to_value(CallDirection::Incoming).unwrap(),
        Value::String("incoming".to_string())
    );
    assert_eq!(
        serde_json::to_value(Scenario::Congrats).unwrap(),
        Value::String("congrats".to_string())
    );
    assert_eq!(
        serde_json::to_value(StepLabel::Eighth).unwrap(),
        Value::String("eighth".to_string())
    );
    assert_eq!(
        serde_json::to_value(FeedbackKind::Error).unwrap(),
        Value::String("error".to_string())
    );

    let ines: Character = serde_json::from_str("\"Inès\"").unwrap();
    assert_eq!(ines, Character::Ines);
}

#[test]
fn side_effect_descriptors_are_tagged_for_the_ui() {
    let sound = serde_json::to_value(SideEffect::PlaySound {
        sound: SoundId::StepFound,
    })
    .unwrap();
    assert_eq!(sound["effect"], "play_sound");
    assert_eq!(sound["sound"], "step_found");

    let callable = serde_json::to_value(SideEffect::SetCallable {
        character: Character::Santiago,
        callable: true,
        direction: CallDirection::Outgoing,
    })
    .unwrap();
    assert_eq!(callable["effect"], "set_callable");
    assert_eq!(callable["character"], "Santiago");
    assert_eq!(callable["direction"], "outgoing");

    let journal = serde_json::to_value(SideEffect::Journal {
        step: "step3",
        entry: "step3_2",
    })
    .unwrap();
    assert_eq!(journal["effect"], "journal");
    assert_eq!(journal["step"], "step3");
}

#[test]
fn overlay_content_distinguishes_cards_from_text() {
    let card = serde_json::to_value(OverlayContent::HintCard("hint5")).unwrap();
    assert_eq!(card["type"], "hintcard");
    assert_eq!(card["value"], "hint5");

    let text = serde_json::to_value(OverlayContent::Text("look closer".to_string())).unwrap();
    assert_eq!(text["type"], "text");
    assert_eq!(text["value"], "look closer");
}
