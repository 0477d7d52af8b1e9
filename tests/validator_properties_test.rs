// Invariants the plan and judgment validators hold for any input shape

use serde_json::{json, Value};

use lullaby::story::{
    extract_json_object, parse_judgment, parse_story_plan, AgeBand, Choice, StoryLength,
    StoryPlan, Theme, Tone, SAFETY_CONSTRAINTS,
};
use lullaby::StoryError;

/// A spread of values to drop into every field
fn odd_values() -> Vec<Value> {
    vec![
        json!(null),
        json!(true),
        json!(0),
        json!(-12),
        json!(11.7),
        json!("7"),
        json!(""),
        json!("cozy"),
        json!("5-7"),
        json!("friendship"),
        json!("short"),
        json!([]),
        json!(["x", 1, null, {"k": "v"}]),
        json!({}),
        json!({"age_appropriateness": 3}),
        json!("a".repeat(400)),
    ]
}

const PLAN_FIELDS: [&str; 7] = [
    "age_band",
    "tone",
    "characters",
    "setting",
    "theme",
    "length",
    "constraints",
];

const JUDGMENT_FIELDS: [&str; 5] = [
    "scores",
    "overall",
    "must_fix",
    "nice_to_fix",
    "rewrite_instructions",
];

fn assert_plan_invariants(plan: &StoryPlan) {
    assert!(AgeBand::ALL.contains(&plan.age_band()));
    assert!(Tone::ALL.contains(&plan.tone()));
    assert!(Theme::ALL.contains(&plan.theme()));
    assert!(StoryLength::ALL.contains(&plan.length()));
    assert!(plan.characters().len() <= 6);
    assert!(plan.setting().chars().count() <= 120);
    assert!(plan.constraints().len() <= 8);
    for safety in SAFETY_CONSTRAINTS {
        assert_eq!(
            plan.constraints().iter().filter(|c| *c == safety).count(),
            1,
            "safety constraint missing or duplicated in {:?}",
            plan.constraints()
        );
    }
}

#[test]
fn test_plan_invariants_for_every_field_shape() {
    for field in PLAN_FIELDS {
        for value in odd_values() {
            let text = json!({ field: value }).to_string();
            let plan = parse_story_plan(&text).unwrap();
            assert_plan_invariants(&plan);
        }
    }
}

#[test]
fn test_plan_invariants_with_all_fields_odd() {
    for value in odd_values() {
        let mut obj = serde_json::Map::new();
        for field in PLAN_FIELDS {
            obj.insert(field.to_string(), value.clone());
        }
        let plan = parse_story_plan(&Value::Object(obj).to_string()).unwrap();
        assert_plan_invariants(&plan);
    }
}

#[test]
fn test_judgment_invariants_for_every_field_shape() {
    for field in JUDGMENT_FIELDS {
        for value in odd_values() {
            let text = json!({ field: value }).to_string();
            let judgment = parse_judgment(&text).unwrap();

            for (_, score) in judgment.scores().entries() {
                assert!((1..=10).contains(&score));
            }
            assert!((1..=10).contains(&judgment.overall()));
            assert!(judgment.rewrite_instructions().len() >= 3);
            assert!(judgment.rewrite_instructions().len() <= 12);
            assert!(judgment.must_fix().len() <= 10);
            assert!(judgment.nice_to_fix().len() <= 10);
            assert_eq!(judgment.raw(), text);
        }
    }
}

#[test]
fn test_scenario_plan_with_empty_constraints() {
    let text = r#"{"age_band":"5-7","tone":"cozy","characters":["A"],"setting":"home","theme":"friendship","length":"short","constraints":[]}"#;
    let plan = parse_story_plan(text).unwrap();
    assert_eq!(plan.age_band().as_str(), "5-7");
    assert_eq!(plan.tone().as_str(), "cozy");
    assert_eq!(plan.constraints().len(), 3);
}

#[test]
fn test_scenario_judgment_with_single_instruction() {
    let judgment = parse_judgment(r#"{"must_fix": [], "rewrite_instructions": ["x"]}"#).unwrap();
    assert!(judgment.rewrite_instructions().len() >= 3);
    assert!(judgment.rewrite_instructions().iter().any(|i| i == "x"));
}

#[test]
fn test_extractor_finds_object_in_prose() {
    let bodies = [
        json!({"a": 1}),
        json!({"nested": {"deep": [1, 2, {"x": "}"}]}}),
        json!({"text": "curly { inside } strings"}),
    ];
    for body in bodies {
        let text = format!("Here is the JSON you asked for:\n{body}\nLet me know!");
        let map = extract_json_object(&text).unwrap();
        assert_eq!(Value::Object(map), body);
    }
}

#[test]
fn test_extractor_rejects_brace_free_text() {
    for text in ["", "plain text", "[1, 2]", "score: 9/10", "}{"] {
        let err = extract_json_object(text).unwrap_err();
        assert!(matches!(err, StoryError::MalformedResponse { .. }), "{text:?}");
    }
}
