// ==========================================
// 接力组建集成测试
// ==========================================
// 测试目标: 自由泳/混合泳/混合组接力的组队与预分配回退
// 覆盖范围: 人数不足省略、无效预分配回退、输出顺序与格式
// ==========================================

mod helpers;

use gala_optimizer::domain::types::{Gender, Stroke};
use gala_optimizer::Diagnostic;
use helpers::test_data_builder::*;

fn freestyler(id: &str, gender: Gender, age: u32, seconds: f64) -> AthleteBuilder {
    AthleteBuilder::new(id, id, "Free")
        .gender(gender)
        .age(age)
        .time(Stroke::Freestyle, 50, seconds)
}

fn medley_swimmer(id: &str, back: f64, breast: f64, fly: f64, free: f64) -> AthleteBuilder {
    AthleteBuilder::new(id, id, "Medley")
        .age(13)
        .time(Stroke::Backstroke, 50, back)
        .time(Stroke::Breaststroke, 50, breast)
        .time(Stroke::Butterfly, 50, fly)
        .time(Stroke::Freestyle, 50, free)
}

// ==========================================
// 场景 D: 人数不足
// ==========================================

#[test]
fn test_three_swimmers_cannot_form_freestyle_relay() {
    let result = RequestBuilder::new()
        .athlete(freestyler("A", Gender::Male, 12, 30.0))
        .athlete(freestyler("B", Gender::Male, 12, 31.0))
        .athlete(freestyler("C", Gender::Male, 13, 32.0))
        .athlete(freestyler("TooOld", Gender::Male, 14, 28.0))
        .relay("4x50m Freestyle", 13, Gender::Male)
        .run();

    assert!(result.relay.is_empty());
    assert_eq!(result.stats.relay_teams, 0);
    assert!(!result.is_failure());
    assert!(result
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::IncompleteRelayTeam { .. })));
}

#[test]
fn test_freestyle_relay_output_format() {
    let result = RequestBuilder::new()
        .athlete(freestyler("A", Gender::Female, 12, 31.25))
        .athlete(freestyler("B", Gender::Female, 12, 30.5))
        .athlete(freestyler("C", Gender::Female, 13, 32.0))
        .athlete(freestyler("D", Gender::Female, 11, 29.75))
        .relay("4x50m Freestyle", 13, Gender::Female)
        .run();

    assert_eq!(result.relay.len(), 1);
    let relay = &result.relay[0];
    assert_eq!(relay.relay, "13U Female 4x50m Freestyle");
    assert_eq!(relay.total_time, "02:03.50");

    let names: Vec<&str> = relay.swimmers.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["D Free", "B Free", "A Free", "C Free"]);
    assert_eq!(relay.swimmers[0].time, "29.75s");
    assert!(relay.swimmers.iter().all(|s| s.stroke.is_none()));
}

// ==========================================
// 场景 E: 混合泳接力无效预分配
// ==========================================

#[test]
fn test_medley_override_without_backstroke_time_falls_back() {
    let baseline = RequestBuilder::new()
        .athlete(medley_swimmer("P", 34.0, 41.0, 36.0, 31.0))
        .athlete(medley_swimmer("Q", 36.0, 38.0, 35.0, 30.5))
        .athlete(medley_swimmer("R", 37.0, 40.0, 33.0, 30.0))
        .athlete(medley_swimmer("S", 38.0, 42.0, 37.0, 29.0))
        .athlete(
            AthleteBuilder::new("NB", "NB", "NoBack")
                .age(13)
                .time(Stroke::Freestyle, 50, 28.0),
        )
        .relay("4x50m Medley", 13, Gender::Male);

    let auto = baseline.run();
    let with_override = RequestBuilder::new()
        .athlete(medley_swimmer("P", 34.0, 41.0, 36.0, 31.0))
        .athlete(medley_swimmer("Q", 36.0, 38.0, 35.0, 30.5))
        .athlete(medley_swimmer("R", 37.0, 40.0, 33.0, 30.0))
        .athlete(medley_swimmer("S", 38.0, 42.0, 37.0, 29.0))
        .athlete(
            AthleteBuilder::new("NB", "NB", "NoBack")
                .age(13)
                .time(Stroke::Freestyle, 50, 28.0),
        )
        .relay("4x50m Medley", 13, Gender::Male)
        .relay_pre_assign("4x50m Medley", 13, Gender::Male, 1, Some(Stroke::Backstroke), "NB")
        .run();

    assert_eq!(with_override.relay, auto.relay);
    assert!(matches!(
        with_override.diagnostics[0],
        Diagnostic::InvalidRelayPreAssignment { .. }
    ));

    let relay = &with_override.relay[0];
    let legs: Vec<(&str, Option<&str>)> = relay
        .swimmers
        .iter()
        .map(|s| (s.name.as_str(), s.stroke.as_deref()))
        .collect();
    assert_eq!(
        legs,
        vec![
            ("P Medley", Some("Backstroke")),
            ("Q Medley", Some("Breaststroke")),
            ("R Medley", Some("Butterfly")),
            ("NB NoBack", Some("Freestyle")),
        ]
    );
    assert_eq!(relay.total_time, "02:13.00");
}

#[test]
fn test_valid_medley_override_is_kept() {
    let result = RequestBuilder::new()
        .athlete(medley_swimmer("P", 34.0, 41.0, 36.0, 31.0))
        .athlete(medley_swimmer("Q", 36.0, 38.0, 35.0, 30.5))
        .athlete(medley_swimmer("R", 37.0, 40.0, 33.0, 30.0))
        .athlete(medley_swimmer("S", 38.0, 42.0, 37.0, 29.0))
        .relay("4x50m Medley", 13, Gender::Male)
        .relay_pre_assign("4 x 50m medley", 13, Gender::Male, 1, None, "S")
        .run();

    let relay = &result.relay[0];
    assert_eq!(relay.swimmers[0].name, "S Medley");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_relay_pre_assignment_for_missing_relay_is_unresolved() {
    let result = RequestBuilder::new()
        .athlete(freestyler("A", Gender::Male, 12, 30.0))
        .relay_pre_assign("4x50m Freestyle", 15, Gender::Male, 1, None, "A")
        .event("50m Freestyle", 13, Gender::Male)
        .run();

    assert!(result
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::UnresolvedPreAssignment { .. })));
}

// ==========================================
// 混合组接力 + 输出顺序
// ==========================================

fn squad_roster(builder: RequestBuilder) -> RequestBuilder {
    builder
        .athlete(freestyler("m10", Gender::Male, 10, 36.0))
        .athlete(freestyler("f10", Gender::Female, 10, 37.0))
        .athlete(freestyler("m12", Gender::Male, 12, 33.0))
        .athlete(freestyler("f12", Gender::Female, 12, 34.0))
        .athlete(freestyler("m14", Gender::Male, 14, 30.0))
        .athlete(freestyler("f14", Gender::Female, 14, 31.0))
        .athlete(freestyler("m17", Gender::Male, 17, 27.0))
        .athlete(freestyler("f17", Gender::Female, 17, 28.0))
}

#[test]
fn test_squadrun_uses_one_swimmer_per_band() {
    let result = squad_roster(RequestBuilder::new())
        .relay("Squadrun", 998, Gender::Mixed)
        .run();

    let relay = &result.relay[0];
    assert_eq!(relay.relay, "Squadrun");
    assert_eq!(relay.swimmers.len(), 8);
    assert_eq!(relay.total_time, "04:16.00");
}

#[test]
fn test_relay_order_freestyle_then_medley_then_squad() {
    let result = squad_roster(RequestBuilder::new())
        .athlete(medley_swimmer("P", 34.0, 41.0, 36.0, 31.0))
        .athlete(medley_swimmer("Q", 36.0, 38.0, 35.0, 30.5))
        .athlete(medley_swimmer("R", 37.0, 40.0, 33.0, 30.0))
        .athlete(medley_swimmer("S", 38.0, 42.0, 37.0, 29.0))
        .relay("Squadrun", 998, Gender::Mixed)
        .relay("4x50m Medley", 99, Gender::Male)
        .relay("4x50m Freestyle", 99, Gender::Male)
        .run();

    let names: Vec<&str> = result.relay.iter().map(|r| r.relay.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Open Male 4x50m Freestyle",
            "Open Male 4x50m Medley",
            "Squadrun",
        ]
    );
    assert_eq!(result.stats.relay_teams, 3);
}

#[test]
fn test_relay_swimmer_may_also_swim_individual_events() {
    let result = RequestBuilder::new()
        .athlete(freestyler("A", Gender::Male, 12, 30.0))
        .athlete(freestyler("B", Gender::Male, 12, 31.0))
        .athlete(freestyler("C", Gender::Male, 12, 32.0))
        .athlete(freestyler("D", Gender::Male, 12, 33.0))
        .event("50m Freestyle", 13, Gender::Male)
        .relay("4x50m Freestyle", 13, Gender::Male)
        .qualifying(Stroke::Freestyle, 50, 13, Gender::Male, 32.0)
        .run();

    assert_eq!(swimmer_for(&result, "13U Male 50m Freestyle"), Some("A Free"));
    assert_eq!(result.relay[0].swimmers[0].name, "A Free");
}
