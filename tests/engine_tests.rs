use rstationrota::core::history::{VisitCounts, least_visited, window_start};
use rstationrota::core::needs::NeedsRegistry;
use rstationrota::core::overuse::{OverusePolicy, Verdict, evaluate, mean_visits};
use rstationrota::core::planner::{distribute, unassigned};
use rstationrota::core::rotation::{available_stations, can_assign};
use rstationrota::errors::AppError;
use rstationrota::models::slot::Slot;
use rstationrota::models::snapshot::{AssignmentSnapshot, Placement};
use rstationrota::models::station::Station;
use std::collections::HashMap;

mod common;
use common::{date, ids, test_config};

fn counts(pairs: &[(&str, u32)]) -> VisitCounts {
    pairs.iter().map(|(s, n)| (s.to_string(), *n)).collect()
}

fn last_map(pairs: &[(&str, Option<&str>)]) -> HashMap<String, Option<String>> {
    pairs
        .iter()
        .map(|(w, s)| (w.to_string(), s.map(str::to_string)))
        .collect()
}

fn stations() -> Vec<String> {
    ids(&["Plock", "Pack", "KM", "Decating", "Rep"])
}

// ---------------------------
// Rotation
// ---------------------------

#[test]
fn test_rotation_blocks_only_last_station() {
    let last = last_map(&[("w1", Some("Plock"))]);

    assert!(!can_assign("w1", "Plock", &last));
    for s in ["Pack", "KM", "Decating", "Rep"] {
        assert!(can_assign("w1", s, &last));
    }
}

#[test]
fn test_rotation_unknown_worker_goes_anywhere() {
    let last = last_map(&[("w1", Some("Plock")), ("w2", None)]);

    assert!(can_assign("ghost", "Plock", &last));
    assert!(can_assign("w2", "Plock", &last));
    assert_eq!(available_stations("ghost", &stations(), &last), stations());
    assert_eq!(available_stations("w2", &stations(), &last), stations());
}

#[test]
fn test_available_stations_keeps_order() {
    let last = last_map(&[("w1", Some("KM"))]);

    assert_eq!(
        available_stations("w1", &stations(), &last),
        ids(&["Plock", "Pack", "Decating", "Rep"])
    );
}

// ---------------------------
// Planner
// ---------------------------

fn registry(entries: &[(&str, u32, u32)]) -> NeedsRegistry {
    NeedsRegistry::new(
        date("2026-03-10"),
        entries
            .iter()
            .map(|(name, lanes, need)| (Station::new(name, *lanes), *need))
            .collect(),
    )
}

#[test]
fn test_distribute_empty_selection_is_rejected() {
    let needs = registry(&[("Plock", 0, 2)]);
    let err = distribute(&[], &needs, &HashMap::new(), "").unwrap_err();
    assert!(matches!(err, AppError::EmptySelection));
}

#[test]
fn test_distribute_caps_each_station_at_its_need() {
    let needs = registry(&[("Plock", 0, 2), ("KM", 0, 1)]);
    let selected = ids(&["w1", "w2", "w3", "w4", "w5"]);

    let snap = distribute(&selected, &needs, &HashMap::new(), "").unwrap();

    assert_eq!(snap.workers_at("Plock").len(), 2);
    assert_eq!(snap.workers_at("KM").len(), 1);
    assert_eq!(unassigned(&selected, &snap), ids(&["w4", "w5"]));
}

#[test]
fn test_distribute_never_places_a_worker_twice() {
    let needs = registry(&[("Plock", 0, 3), ("Pack", 2, 3), ("Rep", 0, 3)]);
    let selected = ids(&["w1", "w2", "w1", "w3", "w2"]);

    let snap = distribute(&selected, &needs, &HashMap::new(), "").unwrap();

    let mut placed: Vec<&str> = snap.placements.iter().map(|p| p.worker_id.as_str()).collect();
    placed.sort();
    assert_eq!(placed, vec!["w1", "w2", "w3"]);
}

#[test]
fn test_distribute_serves_highest_need_first() {
    // B needs more, so it drains the pool before A is served
    let needs = registry(&[("A", 0, 1), ("B", 0, 3)]);
    let selected = ids(&["w1", "w2", "w3"]);

    let snap = distribute(&selected, &needs, &HashMap::new(), "").unwrap();

    assert_eq!(snap.workers_at("B"), vec!["w1", "w2", "w3"]);
    assert!(snap.workers_at("A").is_empty());
}

#[test]
fn test_distribute_picks_least_visited() {
    let needs = registry(&[("Rep", 0, 1)]);
    let selected = ids(&["w1", "w2", "w3"]);

    let mut histories = HashMap::new();
    histories.insert("w1".to_string(), counts(&[("Rep", 3)]));
    histories.insert("w2".to_string(), counts(&[("Rep", 1), ("KM", 7)]));
    histories.insert("w3".to_string(), counts(&[("Rep", 2)]));

    let snap = distribute(&selected, &needs, &histories, "").unwrap();
    assert_eq!(snap.workers_at("Rep"), vec!["w2"]);
}

#[test]
fn test_least_visited_station() {
    // Rep was never visited: missing from the map, read as zero
    let h = counts(&[("Plock", 3), ("Pack", 2), ("KM", 1), ("Decating", 1)]);
    assert_eq!(least_visited(&stations(), &h), ids(&["Rep"]));

    let with_zero = counts(&[("Plock", 3), ("Pack", 2), ("KM", 1), ("Decating", 1), ("Rep", 0)]);
    assert_eq!(least_visited(&stations(), &with_zero), ids(&["Rep"]));

    // KM and Rep tie: either is a valid pick
    let tie = counts(&[("Plock", 3), ("Pack", 2), ("KM", 0), ("Decating", 1), ("Rep", 0)]);
    let picks = least_visited(&stations(), &tie);
    assert_eq!(picks, ids(&["KM", "Rep"]));
    assert!(["KM", "Rep"].contains(&picks[0].as_str()));

    assert!(least_visited(&[], &h).is_empty());
}

#[test]
fn test_distribute_sends_worker_to_least_visited_station() {
    // w2 knows every station but Rep; w1 has only ever worked Rep
    let needs = registry(&[
        ("Plock", 0, 0),
        ("Pack", 2, 0),
        ("KM", 0, 0),
        ("Decating", 0, 0),
        ("Rep", 0, 1),
    ]);
    let selected = ids(&["w1", "w2"]);

    let mut histories = HashMap::new();
    histories.insert("w1".to_string(), counts(&[("Rep", 4)]));
    histories.insert(
        "w2".to_string(),
        counts(&[("Plock", 3), ("Pack", 2), ("KM", 1), ("Decating", 1)]),
    );

    let snap = distribute(&selected, &needs, &histories, "").unwrap();
    assert_eq!(snap.workers_at("Rep"), vec!["w2"]);
}

#[test]
fn test_distribute_ties_follow_station_then_selection_order() {
    let needs = registry(&[("KM", 0, 1), ("Rep", 0, 1)]);
    let selected = ids(&["w2", "w1"]);

    let snap = distribute(&selected, &needs, &HashMap::new(), "").unwrap();

    assert_eq!(snap.workers_at("KM"), vec!["w2"]);
    assert_eq!(snap.workers_at("Rep"), vec!["w1"]);
}

#[test]
fn test_distribute_is_deterministic() {
    let needs = registry(&[("Plock", 0, 2), ("Pack", 2, 2), ("KM", 0, 1)]);
    let selected = ids(&["w1", "w2", "w3", "w4", "w5"]);
    let mut histories = HashMap::new();
    histories.insert("w3".to_string(), counts(&[("Plock", 4)]));

    let a = distribute(&selected, &needs, &histories, "").unwrap();
    let b = distribute(&selected, &needs, &histories, "").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_distribute_round_robins_lanes() {
    let needs = registry(&[("Pack", 2, 3)]);
    let selected = ids(&["w1", "w2", "w3"]);

    let snap = distribute(&selected, &needs, &HashMap::new(), "").unwrap();

    assert_eq!(
        snap.placements,
        vec![
            Placement::new("w1", "Pack", Some(1)),
            Placement::new("w2", "Pack", Some(2)),
            Placement::new("w3", "Pack", Some(1)),
        ]
    );
}

#[test]
fn test_distribute_manual_text() {
    let needs = registry(&[("Plock", 0, 1)]);
    let selected = ids(&["w1"]);

    let blank = distribute(&selected, &needs, &HashMap::new(), "   ").unwrap();
    assert_eq!(blank.manual_text, None);

    let text = distribute(&selected, &needs, &HashMap::new(), "w9 on training").unwrap();
    assert_eq!(text.manual_text.as_deref(), Some("w9 on training"));
}

#[test]
fn test_distribution_order_is_stable() {
    let needs = registry(&[("Plock", 0, 1), ("Pack", 2, 3), ("KM", 0, 0), ("Rep", 0, 1)]);
    let order: Vec<&str> = needs
        .distribution_order()
        .iter()
        .map(|(s, _)| s.name.as_str())
        .collect();
    assert_eq!(order, vec!["Pack", "Plock", "Rep"]);
    assert_eq!(needs.total(), 5);
}

// ---------------------------
// Snapshot moves
// ---------------------------

fn snapshot() -> AssignmentSnapshot {
    AssignmentSnapshot {
        date: date("2026-03-10"),
        placements: vec![
            Placement::new("w1", "Pack", Some(1)),
            Placement::new("w2", "Pack", Some(1)),
            Placement::new("w3", "KM", None),
        ],
        manual_text: Some("w4 sick".to_string()),
    }
}

#[test]
fn test_move_to_same_slot_is_identity() {
    let snap = snapshot();
    let slot = Slot::new("Pack", Some(1));
    assert_eq!(snap.apply_move("w1", &slot, &slot).unwrap(), snap);
}

#[test]
fn test_move_removes_only_the_moved_worker() {
    let snap = snapshot();
    let next = snap
        .apply_move("w1", &Slot::new("Pack", Some(1)), &Slot::new("Pack", Some(2)))
        .unwrap();

    assert_eq!(next.workers_in(&Slot::new("Pack", Some(1))), vec!["w2"]);
    assert_eq!(next.workers_in(&Slot::new("Pack", Some(2))), vec!["w1"]);
    assert_eq!(next.manual_text, snap.manual_text);
}

#[test]
fn test_move_from_wrong_slot_fails() {
    let err = snapshot()
        .apply_move("w3", &Slot::new("Rep", None), &Slot::new("Plock", None))
        .unwrap_err();
    assert!(matches!(err, AppError::AssignmentNotFound { .. }));
}

#[test]
fn test_slot_parse() {
    assert_eq!(Slot::parse("Pack:2").unwrap(), Slot::new("Pack", Some(2)));
    assert_eq!(Slot::parse(" KM ").unwrap(), Slot::new("KM", None));
    assert_eq!(Slot::new("Pack", Some(2)).to_string(), "Pack:2");
    assert!(matches!(Slot::parse("Pack:x"), Err(AppError::InvalidSlot(_))));
    assert!(matches!(Slot::parse(":1"), Err(AppError::InvalidSlot(_))));
}

#[test]
fn test_station_lane_checks() {
    let pack = Station::new("Pack", 2);
    let km = Station::new("KM", 0);

    assert!(pack.check_lane(Some(2)).is_ok());
    assert!(matches!(pack.check_lane(Some(3)), Err(AppError::InvalidLane { .. })));
    assert!(matches!(pack.check_lane(Some(0)), Err(AppError::InvalidLane { .. })));
    assert!(matches!(pack.check_lane(None), Err(AppError::InvalidLane { .. })));
    assert!(km.check_lane(None).is_ok());
    assert!(matches!(km.check_lane(Some(1)), Err(AppError::InvalidLane { .. })));
}

// ---------------------------
// Overuse
// ---------------------------

#[test]
fn test_overuse_reference_example() {
    let h = counts(&[("A", 10), ("B", 2), ("C", 1)]);
    let policy = OverusePolicy::default();

    assert!((mean_visits(&h) - 13.0 / 3.0).abs() < 1e-9);

    match evaluate("A", &h, &policy) {
        Verdict::Warn { count, threshold } => {
            assert_eq!(count, 10);
            assert!((threshold - 6.5).abs() < 1e-9);
        }
        Verdict::Ok => panic!("A should warn"),
    }
    assert_eq!(evaluate("B", &h, &policy), Verdict::Ok);
    assert!(evaluate("A", &h, &policy).is_warn());
    assert!(!evaluate("B", &h, &policy).is_warn());
    assert_eq!(evaluate("D", &h, &policy), Verdict::Ok);
}

#[test]
fn test_overuse_needs_absolute_minimum() {
    // 5 > 1.5 * 3 but not > min_count
    let h = counts(&[("A", 5), ("B", 1)]);
    assert_eq!(evaluate("A", &h, &OverusePolicy::default()), Verdict::Ok);
}

#[test]
fn test_overuse_ignores_zero_entries_and_empty_history() {
    let h = counts(&[("A", 6), ("B", 0)]);
    // mean over {6} only
    assert!((mean_visits(&h) - 6.0).abs() < 1e-9);
    assert_eq!(evaluate("A", &h, &OverusePolicy::default()), Verdict::Ok);

    assert_eq!(
        evaluate("A", &VisitCounts::new(), &OverusePolicy::default()),
        Verdict::Ok
    );
}

// ---------------------------
// Window + config
// ---------------------------

#[test]
fn test_window_start_clamps_month_end() {
    assert_eq!(window_start(date("2026-08-31"), 6), date("2026-02-28"));
    assert_eq!(window_start(date("2026-03-10"), 6), date("2025-09-10"));
}

#[test]
fn test_default_config_is_valid() {
    let cfg = test_config("unused.sqlite");
    assert!(cfg.validate().is_empty());
    assert!(cfg.station("Pack").is_some_and(Station::has_lanes));
    assert!(cfg.is_manual_station("Notes"));
}

#[test]
fn test_config_validation_problems() {
    let mut cfg = test_config("unused.sqlite");
    cfg.stations.push(Station::new("KM", 0));
    cfg.stations.push(Station::new("Notes", 0));
    cfg.overuse_ratio = 0.0;

    let problems = cfg.validate();
    assert_eq!(problems.len(), 3);
    assert!(cfg.ensure_valid().is_err());
}
