use metric_deck::calculators::{
    decide, estimate_sample_size, project_goal, run_readout, scan_alerts, score_plan_item, AlertThresholds,
    CalcError, Decision, GoalInputs, GoalStatus, PowerInputs, ReadoutInputs, APPROVAL_RULE,
};
use metric_deck::ingestion::{load_table, DataSource, LoadOptions};
use metric_deck::profiling::summarize;

#[test]
fn sample_size_uses_sigma_floor_for_small_baselines() {
    let est = estimate_sample_size(&PowerInputs {
        baseline: Some(0.05),
        mde: Some(0.01),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(est.sigma, 0.02);
    assert_eq!(est.per_arm, 63);
}

#[test]
fn sample_size_for_zero_baseline_assumes_sigma_point_one() {
    let est = estimate_sample_size(&PowerInputs {
        baseline: Some(0.0),
        mde: Some(0.05),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(est.sigma, 0.1);
    assert_eq!(est.per_arm, 63);
}

#[test]
fn sample_size_clamps_negative_and_tiny_inputs() {
    let est = estimate_sample_size(&PowerInputs {
        baseline: Some(-3.0),
        mde: Some(-0.0),
        alpha: Some(f64::NAN),
        power: None,
    })
    .unwrap();
    assert_eq!(est.baseline, 0.0);
    assert_eq!(est.mde, 0.001);
    assert_eq!(est.alpha, 0.05);
    assert!(est.per_arm > 10_000);
}

#[test]
fn approval_gate_blocks_even_large_effects() {
    let readout = run_readout(&ReadoutInputs {
        observed: Some(0.03),
        mde: Some(0.02),
        rule: APPROVAL_RULE.to_string(),
        approved: false,
        guardrails: Some("Latency flat".to_string()),
    });
    assert_eq!(readout.decision, Decision::Block);
    assert_eq!(
        readout.to_string(),
        "Readout: Observed effect 0.03 vs MDE 0.02. Rule: DS approval required. Guardrails: Latency flat. \
         Decision: Block. Needs DS approval before shipping."
    );

    assert_eq!(decide(0.03, 0.02, APPROVAL_RULE, true), Decision::Go);
}

#[test]
fn readout_without_an_effect_waits_for_data() {
    let readout = run_readout(&ReadoutInputs {
        rule: "Ship if effect clears MDE".to_string(),
        ..Default::default()
    });
    assert_eq!(readout.decision, Decision::Review);
    assert_eq!(readout.mde, 0.01);
    assert_eq!(readout.guardrails, "Guardrails not documented");
}

#[test]
fn goal_short_of_target_is_a_stretch() {
    let p = project_goal(&GoalInputs {
        current: Some(100.0),
        target: Some(150.0),
        weeks: Some(4.0),
        lift_percent: Some(5.0),
    })
    .unwrap();
    assert_eq!(p.status, GoalStatus::Stretch);
    assert_eq!(
        p.to_string(),
        "Projected 121.551 in 4 weeks (Stretch). Required weekly lift to hit target: 10.67%."
    );
}

#[test]
fn goal_from_zero_uses_small_stand_in() {
    let p = project_goal(&GoalInputs {
        current: Some(0.0),
        target: Some(1.0),
        weeks: Some(1.0),
        lift_percent: None,
    })
    .unwrap();
    assert_eq!(p.projected, 0.0);
    assert!((p.required_weekly_lift - 99.0).abs() < 1e-9);

    let reached = project_goal(&GoalInputs::default()).unwrap();
    assert_eq!(reached.status, GoalStatus::OnTrack);
    assert_eq!(reached.required_weekly_lift, 0.0);
}

#[test]
fn goal_overflow_is_reported() {
    let err = project_goal(&GoalInputs {
        current: Some(1e300),
        target: Some(1.0),
        weeks: Some(1000.0),
        lift_percent: Some(500.0),
    })
    .unwrap_err();
    assert_eq!(err, CalcError::Projection);
    assert_eq!(err.to_string(), "Unable to project trajectory with the provided numbers.");
}

#[test]
fn alert_scan_over_weekly_fixture() {
    let table = load_table(&DataSource::parse("tests/fixtures/weekly.csv"), &LoadOptions::default()).unwrap();
    let report = scan_alerts(&summarize(&table), &AlertThresholds::default(), 10).unwrap();

    // `week` is 1..=5: std/mean = 47%, |mean - min|/mean = 67%.
    assert_eq!(report.column, "week");
    assert!(report.spike_detected);
    assert!(report.drift_detected);
    assert_eq!(report.to_string(), "Monitoring week: Spike detected, Drift detected, Holdout 10%");
}

#[test]
fn alert_scan_needs_a_numeric_column() {
    let table = load_table(
        &DataSource::Inline {
            name: "teams.csv".to_string(),
            text: "team\nred\nblue\n".to_string(),
        },
        &LoadOptions::default(),
    )
    .unwrap();
    let err = scan_alerts(&summarize(&table), &AlertThresholds::default(), 10).unwrap_err();
    assert_eq!(err.to_string(), "No numeric fields available for alerting.");
}

#[test]
fn plan_scores_rank_by_impact_over_effort() {
    let mut items = vec![
        score_plan_item("Query rewrite", Some(2.0), Some(4.0)).unwrap(),
        score_plan_item("Answer cards", Some(5.0), Some(2.0)).unwrap(),
        score_plan_item("Spellcheck", None, None).unwrap(),
    ];
    items.sort_by(|a, b| b.score.total_cmp(&a.score));
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Answer cards", "Spellcheck", "Query rewrite"]);
}
