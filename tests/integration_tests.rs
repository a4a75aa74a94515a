use std::collections::BTreeSet;

use waitline::engine::aggregate::aggregate;
use waitline::engine::edition::{EditionId, EditionPolicy, EditionTable};
use waitline::engine::present::present;
use waitline::engine::types::{EngineConfig, OrderingPolicy};
use waitline::parser::parse_log;

fn config() -> EngineConfig {
    EngineConfig {
        table: EditionTable::with_default_colors(EditionPolicy::Offset1983),
        ordering: OrderingPolicy::ArrivalOrder,
    }
}

#[test]
fn test_full_pipeline() {
    let data = include_str!("fixtures/sample_log.csv");
    let records = parse_log(data.as_bytes()).expect("Failed to parse log");
    assert_eq!(records.len(), 6);

    let result = aggregate(&config(), &records, None);

    // Days 27 and 28, editions 33C3 (2016) and 34C3 (2017)
    assert_eq!(
        result.by_day.keys().copied().collect::<Vec<_>>(),
        vec![27, 28]
    );

    // 11:00 and 11:02 share the 11:00 bucket and merge to a 30.0 average;
    // 11:07 lands in 11:05 on its own
    let day27_33c3 = &result.by_day[&27][&EditionId::from("33C3")];
    assert_eq!(day27_33c3.len(), 2);
    assert_eq!(day27_33c3[0].merged_count, 2);
    assert_eq!(day27_33c3[0].duration_minutes, 30.0);
    assert_eq!(day27_33c3[1].merged_count, 1);
    assert_eq!(day27_33c3[1].duration_minutes, 10.0);

    assert_eq!(result.by_day[&27][&EditionId::from("34C3")].len(), 1);
    assert_eq!(result.by_day[&28][&EditionId::from("34C3")].len(), 1);

    // The offset timestamp on the last line keeps its local clock reading
    let last = result.last_sample.as_ref().expect("no last sample");
    assert_eq!(last.edition, EditionId::from("33C3"));
    assert_eq!(last.day, 28);
    assert_eq!(last.year, 2016);
    assert_eq!(
        last.sample.time_bucket,
        chrono::NaiveTime::from_hms_opt(13, 0, 0).unwrap()
    );

    let view = present(&config(), &result, &BTreeSet::new());
    assert_eq!(view.days, vec![27, 28]);

    let day27_editions: Vec<&str> = view.series_per_day[&27]
        .iter()
        .map(|s| s.edition.as_str())
        .collect();
    assert_eq!(day27_editions, vec!["33C3", "34C3"]);

    assert_eq!(
        view.palette,
        vec!["#01a89e", "#a10632", "#0084B0", "#00A357"]
    );
}

#[test]
fn test_full_pipeline_with_filter() {
    let data = include_str!("fixtures/sample_log.csv");
    let records = parse_log(data.as_bytes()).expect("Failed to parse log");

    let filter: BTreeSet<EditionId> = [EditionId::from("34C3")].into();
    let result = aggregate(&config(), &records, Some(&filter));
    let view = present(&config(), &result, &filter);

    // 33C3-only days survive nowhere; both remaining days carry 34C3 only
    assert_eq!(view.days, vec![27, 28]);
    for day in &view.days {
        let editions: Vec<&str> = view.series_per_day[day]
            .iter()
            .map(|s| s.edition.as_str())
            .collect();
        assert_eq!(editions, vec!["34C3"]);
    }
    assert_eq!(view.palette, vec!["#a10632"]);

    let last = result.last_sample.expect("no last sample");
    assert_eq!(last.edition, EditionId::from("34C3"));
    assert_eq!(last.day, 28);

    // The chart document the CLI emits serializes cleanly
    let document = serde_json::json!({
        "chart": &view,
        "last_sample": &last,
    });
    let json = serde_json::to_string(&document).unwrap();
    assert!(json.contains("\"34C3\""));
    assert!(json.contains("#a10632"));
}
