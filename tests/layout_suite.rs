use std::path::{Path, PathBuf};

use cfp_timeline::layout_dump::layout_dump_json;
use cfp_timeline::{
    Dataset, DatasetError, EnabledSet, LayoutConfig, LayoutOutcome, PackingOrder, Theme,
    TimelineLayout, ViewState, compute_layout, load_dataset,
};
use chrono::NaiveDate;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> Dataset {
    load_dataset(&fixture(name)).expect("fixture load failed")
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn layout_with(dataset: &Dataset, view: &ViewState, config: &LayoutConfig) -> TimelineLayout {
    compute_layout(dataset, view, &Theme::light(), config)
        .into_layout()
        .expect("expected a ready layout")
}

fn layout(dataset: &Dataset, view: &ViewState) -> TimelineLayout {
    layout_with(dataset, view, &LayoutConfig::default())
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn single_cycle_spans_its_share_of_the_axis() {
    let dataset = load("single_cycle.json");
    let layout = layout(&dataset, &ViewState::new(1280.0, ymd(2025, 1, 1)));

    assert_eq!(layout.min_date, ymd(2024, 12, 1));
    assert_eq!(layout.max_date, ymd(2025, 3, 1));
    assert_eq!(layout.total_days, 90);
    assert_eq!(layout.window_months, 12);

    let conf = layout.conference("DEMO").expect("DEMO block");
    assert_eq!(conf.row_count, 1);
    assert_eq!(conf.cycles.len(), 1);
    let cycle = &conf.cycles[0];
    assert_eq!(cycle.row, 0);
    assert_eq!(cycle.y, 0.0);
    assert_eq!(cycle.segments.len(), 1);

    let segment = &cycle.segments[0];
    assert_eq!(segment.duration_days, 31);
    assert!(approx(segment.width, 31.0 / 90.0 * layout.width));
    assert!(approx(segment.x, 31.0 * layout.pixels_per_day));
    assert_eq!(segment.title, "Start \u{2192} End");
    assert_eq!(
        segment.description,
        vec![
            "Start: Wednesday, January 1, 2025".to_string(),
            "End: Saturday, February 1, 2025".to_string(),
            "Duration: 31 days".to_string(),
        ]
    );

    let label = cycle.label.as_ref().expect("named cycle gets a label");
    assert_eq!(label.text, "Round 1");
    assert_eq!(label.anchor_x, segment.x);
    assert_eq!(label.link.as_deref(), Some("https://demo.example.org/2025"));
}

#[test]
fn overlapping_cycles_stack_and_disjoint_cycles_share() {
    let dataset = load("overlap.json");
    let layout = layout(&dataset, &ViewState::new(1280.0, ymd(2025, 1, 1)));

    let overlap = layout.conference("OVERLAP").unwrap();
    assert_eq!(overlap.row_count, 2);
    let rows: Vec<usize> = overlap.cycles.iter().map(|cycle| cycle.row).collect();
    assert_eq!(rows, vec![0, 1]);
    let config = LayoutConfig::default();
    assert_eq!(overlap.cycles[1].y, overlap.y + config.row_pitch());
    assert_eq!(overlap.height, 2.0 * config.bar_height + config.inter_row_padding);

    let disjoint = layout.conference("DISJOINT").unwrap();
    assert_eq!(disjoint.row_count, 1);
    assert!(disjoint.cycles.iter().all(|cycle| cycle.row == 0));
    assert_eq!(
        disjoint.y,
        overlap.y + overlap.height + config.conference_padding
    );
    assert!(overlap.cycles.iter().all(|cycle| cycle.label.is_none()));
}

#[test]
fn directory_loads_in_index_order() {
    let dataset = load("hci");
    let names: Vec<&str> = dataset
        .conferences()
        .iter()
        .map(|conf| conf.name.as_str())
        .collect();
    assert_eq!(names, vec!["CHI", "UIST", "CSCW"]);

    let chi = dataset.find("chi").unwrap();
    assert_eq!(
        chi.installment_for_year(2026).and_then(|i| i.website.as_deref()),
        Some("https://chi2026.acm.org/")
    );
    assert!(chi.installment_for_year(2030).is_none());
}

#[test]
fn hci_blocks_stack_vertically() {
    let dataset = load("hci");
    let layout = layout(&dataset, &ViewState::new(1280.0, ymd(2025, 1, 1)));

    assert_eq!(layout.min_date, ymd(2023, 12, 1));
    assert_eq!(layout.max_date, ymd(2026, 2, 1));

    let summary: Vec<(&str, usize, f32)> = layout
        .conferences
        .iter()
        .map(|conf| (conf.name.as_str(), conf.row_count, conf.y))
        .collect();
    assert_eq!(
        summary,
        vec![("CHI", 1, 0.0), ("UIST", 2, 44.0), ("CSCW", 2, 114.0)]
    );
    assert_eq!(layout.height, 160.0);

    let cscw = layout.conference("CSCW").unwrap();
    let rows: Vec<usize> = cscw.cycles.iter().map(|cycle| cycle.row).collect();
    assert_eq!(rows, vec![0, 1, 0]);
    assert!(cscw.cycles.iter().all(|cycle| cycle.year == 2025));
    assert_eq!(layout.segment_count(), 7 + 3 + 9);
}

#[test]
fn uncertain_dates_render_month_only() {
    let dataset = load("hci");
    let layout = layout(&dataset, &ViewState::new(1280.0, ymd(2025, 1, 1)));
    let chi = layout.conference("CHI").unwrap();
    let next_year = chi
        .cycles
        .iter()
        .find(|cycle| cycle.year == 2026)
        .expect("2026 papers cycle");

    let review = &next_year.segments[1];
    assert!(!review.start.date.uncertain);
    assert!(review.end.date.uncertain);
    assert_eq!(
        review.description[1],
        "Reviews released: November (?) 2025"
    );
    let last = next_year.segments.last().unwrap();
    assert_eq!(last.end.date.to_string(), "2026-01-15?");
    assert_eq!(last.description[1], "Notification: January (?) 2026");
}

#[test]
fn filter_limits_blocks_and_range() {
    let dataset = load("hci");
    let view = ViewState::new(390.0, ymd(2025, 5, 1)).with_enabled(EnabledSet::only(["UIST"]));
    let layout = layout(&dataset, &view);

    assert_eq!(layout.window_months, 3);
    assert_eq!(layout.min_date, ymd(2025, 3, 1));
    assert_eq!(layout.max_date, ymd(2025, 9, 1));
    assert_eq!(layout.conferences.len(), 1);
    assert_eq!(layout.conferences[0].y, 0.0);

    let today = layout.today.as_ref().expect("today is inside the range");
    assert_eq!(today.date, ymd(2025, 5, 1));
    assert!(approx(layout.initial_scroll_x, today.x.min(layout.width - 390.0)));
}

#[test]
fn start_time_order_never_needs_more_rows() {
    let dataset = load("hci");
    let view = ViewState::new(1280.0, ymd(2025, 1, 1));
    let by_dataset = layout(&dataset, &view);
    let config = LayoutConfig {
        packing_order: PackingOrder::StartTime,
        ..LayoutConfig::default()
    };
    let by_start = layout_with(&dataset, &view, &config);
    for (a, b) in by_dataset.conferences.iter().zip(&by_start.conferences) {
        assert_eq!(a.name, b.name);
        assert!(b.row_count <= a.row_count, "{} grew rows", a.name);
    }
}

#[test]
fn empty_selection_yields_empty_outcome() {
    let dataset = load("hci");
    let view = ViewState::new(1280.0, ymd(2025, 1, 1)).with_enabled(EnabledSet::only(["NOPE"]));
    let outcome = compute_layout(&dataset, &view, &Theme::light(), &LayoutConfig::default());
    assert!(matches!(outcome, LayoutOutcome::Empty(_)));
    let json = layout_dump_json(&outcome).unwrap();
    assert!(json.contains("\"status\": \"empty\""));
}

#[test]
fn layout_is_idempotent() {
    let dataset = load("hci");
    let view = ViewState::new(1024.0, ymd(2025, 6, 1)).with_scroll_width(980.0);
    let theme = Theme::dark();
    let config = LayoutConfig::default();

    let first = compute_layout(&dataset, &view, &theme, &config);
    let second = compute_layout(&dataset, &view, &theme, &config);
    assert_eq!(first, second);
    assert_eq!(
        layout_dump_json(&first).unwrap(),
        layout_dump_json(&second).unwrap()
    );
}

#[test]
fn malformed_date_fails_at_load() {
    let err = load_dataset(&fixture("invalid_date.json")).unwrap_err();
    match err {
        DatasetError::Invalid {
            source_name,
            issues,
        } => {
            assert_eq!(source_name, "invalid_date.json");
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].path, "installments[0].cycles[0].dates[1].date");
        }
        other => panic!("unexpected error: {other}"),
    }
}
