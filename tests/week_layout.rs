use chrono::NaiveDate;
use scheduleBoard::models::schedule::CalendarData;
use scheduleBoard::service::layout_service::{
    FixedAdvance, LayoutMode, LayoutService, LayoutSettings,
};

const WEEK: &str = r#"{
    "date_range": "Mar 02 - Mar 08, 2026",
    "days": [
        {"date": "2026-03-02", "label": "Monday"},
        {"date": "2026-03-03", "label": "Tuesday", "is_today": true},
        {"date": "2026-03-04", "label": "Wednesday"}
    ],
    "schedules": [
        {"id": 3, "username": "kim", "start_time": "2026-03-02T10:30:00", "end_time": "2026-03-02T12:00:00"},
        {"id": 1, "username": "ana", "start_time": "2026-03-02T09:00:00", "end_time": "2026-03-02T10:00:00"},
        {"id": 2, "username": "raj", "start_time": "2026-03-02T09:30:00", "end_time": "2026-03-02T11:00:00"},
        {"id": 4, "username": "ana", "start_time": "2026-03-03T22:00:00", "end_time": "2026-03-04T00:00:00"},
        {"id": 5, "username": "kim", "start_time": "2026-03-03T13:00:00", "end_time": "2026-03-03T14:00:00"},
        {"id": 6, "username": "raj", "start_time": "2026-03-03T14:00:00", "end_time": "2026-03-03T15:00:00"},
        {"id": 7, "username": "bad", "start_time": "whenever", "end_time": "2026-03-03T15:00:00"}
    ]
}"#;

fn week() -> CalendarData {
    serde_json::from_str(WEEK).expect("fixture should parse")
}

#[test]
fn week_is_laid_out_per_listed_day() {
    let columns = LayoutService::layout_week(
        &week(),
        chrono_tz::UTC,
        &LayoutSettings::default(),
        &FixedAdvance::default(),
    );

    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0].date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    assert_eq!(columns[0].label.as_deref(), Some("Monday"));
    assert!(!columns[0].is_today);
    assert!(columns[1].is_today);

    let monday = &columns[0].layout;
    assert_eq!(monday.groups.len(), 1);
    assert_eq!(monday.groups[0].len(), 3);
    let first = monday.placement_for(1).unwrap();
    assert_eq!((first.top, first.height), (540.0, 60.0));

    let tuesday = &columns[1].layout;
    assert_eq!(tuesday.events.len(), 3);
    assert_eq!(tuesday.groups.len(), 3);
    let overnight = tuesday.placement_for(4).unwrap();
    assert_eq!((overnight.top, overnight.height), (1320.0, 120.0));
    assert_eq!((overnight.left, overnight.width), (0.0, 1.0));

    assert!(columns[2].layout.events.is_empty());
}

#[test]
fn timezone_shifts_offset_timestamps() {
    let data: CalendarData = serde_json::from_str(
        r#"{"schedules": [
            {"id": 1, "start_time": "2026-03-02T17:00:00+00:00", "end_time": "2026-03-02T19:00:00+00:00"}
        ]}"#,
    )
    .unwrap();
    let columns = LayoutService::layout_week(
        &data,
        chrono_tz::America::Los_Angeles,
        &LayoutSettings::default(),
        &FixedAdvance::default(),
    );

    assert_eq!(columns.len(), 1);
    let placement = &columns[0].layout.placements[0];
    assert_eq!((placement.top, placement.height), (540.0, 120.0));
}

#[test]
fn staggered_mode_keeps_later_events_visible() {
    let settings = LayoutSettings {
        mode: LayoutMode::Staggered,
        ..LayoutSettings::default()
    };
    let columns =
        LayoutService::layout_week(&week(), chrono_tz::UTC, &settings, &FixedAdvance::default());

    let monday = &columns[0].layout;
    assert_eq!(monday.placements[0].left, 0.0);
    for pair in monday.placements.windows(2) {
        assert!(pair[1].left > pair[0].left);
    }
    for (slot, placement) in monday.placements.iter().enumerate() {
        assert!(placement.left <= slot as f64 * settings.cascade_step + 1e-9);
        assert!(placement.width >= settings.min_width);
        assert!(placement.width <= settings.max_width);
        assert!(placement.left + placement.width <= 1.0 + 1e-9);
    }
}

#[test]
fn overnight_shift_continues_in_next_column() {
    let data: CalendarData = serde_json::from_str(
        r#"{
            "days": [
                {"date": "2026-03-02", "label": "Monday"},
                {"date": "2026-03-03", "label": "Tuesday"}
            ],
            "schedules": [
                {"id": 1, "username": "ana", "start_time": "2026-03-02T22:00:00", "end_time": "2026-03-03T02:00:00"},
                {"id": 2, "username": "kim", "start_time": "2026-03-03T01:00:00", "end_time": "2026-03-03T03:00:00"}
            ]
        }"#,
    )
    .unwrap();
    let columns = LayoutService::layout_week(
        &data,
        chrono_tz::UTC,
        &LayoutSettings::default(),
        &FixedAdvance::default(),
    );

    let monday = columns[0].layout.placement_for(1).unwrap();
    assert_eq!((monday.top, monday.height), (1320.0, 120.0));

    let tuesday = &columns[1].layout;
    assert_eq!(tuesday.events.len(), 2);
    assert_eq!(tuesday.groups.len(), 1);
    let carried = tuesday.placement_for(1).unwrap();
    assert_eq!((carried.top, carried.height), (0.0, 120.0));
    assert_eq!((carried.left, carried.width), (0.0, 0.5));
}

#[test]
fn unlisted_days_cover_spilled_dates() {
    let data: CalendarData = serde_json::from_str(
        r#"{"schedules": [
            {"id": 1, "start_time": "2026-03-02T23:00:00", "end_time": "2026-03-03T01:30:00"}
        ]}"#,
    )
    .unwrap();
    let columns = LayoutService::layout_week(
        &data,
        chrono_tz::UTC,
        &LayoutSettings::default(),
        &FixedAdvance::default(),
    );

    assert_eq!(columns.len(), 2);
    assert_eq!(columns[1].date, NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
    assert_eq!(columns[1].layout.placements[0].height, 90.0);
}
