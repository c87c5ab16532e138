//! Integration test: load a roster fixture, build its time scale, render the
//! axis and shift lanes, hit-test the rendered grid, and check assigned
//! hours against employee contracts.

use chrono::NaiveDate;
use rostergrid_core::model::ContractPeriod;
use rostergrid_core::parsers::parse_roster;
use rostergrid_core::scale::{Factor, LinearScale, TimeUnit};
use rostergrid_core::views::shift_grid::{
    AXIS_HEIGHT, HEADER_WIDTH, LANE_HEIGHT, grid_height, render_shift_grid, shift_at,
};
use rostergrid_core::views::time_axis::render_time_axis;
use rostergrid_protocol::{Point, RenderCommand, Viewport};

#[test]
fn roster_fixture_renders_on_its_scale() {
    let data = include_bytes!("fixtures/roster-week.json");
    let roster = parse_roster(data).expect("failed to parse roster fixture");

    assert_eq!(roster.name.as_deref(), Some("Hotel week 1"));
    assert_eq!(roster.spots.len(), 3);
    assert_eq!(roster.shifts.len(), 6);
    assert_eq!(roster.assigned_count(), 4);

    let config = roster.scale_config().expect("fixture has a view");
    assert_eq!(config.unit, TimeUnit::Minutes);
    let scale = config.build().expect("valid scale");

    // Two days at 30 minutes per pixel
    assert_eq!(scale.factor(), 30);
    assert_eq!(scale.end_in_grid_pixels(), 96);

    // Every shift boundary sits on a whole pixel, so it round-trips
    for shift in &roster.shifts {
        let px = scale.to_grid_pixels(&shift.start);
        assert_eq!(scale.to_scale_units(px), shift.start, "shift {}", shift.id);
        assert!(px >= 0 && px <= scale.end_in_grid_pixels());
    }

    let viewport = Viewport::new(HEADER_WIDTH + 96.0, AXIS_HEIGHT + grid_height(&roster));
    let mut commands = render_time_axis(&scale, &viewport, 0, grid_height(&roster));
    commands.extend(render_shift_grid(&roster, &scale, &viewport, 0));

    let drawn: Vec<u64> = commands
        .iter()
        .filter_map(|c| match c {
            RenderCommand::DrawRect { shift_id, .. } => *shift_id,
            _ => None,
        })
        .collect();
    assert_eq!(drawn, vec![100, 101, 102, 200, 201, 300]);

    let begin = commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::BeginGroup { .. }))
        .count();
    let end = commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::EndGroup))
        .count();
    assert_eq!(begin, 3);
    assert_eq!(begin, end);

    // Night desk, 23:00 on day one is pixel 46
    let night = Point::new(HEADER_WIDTH + 46.0, AXIS_HEIGHT + 2.0 * LANE_HEIGHT + 5.0);
    assert_eq!(shift_at(&roster, &scale, night, 0).map(|s| s.id), Some(300));

    // Kitchen is empty overnight
    let kitchen = Point::new(HEADER_WIDTH + 46.0, AXIS_HEIGHT + LANE_HEIGHT + 5.0);
    assert!(shift_at(&roster, &scale, kitchen, 0).is_none());
}

#[test]
fn zooming_rescales_the_same_roster() {
    let data = include_bytes!("fixtures/roster-week.json");
    let roster = parse_roster(data).expect("failed to parse roster fixture");
    let scale = roster
        .scale_config()
        .and_then(|c| c.build().ok())
        .expect("valid scale");

    let zoomed = scale.with_factor(scale.scale_factor().zoom_in());
    assert_eq!(zoomed.factor(), 15);
    assert_eq!(zoomed.end_in_grid_pixels(), 2 * scale.end_in_grid_pixels());

    let shift = roster.shift(101).expect("shift 101");
    assert_eq!(
        zoomed.to_grid_pixels(&shift.start),
        2 * scale.to_grid_pixels(&shift.start)
    );

    let coarse = scale.with_factor(Factor::new(120).expect("valid factor"));
    assert_eq!(coarse.end_in_grid_pixels(), 24);
}

#[test]
fn fixture_contracts_flag_overtime() {
    let data = include_bytes!("fixtures/roster-week.json");
    let roster = parse_roster(data).expect("failed to parse roster fixture");
    assert_eq!(roster.contracts.len(), 2);
    assert_eq!(roster.employees.len(), 2);

    // Carl's student contract allows 7h a day, he works 8h on both days.
    // Ann stays within her weekly limit and Beth has no contract.
    let violations = roster.contract_violations();
    assert_eq!(violations.len(), 2, "{violations:?}");
    for (violation, day) in violations.iter().zip([1, 2]) {
        assert_eq!(violation.employee, "Carl");
        assert_eq!(violation.contract_id, 2);
        assert_eq!(violation.period, ContractPeriod::Day);
        assert_eq!(
            violation.period_start,
            NaiveDate::from_ymd_opt(2018, 1, day).expect("valid date")
        );
        assert_eq!(violation.minutes, 480);
        assert_eq!(violation.limit, 420);
    }
    assert_eq!(
        violations[0].to_string(),
        "Carl works 480 min in the day of 2018-01-01, contract 2 allows 420"
    );
}
