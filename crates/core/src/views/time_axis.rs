use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use rostergrid_protocol::{Point, Rect, RenderCommand, ThemeToken, Viewport};

use crate::scale::{DateTimeScale, LinearScale};
use crate::views::shift_grid::{AXIS_HEIGHT, HEADER_WIDTH};

const MAJOR_TICK_HEIGHT: f64 = 8.0;
const MINOR_TICK_HEIGHT: f64 = 3.0;
const FONT_SIZE: f64 = 10.0;
const LABEL_Y: f64 = 2.0;
const MIN_MAJOR_SPACING_PX: f64 = 12.0;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Render the time ruler above the shift lanes.
///
/// Ticks sit on calendar boundaries aligned to midnight of the scale's
/// start day, so the same instant always gets the same tick regardless of
/// `scroll_px`. Major ticks carry a label and a gridline extending
/// `grid_height` below the axis.
pub fn render_time_axis(
    scale: &DateTimeScale,
    viewport: &Viewport,
    scroll_px: i64,
    grid_height: f64,
) -> Vec<RenderCommand> {
    let width = viewport.width;
    let timeline_width = width - HEADER_WIDTH;
    if timeline_width <= 0.0 {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(64);

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, width, AXIS_HEIGHT),
        color: ThemeToken::AxisBackground,
        border_color: Some(ThemeToken::LaneBorder),
        label: None,
        shift_id: None,
    });

    let seconds_per_px = scale.factor().saturating_mul(scale.unit().seconds());
    let (major, subdivisions) = nice_interval(seconds_per_px);
    let minor = major / subdivisions;

    // Visible window, clipped to the scale's own domain.
    let view_start = scale.to_scale_units(scroll_px).max(scale.start());
    let view_end = scale
        .to_scale_units(scroll_px.saturating_add(timeline_width as i64))
        .min(scale.end_in_scale_units());
    if view_end < view_start {
        return commands;
    }

    let origin = scale.start().date().and_time(NaiveTime::default());
    let first = (view_start - origin).num_seconds().div_euclid(minor);
    let last = (view_end - origin).num_seconds().div_euclid(minor);

    for k in first..=last {
        let Some(t) = TimeDelta::try_seconds(k * minor).and_then(|d| origin.checked_add_signed(d))
        else {
            break;
        };
        if t < view_start || t > view_end {
            continue;
        }

        let x = HEADER_WIDTH + scale.to_grid_pixels(&t).saturating_sub(scroll_px) as f64;
        if x < HEADER_WIDTH || x > width {
            continue;
        }

        if k.rem_euclid(subdivisions) != 0 {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, AXIS_HEIGHT - MINOR_TICK_HEIGHT),
                to: Point::new(x, AXIS_HEIGHT),
                color: ThemeToken::TextMuted,
                width: 0.5,
            });
            continue;
        }

        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, AXIS_HEIGHT - MAJOR_TICK_HEIGHT),
            to: Point::new(x, AXIS_HEIGHT),
            color: ThemeToken::AxisTick,
            width: 1.0,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + 1.0, LABEL_Y),
            text: format_tick_label(t, major),
            color: ThemeToken::TextPrimary,
            font_size: FONT_SIZE,
        });
        if grid_height > 0.0 {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, AXIS_HEIGHT),
                to: Point::new(x, AXIS_HEIGHT + grid_height),
                color: ThemeToken::Gridline,
                width: 0.5,
            });
        }
    }

    commands
}

/// Choose a calendar-friendly major tick interval in seconds, given how
/// many seconds one grid pixel spans. Returns (major_interval_s, subdivisions).
fn nice_interval(seconds_per_px: i64) -> (i64, i64) {
    let raw_interval = seconds_per_px as f64 * MIN_MAJOR_SPACING_PX;

    let nice_values: &[(i64, i64)] = &[
        (MINUTE, 2),
        (5 * MINUTE, 5),
        (15 * MINUTE, 3),
        (30 * MINUTE, 2),
        (HOUR, 4),
        (2 * HOUR, 2),
        (3 * HOUR, 3),
        (6 * HOUR, 2),
        (12 * HOUR, 2),
        (DAY, 4),
        (2 * DAY, 2),
        (WEEK, 7),
    ];

    for &(interval, subs) in nice_values {
        if interval as f64 >= raw_interval {
            return (interval, subs);
        }
    }

    // Whole weeks for very zoomed-out views, without minor ticks. The cast
    // saturates, and so must the product at the largest factors.
    let weeks = (raw_interval / WEEK as f64).ceil().max(1.0) as i64;
    (weeks.saturating_mul(WEEK), 1)
}

/// Label a major tick: clock time for sub-day intervals, date otherwise.
fn format_tick_label(t: NaiveDateTime, interval: i64) -> String {
    if interval < DAY {
        t.format("%a %H:%M").to_string()
    } else {
        t.format("%a %d %b").to_string()
    }
}
