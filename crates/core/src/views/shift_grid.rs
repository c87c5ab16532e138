use chrono::NaiveDateTime;
use rostergrid_protocol::{Point, Rect, RenderCommand, ThemeToken, Viewport};

use crate::model::{Roster, Shift};
use crate::scale::LinearScale;

/// Height of the time axis strip above the lanes.
pub const AXIS_HEIGHT: f64 = 20.0;
/// Height of one spot lane.
pub const LANE_HEIGHT: f64 = 20.0;
/// Width of the spot name column left of the timeline.
pub const HEADER_WIDTH: f64 = 16.0;

const FONT_SIZE: f64 = 11.0;
const TEXT_INSET: f64 = 2.0;
const UNASSIGNED_LABEL: &str = "Unassigned";

/// Total height of all lanes below the axis.
pub fn grid_height(roster: &Roster) -> f64 {
    roster.spots.len() as f64 * LANE_HEIGHT
}

/// Lane index under a vertical position, if any.
pub fn lane_at(y: f64) -> Option<usize> {
    if y < AXIS_HEIGHT {
        return None;
    }
    Some(((y - AXIS_HEIGHT) / LANE_HEIGHT).floor() as usize)
}

/// Horizontal extent of `shift` in grid pixels relative to the timeline
/// origin, at least one pixel wide.
fn shift_span<S>(scale: &S, shift: &Shift) -> (i64, i64)
where
    S: LinearScale<NaiveDateTime> + ?Sized,
{
    let x0 = scale.to_grid_pixels(&shift.start);
    let x1 = scale.to_grid_pixels(&shift.end);
    (x0, x1.max(x0.saturating_add(1)))
}

/// Render one lane per spot with its shifts laid out along `scale`.
///
/// `scroll_px` is the grid pixel shown at the left edge of the timeline
/// area. Shifts entirely outside the viewport are skipped.
pub fn render_shift_grid<S>(
    roster: &Roster,
    scale: &S,
    viewport: &Viewport,
    scroll_px: i64,
) -> Vec<RenderCommand>
where
    S: LinearScale<NaiveDateTime> + ?Sized,
{
    let width = viewport.width;
    let timeline_width = width - HEADER_WIDTH;
    if timeline_width <= 0.0 {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(roster.spots.len() * 6 + roster.shifts.len());

    for (lane, spot) in roster.spots.iter().enumerate() {
        let y = AXIS_HEIGHT + lane as f64 * LANE_HEIGHT;
        if y >= viewport.height {
            break;
        }

        commands.push(RenderCommand::BeginGroup {
            id: format!("spot-{}", spot.id),
            label: Some(spot.name.clone()),
        });

        let background = if lane % 2 == 0 {
            ThemeToken::LaneBackground
        } else {
            ThemeToken::LaneBackgroundAlt
        };
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(0.0, y, width, LANE_HEIGHT),
            color: background,
            border_color: Some(ThemeToken::LaneBorder),
            label: None,
            shift_id: None,
        });

        let timeline = Rect::new(HEADER_WIDTH, y, timeline_width, LANE_HEIGHT);
        commands.push(RenderCommand::SetClip { rect: timeline });

        for shift in roster.shifts_for_spot(spot.id) {
            let (x0, x1) = shift_span(scale, shift);
            let x = HEADER_WIDTH + x0.saturating_sub(scroll_px) as f64;
            let w = (x1 - x0) as f64;
            if x + w <= HEADER_WIDTH || x >= width {
                continue;
            }

            let (color, label) = match &shift.employee {
                Some(name) => (ThemeToken::ShiftAssigned, name.clone()),
                None => (ThemeToken::ShiftUnassigned, UNASSIGNED_LABEL.to_string()),
            };
            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(x, y, w, LANE_HEIGHT),
                color,
                border_color: Some(ThemeToken::ShiftBorder),
                label: Some(label),
                shift_id: Some(shift.id),
            });
        }

        commands.push(RenderCommand::ClearClip);

        // Header cell on top so long shifts never cover the spot name.
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(0.0, y, HEADER_WIDTH, LANE_HEIGHT),
            color: ThemeToken::LaneHeaderBackground,
            border_color: Some(ThemeToken::LaneBorder),
            label: None,
            shift_id: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(TEXT_INSET, y + TEXT_INSET),
            text: spot.name.clone(),
            color: ThemeToken::LaneHeaderText,
            font_size: FONT_SIZE,
        });

        commands.push(RenderCommand::EndGroup);
    }

    commands
}

/// Find the shift drawn under `point`, as laid out by [`render_shift_grid`].
///
/// The pixel column is converted back to the time window it covers, and
/// the first shift of that lane overlapping the window wins.
pub fn shift_at<'a, S>(
    roster: &'a Roster,
    scale: &S,
    point: Point,
    scroll_px: i64,
) -> Option<&'a Shift>
where
    S: LinearScale<NaiveDateTime> + ?Sized,
{
    if point.x < HEADER_WIDTH {
        return None;
    }
    let spot = roster.spots.get(lane_at(point.y)?)?;

    let px = ((point.x - HEADER_WIDTH).floor() as i64).saturating_add(scroll_px);
    let from = scale.to_scale_units(px);
    let to = scale.to_scale_units(px.saturating_add(1));

    roster
        .shifts_for_spot(spot.id)
        .into_iter()
        .find(|shift| {
            let (x0, x1) = shift_span(scale, shift);
            (x0..x1).contains(&px) || (shift.start < to && shift.end > from)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Spot;
    use crate::scale::{DateTimeScale, Factor, TimeUnit};
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 1, 1)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .expect("valid timestamp")
    }

    fn day_scale(factor: i64) -> DateTimeScale {
        let end = NaiveDate::from_ymd_opt(2018, 1, 2)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid timestamp");
        DateTimeScale::new(
            at(0, 0),
            end,
            TimeUnit::Minutes,
            Factor::new(factor).expect("valid factor"),
        )
        .expect("valid scale")
    }

    fn roster() -> Roster {
        Roster {
            name: None,
            spots: vec![
                Spot {
                    id: 1,
                    name: "Reception".into(),
                },
                Spot {
                    id: 2,
                    name: "Bar".into(),
                },
            ],
            shifts: vec![
                Shift {
                    id: 10,
                    spot_id: 1,
                    start: at(8, 0),
                    end: at(16, 0),
                    employee: Some("Ann".into()),
                },
                Shift {
                    id: 11,
                    spot_id: 2,
                    start: at(18, 0),
                    end: at(23, 0),
                    employee: None,
                },
                Shift {
                    id: 12,
                    spot_id: 2,
                    start: at(9, 10),
                    end: at(9, 20),
                    employee: None,
                },
            ],
            contracts: vec![],
            employees: vec![],
            view: None,
        }
    }

    fn shift_rects(cmds: &[RenderCommand]) -> Vec<(u64, Rect, String)> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect {
                    rect,
                    shift_id: Some(id),
                    label,
                    ..
                } => Some((*id, *rect, label.clone().unwrap_or_default())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn shifts_are_positioned_by_the_scale() {
        let r = roster();
        let scale = day_scale(15);
        let vp = Viewport::new(200.0, 100.0);
        let rects = shift_rects(&render_shift_grid(&r, &scale, &vp, 0));

        let (_, ann, label) = rects.iter().find(|(id, ..)| *id == 10).expect("shift 10");
        assert_eq!(ann.x, HEADER_WIDTH + 32.0);
        assert_eq!(ann.w, 32.0);
        assert_eq!(ann.y, AXIS_HEIGHT);
        assert_eq!(label, "Ann");

        let (_, evening, label) = rects.iter().find(|(id, ..)| *id == 11).expect("shift 11");
        assert_eq!(evening.x, HEADER_WIDTH + 72.0);
        assert_eq!(evening.y, AXIS_HEIGHT + LANE_HEIGHT);
        assert_eq!(label, UNASSIGNED_LABEL);
    }

    #[test]
    fn short_shifts_are_at_least_one_pixel() {
        let r = roster();
        let rects = shift_rects(&render_shift_grid(
            &r,
            &day_scale(15),
            &Viewport::new(200.0, 100.0),
            0,
        ));
        let (_, short, _) = rects.iter().find(|(id, ..)| *id == 12).expect("shift 12");
        assert_eq!(short.w, 1.0);
        assert_eq!(short.x, HEADER_WIDTH + 36.0);
    }

    #[test]
    fn scrolling_skips_offscreen_shifts() {
        let r = roster();
        let vp = Viewport::new(HEADER_WIDTH + 20.0, 100.0);
        let rects = shift_rects(&render_shift_grid(&r, &day_scale(15), &vp, 70));
        let ids: Vec<u64> = rects.iter().map(|(id, ..)| *id).collect();
        assert_eq!(ids, vec![11]);
        assert_eq!(rects[0].1.x, HEADER_WIDTH + 2.0);
    }

    #[test]
    fn lanes_beyond_viewport_are_not_emitted() {
        let r = roster();
        let vp = Viewport::new(200.0, AXIS_HEIGHT + LANE_HEIGHT);
        let cmds = render_shift_grid(&r, &day_scale(15), &vp, 0);
        let groups = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::BeginGroup { .. }))
            .count();
        assert_eq!(groups, 1);
        assert!(shift_rects(&cmds).iter().all(|(id, ..)| *id == 10));
    }

    #[test]
    fn narrow_viewport_renders_nothing() {
        let cmds = render_shift_grid(&roster(), &day_scale(15), &Viewport::new(10.0, 100.0), 0);
        assert!(cmds.is_empty());
    }

    #[test]
    fn hit_testing_maps_pixels_back_to_shifts() {
        let r = roster();
        let scale = day_scale(15);
        let lane0 = AXIS_HEIGHT + 1.0;
        let lane1 = AXIS_HEIGHT + LANE_HEIGHT + 1.0;

        let hit = shift_at(&r, &scale, Point::new(HEADER_WIDTH + 40.0, lane0), 0);
        assert_eq!(hit.map(|s| s.id), Some(10));

        // 09:10–09:20 sits inside the 09:00 pixel
        let hit = shift_at(&r, &scale, Point::new(HEADER_WIDTH + 36.5, lane1), 0);
        assert_eq!(hit.map(|s| s.id), Some(12));

        let hit = shift_at(&r, &scale, Point::new(HEADER_WIDTH + 2.0, lane1), 70);
        assert_eq!(hit.map(|s| s.id), Some(11));

        assert!(shift_at(&r, &scale, Point::new(HEADER_WIDTH + 10.0, lane0), 0).is_none());
        assert!(shift_at(&r, &scale, Point::new(5.0, lane0), 0).is_none());
        assert!(shift_at(&r, &scale, Point::new(HEADER_WIDTH + 40.0, 5.0), 0).is_none());
        assert!(shift_at(&r, &scale, Point::new(HEADER_WIDTH + 40.0, 500.0), 0).is_none());
    }

    #[test]
    fn lane_lookup() {
        assert_eq!(lane_at(0.0), None);
        assert_eq!(lane_at(AXIS_HEIGHT), Some(0));
        assert_eq!(lane_at(AXIS_HEIGHT + LANE_HEIGHT * 1.5), Some(1));
        assert_eq!(grid_height(&roster()), 2.0 * LANE_HEIGHT);
    }
}
