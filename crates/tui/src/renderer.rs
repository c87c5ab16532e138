use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
};
use rostergrid_core::model::Roster;
use rostergrid_core::scale::{DateTimeScale, LinearScale};
use rostergrid_core::views::{shift_grid, time_axis};
use rostergrid_protocol::{Point, RenderCommand, ThemeToken, Viewport};

/// Viewport units per terminal row. Columns map 1:1 to grid pixels.
const ROW_UNITS: f64 = shift_grid::LANE_HEIGHT;
const SCROLL_STEP: i64 = 10;

fn theme_to_color(token: &ThemeToken) -> Color {
    match token {
        ThemeToken::LaneBackground => Color::Black,
        ThemeToken::LaneBackgroundAlt => Color::Rgb(20, 20, 20),
        ThemeToken::LaneBorder => Color::DarkGray,
        ThemeToken::LaneHeaderBackground => Color::DarkGray,
        ThemeToken::LaneHeaderText => Color::White,
        ThemeToken::AxisBackground => Color::Black,
        ThemeToken::AxisTick => Color::Gray,
        ThemeToken::Gridline => Color::DarkGray,
        ThemeToken::ShiftAssigned => Color::Rgb(60, 120, 200),
        ThemeToken::ShiftUnassigned => Color::Rgb(200, 100, 100),
        ThemeToken::ShiftBorder => Color::Rgb(80, 120, 160),
        ThemeToken::ShiftText => Color::White,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::SelectionHighlight => Color::Green,
    }
}

/// Paints render commands into a terminal buffer region.
struct CellPainter<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    clip: Rect,
}

impl<'a> CellPainter<'a> {
    fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self {
            buf,
            area,
            clip: area,
        }
    }

    fn cell_rect(&self, x: f64, y: f64, w: f64, h: f64) -> Rect {
        let col = x.max(0.0) as u16;
        let row = (y / ROW_UNITS).max(0.0) as u16;
        let right = (x + w).max(0.0).ceil() as u16;
        let bottom = ((y + h) / ROW_UNITS).max(0.0).ceil() as u16;
        Rect::new(
            self.area.x.saturating_add(col),
            self.area.y.saturating_add(row),
            right.saturating_sub(col).max(1),
            bottom.saturating_sub(row).max(1),
        )
        .intersection(self.area)
    }

    fn put(&mut self, x: u16, y: u16, ch: char, fg: Color, bg: Option<Color>) {
        let inside = x >= self.clip.x
            && x < self.clip.x + self.clip.width
            && y >= self.clip.y
            && y < self.clip.y + self.clip.height;
        if !inside {
            return;
        }
        let cell = &mut self.buf[(x, y)];
        cell.set_char(ch).set_fg(fg);
        if let Some(bg) = bg {
            cell.set_bg(bg);
        }
    }

    /// Empty lane or axis background, i.e. nothing drawn on it yet.
    fn is_background(&self, x: u16, y: u16) -> bool {
        if !self.area.contains((x, y).into()) {
            return false;
        }
        let cell = &self.buf[(x, y)];
        cell.symbol() == " "
            && [
                ThemeToken::LaneBackground,
                ThemeToken::LaneBackgroundAlt,
                ThemeToken::AxisBackground,
            ]
            .iter()
            .any(|t| theme_to_color(t) == cell.bg)
    }

    fn paint(&mut self, cmd: &RenderCommand, selected: Option<u64>) {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                label,
                shift_id,
                ..
            } => {
                let cells = self.cell_rect(rect.x, rect.y, rect.w, rect.h);
                let bg = if shift_id.is_some() && *shift_id == selected {
                    theme_to_color(&ThemeToken::SelectionHighlight)
                } else {
                    theme_to_color(color)
                };
                let fg = theme_to_color(&ThemeToken::ShiftText);
                let text: Vec<char> = label.as_deref().unwrap_or("").chars().collect();
                for row in cells.y..cells.y + cells.height {
                    for (i, col) in (cells.x..cells.x + cells.width).enumerate() {
                        let ch = if row == cells.y { text.get(i).copied() } else { None };
                        self.put(col, row, ch.unwrap_or(' '), fg, Some(bg));
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                ..
            } => {
                let cells = self.cell_rect(position.x, position.y, 0.0, 0.0);
                let fg = theme_to_color(color);
                for (i, ch) in text.chars().enumerate() {
                    let col = cells.x.saturating_add(i as u16);
                    if col >= self.area.x + self.area.width {
                        break;
                    }
                    self.put(col, cells.y, ch, fg, None);
                }
            }
            RenderCommand::DrawLine {
                from, to, color, ..
            } => {
                // Only vertical lines exist: ticks in the axis row, gridlines below it.
                // Neither may overwrite labels or shifts.
                let top = from.y.min(to.y);
                let cells = self.cell_rect(from.x, top, 0.0, (to.y - from.y).abs());
                let fg = theme_to_color(color);
                let ch = if top < shift_grid::AXIS_HEIGHT { '╵' } else { '┆' };
                for row in cells.y..cells.y + cells.height {
                    if self.is_background(cells.x, row) {
                        self.put(cells.x, row, ch, fg, None);
                    }
                }
            }
            RenderCommand::SetClip { rect } => {
                self.clip = self.cell_rect(rect.x, rect.y, rect.w, rect.h);
            }
            RenderCommand::ClearClip => self.clip = self.area,
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}

/// Keep the instant at the left edge fixed while changing the zoom.
fn rescale(scale: &DateTimeScale, zoomed: DateTimeScale, scroll_px: i64) -> (DateTimeScale, i64) {
    let left_edge = scale.to_scale_units(scroll_px);
    let scroll = zoomed.to_grid_pixels(&left_edge).max(0);
    (zoomed, scroll)
}

pub fn render_tui(roster: &Roster, mut scale: DateTimeScale) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut scroll_px: i64 = 0;
    let mut selected: Option<u64> = None;
    let grid_height = shift_grid::grid_height(roster);
    let name = roster.name.as_deref().unwrap_or("roster");
    let overtime = match roster.contract_violations().len() {
        0 => String::new(),
        n => format!(" | {n} over contract"),
    };

    loop {
        let term_size = terminal.size()?;
        let viewport = Viewport::new(
            f64::from(term_size.width),
            f64::from(term_size.height.saturating_sub(1)) * ROW_UNITS,
        );

        let mut cmds = shift_grid::render_shift_grid(roster, &scale, &viewport, scroll_px);
        cmds.extend(time_axis::render_time_axis(
            &scale,
            &viewport,
            scroll_px,
            grid_height,
        ));

        let selection = selected
            .and_then(|id| roster.shift(id))
            .map(|s| {
                format!(
                    " | #{} {}–{} {}",
                    s.id,
                    s.start.format("%a %H:%M"),
                    s.end.format("%a %H:%M"),
                    s.employee.as_deref().unwrap_or("Unassigned")
                )
            })
            .unwrap_or_default();

        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(format!(
                    " rostergrid — {name} | {} shifts | {} {}/col | ←→ scroll | +/- zoom | q quit{overtime}{selection} ",
                    roster.shifts.len(),
                    scale.factor(),
                    scale.unit(),
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let content_area = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
            let block = Block::default()
                .borders(Borders::NONE)
                .style(Style::default().bg(Color::Black));
            frame.render_widget(block, content_area);

            let mut painter = CellPainter::new(frame.buffer_mut(), content_area);
            for cmd in &cmds {
                painter.paint(cmd, selected);
            }
        })?;

        let max_scroll = (scale.end_in_grid_pixels() - SCROLL_STEP).max(0);

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Left => scroll_px = (scroll_px - SCROLL_STEP).max(0),
                    KeyCode::Right => scroll_px = (scroll_px + SCROLL_STEP).min(max_scroll),
                    KeyCode::Home => scroll_px = 0,
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        let zoomed = scale.with_factor(scale.scale_factor().zoom_in());
                        (scale, scroll_px) = rescale(&scale, zoomed, scroll_px);
                    }
                    KeyCode::Char('-') => {
                        let zoomed = scale.with_factor(scale.scale_factor().zoom_out());
                        (scale, scroll_px) = rescale(&scale, zoomed, scroll_px);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        let point = Point::new(
                            f64::from(mouse.column),
                            f64::from(mouse.row.saturating_sub(1)) * ROW_UNITS,
                        );
                        selected = shift_grid::shift_at(roster, &scale, point, scroll_px)
                            .map(|s| s.id);
                    }
                    MouseEventKind::ScrollLeft => scroll_px = (scroll_px - SCROLL_STEP).max(0),
                    MouseEventKind::ScrollRight => {
                        scroll_px = (scroll_px + SCROLL_STEP).min(max_scroll);
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
