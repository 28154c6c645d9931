use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::braille::BrailleCanvas;
use super::overlay::{render_overlay, OverlayMessage};
use super::theme::Theme;
use crate::game::state::{Bounds, COURT_HEIGHT, COURT_MARGIN, COURT_WIDTH};
use crate::game::{GameState, Phase, Side};

// Smallest terminal the court is drawn in
const MIN_COLUMNS: u16 = 40;
const MIN_ROWS: u16 = 12;

// Court furniture in virtual units
const BORDER_INSET: i32 = 10;
const DASH_STEP: usize = 22;
const DASH_LENGTH: i32 = 12;
const LABEL_OFFSET: i32 = 120; // Label centres either side of the centre line
const SCORE_OFFSET: i32 = 80; // Scores sit this far from the centre line

pub const HELP_TEXT: &str = "W/S & ↑/↓ to move | P pause | R restart | Esc quit";

/// Maps the virtual court onto terminal cells and Braille pixels,
/// keeping the aspect ratio and centring the court in the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtProjection {
    pub cells: Rect,
    scale: f32, // Braille pixels per virtual unit
}

impl CourtProjection {
    pub fn fit(area: Rect) -> Option<Self> {
        if area.width < MIN_COLUMNS || area.height < MIN_ROWS {
            return None;
        }

        let scale_x = (area.width as f32 * 2.0) / COURT_WIDTH as f32;
        let scale_y = (area.height as f32 * 4.0) / COURT_HEIGHT as f32;
        let scale = scale_x.min(scale_y);

        let width = ((COURT_WIDTH as f32 * scale / 2.0).ceil() as u16).min(area.width);
        let height = ((COURT_HEIGHT as f32 * scale / 4.0).ceil() as u16).min(area.height);

        let cells = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        Some(Self { cells, scale })
    }

    /// Pixel range covered by `[start, start + len)`, clipped to `[0, limit)`.
    /// Anything visible is at least one pixel wide.
    fn span(&self, start: i32, len: i32, limit: usize) -> Option<(usize, usize)> {
        let from = (start as f32 * self.scale).floor();
        let to = ((start + len) as f32 * self.scale).ceil().max(from + 1.0);

        let from = from.max(0.0) as usize;
        let to = to.min(limit as f32) as usize;
        (from < to).then(|| (from, to - from))
    }

    fn pixel(&self, v: i32, limit: usize) -> usize {
        ((v as f32 * self.scale) as usize).min(limit.saturating_sub(1))
    }

    /// Terminal column for a virtual x coordinate
    pub fn column(&self, v: i32) -> i32 {
        self.cells.x as i32 + (v as f32 * self.scale / 2.0) as i32
    }
}

pub fn render(frame: &mut Frame, state: &GameState, theme: &Theme) {
    let area = frame.area();

    let bg = Block::default().style(Style::default().bg(theme.background));
    frame.render_widget(bg, area);

    let Some(projection) = CourtProjection::fit(area) else {
        draw_too_small(frame, area, theme);
        return;
    };

    let cells = projection.cells;
    let mut canvas = BrailleCanvas::new(cells.width as usize, cells.height as usize);

    draw_court(&mut canvas, &projection, theme);
    fill_bounds(&mut canvas, &projection, &state.left_paddle.rect, theme.paddle);
    fill_bounds(&mut canvas, &projection, &state.right_paddle.rect, theme.paddle);
    fill_bounds(&mut canvas, &projection, &state.ball.rect, theme.ball);

    render_braille_canvas(frame, &canvas, cells, theme);

    draw_scoreboard(frame, state, &projection, theme);
    draw_controls(frame, &projection, theme);

    match state.phase {
        Phase::Running => {}
        Phase::Paused => render_overlay(frame, &OverlayMessage::paused(theme), area),
        Phase::Announcing(verdict) => {
            render_overlay(frame, &OverlayMessage::announcement(verdict, theme), area)
        }
    }
}

fn draw_court(canvas: &mut BrailleCanvas, projection: &CourtProjection, theme: &Theme) {
    let (width, height) = (canvas.pixel_width(), canvas.pixel_height());

    // Bordered play area
    let border = Bounds::new(
        BORDER_INSET,
        BORDER_INSET,
        COURT_WIDTH - 2 * BORDER_INSET,
        COURT_HEIGHT - 2 * BORDER_INSET,
    );
    if let (Some((x, w)), Some((y, h))) = (
        projection.span(border.x, border.width, width),
        projection.span(border.y, border.height, height),
    ) {
        canvas.stroke_rect(x, y, w, h, theme.court_border);
    }

    // Dashed centre line
    let center_x = projection.pixel(COURT_WIDTH / 2, width);
    for dash_y in (COURT_MARGIN..COURT_HEIGHT - COURT_MARGIN).step_by(DASH_STEP) {
        if let Some((y, h)) = projection.span(dash_y, DASH_LENGTH, height) {
            canvas.fill_rect(center_x, y, 1, h, theme.center_line);
        }
    }
}

fn fill_bounds(
    canvas: &mut BrailleCanvas,
    projection: &CourtProjection,
    rect: &Bounds,
    color: Color,
) {
    let horizontal = projection.span(rect.x, rect.width, canvas.pixel_width());
    let vertical = projection.span(rect.y, rect.height, canvas.pixel_height());

    // Partly off-court shapes are clipped; fully off-court ones are skipped
    if let (Some((x, w)), Some((y, h))) = (horizontal, vertical) {
        canvas.fill_rect(x, y, w, h, color);
    }
}

fn render_braille_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect, theme: &Theme) {
    // One line per cell row, split into spans wherever the colour changes
    for y in 0..canvas.height() {
        let mut spans = Vec::new();
        let mut run = String::new();
        let mut run_color = None;

        for x in 0..canvas.width() {
            let color = canvas.color_at(x, y);
            if color != run_color {
                if !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), cell_style(run_color)));
                }
                run_color = color;
            }
            run.push(canvas.to_char(x, y));
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, cell_style(run_color)));
        }

        let paragraph =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.court_fill));

        let row_area = Rect {
            x: area.x,
            y: area.y + y as u16,
            width: area.width,
            height: 1,
        };

        frame.render_widget(paragraph, row_area);
    }
}

fn cell_style(color: Option<Color>) -> Style {
    match color {
        Some(color) => Style::default().fg(color),
        None => Style::default(),
    }
}

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Start,
    Center,
    End,
}

/// Draw one line of text anchored at a terminal column, clipped to `bounds`
fn draw_text(
    frame: &mut Frame,
    text: &str,
    column: i32,
    row: u16,
    anchor: Anchor,
    style: Style,
    bounds: Rect,
) {
    let width = Span::raw(text).width() as i32;
    let start = match anchor {
        Anchor::Start => column,
        Anchor::Center => column - width / 2,
        Anchor::End => column - width,
    };
    let start = start.max(bounds.x as i32);

    let text_area = Rect {
        x: start as u16,
        y: row,
        width: width as u16,
        height: 1,
    }
    .intersection(bounds);

    if text_area.width == 0 || text_area.height == 0 {
        return;
    }

    frame.render_widget(Paragraph::new(text).style(style), text_area);
}

fn draw_scoreboard(
    frame: &mut Frame,
    state: &GameState,
    projection: &CourtProjection,
    theme: &Theme,
) {
    let bounds = projection.cells;
    let label_row = bounds.y + 1;
    let score_row = bounds.y + 2;
    let center = COURT_WIDTH / 2;
    let label_style = Style::default()
        .fg(theme.label)
        .add_modifier(Modifier::BOLD);
    let score_style = Style::default()
        .fg(theme.score)
        .add_modifier(Modifier::BOLD);

    draw_text(
        frame,
        Side::Left.label(),
        projection.column(center - LABEL_OFFSET),
        label_row,
        Anchor::Center,
        label_style,
        bounds,
    );
    draw_text(
        frame,
        Side::Right.label(),
        projection.column(center + LABEL_OFFSET),
        label_row,
        Anchor::Center,
        label_style,
        bounds,
    );

    draw_text(
        frame,
        &state.score.left.to_string(),
        projection.column(center - SCORE_OFFSET),
        score_row,
        Anchor::End,
        score_style,
        bounds,
    );
    draw_text(
        frame,
        &state.score.right.to_string(),
        projection.column(center + SCORE_OFFSET),
        score_row,
        Anchor::Start,
        score_style,
        bounds,
    );
}

fn draw_controls(frame: &mut Frame, projection: &CourtProjection, theme: &Theme) {
    let bounds = projection.cells;

    draw_text(
        frame,
        HELP_TEXT,
        projection.column(COURT_WIDTH / 2),
        bounds.bottom().saturating_sub(2),
        Anchor::Center,
        Style::default().fg(theme.hint),
        bounds,
    );
}

fn draw_too_small(frame: &mut Frame, area: Rect, theme: &Theme) {
    let message = format!("Terminal too small: need at least {MIN_COLUMNS}x{MIN_ROWS}");
    let notice = Paragraph::new(message)
        .style(Style::default().fg(theme.hint))
        .alignment(Alignment::Center);

    let notice_area = Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: area.height.min(1),
    };

    frame.render_widget(notice, notice_area);
}
