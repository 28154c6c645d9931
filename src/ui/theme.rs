use ratatui::style::Color;

use crate::config::DisplayConfig;
use crate::game::Verdict;

/// Resolved colours for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub court_fill: Color,
    pub court_border: Color,
    pub center_line: Color,
    pub paddle: Color,
    pub ball: Color,
    pub score: Color,
    pub label: Color,
    pub hint: Color,
    pub win: Color,
    pub tie: Color,
    pub overlay_shade: Color,
}

impl Theme {
    pub fn verdict_color(&self, verdict: Verdict) -> Color {
        match verdict {
            Verdict::Winner(_) => self.win,
            Verdict::Tie => self.tie,
        }
    }
}

impl From<&DisplayConfig> for Theme {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            background: rgb(display.background),
            court_fill: rgb(display.court_fill),
            court_border: rgb(display.court_border),
            center_line: rgb(display.center_line),
            paddle: rgb(display.paddle_color),
            ball: rgb(display.ball_color),
            score: rgb(display.score_color),
            label: rgb(display.label_color),
            hint: rgb(display.hint_color),
            win: rgb(display.win_color),
            tie: rgb(display.tie_color),
            overlay_shade: rgb(display.overlay_shade),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}
