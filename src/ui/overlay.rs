// Overlay panels drawn on top of the court

use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::Theme;
use crate::game::Verdict;

/// A message to display as a panel in the centre of the court
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayMessage {
    /// Headline, drawn bold
    pub title: String,
    /// Line under the headline
    pub subtitle: String,
    pub title_color: Color,
    pub text_color: Color,
    pub border_color: Color,
    /// Dim everything behind the panel
    pub shade: Option<Color>,
}

impl OverlayMessage {
    /// Winner announcement shown before a restart
    pub fn announcement(verdict: Verdict, theme: &Theme) -> Self {
        Self {
            title: verdict.title().to_string(),
            subtitle: Verdict::SUBTITLE.to_string(),
            title_color: theme.verdict_color(verdict),
            text_color: theme.score,
            border_color: theme.verdict_color(verdict),
            shade: Some(theme.overlay_shade),
        }
    }

    pub fn paused(theme: &Theme) -> Self {
        Self {
            title: "PAUSED".to_string(),
            subtitle: "P to resume".to_string(),
            title_color: theme.score,
            text_color: theme.hint,
            border_color: theme.court_border,
            shade: None,
        }
    }

    fn lines(&self) -> [&str; 3] {
        [self.title.as_str(), "", self.subtitle.as_str()]
    }
}

/// Render an overlay message in the centre of `area`
pub fn render_overlay(frame: &mut Frame, message: &OverlayMessage, area: Rect) {
    if let Some(shade) = message.shade {
        // Stand-in for a translucent backdrop: keep the scene, darken and dim it
        frame.buffer_mut().set_style(
            area,
            Style::default().bg(shade).add_modifier(Modifier::DIM),
        );
    }

    let lines = message.lines();
    let max_line_length = lines
        .iter()
        .map(|line| Span::raw(*line).width())
        .max()
        .unwrap_or(0);

    // Add padding for borders and spacing
    let overlay_width = (max_line_length as u16 + 6).min(area.width.saturating_sub(4));
    let overlay_height = (lines.len() as u16 + 4).min(area.height.saturating_sub(2));

    let overlay_area = Rect {
        x: area.x + (area.width.saturating_sub(overlay_width)) / 2,
        y: area.y + (area.height.saturating_sub(overlay_height)) / 2,
        width: overlay_width,
        height: overlay_height,
    };

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(message.border_color))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));
    frame.render_widget(block, overlay_area);

    let text_lines = vec![
        Line::from(Span::styled(
            message.title.clone(),
            Style::default()
                .fg(message.title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            message.subtitle.clone(),
            Style::default().fg(message.text_color),
        )),
    ];

    let inner_area = overlay_area.inner(Margin::new(2, 1));
    let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner_area);
}
