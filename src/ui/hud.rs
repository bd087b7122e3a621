use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::{THEME, Theme, cells_per_second};
use crate::game::GameState;

const SEPARATOR: &str = " │ ";

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub high_score: u32,
    /// Best score before the game on screen ended, for "new high score".
    pub game_over_reference_high_score: u32,
    /// Wall-clock instant of this frame render.
    pub now: Instant,
}

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let theme = &THEME;
    let score_line = top_info_line(
        state.score,
        info.high_score,
        state.snake.len(),
        usize::from(score_area.width),
        theme,
    );
    frame.render_widget(
        Paragraph::new(score_line).alignment(Alignment::Center),
        score_area,
    );

    let status_line = bottom_info_line(
        state,
        state.speed_boost_remaining(info.now),
        theme,
    );
    frame.render_widget(
        Paragraph::new(status_line).alignment(Alignment::Center),
        status_area,
    );

    play_area
}

fn top_info_line(
    score: u32,
    high_score: u32,
    length: usize,
    available_width: usize,
    theme: &Theme,
) -> Line<'static> {
    let compact = top_info_width(score, high_score, length) > available_width;
    let (score_label, high_label, length_label) = if compact {
        ("S", "H", "L")
    } else {
        ("Score", "Hi", "Length")
    };

    let label = Style::default().fg(theme.hud_label);
    let value = Style::default().fg(theme.hud_value);
    let high_style = if score > 0 && score >= high_score {
        Style::default()
            .fg(theme.hud_accent)
            .add_modifier(Modifier::BOLD)
    } else {
        value
    };

    Line::from(vec![
        Span::styled(format!("{score_label}: "), label),
        Span::styled(score.to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled(format!("{high_label}: "), label),
        Span::styled(high_score.max(score).to_string(), high_style),
        Span::styled(SEPARATOR, label),
        Span::styled(format!("{length_label}: "), label),
        Span::styled(length.to_string(), value),
    ])
}

/// Display width of the top line with full labels.
fn top_info_width(score: u32, high_score: u32, length: usize) -> usize {
    format!("Score: {score}").width()
        + SEPARATOR.width()
        + format!("Hi: {}", high_score.max(score)).width()
        + SEPARATOR.width()
        + format!("Length: {length}").width()
}

fn bottom_info_line(
    state: &GameState,
    boost_remaining: Option<Duration>,
    theme: &Theme,
) -> Line<'static> {
    let label = Style::default().fg(theme.hud_label);
    let value = Style::default().fg(theme.hud_value);
    let difficulty = state.difficulty();

    let mut spans = vec![
        Span::styled("Difficulty: ", label),
        Span::styled(difficulty.label(), value),
        Span::styled(SEPARATOR, label),
        Span::styled(
            format!("{:.1} cells/s", cells_per_second(state.tick_interval())),
            value,
        ),
    ];

    if let Some(remaining) = boost_remaining {
        spans.push(Span::styled(SEPARATOR, label));
        spans.push(Span::styled(
            format!("Boost {:.1}s", remaining.as_secs_f64()),
            Style::default()
                .fg(theme.food_speed)
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}

/// Converts a hue in degrees into a saturated RGB color.
#[must_use]
pub fn hue_to_color(hue: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let chroma = 0.85_f32;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let to_channel = |v: f32| ((v + 0.1) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(to_channel(r), to_channel(g), to_channel(b))
}
