use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::collision::DeathReason;
use crate::config::{Difficulty, THEME};
use crate::game::GameStatus;

/// Draws the waiting-for-first-move hint as a centered popup.
pub fn render_start_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    high_score: u32,
    difficulty: Difficulty,
) {
    let popup = centered_popup(area, 70, 45);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(THEME.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from(format!("High score: {high_score}")),
        Line::from(format!("Difficulty: {difficulty}")),
        Line::from(""),
        Line::from("Press a direction to start"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("[1/2/3]/[Tab] Difficulty  [Q] Quit"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(THEME.menu_footer)),
        footer_row,
    );
}

/// Draws the game-over screen, with the restart affordance, as a popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    status: GameStatus,
    score: u32,
    reference_high_score: u32,
    death_reason: Option<DeathReason>,
) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let lines = game_over_lines(status, score, reference_high_score, death_reason);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn game_over_lines(
    status: GameStatus,
    score: u32,
    reference_high_score: u32,
    death_reason: Option<DeathReason>,
) -> Vec<Line<'static>> {
    let is_new_high = score > reference_high_score;
    let headline = if status == GameStatus::Victory {
        "BOARD CLEARED"
    } else {
        "GAME OVER"
    };
    let cause = death_reason
        .map(|reason| format!("Cause: {}", reason.describe()))
        .unwrap_or_default();

    vec![
        Line::from(headline),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!(
            "High score: {}",
            reference_high_score.max(score)
        )),
        Line::from(cause),
        Line::from(if is_new_high { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[Enter]/[Space]/[R] Play Again"),
        Line::from("[Q] Quit"),
    ]
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
