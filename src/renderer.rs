use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::config::{BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_FOOD, GLYPH_TILE, Grid, THEME, Theme};
use crate::food::FoodKind;
use crate::game::GameState;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, hue_to_color, render_hud};
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: HudInfo) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, &hud_info);
    let theme = &THEME;

    let board = board_area(play_area, state.grid());
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg))
        .style(Style::new().bg(theme.background));

    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_obstacles(frame, inner, state, theme);
    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state);

    if state.is_over() {
        render_game_over_menu(
            frame,
            play_area,
            state.status,
            state.score,
            hud_info.game_over_reference_high_score,
            state.death_reason,
        );
    } else if is_waiting_for_first_move(state) {
        render_start_menu(frame, play_area, hud_info.high_score, state.difficulty());
    }
}

fn is_waiting_for_first_move(state: &GameState) -> bool {
    state.tick_count == 0 && state.snake.pending_velocity().is_zero()
}

/// Centers a bordered board sized for `grid` inside `area`.
fn board_area(area: Rect, grid: Grid) -> Rect {
    let width = grid.tile_count.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = grid.tile_count.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    board
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let style = Style::new().fg(theme.obstacle);
    let buffer = frame.buffer_mut();
    for obstacle in &state.obstacles {
        if let Some((x, y)) = logical_to_terminal(inner, state.grid(), *obstacle) {
            buffer.set_string(x, y, GLYPH_TILE, style);
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some(food) = state.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, state.grid(), food.position) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(food_color(food.kind, theme)));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let buffer = frame.buffer_mut();
    // Draw tail first so the head wins if segments ever overlap.
    let segments: Vec<&Position> = state.snake.segments().collect();
    for (index, segment) in segments.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, state.grid(), **segment) else {
            continue;
        };

        buffer.set_string(x, y, GLYPH_TILE, Style::new().fg(segment_color(index)));
    }
}

/// Gradient color for the segment at `index` (0 is the head).
#[must_use]
pub fn segment_color(index: usize) -> Color {
    let step = (index % 360) as f32 * THEME.snake_hue_step;
    hue_to_color(THEME.snake_hue_start + step)
}

fn food_color(kind: FoodKind, theme: &Theme) -> Color {
    match kind {
        FoodKind::Normal => theme.food_normal,
        FoodKind::Speed => theme.food_speed,
        FoodKind::Bonus => theme.food_bonus,
        FoodKind::Shrink => theme.food_shrink,
    }
}

fn logical_to_terminal(inner: Rect, grid: Grid, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
