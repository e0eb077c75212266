//! Stateless UI rendering for Sokoban.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_sokoban::{Board, LevelSummary, Phase, Tile, View};

/// Display switches taken from the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    /// Put a space between cells.
    pub spaced_cells: bool,
    /// Show the symbol legend.
    pub show_legend: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            spaced_cells: true,
            show_legend: true,
        }
    }
}

const HELP: &str = "arrows/wasd: move   enter/r: restart   q/esc: quit";

/// Renders the level being played.
pub fn draw(frame: &mut Frame, view: &View<'_>, options: &UiOptions) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Board and legend
            Constraint::Length(3), // HUD
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new(format!(
        "Strictly Sokoban - {} ({}/{})",
        view.level_name,
        view.level_index + 1,
        view.level_count
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    if options.show_legend {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(24)])
            .split(chunks[1]);
        draw_board(frame, body[0], view.board, options.spaced_cells);
        draw_legend(frame, body[1]);
    } else {
        draw_board(frame, chunks[1], view.board, options.spaced_cells);
    }

    draw_hud(frame, chunks[2], view);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, spaced: bool) {
    let lines = board_lines(board, spaced);
    let width = board_width(board, spaced).saturating_add(2);
    let height = to_u16(board.height()).saturating_add(2);

    let board_widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(board_widget, center_rect(area, width, height));
}

fn draw_legend(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = Tile::legend()
        .filter_map(|(name, symbol)| {
            let tile = Tile::from_symbol(symbol)?;
            Some(Line::from(vec![
                Span::styled(symbol.to_string(), tile_style(tile)),
                Span::raw(format!("  {}", name)),
            ]))
        })
        .collect();

    let legend = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Legend"),
    );
    frame.render_widget(legend, area);
}

fn draw_hud(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let (status, color) = match view.phase {
        Phase::Playing => ("Playing", Color::Yellow),
        Phase::Won => ("Solved!", Color::Green),
        Phase::Restarting => ("Restarting", Color::Magenta),
    };

    let hud = Paragraph::new(Line::from(vec![
        Span::raw(format!("Moves: {}   ", view.moves)),
        Span::raw(format!("Total: {}   ", view.total_moves)),
        Span::raw(format!("Boxes left: {}   ", view.board.count(Tile::BOX))),
        Span::styled(status, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(hud, area);
}

/// Renders the between-level screen.
pub fn draw_summary(frame: &mut Frame, summary: &LevelSummary) {
    let area = frame.area();

    let closing = if *summary.last() {
        format!(
            "You beat the game with a total move counter of {}. Press any key to exit.",
            summary.total_moves()
        )
    } else {
        "Press any key to go to the next level.".to_string()
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("Level {} complete: {}", summary.index() + 1, summary.name()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Moves: {}", summary.moves())),
        Line::from(format!("Total moves: {}", summary.total_moves())),
        Line::from(""),
        Line::from(closing),
    ];

    let width = to_u16(lines.iter().map(Line::width).max().unwrap_or(0)).saturating_add(4);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, center_rect(area, width, 8));
}

/// Styled board rows.
pub fn board_lines(board: &Board, spaced: bool) -> Vec<Line<'static>> {
    board
        .rows()
        .map(|row| {
            let mut spans = Vec::with_capacity(row.len() * 2);
            for (i, tile) in row.iter().enumerate() {
                if spaced && i > 0 {
                    spans.push(Span::raw(" "));
                }
                let symbol = tile.symbol().unwrap_or('?');
                spans.push(Span::styled(symbol.to_string(), tile_style(*tile)));
            }
            Line::from(spans)
        })
        .collect()
}

fn board_width(board: &Board, spaced: bool) -> u16 {
    let width = to_u16(board.width());
    if spaced {
        width.saturating_mul(2).saturating_sub(1)
    } else {
        width
    }
}

/// Clamps a cell count to terminal coordinates.
fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn tile_style(tile: Tile) -> Style {
    if tile == Tile::WALL {
        Style::default().fg(Color::Gray)
    } else if tile.contains(Tile::PLAYER) {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if tile == Tile::BOX_ON_GOAL {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if tile.contains(Tile::BOX) {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else if tile.contains(Tile::GOAL) {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
