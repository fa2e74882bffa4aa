//! Frame rendering: map, dialogue, error, prompt line and key hints.

use game_content::{FLOOR_TILE, MapContent};
use game_core::{AnimationSet, CardinalDirection, FrameId, Position, RenderFrame};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::input::Focus;

/// Everything one frame draws.
pub struct View<'a> {
    pub map: &'a MapContent,
    pub animations: &'a AnimationSet,
    pub frame: &'a RenderFrame,
    pub tile_size: f32,
    pub hazard_tile: &'a str,
    pub prompt: &'a str,
    pub focus: Focus,
    pub pending: usize,
    pub status: Option<&'a str>,
}

pub fn render(frame: &mut Frame, view: &View<'_>) {
    let map_height = view.map.dimensions().height as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(map_height),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(frame.area());

    render_map(frame, chunks[0], view);
    render_dialogue(frame, chunks[1], view);
    render_error(frame, chunks[2], view);
    render_prompt(frame, chunks[3], view);
    render_hints(frame, chunks[4], view);
}

fn render_map(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let dimensions = view.map.dimensions();
    let entity = entity_cell(view.frame, dimensions.height, view.tile_size);
    let counterpart = view.map.grid.counterpart();
    let sprite = entity_glyph(&view.frame.frame, view.animations);

    let rows: Vec<Line> = (0..dimensions.height as i32)
        .rev()
        .map(|y| {
            let spans: Vec<Span> = (0..dimensions.width as i32)
                .map(|x| {
                    let position = Position::new(x, y);
                    if position == entity {
                        let style = Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD);
                        return Span::styled(sprite.to_string(), style);
                    }
                    if Some(position) == counterpart {
                        return Span::styled("&", Style::default().fg(Color::Yellow));
                    }
                    let (glyph, style) = tile_glyph(view.map.tile_at(position), view.hazard_tile);
                    Span::styled(glyph.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let title = format!(
        " Map {}x{} | {} ",
        dimensions.width, dimensions.height, view.frame.grid_position
    );
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(rows).block(block), area);
}

fn render_dialogue(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let text = match &view.frame.dialogue {
        Some(dialogue) => match dialogue.anchor {
            Some(anchor) => format!("& {}: {}", anchor, dialogue.content),
            None => dialogue.content.clone(),
        },
        None => String::new(),
    };
    let block = Block::default().borders(Borders::ALL).title(" Dialogue ");
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_error(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let text = view.frame.error.as_deref().unwrap_or_default();
    let block = Block::default().borders(Borders::ALL).title(" Error ");
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let focused = view.focus == Focus::Prompt;
    let border = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = if view.pending > 0 {
        format!(" Prompt (waiting for agent: {}) ", view.pending)
    } else {
        " Prompt ".to_string()
    };
    let cursor = if focused { "_" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);
    frame.render_widget(
        Paragraph::new(format!("{}{}", view.prompt, cursor)).block(block),
        area,
    );
}

fn render_hints(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let mut spans = vec![Span::styled(
        "Tab focus | arrows/WASD move | Enter submit | Esc clear | Ctrl-C quit",
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(status) = view.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status, Style::default().fg(Color::Magenta)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Grid cell nearest to the interpolated pixel position.
pub fn entity_cell(frame: &RenderFrame, rows: u32, tile_size: f32) -> Position {
    if tile_size <= 0.0 {
        return frame.grid_position;
    }
    let column = (frame.pixel.px / tile_size).round() as i32;
    let row_from_top = (frame.pixel.py / tile_size).round() as i32;
    Position::new(column, rows as i32 - 1 - row_from_top)
}

/// Glyph for the current sprite frame: `@` at rest, a direction arrow while
/// walking, alternating between two shapes per frame.
pub fn entity_glyph(frame: &FrameId, animations: &AnimationSet) -> char {
    if frame == animations.idle() {
        return '@';
    }
    for direction in CardinalDirection::ALL {
        let Some(index) = animations
            .cycle(direction)
            .and_then(|frames| frames.iter().position(|id| id == frame))
        else {
            continue;
        };
        let (even, odd) = match direction {
            CardinalDirection::North => ('▲', '△'),
            CardinalDirection::East => ('▶', '▷'),
            CardinalDirection::West => ('◀', '◁'),
            CardinalDirection::South => ('▼', '▽'),
        };
        return if index % 2 == 0 { even } else { odd };
    }
    '@'
}

fn tile_glyph(tile: Option<&str>, hazard_tile: &str) -> (char, Style) {
    match tile {
        Some(tile) if tile == hazard_tile => ('~', Style::default().fg(Color::Red)),
        Some(FLOOR_TILE) => (' ', Style::default()),
        Some(tile) if tile.starts_with('1') => ('.', Style::default().fg(Color::DarkGray)),
        Some(_) => ('#', Style::default().fg(Color::Gray)),
        None => (' ', Style::default()),
    }
}
