use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::{Renderer, ScoreManager};
use crate::game::{Occupant, Position, World};
use crate::metrics::GameMetrics;

/// Draws the grid as styled terminal text, one glyph per cell
#[derive(Debug, Clone)]
pub struct GridRenderer {
    cell_width: usize,
}

impl GridRenderer {
    /// `cell_width` is the number of terminal columns per cell (at least 1)
    pub fn new(cell_width: u16) -> Self {
        Self {
            cell_width: cell_width.max(1) as usize,
        }
    }

    fn cell(&self, glyph: char, style: Style) -> Span<'static> {
        let mut text = String::with_capacity(self.cell_width);
        text.push(glyph);
        text.extend(std::iter::repeat(' ').take(self.cell_width - 1));
        Span::styled(text, style)
    }
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Renderer for GridRenderer {
    type Frame = Text<'static>;

    fn render(&mut self, world: &World) -> Self::Frame {
        let size = world.grid_size();
        let head = world.snake_head_position();
        let mut lines = Vec::with_capacity(size);

        for y in 0..size {
            let mut spans = Vec::with_capacity(size);

            for x in 0..size {
                let pos = Position::new(x as i32, y as i32);

                let cell = match world.occupant_at(pos) {
                    Some(Occupant::SnakeSegment) if pos == head => self.cell(
                        '■',
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(Occupant::SnakeSegment) => {
                        self.cell('□', Style::default().fg(Color::Green))
                    }
                    Some(Occupant::Edible) => self.cell(
                        'O',
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Some(Occupant::Wall) => self.cell('#', Style::default().fg(Color::Gray)),
                    Some(Occupant::Empty) | None => {
                        self.cell('.', Style::default().fg(Color::DarkGray))
                    }
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Text::from(lines)
    }
}

/// Score and death counter line, remembering the best score seen
#[derive(Debug, Clone, Default)]
pub struct Scorecard {
    best: u32,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self) -> u32 {
        self.best
    }
}

impl ScoreManager for Scorecard {
    type Frame = Line<'static>;

    fn update(&mut self, score: u32, deaths: u32) -> Self::Frame {
        self.best = self.best.max(score);

        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Deaths: ", Style::default().fg(Color::Yellow)),
            Span::styled(deaths.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(self.best.to_string(), Style::default().fg(Color::White)),
        ])
    }
}

/// Lay out a full screen: scorecard, board (or game over panel), controls
pub fn draw_screen(
    frame: &mut Frame,
    board: &Text<'static>,
    scorecard: &Line<'static>,
    metrics: &GameMetrics,
    game_over: bool,
    controls: Line<'static>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    let header = Text::from(vec![
        scorecard.clone(),
        Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
    ]);
    frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), chunks[0]);

    let game_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(chunks[1])[1];

    if game_over {
        frame.render_widget(game_over_panel(metrics), game_area);
    } else {
        let grid = Paragraph::new(board.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center);
        frame.render_widget(grid, game_area);
    }

    frame.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center),
        chunks[2],
    );
}

fn game_over_panel(metrics: &GameMetrics) -> Paragraph<'static> {
    let text = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]),
    ];

    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, WallLayout, WorldConfig};

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_grid_glyphs() {
        let config = WorldConfig::new(4)
            .with_seed(1)
            .with_walls(WallLayout::Custom(vec![Position::new(3, 3)]));
        let segments = vec![Position::new(1, 1), Position::new(0, 1)];
        let mut world = World::from_snake(config, segments, Direction::Right).unwrap();
        world.place_edible(Position::new(3, 0));

        let text = GridRenderer::new(1).render(&world);
        let rows = plain(&text);

        assert_eq!(rows, vec!["...O", "□■..", "....", "...#"]);
    }

    #[test]
    fn test_cell_width_pads_glyphs() {
        let world = World::new(WorldConfig::new(3).with_seed(1).with_initial_length(1)).unwrap();
        let text = GridRenderer::new(3).render(&world);

        for row in plain(&text) {
            assert_eq!(row.chars().count(), 9);
        }
    }

    #[test]
    fn test_render_does_not_touch_world() {
        let world = World::new(WorldConfig::small().with_seed(5)).unwrap();
        let before: Vec<_> = world.occupied_cells().collect();

        GridRenderer::default().render(&world);

        let after: Vec<_> = world.occupied_cells().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_scorecard_tracks_best() {
        let mut scorecard = Scorecard::new();
        scorecard.update(4, 0);
        scorecard.update(2, 1);
        assert_eq!(scorecard.best(), 4);

        let line = scorecard.update(1, 2);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("Score: 1"));
        assert!(text.contains("Deaths: 2"));
        assert!(text.contains("Best: 4"));
    }
}
