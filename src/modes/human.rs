use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use std::time::Duration;
use tokio::time::interval;

use super::terminal::{restore_terminal, setup_terminal, Tui};
use crate::game::WorldConfig;
use crate::input::{InputHandler, InputSource, KeyAction, KeyboardInput};
use crate::metrics::GameMetrics;
use crate::render::{draw_screen, GridRenderer, Scorecard};
use crate::rl::Environment;

pub struct HumanMode {
    env: Environment<GridRenderer, Scorecard>,
    metrics: GameMetrics,
    input_handler: InputHandler,
    input: KeyboardInput,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: WorldConfig) -> Result<Self> {
        let renderer = GridRenderer::new(config.cell_size);
        let mut env = Environment::new(config, renderer, Scorecard::new())
            .context("Failed to create world")?;
        env.reset();
        env.render();

        Ok(Self {
            env,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            input: KeyboardInput::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at 8 Hz (125ms per tick)
        let mut tick_timer = interval(Duration::from_millis(125));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.env.is_game_over() {
                        self.update_game();
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let board = self.env.last_frame().cloned().unwrap_or_default();
                    let scorecard = self.env.last_scorecard().cloned().unwrap_or_default();
                    let game_over = self.env.is_game_over();
                    terminal.draw(|frame| {
                        draw_screen(frame, &board, &scorecard, &self.metrics, game_over, controls());
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Move(direction) => self.input.press(direction),
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        let direction = self.input.next_direction();
        self.env.perform_move(direction, true);

        let outcome = self.env.last_outcome();
        if outcome.game_over {
            self.metrics
                .on_game_over(self.env.world().score(), outcome.collision);
        }
    }

    fn reset_game(&mut self) {
        self.env.reset();
        self.env.render();
        self.metrics.on_game_start();
        self.input.clear();
    }
}

fn controls() -> Line<'static> {
    Line::from(vec![
        Span::styled("Controls: ", Style::default().fg(Color::Gray)),
        Span::styled("←↑↓→ / WASD", Style::default().fg(Color::Green)),
        Span::raw(" move  "),
        Span::styled("R", Style::default().fg(Color::Green)),
        Span::raw(" restart  "),
        Span::styled("Q", Style::default().fg(Color::Red)),
        Span::raw(" quit"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn mode() -> HumanMode {
        HumanMode::new(WorldConfig::small().with_seed(3)).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(!mode.env.is_game_over());
        assert_eq!(mode.env.world().score(), 0);
        assert!(mode.env.last_frame().is_some());
        assert!(mode.env.last_scorecard().is_some());
    }

    #[test]
    fn test_pending_press_drives_tick() {
        let mut mode = mode();
        let head = mode.env.world().snake_head_position();

        mode.input.press(Direction::Up);
        mode.update_game();

        assert_eq!(mode.env.world().heading(), Direction::Up);
        assert_eq!(mode.env.world().snake_head_position().y, head.y - 1);
    }

    #[test]
    fn test_game_over_recorded_once() {
        let mut mode = mode();
        for _ in 0..mode.env.world().grid_size() {
            if !mode.env.is_game_over() {
                mode.update_game();
            }
        }

        assert!(mode.env.is_game_over());
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.wall_deaths, 1);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        for _ in 0..mode.env.world().grid_size() {
            mode.update_game();
        }
        mode.input.press(Direction::Down);

        mode.reset_game();

        assert!(!mode.env.is_game_over());
        assert_eq!(mode.env.world().score(), 0);
        assert_eq!(mode.input.next_direction(), Direction::None);
    }
}
