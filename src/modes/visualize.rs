//! Watch mode: a trained agent plays greedily in the terminal
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Reset episode
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures::StreamExt;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::time::Duration;
use tokio::time::{interval, Interval};

use super::terminal::{restore_terminal, setup_terminal, Tui};
use crate::game::WorldConfig;
use crate::metrics::GameMetrics;
use crate::render::{draw_screen, GridRenderer, Scorecard};
use crate::rl::{EncodedState, Environment, QLearningAgent};

/// Visualization speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationSpeed {
    /// Slow: 2 Hz (500ms per step)
    Slow,
    /// Normal: 8 Hz (125ms per step), same as human mode
    Normal,
    /// Fast: 20 Hz (50ms per step)
    Fast,
    /// Very Fast: 60 Hz (16ms per step)
    VeryFast,
}

impl VisualizationSpeed {
    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }
}

/// Watch mode for a trained agent
pub struct VisualizeMode {
    agent: QLearningAgent,
    env: Environment<GridRenderer, Scorecard>,
    state: EncodedState,
    metrics: GameMetrics,
    should_quit: bool,
    paused: bool,
    speed: VisualizationSpeed,
    episode_count: usize,
}

impl VisualizeMode {
    pub fn new(agent: QLearningAgent, config: WorldConfig) -> Result<Self> {
        let renderer = GridRenderer::new(config.cell_size);
        let mut env = Environment::new(config, renderer, Scorecard::new())
            .context("Failed to create world")?;
        let (state, _) = env.reset();
        env.render();

        Ok(Self {
            agent,
            env,
            state,
            metrics: GameMetrics::new(),
            should_quit: false,
            paused: false,
            speed: VisualizationSpeed::Normal,
            episode_count: 0,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.run_visualization_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_visualization_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks based on speed
        let mut tick_timer = interval(self.speed.tick_interval());

        // Render at 30 FPS
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.tick();
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let board = self.env.last_frame().cloned().unwrap_or_default();
                    let scorecard = self.env.last_scorecard().cloned().unwrap_or_default();
                    let status = self.status_line();
                    terminal.draw(|frame| {
                        draw_screen(frame, &board, &scorecard, &self.metrics, false, status);
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

    /// One agent move, or a fresh episode after a terminal tick
    fn tick(&mut self) {
        if self.env.is_game_over() {
            self.restart_episode();
            return;
        }

        let action = self.agent.greedy_action(&self.state);
        let (state, _reward) = self.env.perform_move(action, true);
        self.state = state;

        let outcome = self.env.last_outcome();
        if outcome.game_over {
            self.metrics
                .on_game_over(self.env.world().score(), outcome.collision);
        }
    }

    fn restart_episode(&mut self) {
        let (state, _) = self.env.reset();
        self.state = state;
        self.env.render();
        self.metrics.on_game_start();
        self.episode_count += 1;
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            if let Some(speed) = self.handle_key(key.code) {
                self.change_speed(speed, tick_timer);
            }
        }
    }

    /// Apply a key press; returns the requested speed, if any
    fn handle_key(&mut self, code: KeyCode) -> Option<VisualizationSpeed> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart_episode(),
            KeyCode::Char('1') => return Some(VisualizationSpeed::Slow),
            KeyCode::Char('2') => return Some(VisualizationSpeed::Normal),
            KeyCode::Char('3') => return Some(VisualizationSpeed::Fast),
            KeyCode::Char('4') => return Some(VisualizationSpeed::VeryFast),
            _ => {}
        }
        None
    }

    fn change_speed(&mut self, new_speed: VisualizationSpeed, tick_timer: &mut Interval) {
        self.speed = new_speed;
        *tick_timer = interval(self.speed.tick_interval());
    }

    fn status_line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled("WATCH ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled("Episode: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{}  ", self.episode_count + 1)),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{}  ", self.speed.as_str())),
        ];
        if self.paused {
            spans.push(Span::styled(
                "PAUSED  ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::styled(
            "Space pause  1-4 speed  R reset  Q quit",
            Style::default().fg(Color::Gray),
        ));
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::QLearningConfig;

    fn mode() -> VisualizeMode {
        let agent = QLearningAgent::new(QLearningConfig {
            seed: Some(4),
            ..Default::default()
        });
        VisualizeMode::new(agent, WorldConfig::small().with_seed(4)).unwrap()
    }

    #[test]
    fn test_visualization_speed() {
        assert_eq!(VisualizationSpeed::Slow.tick_interval(), Duration::from_millis(500));
        assert_eq!(VisualizationSpeed::Normal.tick_interval(), Duration::from_millis(125));
        assert_eq!(VisualizationSpeed::Fast.tick_interval(), Duration::from_millis(50));
        assert_eq!(VisualizationSpeed::VeryFast.tick_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_visualize_mode_creation() {
        let mode = mode();
        assert_eq!(mode.episode_count, 0);
        assert!(!mode.paused);
        assert_eq!(mode.speed, VisualizationSpeed::Normal);
        assert!(mode.env.last_frame().is_some());
    }

    #[test]
    fn test_tick_follows_greedy_agent() {
        let mut mode = mode();
        // An untrained table breaks ties towards Up
        let head = mode.env.world().snake_head_position();

        mode.tick();

        assert_eq!(mode.env.world().snake_head_position().y, head.y - 1);
        assert_eq!(mode.state, mode.env.observe().0);
    }

    #[test]
    fn test_terminal_tick_restarts_episode() {
        let mut mode = mode();
        while !mode.env.is_game_over() {
            mode.tick();
        }
        assert_eq!(mode.metrics.games_played, 1);

        mode.tick();

        assert!(!mode.env.is_game_over());
        assert_eq!(mode.episode_count, 1);
    }

    #[test]
    fn test_keys_accept_either_case() {
        let mut mode = mode();
        mode.tick();

        assert_eq!(mode.handle_key(KeyCode::Char('R')), None);
        assert_eq!(mode.episode_count, 1);
        assert_eq!(mode.env.world().steps(), 0);

        mode.handle_key(KeyCode::Char('r'));
        assert_eq!(mode.episode_count, 2);

        mode.handle_key(KeyCode::Char(' '));
        assert!(mode.paused);

        assert_eq!(
            mode.handle_key(KeyCode::Char('3')),
            Some(VisualizationSpeed::Fast)
        );

        mode.handle_key(KeyCode::Char('Q'));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_status_line_shows_pause() {
        let mut mode = mode();
        mode.paused = true;
        let text: String = mode
            .status_line()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.contains("PAUSED"));
        assert!(text.contains("Normal"));
    }
}
