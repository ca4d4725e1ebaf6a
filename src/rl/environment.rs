use tracing::debug;

use super::observation::{encode_state, EncodedState};
use super::reward::reward;
use crate::game::{Direction, TickOutcome, World, WorldConfig, WorldError};
use crate::render::{Headless, Renderer, ScoreManager};

/// Snake environment for agents and interactive loops
///
/// Wraps a [`World`] and sequences one move request into:
/// - a direction update and one world tick
/// - a score/death update on the [`ScoreManager`]
/// - an optional [`Renderer`] pass (read-only)
/// - the encoded state and reward of the post-tick world
pub struct Environment<R: Renderer = Headless, S: ScoreManager = Headless> {
    world: World,
    renderer: R,
    scorecard: S,
    auto_reset: bool,
    last_outcome: TickOutcome,
    last_frame: Option<R::Frame>,
    last_scorecard: Option<S::Frame>,
}

impl Environment {
    /// An environment with no presentation at all
    pub fn headless(config: WorldConfig) -> Result<Self, WorldError> {
        Self::new(config, Headless, Headless)
    }
}

impl<R: Renderer, S: ScoreManager> Environment<R, S> {
    pub fn new(config: WorldConfig, renderer: R, scorecard: S) -> Result<Self, WorldError> {
        Ok(Self::from_world(World::new(config)?, renderer, scorecard))
    }

    pub fn from_world(world: World, renderer: R, scorecard: S) -> Self {
        Self {
            world,
            renderer,
            scorecard,
            auto_reset: false,
            last_outcome: TickOutcome::default(),
            last_frame: None,
            last_scorecard: None,
        }
    }

    /// Reset the world on the move after a terminal tick
    ///
    /// The terminal tick itself still returns the pre-reset observation.
    pub fn with_auto_reset(mut self, auto_reset: bool) -> Self {
        self.auto_reset = auto_reset;
        self
    }

    /// Apply one move and return the resulting observation and reward
    pub fn perform_move(&mut self, mv: Direction, with_render: bool) -> (EncodedState, f64) {
        if self.auto_reset && self.world.is_game_over() {
            self.reset();
        }

        self.world.set_direction(mv);
        let outcome = self.world.update();
        self.last_outcome = outcome;

        if outcome.death_count_delta > 0 {
            debug!(
                deaths = self.world.deaths(),
                score = self.world.score(),
                "episode ended"
            );
        }

        self.last_scorecard = Some(
            self.scorecard
                .update(self.world.score(), self.world.deaths()),
        );
        if with_render {
            self.last_frame = Some(self.renderer.render(&self.world));
        }

        self.observe()
    }

    /// Start a new episode and return its first observation
    pub fn reset(&mut self) -> (EncodedState, f64) {
        self.world.reset();
        self.last_outcome = TickOutcome::default();
        self.last_scorecard = Some(
            self.scorecard
                .update(self.world.score(), self.world.deaths()),
        );
        self.observe()
    }

    /// Encoded state and reward of the current world without stepping
    pub fn observe(&self) -> (EncodedState, f64) {
        (encode_state(&self.world), reward(&self.world))
    }

    /// Render the current world outside of a move
    pub fn render(&mut self) -> Option<&R::Frame> {
        self.last_frame = Some(self.renderer.render(&self.world));
        self.last_frame.as_ref()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn last_outcome(&self) -> TickOutcome {
        self.last_outcome
    }

    pub fn last_frame(&self) -> Option<&R::Frame> {
        self.last_frame.as_ref()
    }

    pub fn last_scorecard(&self) -> Option<&S::Frame> {
        self.last_scorecard.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.world.is_game_over()
    }
}
