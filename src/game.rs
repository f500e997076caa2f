use std::time::Duration;

use anyhow::Result;
use log::{debug, info};
use rand::Rng;

use crate::apple::Apple;
use crate::geometry::{CHROME_ROWS, Direction, Vector2};
use crate::menu::Menu;
use crate::snake::Snake;
use crate::state::{Effect, GameState, transition};
use crate::term::{Input, Key, Surface};

pub const TICK: Duration = Duration::from_millis(100);
pub const TITLE: &str = "Snake";
pub const SPAWN_ORIGIN: Vector2 = Vector2::new(2, 2);

/// Gameplay policy switches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    /// Whether the snake may turn straight back onto its own body.
    pub allow_reversal: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Rules { allow_reversal: true }
    }
}

/// Snake and apple of the round in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Session {
    snake: Snake,
    apple: Apple,
}

enum StepOutcome {
    Moved,
    Ate,
    Collided,
}

pub struct SnakeGame<S, I, R> {
    surface: S,
    input: I,
    rng: R,
    rules: Rules,
    state: GameState,
    menu: Menu,
    session: Option<Session>,
}

impl<S: Surface, I: Input, R: Rng> SnakeGame<S, I, R> {
    pub fn new(surface: S, input: I, rng: R, rules: Rules) -> Self {
        SnakeGame {
            surface,
            input,
            rng,
            rules,
            state: GameState::Menu,
            menu: Menu::default(),
            session: None,
        }
    }

    /// Runs ticks until the game reaches `Exit`.
    pub fn run(&mut self) -> Result<()> {
        info!("Game started in {}", self.state);
        self.redraw(false)?;

        while self.state != GameState::Exit {
            self.tick()?;
        }

        info!("Game exited");
        Ok(())
    }

    /// One iteration: read a key (waiting at most one tick), move the state
    /// machine, then repaint.
    pub fn tick(&mut self) -> Result<()> {
        let key = self.input.poll(TICK)?;
        let stepped = self.dispatch(key)?;

        if self.state == GameState::GameOver {
            // Game over settles back to the menu within the same tick.
            self.dispatch(None)?;
        }

        self.redraw(stepped)
    }

    /// Returns whether a simulation step ran.
    fn dispatch(&mut self, key: Option<Key>) -> Result<bool> {
        let (next, effects) = transition(self.state, key, self.menu.current_action());
        if next != self.state {
            info!("{} -> {}", self.state, next);
        }
        self.state = next;

        let mut stepped = false;
        for effect in effects {
            match effect {
                Effect::MoveCursor(mv) => {
                    self.menu.move_cursor(mv);
                    debug!("Menu cursor on {}", self.menu.current_selection());
                }
                Effect::StartSession => self.start_session()?,
                Effect::EndSession => self.session = None,
                Effect::Steer(dir) => self.steer(dir),
                Effect::Step => {
                    stepped = true;
                    if let StepOutcome::Collided = self.step() {
                        self.state = GameState::GameOver;
                    }
                }
            }
        }

        Ok(stepped)
    }

    fn start_session(&mut self) -> Result<()> {
        let dims = self.surface.dimensions();
        self.session = Some(Session {
            snake: Snake::spawn(SPAWN_ORIGIN),
            apple: Apple::spawn_random(dims, &mut self.rng),
        });
        self.surface.clear_region(dims.playfield())
    }

    fn steer(&mut self, dir: Direction) {
        let rules = self.rules;
        if let Some(session) = self.session.as_mut() {
            if !rules.allow_reversal && session.snake.reverses(dir) {
                debug!("Ignored reversal to {:?}", dir);
                return;
            }
            debug!("Heading {:?} -> {:?}", session.snake.direction(), dir);
            session.snake.set_direction(dir);
        }
    }

    fn step(&mut self) -> StepOutcome {
        let dims = self.surface.dimensions();
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => return StepOutcome::Moved,
        };

        session.snake.advance(dims);

        if session.snake.check_self_collision() {
            info!("Game over: snake ran into itself at length {}", session.snake.len());
            return StepOutcome::Collided;
        }

        if session.snake.occupies(session.apple.position()) {
            session.snake.grow();
            session.apple.relocate(dims, &mut self.rng);
            debug!(
                "Apple eaten, length {}, next apple at {:?}",
                session.snake.len(),
                session.apple.position()
            );
            return StepOutcome::Ate;
        }

        StepOutcome::Moved
    }

    fn redraw(&mut self, stepped: bool) -> Result<()> {
        let playfield = self.surface.dimensions().playfield();

        match self.state {
            GameState::Menu => {
                self.surface.clear_region(playfield)?;
                self.menu.render(&mut self.surface, Vector2::new(CHROME_ROWS, 1))?;
            }
            // Starting, resuming and paused ticks keep the frame as it is.
            GameState::Playing | GameState::Paused if stepped => {
                self.surface.clear_region(playfield)?;
                if let Some(session) = &self.session {
                    for &pos in session.snake.segments() {
                        self.surface.draw_cell(pos, session.snake.glyph())?;
                    }
                    self.surface.draw_cell(session.apple.position(), session.apple.glyph())?;
                }
            }
            _ => {}
        }

        self.surface.draw_border()?;
        self.surface.draw_title(TITLE)?;
        self.surface.present()
    }
}
