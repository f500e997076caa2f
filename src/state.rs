use std::fmt;

use crate::geometry::Direction;
use crate::menu::{CursorMove, MenuAction};
use crate::term::Key;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    GameOver,
    Exit,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Work requested by a transition, carried out by the game in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    MoveCursor(CursorMove),
    /// Fresh snake and apple, playfield wiped.
    StartSession,
    /// Snake and apple discarded.
    EndSession,
    Steer(Direction),
    /// One simulation step: advance, collision check, eating.
    Step,
}

/// Decides the next state from the current one, the key read this tick and
/// the action under the menu cursor. Keys a state does not know are ignored.
pub fn transition(
    state: GameState,
    key: Option<Key>,
    selection: MenuAction,
) -> (GameState, Vec<Effect>) {
    use self::GameState::*;

    if matches!(key, Some(Key::F1) | Some(Key::Interrupt)) {
        return (Exit, vec![]);
    }

    match state {
        Menu => match key {
            Some(Key::Up) => (Menu, vec![Effect::MoveCursor(CursorMove::Up)]),
            Some(Key::Down) => (Menu, vec![Effect::MoveCursor(CursorMove::Down)]),
            Some(Key::Enter) => match selection {
                MenuAction::Start => (Playing, vec![Effect::StartSession]),
                MenuAction::Exit => (Exit, vec![]),
            },
            _ => (Menu, vec![]),
        },

        // The step runs every playing tick, whatever the key.
        Playing => match key {
            Some(Key::Up) => (Playing, vec![Effect::Steer(Direction::Up), Effect::Step]),
            Some(Key::Down) => (Playing, vec![Effect::Steer(Direction::Down), Effect::Step]),
            Some(Key::Left) => (Playing, vec![Effect::Steer(Direction::Left), Effect::Step]),
            Some(Key::Right) => (Playing, vec![Effect::Steer(Direction::Right), Effect::Step]),
            Some(Key::Char('p')) => (Paused, vec![Effect::Step]),
            Some(Key::Char('q')) => (Menu, vec![Effect::EndSession]),
            _ => (Playing, vec![Effect::Step]),
        },

        Paused => match key {
            Some(Key::Char('r')) => (Playing, vec![]),
            Some(Key::Char('q')) => (Menu, vec![Effect::EndSession]),
            _ => (Paused, vec![]),
        },

        GameOver => (Menu, vec![Effect::EndSession]),

        Exit => (Exit, vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use super::GameState::*;

    const ALL_STATES: [GameState; 5] = [Menu, Playing, Paused, GameOver, Exit];

    fn on(state: GameState, key: Key) -> (GameState, Vec<Effect>) {
        transition(state, Some(key), MenuAction::Start)
    }

    #[test]
    fn f1_exits_from_anywhere() {
        for &state in ALL_STATES.iter() {
            assert_eq!(on(state, Key::F1), (Exit, vec![]));
            assert_eq!(on(state, Key::Interrupt), (Exit, vec![]));
        }
    }

    #[test]
    fn menu_navigation() {
        assert_eq!(on(Menu, Key::Up), (Menu, vec![Effect::MoveCursor(CursorMove::Up)]));
        assert_eq!(on(Menu, Key::Down), (Menu, vec![Effect::MoveCursor(CursorMove::Down)]));
        assert_eq!(
            transition(Menu, Some(Key::Enter), MenuAction::Start),
            (Playing, vec![Effect::StartSession])
        );
        assert_eq!(transition(Menu, Some(Key::Enter), MenuAction::Exit), (Exit, vec![]));
    }

    #[test]
    fn menu_ignores_other_keys() {
        assert_eq!(on(Menu, Key::Left), (Menu, vec![]));
        assert_eq!(on(Menu, Key::Char('p')), (Menu, vec![]));
        assert_eq!(transition(Menu, None, MenuAction::Start), (Menu, vec![]));
    }

    #[test]
    fn playing_steps_every_tick() {
        assert_eq!(transition(Playing, None, MenuAction::Start), (Playing, vec![Effect::Step]));
        assert_eq!(on(Playing, Key::Char('x')), (Playing, vec![Effect::Step]));
        assert_eq!(on(Playing, Key::Enter), (Playing, vec![Effect::Step]));
        assert_eq!(
            on(Playing, Key::Left),
            (Playing, vec![Effect::Steer(Direction::Left), Effect::Step])
        );
        assert_eq!(
            on(Playing, Key::Up),
            (Playing, vec![Effect::Steer(Direction::Up), Effect::Step])
        );
    }

    #[test]
    fn pause_and_quit() {
        assert_eq!(on(Playing, Key::Char('p')), (Paused, vec![Effect::Step]));
        assert_eq!(on(Playing, Key::Char('q')), (Menu, vec![Effect::EndSession]));
        assert_eq!(on(Paused, Key::Char('r')), (Playing, vec![]));
        assert_eq!(on(Paused, Key::Char('q')), (Menu, vec![Effect::EndSession]));
    }

    #[test]
    fn paused_is_frozen() {
        assert_eq!(transition(Paused, None, MenuAction::Start), (Paused, vec![]));
        assert_eq!(on(Paused, Key::Up), (Paused, vec![]));
        assert_eq!(on(Paused, Key::Char('p')), (Paused, vec![]));
    }

    #[test]
    fn game_over_falls_back_to_menu() {
        assert_eq!(transition(GameOver, None, MenuAction::Start), (Menu, vec![Effect::EndSession]));
    }
}
