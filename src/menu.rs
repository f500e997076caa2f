use anyhow::Result;

use crate::geometry::Vector2;
use crate::term::Surface;

const MENU_MARK: &str = " * ";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Exit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
}

struct MenuItem {
    label: &'static str,
    action: MenuAction,
}

/// Vertical list of labelled actions with a cursor that wraps at both ends.
pub struct Menu {
    items: Vec<MenuItem>,
    cursor: usize,
}

impl Menu {
    /// `items` must not be empty.
    pub fn new(items: &[(&'static str, MenuAction)]) -> Self {
        debug_assert!(!items.is_empty(), "a menu needs at least one item");
        let items = items.iter().map(|&(label, action)| MenuItem { label, action }).collect();
        Menu { items, cursor: 0 }
    }

    pub fn move_cursor(&mut self, mv: CursorMove) {
        let len = self.items.len();
        self.cursor = match mv {
            CursorMove::Up => (self.cursor + len - 1) % len,
            CursorMove::Down => (self.cursor + 1) % len,
        };
    }

    pub fn current_selection(&self) -> &'static str {
        self.items[self.cursor].label
    }

    pub fn current_action(&self) -> MenuAction {
        self.items[self.cursor].action
    }

    /// Draws one item per row starting at `top_left`, the selected one marked.
    pub fn render(&self, surface: &mut dyn Surface, top_left: Vector2) -> Result<()> {
        let blank = " ".repeat(MENU_MARK.len());

        for (i, item) in self.items.iter().enumerate() {
            let mark = if i == self.cursor {MENU_MARK} else {blank.as_str()};
            let pos = Vector2::new(top_left.y + i as i32, top_left.x);
            surface.draw_text(pos, &format!("{}{}", mark, item.label))?;
        }

        Ok(())
    }
}

impl Default for Menu {
    fn default() -> Self {
        Menu::new(&[("Start", MenuAction::Start), ("Exit", MenuAction::Exit)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_item() {
        let menu = Menu::default();
        assert_eq!(menu.current_selection(), "Start");
        assert_eq!(menu.current_action(), MenuAction::Start);
    }

    #[test]
    fn cursor_moves_and_wraps() {
        let mut menu = Menu::default();
        menu.move_cursor(CursorMove::Down);
        assert_eq!(menu.current_selection(), "Exit");
        assert_eq!(menu.current_action(), MenuAction::Exit);

        menu.move_cursor(CursorMove::Down);
        assert_eq!(menu.current_selection(), "Start");

        menu.move_cursor(CursorMove::Up);
        assert_eq!(menu.current_selection(), "Exit");
    }

    #[test]
    fn single_item_menu_stays_put() {
        let mut menu = Menu::new(&[("Exit", MenuAction::Exit)]);
        menu.move_cursor(CursorMove::Up);
        menu.move_cursor(CursorMove::Down);
        assert_eq!(menu.current_selection(), "Exit");
    }
}
