//! Cursor navigation for the action menu and the item grid.

use game_core::INVENTORY_SLOTS;

use crate::api::InputEvent;

/// Entry of the two-item action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionChoice {
    Fight,
    Run,
}

/// Vertical two-entry menu. Up/Down move; Left/Right are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionMenu {
    cursor: usize,
}

impl ActionMenu {
    pub const ENTRIES: usize = 2;

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Applies a navigation event. Returns true if the cursor moved.
    pub fn navigate(&mut self, event: InputEvent) -> bool {
        let before = self.cursor;
        match event {
            InputEvent::Down if self.cursor + 1 < Self::ENTRIES => self.cursor += 1,
            InputEvent::Up if self.cursor > 0 => self.cursor -= 1,
            _ => {}
        }
        before != self.cursor
    }

    pub fn choice(&self) -> ActionChoice {
        if self.cursor == 0 {
            ActionChoice::Fight
        } else {
            ActionChoice::Run
        }
    }
}

/// 2x2 grid over the inventory slots, row-major.
///
/// Left/Right step by one, Up/Down step by a row; moves off the grid are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemGrid {
    cursor: usize,
}

impl ItemGrid {
    pub const COLUMNS: usize = 2;

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Applies a navigation event. Returns true if the cursor moved.
    pub fn navigate(&mut self, event: InputEvent) -> bool {
        let before = self.cursor;
        match event {
            InputEvent::Right if self.cursor + 1 < INVENTORY_SLOTS => self.cursor += 1,
            InputEvent::Left if self.cursor > 0 => self.cursor -= 1,
            InputEvent::Down if self.cursor + Self::COLUMNS < INVENTORY_SLOTS => {
                self.cursor += Self::COLUMNS
            }
            InputEvent::Up if self.cursor >= Self::COLUMNS => self.cursor -= Self::COLUMNS,
            _ => {}
        }
        before != self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InputEvent::*;

    #[test]
    fn action_menu_clamps() {
        let mut menu = ActionMenu::default();
        assert!(!menu.navigate(Up));
        assert_eq!(menu.choice(), ActionChoice::Fight);
        assert!(menu.navigate(Down));
        assert!(!menu.navigate(Down));
        assert_eq!(menu.choice(), ActionChoice::Run);
        assert!(!menu.navigate(Left));
    }

    #[test]
    fn item_grid_walks_rows_and_columns() {
        let mut grid = ItemGrid::default();
        assert!(grid.navigate(Right));
        assert_eq!(grid.cursor(), 1);
        assert!(grid.navigate(Down));
        assert_eq!(grid.cursor(), 3);
        assert!(!grid.navigate(Down));
        assert!(!grid.navigate(Right));
        assert!(grid.navigate(Up));
        assert_eq!(grid.cursor(), 1);
        assert!(grid.navigate(Left));
        assert!(!grid.navigate(Left));
        assert!(!grid.navigate(Up));
    }
}
