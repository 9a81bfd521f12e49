//! Output seam between the battle engine and whatever draws it.
//!
//! The engine never renders anything itself. It pushes text, menu labels and
//! cursor positions through [`Presenter`] and decides pacing on its own, so a
//! terminal, a GUI or a test recorder can all sit behind the same calls.

use game_core::{Combatant, Level, Side};

/// Which selector widget a call refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    /// Two-entry action menu (Fight / Run).
    Action,
    /// 2x2 item grid.
    Item,
}

/// Values a HUD shows for one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub name: String,
    pub level: Level,
    pub hp: u32,
    pub max_hp: u32,
}

impl HudView {
    pub fn of(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name().to_string(),
            level: combatant.level(),
            hp: combatant.hp(),
            max_hp: combatant.max_hp(),
        }
    }
}

/// Sink for everything the player sees during a battle.
pub trait Presenter: Send {
    /// Shows a full line of narration. The engine waits for it to "type out".
    fn show_text(&mut self, text: &str);

    /// Moves the highlight of `selector` to `index`.
    fn set_highlighted(&mut self, selector: SelectorKind, index: usize);

    fn toggle_selector(&mut self, selector: SelectorKind, visible: bool);

    /// Labels for every inventory slot, `-` for empty ones.
    fn set_item_labels(&mut self, labels: &[String]);

    /// Detail line for the highlighted item (kind/magnitude and remaining uses).
    fn set_item_detail(&mut self, type_label: &str, uses_label: &str);

    fn set_action_labels(&mut self, first: &str, second: &str);

    /// Called after HP or level changes on `side`.
    fn refresh_hud(&mut self, _side: Side, _view: &HudView) {}
}
