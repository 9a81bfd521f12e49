//! Line-oriented presenter that writes the battle to a terminal.
use std::io::{self, Write};

use game_core::{INVENTORY_SLOTS, Side};
use runtime::{HudView, Presenter, SelectorKind};

/// Renders narration, menus and HUD updates as plain lines.
///
/// Menus are redrawn whenever they are shown or the highlight moves. The
/// writer is generic so tests can capture output in a buffer.
pub struct TerminalPresenter<W: Write + Send> {
    out: W,
    action_labels: [String; 2],
    item_labels: Vec<String>,
    item_detail: Option<(String, String)>,
    action_cursor: usize,
    item_cursor: usize,
    action_visible: bool,
    item_visible: bool,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            action_labels: ["Fight".to_string(), "Run".to_string()],
            item_labels: vec!["-".to_string(); INVENTORY_SLOTS],
            item_detail: None,
            action_cursor: 0,
            item_cursor: 0,
            action_visible: false,
            item_visible: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::warn!(%err, "failed to write to terminal");
        }
    }

    fn draw_actions(&mut self) {
        let rendered = self
            .action_labels
            .iter()
            .enumerate()
            .map(|(index, label)| marked(label, index == self.action_cursor))
            .collect::<Vec<_>>()
            .join("  ");
        self.line(&rendered);
    }

    fn draw_items(&mut self) {
        let rows: Vec<String> = self
            .item_labels
            .chunks(2)
            .enumerate()
            .map(|(row, pair)| {
                pair.iter()
                    .enumerate()
                    .map(|(col, label)| {
                        format!("{:<22}", marked(label, row * 2 + col == self.item_cursor))
                    })
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect();
        for row in rows {
            self.line(&row);
        }
        if let Some((type_label, uses_label)) = self.item_detail.clone() {
            self.line(&format!("  {type_label} | {uses_label}"));
        }
    }
}

fn marked(label: &str, highlighted: bool) -> String {
    if highlighted {
        format!("> {label}")
    } else {
        format!("  {label}")
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn show_text(&mut self, text: &str) {
        self.line(text);
    }

    fn set_highlighted(&mut self, selector: SelectorKind, index: usize) {
        match selector {
            SelectorKind::Action => {
                self.action_cursor = index;
                if self.action_visible {
                    self.draw_actions();
                }
            }
            SelectorKind::Item => {
                self.item_cursor = index;
                if self.item_visible {
                    self.draw_items();
                }
            }
        }
    }

    fn toggle_selector(&mut self, selector: SelectorKind, visible: bool) {
        match selector {
            SelectorKind::Action => self.action_visible = visible,
            SelectorKind::Item => self.item_visible = visible,
        }
    }

    fn set_item_labels(&mut self, labels: &[String]) {
        self.item_labels = labels.to_vec();
    }

    fn set_item_detail(&mut self, type_label: &str, uses_label: &str) {
        self.item_detail = Some((type_label.to_string(), uses_label.to_string()));
    }

    fn set_action_labels(&mut self, first: &str, second: &str) {
        self.action_labels = [first.to_string(), second.to_string()];
    }

    fn refresh_hud(&mut self, side: Side, view: &HudView) {
        let tag = match side {
            Side::Player => "you",
            Side::Enemy => "foe",
        };
        self.line(&format!(
            "[{tag}] {} LVL {}  HP {}/{}",
            view.name,
            view.level.as_raw(),
            view.hp,
            view.max_hp
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Level;

    fn output(presenter: TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn highlight_redraws_visible_menu() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.set_highlighted(SelectorKind::Action, 1);
        presenter.toggle_selector(SelectorKind::Action, true);
        presenter.set_highlighted(SelectorKind::Action, 1);

        assert_eq!(output(presenter), "  Fight  > Run\n");
    }

    #[test]
    fn item_grid_renders_two_rows_and_detail() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.set_item_labels(&[
            "Dagger".to_string(),
            "-".to_string(),
            "Herb".to_string(),
            "-".to_string(),
        ]);
        presenter.set_item_detail("HEAL (+12 HP)", "1 USES");
        presenter.toggle_selector(SelectorKind::Item, true);
        presenter.set_highlighted(SelectorKind::Item, 2);

        let text = output(presenter);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("  Dagger"));
        assert!(lines[1].starts_with("> Herb"));
        assert_eq!(lines[2], "  HEAL (+12 HP) | 1 USES");
    }

    #[test]
    fn hud_shows_raw_level() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.refresh_hud(
            Side::Player,
            &HudView {
                name: "Wanderer".to_string(),
                level: Level::Debug,
                hp: 9999,
                max_hp: 9999,
            },
        );
        assert_eq!(output(presenter), "[you] Wanderer LVL -1  HP 9999/9999\n");
    }
}
