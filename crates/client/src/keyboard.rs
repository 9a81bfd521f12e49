//! Keyboard input for the terminal client.
//!
//! The terminal is read line by line on a dedicated thread. Every character of
//! a line is one key press, and an empty line is a confirm, so `dd` followed by
//! Enter moves the cursor twice.
use std::io::BufRead;
use std::sync::Arc;
use std::thread;

use tokio::sync::{Notify, mpsc};

use runtime::InputEvent;

/// High-level outcome of one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the battle engine.
    Input(InputEvent),
    /// Exit the application.
    Quit,
    /// No meaningful command was produced.
    None,
}

/// Maps one key to an action. Bindings: WASD, HJKL, space or `e` to confirm, `q` to quit.
pub fn map_key(key: char) -> KeyAction {
    match key.to_ascii_lowercase() {
        'w' | 'k' => KeyAction::Input(InputEvent::Up),
        's' | 'j' => KeyAction::Input(InputEvent::Down),
        'a' | 'h' => KeyAction::Input(InputEvent::Left),
        'd' | 'l' => KeyAction::Input(InputEvent::Right),
        ' ' | 'e' | 'f' => KeyAction::Input(InputEvent::Confirm),
        'q' => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

/// Maps a full line; an empty line confirms.
pub fn map_line(line: &str) -> Vec<KeyAction> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return vec![KeyAction::Input(InputEvent::Confirm)];
    }
    line.chars()
        .map(map_key)
        .filter(|action| *action != KeyAction::None)
        .collect()
}

/// Starts the stdin reader thread.
///
/// Input events go to `events`. `quit` is notified on `q`, on end of input,
/// and on read errors.
pub fn spawn_stdin_reader(events: mpsc::UnboundedSender<InputEvent>, quit: Arc<Notify>) {
    let spawned = thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        tracing::warn!(%err, "stdin read failed");
                        break;
                    }
                };
                for action in map_line(&line) {
                    match action {
                        KeyAction::Input(event) => {
                            if events.send(event).is_err() {
                                return;
                            }
                        }
                        KeyAction::Quit => {
                            quit.notify_one();
                            return;
                        }
                        KeyAction::None => {}
                    }
                }
            }
            tracing::info!("stdin closed");
            quit.notify_one();
        });

    if let Err(err) = spawned {
        tracing::error!(%err, "failed to spawn stdin reader");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_navigation() {
        assert_eq!(map_key('W'), KeyAction::Input(InputEvent::Up));
        assert_eq!(map_key('j'), KeyAction::Input(InputEvent::Down));
        assert_eq!(map_key('q'), KeyAction::Quit);
        assert_eq!(map_key('x'), KeyAction::None);
    }

    #[test]
    fn empty_line_confirms() {
        assert_eq!(map_line("\n"), vec![KeyAction::Input(InputEvent::Confirm)]);
    }

    #[test]
    fn line_expands_to_each_key() {
        assert_eq!(
            map_line("dx s"),
            vec![
                KeyAction::Input(InputEvent::Right),
                KeyAction::Input(InputEvent::Confirm),
                KeyAction::Input(InputEvent::Down),
            ]
        );
    }
}
