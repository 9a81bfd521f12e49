//! Input seam: directional navigation plus confirm.

use std::collections::VecDeque;

use tokio::sync::mpsc;

/// Abstract key press the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Confirm,
}

/// Non-blocking source of input events.
///
/// The engine polls exactly once per tick; `None` means nothing was pressed.
pub trait InputSource: Send {
    fn poll(&mut self) -> Option<InputEvent>;
}

/// Replays a fixed sequence of events, one per poll.
///
/// Useful for demos and tests. Once exhausted it reports no input forever.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

/// Input fed from another task or thread through an unbounded channel.
///
/// Polling never blocks: an empty channel reads as "nothing pressed".
#[derive(Debug)]
pub struct ChannelInput {
    rx: mpsc::UnboundedReceiver<InputEvent>,
}

impl ChannelInput {
    /// Creates the input source and the sender that feeds it.
    pub fn channel() -> (mpsc::UnboundedSender<InputEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

impl InputSource for ChannelInput {
    fn poll(&mut self) -> Option<InputEvent> {
        self.rx.try_recv().ok()
    }
}

/// Input source that never produces an event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self) -> Option<InputEvent> {
        None
    }
}
