//! Queued steps of a running battle.
//!
//! The engine never blocks. Everything a battle does is expressed as a queue
//! of [`Op`]s; each tick pops at most one. Ops that branch push their
//! continuation to the front, so a nested sequence finishes before the rest of
//! the round resumes. Ending a battle clears whatever was still queued.

use std::collections::VecDeque;

use game_core::{BattleOutcome, BattleState, Item, Side};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    /// Show a line and hold it for its typing duration.
    Say(String),
    /// Short beat between lines.
    Pause,
    SetState(BattleState),
    /// Dead-on-arrival check and turn order, after the intro line.
    Opening,
    ShowActionChoice,
    AwaitAction,
    Round,
    EndRound,
    Move(Side),
    /// Consume the chosen player slot and narrate its use.
    UsePlayerItem(usize),
    ApplyPlayerItem(Item),
    ApplyEnemyItem(Item),
    Gain {
        side: Side,
        amount: f32,
        announce: bool,
    },
    VictoryHeal,
    Flee,
    End(BattleOutcome),
    Reward,
    AcceptDrop(Item),
    OfferReplacement(Item),
    Finalize(BattleOutcome),
}

#[derive(Debug, Default)]
pub(crate) struct Script {
    ops: VecDeque<Op>,
}

impl Script {
    pub fn pop(&mut self) -> Option<Op> {
        self.ops.pop_front()
    }

    pub fn push_back(&mut self, op: Op) {
        self.ops.push_back(op);
    }

    /// Schedules `ops` in order ahead of everything already queued.
    pub fn push_front(&mut self, ops: impl IntoIterator<Item = Op>) {
        let ops: Vec<Op> = ops.into_iter().collect();
        for op in ops.into_iter().rev() {
            self.ops.push_front(op);
        }
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}
