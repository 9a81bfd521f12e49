//! Battle state machine.
//!
//! [`BattleEngine`] runs one battle at a time between the provider's player
//! and a freshly spawned enemy. The host calls [`BattleEngine::tick`] once per
//! frame; each call polls input once, advances any pending text or delay, and
//! otherwise executes at most one queued [`Op`]. Nothing blocks: waiting for
//! text to type out, for a menu choice, or for the reward timeout is all
//! expressed as a [`Wait`] the next tick resumes from.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use game_core::{
    BattleConfig, BattleOutcome, BattleRng, BattleState, Combatant, CombatantKind, INVENTORY_SLOTS,
    Item, ItemKind, Modifier, RollRange, Side, TurnOrder,
};

use crate::api::{
    BattleError, CollaboratorKind, CombatantProvider, HudView, InputEvent, InputSource, Presenter,
    Result, SelectorKind, report,
};
use crate::events::{BattleEvent, Event, EventBus, NarrationEvent, Topic};
use crate::providers::{EnemyPolicy, StdBattleRng, ThresholdPolicy};

use super::experience::{as_percent, enemy_turn_award, player_award};
use super::script::{Op, Script};
use super::selection::{ActionChoice, ActionMenu, ItemGrid};

/// Result of one [`BattleEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// No battle is running.
    Idle,
    /// Suspended on text, a delay, or player input.
    Waiting(BattleState),
    /// Executed one step.
    Advanced(BattleState),
    /// The battle ended during this tick.
    Finished {
        outcome: BattleOutcome,
        /// Set on a defeat under permadeath: the host should shut down.
        terminate: bool,
    },
}

impl StepResult {
    pub fn is_finished(&self) -> bool {
        matches!(self, StepResult::Finished { .. })
    }

    pub fn should_terminate(&self) -> bool {
        matches!(self, StepResult::Finished { terminate: true, .. })
    }
}

/// Input the engine is currently blocked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Fight or Run.
    Action,
    /// Pick an item to use.
    Item,
    /// Pick a slot to overwrite with the dropped item.
    Reward,
}

#[derive(Debug, Clone, PartialEq)]
enum Wait {
    Ready,
    Timer(Duration),
    Action,
    Item,
    Reward { drop: Item, remaining: Duration },
}

/// Turn-based battle coordinator.
///
/// Build with [`BattleEngine::builder`]. The engine owns its collaborators;
/// the player lives in the [`CombatantProvider`] and persists across battles.
pub struct BattleEngine {
    config: BattleConfig,
    range: RollRange,
    presenter: Box<dyn Presenter>,
    input: Box<dyn InputSource>,
    provider: Box<dyn CombatantProvider>,
    policy: Box<dyn EnemyPolicy>,
    rng: Box<dyn BattleRng + Send>,
    events: EventBus,

    state: BattleState,
    in_progress: bool,
    ending: bool,
    enemy: Option<Combatant>,
    order: TurnOrder,
    script: Script,
    wait: Wait,
    action_menu: ActionMenu,
    item_grid: ItemGrid,
    last_outcome: Option<BattleOutcome>,
}

impl BattleEngine {
    /// Create a new engine builder
    pub fn builder() -> BattleEngineBuilder {
        BattleEngineBuilder::new()
    }

    // ===== queries =====

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn player(&self) -> &Combatant {
        self.provider.player()
    }

    pub fn player_mut(&mut self) -> &mut Combatant {
        self.provider.player_mut()
    }

    /// The enemy of the running battle.
    pub fn enemy(&self) -> Option<&Combatant> {
        self.enemy.as_ref()
    }

    pub fn turn_order(&self) -> TurnOrder {
        self.order
    }

    /// Outcome of the most recently finished battle.
    pub fn last_outcome(&self) -> Option<BattleOutcome> {
        self.last_outcome
    }

    /// Input the engine is blocked on, if any.
    pub fn prompt(&self) -> Option<Prompt> {
        match self.wait {
            Wait::Action => Some(Prompt::Action),
            Wait::Item => Some(Prompt::Item),
            Wait::Reward { .. } => Some(Prompt::Reward),
            Wait::Ready | Wait::Timer(_) => None,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    // ===== lifecycle =====

    /// Spawns an enemy and queues the opening of a battle.
    ///
    /// Rejected while another battle is running.
    pub fn start_battle(&mut self) -> Result<()> {
        if self.in_progress {
            let err = BattleError::BattleInProgress;
            report(&err, "cannot start a new battle");
            return Err(err);
        }

        let player_level = self.provider.player().level();
        let Some(enemy) = self.provider.spawn_enemy(player_level, self.rng.as_mut()) else {
            let err = BattleError::NoEnemy;
            report(&err, "combatant provider returned no enemy");
            return Err(err);
        };

        let kind = match enemy.kind() {
            CombatantKind::Enemy(kind) => kind.to_string(),
            CombatantKind::Player => "Stranger".to_string(),
        };
        let intro = format!("The {}: {} appeared!", kind, enemy.name());
        info!(enemy = %enemy.name(), level = %enemy.level(), "battle started");
        self.events.publish(Event::Battle(BattleEvent::Started {
            enemy: enemy.name().to_string(),
            enemy_level: enemy.level(),
        }));

        self.enemy = Some(enemy);
        self.in_progress = true;
        self.ending = false;
        self.script.clear();
        self.wait = Wait::Ready;
        self.action_menu.reset();
        self.item_grid.reset();
        self.set_state(BattleState::Start);
        self.refresh_hud(Side::Player);
        self.refresh_hud(Side::Enemy);

        self.script.push_back(Op::Say(intro));
        self.script.push_back(Op::Pause);
        self.script.push_back(Op::Opening);
        Ok(())
    }

    /// Ends the running battle as fled on the next tick, dropping any pending input.
    pub fn abandon(&mut self) -> Result<()> {
        if !self.in_progress {
            let err = BattleError::NoBattle;
            report(&err, "nothing to abandon");
            return Err(err);
        }
        info!(state = %self.state, "battle abandoned by host");
        self.presenter.toggle_selector(SelectorKind::Action, false);
        self.presenter.toggle_selector(SelectorKind::Item, false);
        self.script.clear();
        self.wait = Wait::Ready;
        self.ending = false;
        self.script.push_back(Op::End(BattleOutcome::Fled));
        Ok(())
    }

    /// Advances the battle by one tick of `dt` wall time.
    pub fn tick(&mut self, dt: Duration) -> StepResult {
        let input = self.input.poll();

        if !self.in_progress {
            return StepResult::Idle;
        }

        match &mut self.wait {
            Wait::Ready => {}
            Wait::Timer(remaining) => {
                if *remaining > dt {
                    *remaining -= dt;
                    return StepResult::Waiting(self.state);
                }
                self.wait = Wait::Ready;
            }
            Wait::Action => return self.on_action_input(input),
            Wait::Item => return self.on_item_input(input),
            Wait::Reward { .. } => return self.on_reward_input(input, dt),
        }

        let Some(op) = self.script.pop() else {
            warn!(state = %self.state, "battle stalled with no queued steps; ending as fled");
            self.script.push_back(Op::End(BattleOutcome::Fled));
            return StepResult::Advanced(self.state);
        };

        if let Some(finished) = self.execute(op) {
            return finished;
        }
        match self.wait {
            Wait::Ready => StepResult::Advanced(self.state),
            _ => StepResult::Waiting(self.state),
        }
    }

    // ===== input handling =====

    fn on_action_input(&mut self, input: Option<InputEvent>) -> StepResult {
        match input {
            Some(InputEvent::Confirm) => {
                self.presenter.toggle_selector(SelectorKind::Action, false);
                self.wait = Wait::Ready;
                match self.action_menu.choice() {
                    ActionChoice::Fight => self.script.push_front([Op::Round]),
                    ActionChoice::Run => self.script.push_front([Op::Flee]),
                }
                StepResult::Advanced(self.state)
            }
            Some(event) => {
                if self.action_menu.navigate(event) {
                    self.presenter
                        .set_highlighted(SelectorKind::Action, self.action_menu.cursor());
                }
                StepResult::Waiting(self.state)
            }
            None => StepResult::Waiting(self.state),
        }
    }

    fn on_item_input(&mut self, input: Option<InputEvent>) -> StepResult {
        match input {
            Some(InputEvent::Confirm) => {
                let slot = self.item_grid.cursor();
                if self.provider.player().inventory().get(slot).is_none() {
                    warn!(slot, "selected an empty inventory slot; ignoring");
                    return StepResult::Waiting(self.state);
                }
                self.presenter.toggle_selector(SelectorKind::Item, false);
                self.wait = Wait::Ready;
                self.set_state(BattleState::Busy);
                self.script.push_front([Op::UsePlayerItem(slot)]);
                StepResult::Advanced(self.state)
            }
            Some(event) => {
                if self.item_grid.navigate(event) {
                    self.show_item_cursor();
                }
                StepResult::Waiting(self.state)
            }
            None => StepResult::Waiting(self.state),
        }
    }

    fn on_reward_input(&mut self, input: Option<InputEvent>, dt: Duration) -> StepResult {
        let Wait::Reward { drop, remaining } = &mut self.wait else {
            return StepResult::Waiting(self.state);
        };
        let drop = drop.clone();
        let expired = *remaining <= dt;
        *remaining = remaining.saturating_sub(dt);

        match input {
            Some(InputEvent::Confirm) => {
                let slot = self.item_grid.cursor();
                self.wait = Wait::Ready;
                self.presenter.toggle_selector(SelectorKind::Item, false);
                match self.provider.player_mut().inventory_mut().replace(slot, drop.clone()) {
                    Ok(previous) => {
                        info!(slot, item = %drop, previous = ?previous.map(|i| i.name), "reward replaced item");
                    }
                    Err(err) => {
                        if !report(&err, "could not place reward") {
                            self.abort(BattleOutcome::Victory);
                            return StepResult::Advanced(self.state);
                        }
                    }
                }
                self.script.push_front([
                    Op::Say(format!("Replaced item with {}", drop.name)),
                    Op::Finalize(BattleOutcome::Victory),
                ]);
                return StepResult::Advanced(self.state);
            }
            Some(event) => {
                if self.item_grid.navigate(event) {
                    self.show_item_cursor();
                }
            }
            None => {}
        }

        if !expired {
            return StepResult::Waiting(self.state);
        }

        info!(item = %drop, "reward choice timed out; keeping inventory");
        self.wait = Wait::Ready;
        self.presenter.toggle_selector(SelectorKind::Item, false);
        let player = self.provider.player().name().to_string();
        self.script.push_front([
            Op::Say(format!("{} left {} behind.", player, drop.name)),
            Op::Finalize(BattleOutcome::Victory),
        ]);
        StepResult::Advanced(self.state)
    }

    // ===== step execution =====

    /// Runs one op. Returns `Some` only when the battle finished.
    fn execute(&mut self, op: Op) -> Option<StepResult> {
        match op {
            Op::Say(text) => self.say(text),
            Op::Pause => self.hold(self.config.pacing.dialog_delay()),
            Op::SetState(state) => self.set_state(state),
            Op::Opening => self.opening(),
            Op::ShowActionChoice => self.show_action_choice(),
            Op::AwaitAction => self.wait = Wait::Action,
            Op::Round => self.round(),
            Op::EndRound => {
                self.order.flip();
                debug!(next_first = ?self.order.first(), "round over; priority flipped");
                self.script.push_front([Op::ShowActionChoice]);
            }
            Op::Move(Side::Player) => self.player_move(),
            Op::Move(Side::Enemy) => self.enemy_move(),
            Op::UsePlayerItem(slot) => self.use_player_item(slot),
            Op::ApplyPlayerItem(item) => self.apply_player_item(item),
            Op::ApplyEnemyItem(item) => self.apply_enemy_item(item),
            Op::Gain {
                side,
                amount,
                announce,
            } => self.gain(side, amount, announce),
            Op::VictoryHeal => self.victory_heal(),
            Op::Flee => self.flee(),
            Op::End(outcome) => self.end(outcome),
            Op::Reward => self.reward(),
            Op::AcceptDrop(item) => self.accept_drop(item),
            Op::OfferReplacement(item) => self.offer_replacement(item),
            Op::Finalize(outcome) => return Some(self.finalize(outcome)),
        }
        None
    }

    fn say(&mut self, text: String) {
        self.presenter.show_text(&text);
        let hold = self.config.pacing.typing_duration(&text);
        self.events
            .publish(Event::Narration(NarrationEvent { text }));
        self.hold(hold);
    }

    fn hold(&mut self, duration: Duration) {
        if !duration.is_zero() {
            self.wait = Wait::Timer(duration);
        }
    }

    fn opening(&mut self) {
        let player = self.provider.player();
        if player.is_defeated() {
            info!(player = %player.name(), "player entered battle with no health");
            let line = format!("{} is dead! Are they a ghost?", player.name());
            self.script
                .push_front([Op::Say(line), Op::End(BattleOutcome::Defeat)]);
            return;
        }

        let Some(enemy) = self.enemy.as_ref() else {
            return;
        };
        self.order = TurnOrder::new(player, enemy);
        debug!(player_first = self.order.player_first(), "turn order determined");
        self.script.push_front([Op::ShowActionChoice]);
    }

    fn show_action_choice(&mut self) {
        self.set_state(BattleState::PlayerAction);
        self.presenter.set_action_labels("Fight", "Run");
        self.presenter.toggle_selector(SelectorKind::Item, false);
        self.presenter.toggle_selector(SelectorKind::Action, true);
        self.action_menu.reset();
        self.presenter
            .set_highlighted(SelectorKind::Action, self.action_menu.cursor());
        self.script.push_front([
            Op::Say("Choose your action:".to_string()),
            Op::AwaitAction,
        ]);
    }

    fn round(&mut self) {
        self.set_state(BattleState::Busy);
        self.purge_exhausted();
        let first = self.order.first();
        let second = self.order.second();
        self.script.push_front([
            Op::Say(format!("{} goes first!", self.side_name(first))),
            Op::Move(first),
            Op::Pause,
            Op::Say(format!("{} goes next!", self.side_name(second))),
            Op::Move(second),
            Op::Pause,
            Op::EndRound,
        ]);
    }

    fn player_move(&mut self) {
        let player = self.provider.player();
        if player.is_defeated() {
            self.script.push_front([Op::End(BattleOutcome::Defeat)]);
            return;
        }

        if player.inventory().is_empty() {
            let enemy_has_items = self
                .enemy
                .as_ref()
                .is_some_and(|enemy| !enemy.inventory().is_empty());
            if !enemy_has_items {
                info!("neither side has items left; ending the battle");
                self.script.push_front([
                    Op::Say("Neither side has anything left to use!".to_string()),
                    Op::End(BattleOutcome::Fled),
                ]);
                return;
            }

            let line = format!("{}'s Inventory is empty.. Skipping turn!!", player.name());
            self.script.push_front([
                Op::Say(line),
                Op::Move(Side::Enemy),
                Op::Move(Side::Player),
            ]);
            return;
        }

        self.set_state(BattleState::PlayerMove);
        self.presenter.toggle_selector(SelectorKind::Action, false);
        self.presenter.toggle_selector(SelectorKind::Item, true);
        self.item_grid.reset();
        self.show_item_labels();
        self.show_item_cursor();
        self.wait = Wait::Item;
    }

    fn use_player_item(&mut self, slot: usize) {
        if let Some(outcome) = self.decided_outcome() {
            self.script.push_front([Op::End(outcome)]);
            return;
        }

        let item = match self.provider.player_mut().use_item(slot) {
            Ok(item) => item,
            Err(err) => {
                if !report(&err, "player item could not be used") {
                    self.abort(BattleOutcome::Fled);
                }
                return;
            }
        };
        let player = self.provider.player();
        let line = format!(
            "{} used {}! {}",
            player.name(),
            item.name,
            item.type_label(player.level())
        );
        debug!(item = %item, slot, "player used item");
        self.script
            .push_front([Op::Say(line), Op::Pause, Op::ApplyPlayerItem(item)]);
    }

    fn apply_player_item(&mut self, item: Item) {
        let table = self.config.experience.clone();
        let player_name = self.provider.player().name().to_string();
        let mut ops = Vec::new();

        match item.kind() {
            ItemKind::Attack => {
                let Some(enemy) = self.enemy.as_mut() else {
                    return;
                };
                let before = enemy.hp();
                let defeated =
                    enemy.take_damage(&item, self.provider.player(), self.range, self.rng.as_mut());
                let damage = before - enemy.hp();
                ops.push(Op::Say(format!(
                    "{} took {} damage! {} HP remaining.",
                    enemy.name(),
                    damage,
                    enemy.hp()
                )));
                let enemy_name = enemy.name().to_string();
                self.refresh_hud(Side::Enemy);

                let award = player_award(&table, ItemKind::Attack, defeated);
                if defeated {
                    info!(enemy = %enemy_name, damage, "enemy defeated");
                    ops.extend([
                        Op::Gain {
                            side: Side::Player,
                            amount: award.announced,
                            announce: true,
                        },
                        Op::Say(format!("{} was defeated!", enemy_name)),
                        Op::VictoryHeal,
                        Op::End(BattleOutcome::Victory),
                    ]);
                    self.script.push_front(ops);
                    return;
                }
                ops.push(Op::Gain {
                    side: Side::Player,
                    amount: award.announced,
                    announce: true,
                });
            }
            ItemKind::Recovery => {
                let award = player_award(&table, ItemKind::Recovery, false);
                self.gain(Side::Player, award.silent, false);

                let player = self.provider.player_mut();
                let modifier = item.modifier(player.level());
                let healed = player.heal(modifier, self.range, self.rng.as_mut());
                ops.push(Op::Say(format!(
                    "{} healed {} HP! {} HP remaining.",
                    player_name,
                    healed,
                    player.hp()
                )));
                self.refresh_hud(Side::Player);
                ops.push(Op::Gain {
                    side: Side::Player,
                    amount: award.announced,
                    announce: true,
                });
            }
            ItemKind::Defense => {
                let award = player_award(&table, ItemKind::Defense, false);
                self.gain(Side::Player, award.silent, false);

                let player = self.provider.player_mut();
                let modifier = item.modifier(player.level());
                let before = player.defense();
                let total = player.add_defense(modifier, self.range, self.rng.as_mut());
                ops.push(Op::Say(format!(
                    "{}'s defense increased by {} DEF! They now have {} Total DEF.",
                    player_name,
                    total.saturating_sub(before),
                    total
                )));
                ops.push(Op::Gain {
                    side: Side::Player,
                    amount: award.announced,
                    announce: true,
                });
            }
        }

        ops.extend([Op::Pause, Op::SetState(BattleState::Busy)]);
        self.script.push_front(ops);
    }

    fn enemy_move(&mut self) {
        if let Some(outcome) = self.decided_outcome() {
            self.script.push_front([Op::End(outcome)]);
            return;
        }
        self.set_state(BattleState::EnemyMove);

        let Some(enemy) = self.enemy.as_mut() else {
            return;
        };
        let used = match self.policy.choose(enemy, self.rng.as_mut()) {
            Some(slot) => enemy.use_item(slot).map(Some),
            None => Ok(None),
        };
        let chosen = match used {
            Ok(chosen) => chosen,
            Err(err) => {
                if !report(&err, "enemy item could not be used") {
                    self.abort(BattleOutcome::Fled);
                    return;
                }
                None
            }
        };
        let Some(enemy) = self.enemy.as_ref() else {
            return;
        };

        match chosen {
            Some(item) => {
                let line = format!(
                    "{} used {}! {}",
                    enemy.name(),
                    item.name,
                    item.type_label(enemy.level())
                );
                debug!(enemy = %enemy.name(), item = %item, "enemy used item");
                self.script
                    .push_front([Op::Say(line), Op::Pause, Op::ApplyEnemyItem(item)]);
            }
            None => {
                let line = format!("{} has nothing left to use!", enemy.name());
                let (enemy_exp, player_exp) = enemy_turn_award(&self.config.experience, None);
                self.script.push_front([
                    Op::Say(line),
                    Op::Gain {
                        side: Side::Player,
                        amount: player_exp,
                        announce: false,
                    },
                    Op::Gain {
                        side: Side::Enemy,
                        amount: enemy_exp,
                        announce: true,
                    },
                    Op::Pause,
                    Op::SetState(BattleState::Busy),
                ]);
            }
        }
    }

    fn apply_enemy_item(&mut self, item: Item) {
        let (enemy_exp, player_exp) =
            enemy_turn_award(&self.config.experience, Some(item.kind()));
        let Some(enemy) = self.enemy.as_mut() else {
            return;
        };
        let mut ops = Vec::new();

        match item.kind() {
            ItemKind::Attack => {
                let player = self.provider.player_mut();
                let before = player.hp();
                let defeated = player.take_damage(&item, enemy, self.range, self.rng.as_mut());
                ops.push(Op::Say(format!(
                    "{} took {} damage! {} HP remaining.",
                    player.name(),
                    before - player.hp(),
                    player.hp()
                )));
                self.refresh_hud(Side::Player);
                if defeated {
                    ops.push(Op::End(BattleOutcome::Defeat));
                    self.script.push_front(ops);
                    return;
                }
            }
            ItemKind::Recovery => {
                let modifier = item.modifier(enemy.level());
                let healed = enemy.heal(modifier, self.range, self.rng.as_mut());
                ops.push(Op::Say(format!(
                    "{} healed {} HP! {} HP remaining.",
                    enemy.name(),
                    healed,
                    enemy.hp()
                )));
                self.refresh_hud(Side::Enemy);
            }
            ItemKind::Defense => {
                let modifier = item.modifier(enemy.level());
                let before = enemy.defense();
                let total = enemy.add_defense(modifier, self.range, self.rng.as_mut());
                ops.push(Op::Say(format!(
                    "{}'s defense increased by {} DEF! They now have {} Total DEF.",
                    enemy.name(),
                    total.saturating_sub(before),
                    total
                )));
            }
        }

        ops.extend([
            Op::Gain {
                side: Side::Player,
                amount: player_exp,
                announce: false,
            },
            Op::Gain {
                side: Side::Enemy,
                amount: enemy_exp,
                announce: true,
            },
            Op::Pause,
            Op::SetState(BattleState::Busy),
        ]);
        self.script.push_front(ops);
    }

    fn gain(&mut self, side: Side, amount: f32, announce: bool) {
        let Some(combatant) = self.combatant_mut(side) else {
            return;
        };
        if combatant.level().is_debug() {
            return;
        }

        let leveled = combatant.gain_experience(amount);
        let line = if leveled {
            format!("{} leveled up to {}!", combatant.name(), combatant.level())
        } else {
            format!("{} gained {} experience!", combatant.name(), as_percent(amount))
        };
        if leveled {
            let level = combatant.level();
            self.events
                .publish(Event::Battle(BattleEvent::LeveledUp { side, level }));
            self.refresh_hud(side);
        }
        if announce {
            self.script.push_front([Op::Say(line)]);
        }
    }

    fn victory_heal(&mut self) {
        let divisor = self.config.victory_heal_divisor.max(1);
        let player = self.provider.player_mut();
        let amount = player.max_hp() / divisor;
        let healed = player.heal(Modifier::Finite(amount), self.range, self.rng.as_mut());
        let line = format!(
            "{} healed {} HP! {} is now at {} HP",
            player.name(),
            healed,
            player.name(),
            player.hp()
        );
        self.refresh_hud(Side::Player);
        self.script.push_front([Op::Say(line)]);
    }

    fn flee(&mut self) {
        self.set_state(BattleState::Busy);
        let escaped = self.rng.chance(self.config.flee_chance);
        let name = self.provider.player().name().to_string();
        info!(escaped, "player attempted to flee");
        let line = if escaped {
            format!("{} is trying to run away!", name)
        } else {
            format!("{} tried to run away, but couldn't escape!", name)
        };
        self.script.push_front([
            Op::Say(line),
            Op::Move(Side::Enemy),
            Op::Pause,
            Op::End(BattleOutcome::Fled),
        ]);
    }

    fn end(&mut self, outcome: BattleOutcome) {
        if self.ending {
            debug!(%outcome, "battle already ending; ignoring");
            return;
        }
        self.ending = true;
        self.script.clear();
        self.wait = Wait::Ready;
        self.presenter.toggle_selector(SelectorKind::Action, false);
        self.presenter.toggle_selector(SelectorKind::Item, false);
        self.set_state(BattleState::End);
        info!(%outcome, "battle ending");

        let name = self.provider.player().name().to_string();
        let ops = match outcome {
            BattleOutcome::Victory => vec![Op::Say(format!("{} won the battle!", name)), Op::Reward],
            BattleOutcome::Defeat => vec![
                Op::Say(format!("{} was defeated...", name)),
                Op::Say(format!("{}'s soul was absorbed... Goodbye...", name)),
                Op::Finalize(outcome),
            ],
            BattleOutcome::Fled => vec![
                Op::Say(format!("{} ran away!", name)),
                Op::Say(format!("{}'s soul was protected...", name)),
                Op::Finalize(outcome),
            ],
        };
        self.script.push_front(ops);
    }

    fn reward(&mut self) {
        self.set_state(BattleState::ItemSelection);
        let Some(enemy) = self.enemy.as_ref() else {
            self.script.push_front([Op::Finalize(BattleOutcome::Victory)]);
            return;
        };

        let occupied = enemy.inventory().occupied_indices();
        if occupied.is_empty() {
            info!(enemy = %enemy.name(), "enemy had nothing to drop");
            self.script.push_front([Op::Finalize(BattleOutcome::Victory)]);
            return;
        }
        let slot = occupied[self.rng.pick(occupied.len())];
        let Some(drop) = enemy.inventory().get(slot).cloned() else {
            self.script.push_front([Op::Finalize(BattleOutcome::Victory)]);
            return;
        };

        let dropped = format!(
            "{} dropped {}! {}",
            enemy.name(),
            drop.name,
            drop.type_label(enemy.level())
        );
        if self.provider.player().inventory().is_full() {
            let full = format!(
                "{} has dropped {}, but your inventory is full. Choose an item to replace.",
                enemy.name(),
                drop.name
            );
            self.script.push_front([
                Op::Say(dropped),
                Op::Say(full),
                Op::OfferReplacement(drop),
            ]);
        } else {
            self.script
                .push_front([Op::Say(dropped), Op::AcceptDrop(drop)]);
        }
    }

    fn accept_drop(&mut self, item: Item) {
        let name = item.name.clone();
        match self.provider.player_mut().inventory_mut().add(item) {
            Ok(slot) => info!(item = %name, slot, "reward accepted"),
            Err(err) => {
                report(&err, "reward could not be added");
            }
        }
        self.script.push_front([
            Op::Say(format!("Accepted item: {}", name)),
            Op::Finalize(BattleOutcome::Victory),
        ]);
    }

    fn offer_replacement(&mut self, drop: Item) {
        self.set_state(BattleState::RewardSelection);
        self.presenter.toggle_selector(SelectorKind::Item, true);
        self.item_grid.reset();
        self.show_item_labels();
        self.show_item_cursor();
        self.wait = Wait::Reward {
            drop,
            remaining: self.config.reward_timeout(),
        };
    }

    fn finalize(&mut self, outcome: BattleOutcome) -> StepResult {
        debug_assert!(self.in_progress, "finalize runs once per battle");
        self.script.clear();
        self.wait = Wait::Ready;
        self.set_state(BattleState::End);
        self.in_progress = false;
        self.ending = false;
        self.presenter.toggle_selector(SelectorKind::Action, false);
        self.presenter.toggle_selector(SelectorKind::Item, false);
        self.enemy = None;
        self.last_outcome = Some(outcome);
        self.events
            .publish(Event::Battle(BattleEvent::Over { outcome }));

        let terminate = outcome == BattleOutcome::Defeat && self.config.permadeath;
        info!(%outcome, terminate, "battle over");
        StepResult::Finished { outcome, terminate }
    }

    /// Drops the queued steps and ends the battle right away as `outcome`.
    fn abort(&mut self, outcome: BattleOutcome) {
        error!(%outcome, state = %self.state, "battle aborted");
        self.script.clear();
        self.wait = Wait::Ready;
        self.ending = true;
        self.presenter.toggle_selector(SelectorKind::Action, false);
        self.presenter.toggle_selector(SelectorKind::Item, false);
        self.script.push_back(Op::Say("The battle was interrupted.".to_string()));
        self.script.push_back(Op::Finalize(outcome));
    }

    // ===== helpers =====

    /// Clears items that ran out of uses from both inventories.
    fn purge_exhausted(&mut self) {
        let player = self.provider.player_mut().inventory_mut().purge_exhausted();
        let enemy = self
            .enemy
            .as_mut()
            .map_or(0, |enemy| enemy.inventory_mut().purge_exhausted());
        if player + enemy > 0 {
            debug!(player, enemy, "exhausted items removed");
            self.show_item_labels();
        }
    }

    fn set_state(&mut self, to: BattleState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        debug!(%from, %to, "battle state changed");
        self.events
            .publish(Event::Battle(BattleEvent::StateChanged { from, to }));
    }

    /// Outcome already forced by a defeated combatant, checked before every move.
    fn decided_outcome(&self) -> Option<BattleOutcome> {
        if self.provider.player().is_defeated() {
            return Some(BattleOutcome::Defeat);
        }
        if self.enemy.as_ref().is_some_and(Combatant::is_defeated) {
            return Some(BattleOutcome::Victory);
        }
        None
    }

    fn combatant_mut(&mut self, side: Side) -> Option<&mut Combatant> {
        match side {
            Side::Player => Some(self.provider.player_mut()),
            Side::Enemy => self.enemy.as_mut(),
        }
    }

    fn side_name(&self, side: Side) -> String {
        match side {
            Side::Player => self.provider.player().name().to_string(),
            Side::Enemy => self
                .enemy
                .as_ref()
                .map(|enemy| enemy.name().to_string())
                .unwrap_or_default(),
        }
    }

    fn refresh_hud(&mut self, side: Side) {
        let view = match side {
            Side::Player => HudView::of(self.provider.player()),
            Side::Enemy => match self.enemy.as_ref() {
                Some(enemy) => HudView::of(enemy),
                None => return,
            },
        };
        self.presenter.refresh_hud(side, &view);
    }

    fn show_item_labels(&mut self) {
        let labels: Vec<String> = self
            .provider
            .player()
            .inventory()
            .slots()
            .iter()
            .map(|slot| match slot {
                Some(item) => item.name.clone(),
                None => "-".to_string(),
            })
            .collect();
        debug_assert_eq!(labels.len(), INVENTORY_SLOTS);
        self.presenter.set_item_labels(&labels);
    }

    fn show_item_cursor(&mut self) {
        let cursor = self.item_grid.cursor();
        self.presenter.set_highlighted(SelectorKind::Item, cursor);
        let player = self.provider.player();
        let (type_label, uses_label) = match player.inventory().get(cursor) {
            Some(item) => (item.type_label(player.level()), item.uses_label()),
            None => ("-".to_string(), "-".to_string()),
        };
        self.presenter.set_item_detail(&type_label, &uses_label);
    }
}

/// Builder for [`BattleEngine`].
///
/// Presenter, input source and combatant provider are required. Randomness
/// defaults to OS entropy and the enemy policy to [`ThresholdPolicy`].
pub struct BattleEngineBuilder {
    config: BattleConfig,
    presenter: Option<Box<dyn Presenter>>,
    input: Option<Box<dyn InputSource>>,
    provider: Option<Box<dyn CombatantProvider>>,
    policy: Option<Box<dyn EnemyPolicy>>,
    rng: Option<Box<dyn BattleRng + Send>>,
    events: Option<EventBus>,
}

impl BattleEngineBuilder {
    fn new() -> Self {
        Self {
            config: BattleConfig::default(),
            presenter: None,
            input: None,
            provider: None,
            policy: None,
            rng: None,
            events: None,
        }
    }

    /// Override battle configuration
    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    pub fn input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    pub fn provider(mut self, provider: impl CombatantProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn policy(mut self, policy: impl EnemyPolicy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    pub fn rng(mut self, rng: impl BattleRng + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Share an existing event bus instead of creating one.
    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<BattleEngine> {
        if let Err(err) = self.config.validate() {
            let err = BattleError::from(err);
            report(&err, "battle config rejected");
            return Err(err);
        }
        let presenter = self.presenter.ok_or_else(|| missing(CollaboratorKind::Presenter))?;
        let input = self.input.ok_or_else(|| missing(CollaboratorKind::InputSource))?;
        let provider = self
            .provider
            .ok_or_else(|| missing(CollaboratorKind::CombatantProvider))?;

        let range = RollRange::from(&self.config);
        Ok(BattleEngine {
            config: self.config,
            range,
            presenter,
            input,
            provider,
            policy: self.policy.unwrap_or_else(|| Box::new(ThresholdPolicy)),
            rng: self
                .rng
                .unwrap_or_else(|| Box::new(StdBattleRng::from_entropy())),
            events: self.events.unwrap_or_default(),
            state: BattleState::Start,
            in_progress: false,
            ending: false,
            enemy: None,
            order: TurnOrder::with_player_first(true),
            script: Script::default(),
            wait: Wait::Ready,
            action_menu: ActionMenu::default(),
            item_grid: ItemGrid::default(),
            last_outcome: None,
        })
    }
}

fn missing(kind: CollaboratorKind) -> BattleError {
    let err = BattleError::MissingCollaborator { kind };
    report(&err, "battle engine is missing a required collaborator");
    err
}
