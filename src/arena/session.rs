//! `GameSession`: the aggregate that owns one run and routes commands into
//! the components.

use super::best_score::{BestScore, BestScoreStore};
use super::charge::{ChargeState, ReleaseOutcome, CHARGED_MULTIPLIER};
use super::economy::{damage_per_action, resolve_currency_gain, CurrencyGain};
use super::enemy::{DamageOutcome, Difficulty, EnemyState};
use super::error::PurchaseError;
use super::events::{CoreEvent, DamageSource};
use super::passive::{burn_damage, BurnCounter, HemorrhageTimer, HEMORRHAGE_DAMAGE};
use super::rng::RandomSource;
use super::shop::{self, ItemId};
use super::upgrades::UpgradeState;

/// Configuration decided outside the core before a run starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunConfig {
    pub difficulty: Difficulty,
    /// Damage of a hit before weapon bonuses.
    pub base_damage: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            base_damage: 1,
        }
    }
}

/// Score, gold and run flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunState {
    /// Cumulative damage dealt.
    pub score: u64,
    pub currency: f64,
    pub is_paused: bool,
    pub burn: BurnCounter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    /// Waiting for configuration and `start_run`.
    Setup,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HitKind {
    Normal,
    Charged,
}

pub struct GameSession {
    config: RunConfig,
    phase: RunPhase,
    run: RunState,
    enemy: EnemyState,
    upgrades: UpgradeState,
    charge: ChargeState,
    hemorrhage: HemorrhageTimer,
    best: BestScore,
    rng: Box<dyn RandomSource>,
    events: Vec<CoreEvent>,
}

impl GameSession {
    pub fn new(config: RunConfig, store: Box<dyn BestScoreStore>, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            phase: RunPhase::Setup,
            run: RunState::default(),
            enemy: EnemyState::new(config.difficulty),
            upgrades: UpgradeState::new(),
            charge: ChargeState::new(),
            hemorrhage: HemorrhageTimer::new(),
            best: BestScore::load(store),
            rng,
            events: Vec::new(),
        }
    }

    // ── Read access ─────────────────────────────────────────────

    pub fn config(&self) -> RunConfig {
        self.config
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn enemy(&self) -> &EnemyState {
        &self.enemy
    }

    pub fn upgrades(&self) -> &UpgradeState {
        &self.upgrades
    }

    pub fn charge(&self) -> &ChargeState {
        &self.charge
    }

    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    /// False when the last best score could not be written to the store.
    pub fn best_score_saved(&self) -> bool {
        self.best.is_saved()
    }

    pub fn damage_per_action(&self) -> u64 {
        damage_per_action(self.config.base_damage, &self.upgrades)
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Commands ────────────────────────────────────────────────

    /// Set difficulty and base damage. Only applies between runs.
    pub fn configure(&mut self, config: RunConfig) -> bool {
        if self.is_running() {
            return false;
        }
        self.config = config;
        self.enemy = EnemyState::new(config.difficulty);
        true
    }

    /// Begin a fresh run with the current configuration.
    pub fn start_run(&mut self) {
        if self.is_running() {
            self.save_best_score();
        }
        self.clear_run();
        self.phase = RunPhase::Running;
        self.events.push(CoreEvent::RunStarted);
        self.push_health();
    }

    /// Pause or resume. Pausing drops any charge in progress.
    pub fn pause_toggle(&mut self) {
        let paused = !self.run.is_paused;
        self.set_paused(paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.run.is_paused == paused {
            return;
        }
        if paused {
            self.cancel_charge();
        }
        self.run.is_paused = paused;
        self.events.push(CoreEvent::PauseChanged { paused });
    }

    /// End the run: save the best score and return to setup. Upgrades are
    /// cleared along with score, gold and level.
    pub fn reset_run(&mut self) {
        self.save_best_score();
        self.clear_run();
        self.phase = RunPhase::Setup;
        self.events.push(CoreEvent::RunReset);
    }

    /// Buy a shop item. Allowed while paused.
    pub fn purchase(&mut self, id: ItemId) -> Result<(), PurchaseError> {
        let result = shop::purchase(&mut self.run.currency, &mut self.upgrades, id).map(|_| ());
        self.events.push(CoreEvent::PurchaseResult {
            item: id,
            result: result.clone(),
        });
        result
    }

    /// Write the best score if the current score beats it.
    pub fn save_best_score(&mut self) {
        if self.best.record(self.run.score) {
            self.events.push(CoreEvent::BestScoreChanged {
                best: self.best.value(),
            });
        }
    }

    pub fn clear_best_score(&mut self) {
        self.best.clear();
        self.events.push(CoreEvent::BestScoreChanged { best: 0 });
    }

    // ── Input ───────────────────────────────────────────────────

    /// Pointer pressed on the target.
    pub fn press(&mut self, now_ms: f64) {
        if !self.accepts_input() {
            return;
        }
        if !self.upgrades.active_bonus_active {
            self.resolve_hit(HitKind::Normal);
            return;
        }
        if !self.charge.is_charging() {
            self.charge.begin(now_ms);
            self.events.push(CoreEvent::ChargeStarted);
        }
    }

    /// Pointer released on the target.
    pub fn release(&mut self, now_ms: f64) {
        if !self.accepts_input() {
            return;
        }
        match self.charge.release(now_ms) {
            ReleaseOutcome::Charged => self.resolve_hit(HitKind::Charged),
            ReleaseOutcome::Early => self.resolve_hit(HitKind::Normal),
            ReleaseOutcome::Ignored => {}
        }
    }

    /// Pointer released away from the target: drop the charge, no damage.
    pub fn cancel_charge(&mut self) {
        if self.charge.cancel() {
            self.events.push(CoreEvent::ChargeCancelled);
        }
    }

    /// Per-frame step: charge latch and hemorrhage tick. Frozen while paused.
    pub fn update(&mut self, now_ms: f64) {
        if !self.accepts_input() {
            return;
        }
        if self.charge.update(now_ms) {
            self.events.push(CoreEvent::ChargeReady);
        }
        if self.upgrades.hemorrhage_active && self.hemorrhage.poll(now_ms) {
            let gain = CurrencyGain {
                amount: HEMORRHAGE_DAMAGE as f64,
                was_doubled: false,
            };
            self.deal_damage(HEMORRHAGE_DAMAGE, gain, DamageSource::Hemorrhage);
        }
    }

    // ── Internals ───────────────────────────────────────────────

    fn accepts_input(&self) -> bool {
        self.is_running() && !self.run.is_paused
    }

    fn clear_run(&mut self) {
        self.run = RunState::default();
        self.enemy = EnemyState::new(self.config.difficulty);
        self.upgrades = UpgradeState::new();
        self.charge = ChargeState::new();
        self.hemorrhage.reset();
    }

    fn resolve_hit(&mut self, kind: HitKind) {
        let per_action = self.damage_per_action();
        let (amount, clicks, source) = match kind {
            HitKind::Normal => (per_action, 1, DamageSource::Click),
            HitKind::Charged => (
                per_action * CHARGED_MULTIPLIER,
                CHARGED_MULTIPLIER as u32,
                DamageSource::ChargedHit,
            ),
        };
        let gain = resolve_currency_gain(amount, &self.upgrades, self.rng.as_mut());
        self.deal_damage(amount, gain, source);

        if self.upgrades.passive_active && self.run.burn.register(clicks) {
            let burn = burn_damage(self.enemy.current_health());
            self.events.push(CoreEvent::BurnApplied { amount: burn });
            self.hit_enemy(burn);
        }
    }

    fn deal_damage(&mut self, amount: u64, gain: CurrencyGain, source: DamageSource) {
        self.run.score += amount;
        self.run.currency += gain.amount;
        self.events.push(CoreEvent::DamageApplied {
            amount,
            was_doubled: gain.was_doubled,
            source,
        });
        self.hit_enemy(amount);
    }

    fn hit_enemy(&mut self, amount: u64) {
        if let DamageOutcome::Defeated { new_level } = self.enemy.apply_damage(amount) {
            self.events.push(CoreEvent::LevelAdvanced { new_level });
        }
        self.push_health();
    }

    fn push_health(&mut self) {
        self.events.push(CoreEvent::HealthChanged {
            current: self.enemy.current_health(),
            max: self.enemy.max_health(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::charge::CHARGE_DURATION_MS;
    use crate::arena::enemy::health_for_level;
    use crate::arena::rng::{ScriptedRandom, SeededRandom};
    use crate::storage::MemoryStore;

    fn session() -> GameSession {
        session_with(&[0.99])
    }

    fn session_with(draws: &[f64]) -> GameSession {
        let mut s = GameSession::new(
            RunConfig::default(),
            Box::new(MemoryStore::new()),
            Box::new(ScriptedRandom::new(draws)),
        );
        s.start_run();
        s.drain_events();
        s
    }

    fn tap(s: &mut GameSession, now: f64) {
        s.press(now);
        s.release(now);
    }

    fn own(s: &mut GameSession, id: ItemId) {
        s.run.currency += shop::item(id).cost as f64;
        s.purchase(id).unwrap();
    }

    #[test]
    fn new_session_waits_in_setup() {
        let mut s = GameSession::new(
            RunConfig::default(),
            Box::new(MemoryStore::new()),
            Box::new(SeededRandom::new(1)),
        );
        assert_eq!(s.phase(), RunPhase::Setup);
        s.press(0.0);
        assert_eq!(s.run().score, 0);
    }

    #[test]
    fn ten_hits_take_level_one_from_twenty_to_ten() {
        let mut s = session();
        for i in 0..10 {
            tap(&mut s, i as f64);
        }
        assert_eq!(s.enemy().current_health(), 10);
        assert_eq!(s.enemy().level(), 1);
        assert_eq!(s.run().score, 10);
        assert!((s.run().currency - 10.0).abs() < 0.001);
    }

    #[test]
    fn seventh_hit_of_three_defeats_level_one() {
        let mut s = session();
        s.upgrades.weapon_bonus = 2;
        for i in 0..6 {
            tap(&mut s, i as f64);
            assert_eq!(s.enemy().level(), 1);
        }
        assert_eq!(s.enemy().current_health(), 2);
        s.drain_events();
        tap(&mut s, 7.0);
        assert_eq!(s.enemy().level(), 2);
        assert_eq!(s.enemy().current_health(), health_for_level(2, Difficulty::Normal));
        assert_eq!(s.run().score, 21);
        let events = s.drain_events();
        assert!(events.contains(&CoreEvent::LevelAdvanced { new_level: 2 }));
    }

    #[test]
    fn hit_events_are_ordered() {
        let mut s = session();
        s.enemy = EnemyState::new(Difficulty::Normal);
        s.upgrades.weapon_bonus = 19;
        tap(&mut s, 0.0);
        assert_eq!(
            s.drain_events(),
            vec![
                CoreEvent::DamageApplied {
                    amount: 20,
                    was_doubled: false,
                    source: DamageSource::Click,
                },
                CoreEvent::LevelAdvanced { new_level: 2 },
                CoreEvent::HealthChanged { current: 28, max: 28 },
            ]
        );
    }

    #[test]
    fn insufficient_funds_leaves_currency_unchanged() {
        let mut s = session();
        s.run.currency = 40.0;
        let err = s.purchase(ItemId::BasicKnife).unwrap_err();
        assert!(matches!(err, PurchaseError::InsufficientFunds { cost: 50, .. }));
        assert!((s.run().currency - 40.0).abs() < 0.001);
        assert!(!s.upgrades().owns(ItemId::BasicKnife));
        let events = s.drain_events();
        assert_eq!(
            events,
            vec![CoreEvent::PurchaseResult {
                item: ItemId::BasicKnife,
                result: Err(err),
            }]
        );
    }

    #[test]
    fn purchase_twice_applies_once() {
        let mut s = session();
        s.run.currency = 500.0;
        s.purchase(ItemId::BasicKnife).unwrap();
        assert_eq!(
            s.purchase(ItemId::BasicKnife),
            Err(PurchaseError::AlreadyOwned(ItemId::BasicKnife))
        );
        assert_eq!(s.upgrades().weapon_bonus, 2);
        assert!((s.run().currency - 450.0).abs() < 0.001);
        assert_eq!(s.damage_per_action(), 3);
    }

    #[test]
    fn purchase_allowed_while_paused() {
        let mut s = session();
        s.run.currency = 60.0;
        s.set_paused(true);
        assert!(s.purchase(ItemId::BasicKnife).is_ok());
    }

    #[test]
    fn press_without_charge_upgrade_hits_immediately() {
        let mut s = session();
        s.press(0.0);
        assert_eq!(s.run().score, 1);
        assert!(!s.charge().is_charging());
        // Release after an immediate hit does nothing more.
        s.release(5.0);
        assert_eq!(s.run().score, 1);
    }

    #[test]
    fn quick_release_with_charge_is_one_normal_hit() {
        let mut s = session();
        own(&mut s, ItemId::ChargeAttack);
        s.press(100.0);
        assert_eq!(s.run().score, 0);
        s.release(150.0);
        assert_eq!(s.run().score, 1);
        assert_eq!(s.enemy().current_health(), 19);
    }

    #[test]
    fn full_hold_release_is_five_times_damage() {
        let mut s = session();
        own(&mut s, ItemId::ChargeAttack);
        own(&mut s, ItemId::BasicKnife);
        s.drain_events();
        s.press(0.0);
        s.update(1000.0);
        s.update(CHARGE_DURATION_MS);
        assert!(s.charge().is_fully_charged());
        s.release(CHARGE_DURATION_MS + 500.0);
        assert_eq!(s.run().score, 15);
        let events = s.drain_events();
        assert!(events.contains(&CoreEvent::ChargeReady));
        assert!(events.contains(&CoreEvent::DamageApplied {
            amount: 15,
            was_doubled: false,
            source: DamageSource::ChargedHit,
        }));
    }

    #[test]
    fn cancel_discards_charge() {
        let mut s = session();
        own(&mut s, ItemId::ChargeAttack);
        s.press(0.0);
        s.update(2500.0);
        s.cancel_charge();
        s.release(2600.0);
        assert_eq!(s.run().score, 0);
        assert!(!s.charge().is_charging());
    }

    #[test]
    fn pausing_cancels_charge_and_freezes_input() {
        let mut s = session();
        own(&mut s, ItemId::ChargeAttack);
        s.press(0.0);
        s.pause_toggle();
        assert!(s.run().is_paused);
        assert!(!s.charge().is_charging());
        s.release(3000.0);
        s.press(3000.0);
        assert_eq!(s.run().score, 0);
        s.pause_toggle();
        s.press(4000.0);
        s.release(4100.0);
        assert_eq!(s.run().score, 1);
    }

    #[test]
    fn burn_fires_on_fifteenth_click() {
        let mut s = session();
        own(&mut s, ItemId::BurnPassive);
        s.enemy = EnemyState::new(Difficulty::Hard);
        // Raise the health pool so 15 hits do not kill.
        for _ in 0..5 {
            s.enemy.apply_damage(u64::MAX);
        }
        let level = s.enemy().level();
        for i in 0..14 {
            tap(&mut s, i as f64);
        }
        assert_eq!(s.run().burn.clicks(), 14);
        let before = s.enemy().current_health();
        tap(&mut s, 20.0);
        let after_hit = before - 1;
        let expected = after_hit - (burn_damage(after_hit) as i64);
        assert_eq!(s.enemy().current_health(), expected);
        assert_eq!(s.enemy().level(), level);
        assert_eq!(s.run().burn.clicks(), 0);
        // Burn adds neither score nor gold.
        assert_eq!(s.run().score, 15);
    }

    #[test]
    fn burn_on_nearly_dead_enemy_advances_level() {
        let mut s = session();
        own(&mut s, ItemId::BurnPassive);
        for i in 0..14 {
            tap(&mut s, i as f64);
        }
        // 20 - 14 = 6; bring it to 2 so the 15th hit leaves 1.
        s.enemy.apply_damage(4);
        assert_eq!(s.enemy().current_health(), 2);
        s.drain_events();

        tap(&mut s, 20.0);
        assert_eq!(s.enemy().level(), 2);
        assert_eq!(s.enemy().current_health(), 28);
        assert_eq!(s.enemy().max_health(), 28);
        assert_eq!(s.run().score, 15);
        assert!((s.run().currency - 15.0).abs() < 0.001);
        let events = s.drain_events();
        assert!(events.contains(&CoreEvent::BurnApplied { amount: 1 }));
        assert!(events.contains(&CoreEvent::LevelAdvanced { new_level: 2 }));
    }

    #[test]
    fn concentration_leaves_gold_equal_to_damage() {
        let mut s = session();
        own(&mut s, ItemId::Focus);
        assert!((s.upgrades().gold_multiplier - 1.1).abs() < 0.001);
        for i in 0..10 {
            tap(&mut s, i as f64);
        }
        assert_eq!(s.run().score, 10);
        assert_eq!(s.run().currency, 10.0);
    }

    #[test]
    fn charged_hit_counts_five_clicks() {
        let mut s = session();
        own(&mut s, ItemId::BurnPassive);
        own(&mut s, ItemId::ChargeAttack);
        for k in 0..2 {
            let t = k as f64 * 10_000.0;
            s.press(t);
            s.release(t + CHARGE_DURATION_MS);
        }
        assert_eq!(s.run().burn.clicks(), 10);
    }

    #[test]
    fn burn_counter_ignored_without_upgrade() {
        let mut s = session();
        for i in 0..16 {
            tap(&mut s, i as f64);
        }
        assert_eq!(s.run().burn.clicks(), 0);
        assert_eq!(s.run().score, 16);
    }

    #[test]
    fn hemorrhage_ticks_every_two_seconds_without_catch_up() {
        let mut s = session_with(&[0.0]);
        own(&mut s, ItemId::VampireDagger);
        s.upgrades.double_gold_chance = 1.0;
        let gold = s.run().currency;
        // First frame after purchase bleeds at once.
        s.update(500.0);
        assert_eq!(s.run().score, 1);
        s.update(2499.0);
        assert_eq!(s.run().score, 1);
        s.update(2500.0);
        assert_eq!(s.run().score, 2);
        // Long stall: a single tick.
        s.update(60_000.0);
        assert_eq!(s.run().score, 3);
        // Flat +1 gold per tick, never doubled.
        assert!((s.run().currency - (gold + 3.0)).abs() < 0.001);
    }

    #[test]
    fn hemorrhage_frozen_while_paused() {
        let mut s = session();
        own(&mut s, ItemId::VampireDagger);
        s.update(0.0);
        assert_eq!(s.run().score, 1);
        s.set_paused(true);
        s.update(5000.0);
        assert_eq!(s.run().score, 1);
        s.set_paused(false);
        s.update(5000.0);
        assert_eq!(s.run().score, 2);
    }

    #[test]
    fn double_gold_draws_once_per_hit() {
        let mut s = session_with(&[0.05, 0.5]);
        s.upgrades.double_gold_chance = 0.1;
        tap(&mut s, 0.0);
        tap(&mut s, 1.0);
        assert!((s.run().currency - 3.0).abs() < 0.001);
        let events = s.drain_events();
        let doubled: Vec<bool> = events
            .iter()
            .filter_map(|e| match e {
                CoreEvent::DamageApplied { was_doubled, .. } => Some(*was_doubled),
                _ => None,
            })
            .collect();
        assert_eq!(doubled, vec![true, false]);
    }

    #[test]
    fn reset_saves_best_and_clears_upgrades() {
        let mut s = session();
        s.run.currency = 100.0;
        s.purchase(ItemId::BasicKnife).unwrap();
        for i in 0..4 {
            tap(&mut s, i as f64);
        }
        s.reset_run();
        assert_eq!(s.best_score(), 12);
        assert_eq!(s.phase(), RunPhase::Setup);
        assert_eq!(s.run().score, 0);
        assert!((s.run().currency - 0.0).abs() < 0.001);
        assert!(!s.upgrades().owns(ItemId::BasicKnife));
        assert_eq!(s.enemy().level(), 1);
        assert!(s.drain_events().contains(&CoreEvent::BestScoreChanged { best: 12 }));
    }

    #[test]
    fn lower_score_does_not_replace_best() {
        let mut s = GameSession::new(
            RunConfig::default(),
            Box::new(MemoryStore::with_value(500)),
            Box::new(SeededRandom::new(3)),
        );
        s.start_run();
        tap(&mut s, 0.0);
        s.reset_run();
        assert_eq!(s.best_score(), 500);
    }

    #[test]
    fn configure_only_between_runs() {
        let mut s = session();
        let hard = RunConfig {
            difficulty: Difficulty::Hard,
            base_damage: 3,
        };
        assert!(!s.configure(hard));
        s.reset_run();
        assert!(s.configure(hard));
        s.start_run();
        assert_eq!(s.enemy().max_health(), 32);
        tap(&mut s, 0.0);
        assert_eq!(s.run().score, 3);
    }

    #[test]
    fn clear_best_score_zeroes() {
        let mut s = GameSession::new(
            RunConfig::default(),
            Box::new(MemoryStore::with_value(42)),
            Box::new(SeededRandom::new(3)),
        );
        assert_eq!(s.best_score(), 42);
        s.clear_best_score();
        assert_eq!(s.best_score(), 0);
    }
}
