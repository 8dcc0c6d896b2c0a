//! Notifications from the core to the presentation layer.
//!
//! The session queues `CoreEvent`s as state changes; the shell drains them
//! once per frame and feeds them to its `Presenter`.

use super::error::PurchaseError;
use super::shop::ItemId;

/// What caused a damage event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageSource {
    Click,
    ChargedHit,
    Hemorrhage,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CoreEvent {
    DamageApplied {
        amount: u64,
        was_doubled: bool,
        source: DamageSource,
    },
    /// Extra damage from the click-count burn.
    BurnApplied { amount: u64 },
    LevelAdvanced { new_level: u32 },
    HealthChanged { current: i64, max: i64 },
    PurchaseResult {
        item: ItemId,
        result: Result<(), PurchaseError>,
    },
    ChargeStarted,
    ChargeReady,
    ChargeCancelled,
    PauseChanged { paused: bool },
    BestScoreChanged { best: u64 },
    RunStarted,
    RunReset,
}

/// Receiver of core notifications. Only the four core callbacks are required.
pub trait Presenter {
    fn on_damage_applied(&mut self, amount: u64, was_doubled: bool, source: DamageSource);
    fn on_level_advanced(&mut self, new_level: u32);
    fn on_purchase_result(&mut self, item: ItemId, success: bool, reason: Option<&PurchaseError>);
    fn on_health_changed(&mut self, current: i64, max: i64);

    fn on_burn_applied(&mut self, _amount: u64) {}
    fn on_charge_started(&mut self) {}
    fn on_charge_ready(&mut self) {}
    fn on_charge_cancelled(&mut self) {}
    fn on_pause_changed(&mut self, _paused: bool) {}
    fn on_best_score_changed(&mut self, _best: u64) {}
    fn on_run_started(&mut self) {}
    fn on_run_reset(&mut self) {}
}

/// Route each event to the matching callback, in order.
pub fn dispatch<P: Presenter + ?Sized>(events: impl IntoIterator<Item = CoreEvent>, presenter: &mut P) {
    for event in events {
        match event {
            CoreEvent::DamageApplied {
                amount,
                was_doubled,
                source,
            } => presenter.on_damage_applied(amount, was_doubled, source),
            CoreEvent::BurnApplied { amount } => presenter.on_burn_applied(amount),
            CoreEvent::LevelAdvanced { new_level } => presenter.on_level_advanced(new_level),
            CoreEvent::HealthChanged { current, max } => presenter.on_health_changed(current, max),
            CoreEvent::PurchaseResult { item, result } => {
                presenter.on_purchase_result(item, result.is_ok(), result.as_ref().err())
            }
            CoreEvent::ChargeStarted => presenter.on_charge_started(),
            CoreEvent::ChargeReady => presenter.on_charge_ready(),
            CoreEvent::ChargeCancelled => presenter.on_charge_cancelled(),
            CoreEvent::PauseChanged { paused } => presenter.on_pause_changed(paused),
            CoreEvent::BestScoreChanged { best } => presenter.on_best_score_changed(best),
            CoreEvent::RunStarted => presenter.on_run_started(),
            CoreEvent::RunReset => presenter.on_run_reset(),
        }
    }
}
