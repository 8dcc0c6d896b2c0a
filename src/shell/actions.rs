//! Semantic action IDs for arena click targets.
//!
//! Registered during render, delivered back as `InputEvent::Click` /
//! `InputEvent::Release`.

// ── Arena ───────────────────────────────────────────────────────
pub const ENEMY: u16 = 0;
pub const ATTACK: u16 = 1;
pub const PAUSE: u16 = 2;
pub const OPEN_SHOP: u16 = 3;
pub const RESET: u16 = 4;
pub const CLEAR_BEST: u16 = 5;

// ── Shop overlay ────────────────────────────────────────────────
pub const CLOSE_SHOP: u16 = 10;
pub const TAB_WEAPONS: u16 = 11;
pub const TAB_BONUSES: u16 = 12;
/// Base + catalog index (0..8).
pub const BUY_ITEM_BASE: u16 = 100;

// ── Setup screen ────────────────────────────────────────────────
/// Base + index into `HeroId::all()`.
pub const SELECT_HERO_BASE: u16 = 200;
/// Base + index into `Difficulty::all()`.
pub const SELECT_DIFFICULTY_BASE: u16 = 210;
pub const START_RUN: u16 = 220;
