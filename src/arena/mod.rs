//! Clicker arena core: damage, gold, enemy levels, charge attack, passive
//! effects and the upgrade shop.
//!
//! Platform-free and fully testable. The shell drives it through
//! [`session::GameSession`] and reads back [`events::CoreEvent`]s; nothing in
//! here touches rendering, the DOM or browser storage.

pub mod best_score;
pub mod charge;
pub mod economy;
pub mod enemy;
pub mod error;
pub mod events;
pub mod passive;
pub mod rng;
pub mod session;
pub mod shop;
pub mod upgrades;
