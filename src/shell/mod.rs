//! Browser shell around the arena core: screens, keyboard and pointer
//! mapping, the shop overlay and time-boxed HUD effects.
//!
//! The shell never changes game numbers itself. It calls `GameSession`
//! commands and reacts to the `CoreEvent`s they queue.

pub mod actions;
pub mod assets;
pub mod render;

use crate::arena::best_score::BestScoreStore;
use crate::arena::enemy::Difficulty;
use crate::arena::error::PurchaseError;
use crate::arena::events::{dispatch, DamageSource, Presenter};
use crate::arena::rng::RandomSource;
use crate::arena::session::GameSession;
use crate::arena::shop::{self, ItemId, ShopTab};
use crate::config::{HeroId, LaunchOptions};
use crate::input::InputEvent;
use crate::logging;

use actions::*;

const LOG_CAPACITY: usize = 50;

const HIT_FLASH_MS: f64 = 120.0;
const LEVEL_FLASH_MS: f64 = 700.0;
const BLEED_FLASH_MS: f64 = 300.0;
const GOLD_FLASH_MS: f64 = 500.0;
const CHARGED_FLASH_MS: f64 = 400.0;
const REJECT_FLASH_MS: f64 = 800.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Hero and difficulty selection.
    Setup,
    Playing,
}

/// A deadline-based visual effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct Flash {
    until_ms: f64,
}

impl Flash {
    fn trigger(&mut self, now_ms: f64, duration_ms: f64) {
        self.until_ms = self.until_ms.max(now_ms + duration_ms);
    }

    pub fn is_on(&self, now_ms: f64) -> bool {
        now_ms < self.until_ms
    }
}

pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Everything the HUD shows that is not read straight from the session.
#[derive(Default)]
pub struct Hud {
    pub log: Vec<LogEntry>,
    /// Enemy health as last reported.
    pub health: (i64, i64),
    pub hit: Flash,
    pub level_up: Flash,
    pub bleed: Flash,
    pub double_gold: Flash,
    pub charged_hit: Flash,
    pub charge_ready: bool,
    /// Shop row that refused a purchase, with the reason.
    pub rejected: Option<(ItemId, &'static str)>,
    pub reject_flash: Flash,
    /// Time of the events being dispatched.
    now_ms: f64,
}

impl Hud {
    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }

    /// Rejection reason to show on `item`'s row, while it flashes.
    pub fn rejection_for(&self, item: ItemId, now_ms: f64) -> Option<&'static str> {
        match self.rejected {
            Some((id, reason)) if id == item && self.reject_flash.is_on(now_ms) => Some(reason),
            _ => None,
        }
    }
}

impl Presenter for Hud {
    fn on_damage_applied(&mut self, amount: u64, was_doubled: bool, source: DamageSource) {
        let now = self.now_ms;
        match source {
            DamageSource::Click => {
                self.charge_ready = false;
                self.hit.trigger(now, HIT_FLASH_MS);
            }
            DamageSource::ChargedHit => {
                self.charge_ready = false;
                self.hit.trigger(now, HIT_FLASH_MS);
                self.charged_hit.trigger(now, CHARGED_FLASH_MS);
                self.add_log(&format!("Coup chargé ! -{amount} PV"), true);
            }
            DamageSource::Hemorrhage => self.bleed.trigger(now, BLEED_FLASH_MS),
        }
        if was_doubled {
            self.double_gold.trigger(now, GOLD_FLASH_MS);
            self.add_log("Or doublé !", false);
        }
    }

    fn on_level_advanced(&mut self, new_level: u32) {
        self.level_up.trigger(self.now_ms, LEVEL_FLASH_MS);
        self.add_log(&format!("Ennemi vaincu ! Niveau {new_level}"), true);
        logging::info(&format!("level {new_level}"));
    }

    fn on_purchase_result(&mut self, item: ItemId, success: bool, reason: Option<&PurchaseError>) {
        let name = shop::item(item).name;
        if success {
            self.rejected = None;
            self.add_log(&format!("Acheté : {name}"), true);
            logging::info(&format!("purchase: {item}"));
            return;
        }
        let reason = reason.map(PurchaseError::reason).unwrap_or("Refusé");
        self.rejected = Some((item, reason));
        self.reject_flash.trigger(self.now_ms, REJECT_FLASH_MS);
        self.add_log(&format!("{name} : {reason}"), false);
    }

    fn on_health_changed(&mut self, current: i64, max: i64) {
        self.health = (current, max);
    }

    fn on_burn_applied(&mut self, amount: u64) {
        self.add_log(&format!("Brûlure ! -{amount} PV"), false);
    }

    fn on_charge_started(&mut self) {
        self.charge_ready = false;
    }

    fn on_charge_ready(&mut self) {
        self.charge_ready = true;
    }

    fn on_charge_cancelled(&mut self) {
        self.charge_ready = false;
    }

    fn on_pause_changed(&mut self, paused: bool) {
        self.charge_ready = false;
        self.add_log(if paused { "Pause" } else { "Reprise" }, false);
    }

    fn on_best_score_changed(&mut self, best: u64) {
        if best == 0 {
            self.add_log("Meilleur score effacé", false);
        } else {
            self.add_log(&format!("Nouveau meilleur score : {best}"), true);
        }
    }

    fn on_run_started(&mut self) {
        self.charge_ready = false;
        self.rejected = None;
        self.add_log("Le combat commence !", true);
        logging::info("run started");
    }

    fn on_run_reset(&mut self) {
        self.charge_ready = false;
        self.rejected = None;
        self.add_log("Partie réinitialisée", true);
        logging::info("run reset");
    }
}

pub struct App {
    pub screen: Screen,
    pub session: GameSession,
    pub hud: Hud,
    pub options: LaunchOptions,
    /// None until the player picks one; Start is refused meanwhile.
    pub hero: Option<HeroId>,
    pub difficulty: Difficulty,
    pub shop_open: bool,
    pub shop_tab: ShopTab,
    pub hero_art: &'static [&'static str],
    /// Time of the last frame or input.
    pub now_ms: f64,
}

impl App {
    pub fn new(options: LaunchOptions, store: Box<dyn BestScoreStore>, rng: Box<dyn RandomSource>) -> Self {
        let hero = options.hero;
        let difficulty = options.difficulty;
        let session = GameSession::new(options.run_config(hero.unwrap_or(HeroId::Rapide)), store, rng);
        assets::check_icons(shop::catalog().iter().map(|i| i.icon));

        let mut hud = Hud::default();
        hud.add_log("Choisissez un héros et une difficulté", false);

        Self {
            screen: Screen::Setup,
            session,
            hud,
            options,
            hero,
            difficulty,
            shop_open: false,
            shop_tab: ShopTab::Weapons,
            hero_art: hero.map(|h| assets::sprite_or_placeholder(h.sprite())).unwrap_or(&[]),
            now_ms: 0.0,
        }
    }

    /// Per-frame step: advance the core and play its events.
    pub fn frame(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        self.session.update(now_ms);
        self.flush_events();
    }

    /// Returns true if the event did something.
    pub fn handle_input(&mut self, event: InputEvent, now_ms: f64) -> bool {
        self.now_ms = now_ms;
        let consumed = match self.screen {
            Screen::Setup => self.handle_setup(event),
            Screen::Playing => self.handle_playing(event),
        };
        self.flush_events();
        consumed
    }

    fn flush_events(&mut self) {
        self.hud.now_ms = self.now_ms;
        dispatch(self.session.drain_events(), &mut self.hud);
    }

    // ── Setup ───────────────────────────────────────────────────

    fn handle_setup(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key('h') => {
                let next = match self.hero {
                    Some(HeroId::Rapide) => HeroId::Fort,
                    Some(HeroId::Fort) | None => HeroId::Rapide,
                };
                self.select_hero(next);
                true
            }
            InputEvent::Key('d') => {
                let all = Difficulty::all();
                let idx = all.iter().position(|d| *d == self.difficulty).unwrap_or(0);
                self.difficulty = all[(idx + 1) % all.len()];
                true
            }
            InputEvent::Key('s') | InputEvent::Key('\n') | InputEvent::Click(START_RUN) => self.start(),
            InputEvent::Key('x') | InputEvent::Click(CLEAR_BEST) => {
                self.session.clear_best_score();
                true
            }
            InputEvent::Click(id) if (SELECT_HERO_BASE..SELECT_DIFFICULTY_BASE).contains(&id) => {
                match HeroId::all().get((id - SELECT_HERO_BASE) as usize) {
                    Some(&hero) => {
                        self.select_hero(hero);
                        true
                    }
                    None => false,
                }
            }
            InputEvent::Click(id) if (SELECT_DIFFICULTY_BASE..START_RUN).contains(&id) => {
                match Difficulty::all().get((id - SELECT_DIFFICULTY_BASE) as usize) {
                    Some(&d) => {
                        self.difficulty = d;
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn select_hero(&mut self, hero: HeroId) {
        self.hero = Some(hero);
        self.hero_art = assets::sprite_or_placeholder(hero.sprite());
    }

    fn start(&mut self) -> bool {
        let Some(hero) = self.hero else {
            self.hud.add_log("Choisissez d'abord un héros", false);
            return false;
        };
        let mut config = self.options.run_config(hero);
        config.difficulty = self.difficulty;
        self.session.configure(config);
        self.session.start_run();
        self.screen = Screen::Playing;
        self.shop_open = false;
        self.shop_tab = ShopTab::Weapons;
        logging::info(&format!(
            "start: hero={} difficulty={} base_damage={}",
            hero, self.difficulty, config.base_damage
        ));
        true
    }

    // ── Playing ─────────────────────────────────────────────────

    fn handle_playing(&mut self, event: InputEvent) -> bool {
        let now = self.now_ms;
        match event {
            InputEvent::Key('r') | InputEvent::Click(RESET) => {
                self.shop_open = false;
                self.session.reset_run();
                self.screen = Screen::Setup;
                true
            }
            InputEvent::Key('x') | InputEvent::Click(CLEAR_BEST) => {
                self.session.clear_best_score();
                true
            }
            InputEvent::Key('b') | InputEvent::Click(OPEN_SHOP) if !self.shop_open => {
                self.open_shop();
                true
            }
            _ if self.shop_open => self.handle_shop(event),
            InputEvent::Key('p') | InputEvent::Click(PAUSE) => {
                self.session.pause_toggle();
                true
            }
            // Keyboard and the attack button have no hold: press and release at once.
            // A pointer hold in progress owns the charge.
            InputEvent::Key('a') | InputEvent::Click(ATTACK) => {
                if self.session.charge().is_charging() {
                    return false;
                }
                self.session.press(now);
                self.session.release(now);
                true
            }
            InputEvent::Click(ENEMY) => {
                self.session.press(now);
                true
            }
            InputEvent::Release(Some(ENEMY)) => {
                self.session.release(now);
                true
            }
            InputEvent::Release(_) => {
                self.session.cancel_charge();
                true
            }
            _ => false,
        }
    }

    fn handle_shop(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key('b') | InputEvent::Click(CLOSE_SHOP) => {
                self.close_shop();
                true
            }
            InputEvent::Key('t') => {
                self.shop_tab = self.shop_tab.other();
                true
            }
            InputEvent::Click(TAB_WEAPONS) => {
                self.shop_tab = ShopTab::Weapons;
                true
            }
            InputEvent::Click(TAB_BONUSES) => {
                self.shop_tab = ShopTab::Bonuses;
                true
            }
            InputEvent::Key(c @ '1'..='8') => self.buy_index((c as u8 - b'1') as usize),
            InputEvent::Click(id) if id >= BUY_ITEM_BASE => self.buy_index((id - BUY_ITEM_BASE) as usize),
            _ => false,
        }
    }

    fn buy_index(&mut self, idx: usize) -> bool {
        let Some(item) = shop::catalog().get(idx) else {
            return false;
        };
        // Rejections surface through the PurchaseResult event.
        let _ = self.session.purchase(item.id);
        true
    }

    fn open_shop(&mut self) {
        self.shop_open = true;
        self.session.set_paused(true);
    }

    fn close_shop(&mut self) {
        self.shop_open = false;
        self.session.set_paused(false);
    }
}
