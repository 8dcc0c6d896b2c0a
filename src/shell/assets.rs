//! Glyph art standing in for the game's image files.
//!
//! Lookups are keyed by the image names the catalog and heroes carry
//! (`charge.png`, `Pink_Monster_Attack1_4.png`, ...). An unknown name is a
//! [`ResourceUnavailable`]; callers fall back to the placeholder and keep going.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("resource unavailable: `{0}`")]
pub struct ResourceUnavailable(pub String);

/// Drawn in place of a missing icon.
pub const PLACEHOLDER_ICON: &str = "?";

/// Drawn in place of a missing sprite.
pub const PLACEHOLDER_SPRITE: &[&str] = &["┌──┐", "│??│", "└──┘"];

const ICONS: &[(&str, &str)] = &[
    ("canif_basique.png", "🔪"),
    ("dague_vampire.png", "🗡"),
    ("mattraque_enragee.png", "🏏"),
    ("pioche_en_diamant.png", "⛏"),
    ("marteau_de_smough.png", "🔨"),
    ("brulure.png", "🔥"),
    ("charge.png", "⚡"),
    ("concentration.png", "🧠"),
];

const SPRITES: &[(&str, &[&str])] = &[
    ("Pink_Monster_Attack1_4.png", &[" ▄█▄ ", "(•ᴗ•)", " ╯ ╰ "]),
    ("Owlet_Monster_Attack1_4.png", &["▲▄▄▲ ", "(◉v◉)", " ╯ ╰ "]),
];

/// Enemy art, cycled by level. The second frame is shown while a hit flashes.
pub const ENEMY_ART: &[[&[&str]; 2]] = &[
    [
        &["  ▄▄▄▄▄  ", " █ ◣ ◢ █ ", " █  ▀  █ ", "  ▀█▀█▀  "],
        &["  ▄▄▄▄▄  ", " █ ✕ ✕ █ ", " █  ○  █ ", "  ▀█▀█▀  "],
    ],
    [
        &[" /\\___/\\ ", " ( ò ó ) ", "  ) ▼ (  ", " (_/ \\_) "],
        &[" /\\___/\\ ", " ( x x ) ", "  ) o (  ", " (_/ \\_) "],
    ],
    [
        &["  ╭───╮  ", " ╭┤◥ ◤├╮ ", " ╰┤ ═ ├╯ ", "  ╰┬─┬╯  "],
        &["  ╭───╮  ", " ╭┤✕ ✕├╮ ", " ╰┤ ○ ├╯ ", "  ╰┬─┬╯  "],
    ],
];

pub fn icon(name: &str) -> Result<&'static str, ResourceUnavailable> {
    ICONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, g)| *g)
        .ok_or_else(|| ResourceUnavailable(name.to_string()))
}

pub fn sprite(name: &str) -> Result<&'static [&'static str], ResourceUnavailable> {
    SPRITES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, art)| *art)
        .ok_or_else(|| ResourceUnavailable(name.to_string()))
}

/// Sprite for `name`, or the placeholder with a console warning.
pub fn sprite_or_placeholder(name: &str) -> &'static [&'static str] {
    sprite(name).unwrap_or_else(|e| {
        crate::logging::warn(&format!("assets: {e}, using placeholder"));
        PLACEHOLDER_SPRITE
    })
}

/// Enemy frames for a level. Level 1 uses the first art.
pub fn enemy_art(level: u32, hit: bool) -> &'static [&'static str] {
    let idx = (level.saturating_sub(1) as usize) % ENEMY_ART.len();
    ENEMY_ART[idx][hit as usize]
}

/// Warn once for every icon that has no glyph. Returns how many are missing.
pub fn check_icons<'a>(names: impl IntoIterator<Item = &'a str>) -> usize {
    names
        .into_iter()
        .filter_map(|n| icon(n).err())
        .inspect(|e| crate::logging::warn(&format!("assets: {e}")))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::shop::catalog;
    use crate::config::HeroId;

    #[test]
    fn every_catalog_icon_has_a_glyph() {
        assert_eq!(check_icons(catalog().iter().map(|i| i.icon)), 0);
    }

    #[test]
    fn every_hero_sprite_exists() {
        for hero in HeroId::all() {
            assert!(sprite(hero.sprite()).is_ok(), "{}", hero.sprite());
        }
    }

    #[test]
    fn missing_resources_fall_back() {
        let err = icon("nope.png").unwrap_err();
        assert_eq!(err, ResourceUnavailable("nope.png".into()));
        assert_eq!(sprite_or_placeholder("nope.png"), PLACEHOLDER_SPRITE);
        assert_eq!(check_icons(["nope.png", "charge.png"]), 1);
    }

    #[test]
    fn enemy_art_cycles_with_level() {
        assert_eq!(enemy_art(1, false), enemy_art(1 + ENEMY_ART.len() as u32, false));
        assert_ne!(enemy_art(1, false), enemy_art(1, true));
        assert_eq!(enemy_art(0, false), enemy_art(1, false));
    }
}
