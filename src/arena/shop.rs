//! Static shop catalog and the purchase flow.

use std::fmt;
use std::str::FromStr;

use super::error::PurchaseError;
use super::upgrades::{Effect, UpgradeState};

/// Stable identifier of a catalog item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemId {
    BasicKnife,
    VampireDagger,
    RagingCudgel,
    DiamondPickaxe,
    SmoughHammer,
    BurnPassive,
    ChargeAttack,
    Focus,
}

impl ItemId {
    /// Key used in logs and URLs.
    pub fn key(self) -> &'static str {
        match self {
            ItemId::BasicKnife => "canif_basique",
            ItemId::VampireDagger => "dague_vampire",
            ItemId::RagingCudgel => "matraque_enragee",
            ItemId::DiamondPickaxe => "pioche_diamant",
            ItemId::SmoughHammer => "marteau_smough",
            ItemId::BurnPassive => "brulure",
            ItemId::ChargeAttack => "charge",
            ItemId::Focus => "concentration",
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ItemId {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .map(|item| item.id)
            .find(|id| id.key() == s)
            .ok_or_else(|| PurchaseError::UnknownItem(s.to_string()))
    }
}

/// Shop tab an item is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShopTab {
    Weapons,
    Bonuses,
}

impl ShopTab {
    pub fn label(self) -> &'static str {
        match self {
            ShopTab::Weapons => "Armes",
            ShopTab::Bonuses => "Bonus",
        }
    }

    pub fn other(self) -> ShopTab {
        match self {
            ShopTab::Weapons => ShopTab::Bonuses,
            ShopTab::Bonuses => ShopTab::Weapons,
        }
    }
}

/// A purchasable upgrade. Immutable for the process lifetime.
#[derive(Debug, PartialEq)]
pub struct ShopItem {
    pub id: ItemId,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: u64,
    pub tab: ShopTab,
    /// Icon asset name.
    pub icon: &'static str,
    pub effects: &'static [Effect],
}

static CATALOG: &[ShopItem] = &[
    // ── Armes ───────────────────────────────────────────────────
    ShopItem {
        id: ItemId::BasicKnife,
        name: "Canif basique",
        description: "+2 dégâts par clic",
        cost: 50,
        tab: ShopTab::Weapons,
        icon: "canif_basique.png",
        effects: &[Effect::WeaponBonus(2)],
    },
    ShopItem {
        id: ItemId::VampireDagger,
        name: "Dague de vampire",
        description: "+1 dégât, Hémorragie (+1 dégât / 2s)",
        cost: 80,
        tab: ShopTab::Weapons,
        icon: "dague_vampire.png",
        effects: &[Effect::WeaponBonus(1), Effect::Hemorrhage],
    },
    ShopItem {
        id: ItemId::RagingCudgel,
        name: "Matraque enragée",
        description: "+4 dégâts par clic",
        cost: 120,
        tab: ShopTab::Weapons,
        icon: "mattraque_enragee.png",
        effects: &[Effect::WeaponBonus(4)],
    },
    ShopItem {
        id: ItemId::DiamondPickaxe,
        name: "Pioche en diamant",
        description: "+2 dégâts, 10% de doubler le gain d'or",
        cost: 200,
        tab: ShopTab::Weapons,
        icon: "pioche_en_diamant.png",
        effects: &[Effect::WeaponBonus(2), Effect::DoubleGoldChance(0.1)],
    },
    ShopItem {
        id: ItemId::SmoughHammer,
        name: "Marteau de Smough",
        description: "+10 dégâts par clic",
        cost: 800,
        tab: ShopTab::Weapons,
        icon: "marteau_de_smough.png",
        effects: &[Effect::WeaponBonus(10)],
    },
    // ── Bonus ───────────────────────────────────────────────────
    ShopItem {
        id: ItemId::BurnPassive,
        name: "Passif — Brûlure",
        description: "-2 % PV / 15 clics (min 1 de dégât)",
        cost: 100,
        tab: ShopTab::Bonuses,
        icon: "brulure.png",
        effects: &[Effect::PassiveBurn],
    },
    ShopItem {
        id: ItemId::ChargeAttack,
        name: "Actif — Charge",
        description: "Clic chargé (2 sec) inflige 5× dégâts",
        cost: 150,
        tab: ShopTab::Bonuses,
        icon: "charge.png",
        effects: &[Effect::ChargeAttack],
    },
    ShopItem {
        id: ItemId::Focus,
        name: "Passif — Concentration",
        description: "+10 % de gain d'or",
        cost: 200,
        tab: ShopTab::Bonuses,
        icon: "concentration.png",
        effects: &[Effect::GoldMultiplier(1.1)],
    },
];

/// Every item, weapons first.
pub fn catalog() -> &'static [ShopItem] {
    CATALOG
}

/// Catalog entry for `id`. Every `ItemId` has exactly one entry.
pub fn item(id: ItemId) -> &'static ShopItem {
    CATALOG
        .iter()
        .find(|item| item.id == id)
        .unwrap_or_else(|| unreachable!("catalog is missing {id}"))
}

/// Items listed under `tab`, in display order.
pub fn items_in(tab: ShopTab) -> impl Iterator<Item = &'static ShopItem> {
    CATALOG.iter().filter(move |item| item.tab == tab)
}

/// Buy `id` with `currency`.
///
/// Ownership is checked before affordability. On any error neither the gold
/// nor the ledger has changed.
pub fn purchase(
    currency: &mut f64,
    upgrades: &mut UpgradeState,
    id: ItemId,
) -> Result<&'static ShopItem, PurchaseError> {
    let item = item(id);
    if upgrades.owns(id) {
        return Err(PurchaseError::AlreadyOwned(id));
    }
    if *currency < item.cost as f64 {
        return Err(PurchaseError::InsufficientFunds {
            item: id,
            cost: item.cost,
            available: *currency,
        });
    }
    upgrades.apply_effect(item)?;
    *currency -= item.cost as f64;
    Ok(item)
}
