//! Rejections returned by the arena core.
//!
//! None of these are fatal: a rejected operation leaves the session untouched.

use thiserror::Error;

use super::shop::ItemId;

/// Why a shop purchase was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PurchaseError {
    /// The key does not name any catalog item.
    #[error("unknown shop item `{0}`")]
    UnknownItem(String),
    /// The item is already in the owned set for this run.
    #[error("`{0}` is already owned")]
    AlreadyOwned(ItemId),
    /// Not enough gold. Nothing was deducted.
    #[error("`{item}` costs {cost} gold, only {available:.0} available")]
    InsufficientFunds {
        item: ItemId,
        cost: u64,
        available: f64,
    },
}

impl PurchaseError {
    /// Short reason shown next to a rejected shop row.
    pub fn reason(&self) -> &'static str {
        match self {
            PurchaseError::UnknownItem(_) => "Objet inconnu",
            PurchaseError::AlreadyOwned(_) => "Déjà acheté",
            PurchaseError::InsufficientFunds { .. } => "Pas assez d'or",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_funds_message_mentions_cost() {
        let err = PurchaseError::InsufficientFunds {
            item: ItemId::BasicKnife,
            cost: 50,
            available: 40.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("50"), "got: {}", msg);
        assert!(msg.contains("40"), "got: {}", msg);
        assert_eq!(err.reason(), "Pas assez d'or");
    }

    #[test]
    fn already_owned_uses_item_key() {
        let err = PurchaseError::AlreadyOwned(ItemId::ChargeAttack);
        assert_eq!(err.to_string(), "`charge` is already owned");
    }
}
