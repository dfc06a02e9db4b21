//! Role normalization and the canonical role set for the reseller network.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use utoipa::ToSchema;

use crate::constants::OPERATOR_KEYS;

/// Canonical permission classes in the reseller network.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Dealer,
    Master,
    MasterProducts,
    Agent,
    SuperMaster,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Dealer
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Dealer => write!(f, "dealer"),
            Role::Master => write!(f, "master"),
            Role::MasterProducts => write!(f, "master_products"),
            Role::Agent => write!(f, "agent"),
            Role::SuperMaster => write!(f, "super_master"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl Role {
    /// Resolve a raw role value to a canonical role.
    ///
    /// Accepts every historical spelling the backend has emitted. Falls back
    /// to `Dealer` when the value is unrecognizable; the fallback resolves
    /// ambiguity so a session always carries a role, it is not a privilege
    /// boundary.
    pub fn from_raw(raw: &str) -> Self {
        match normalize_role(raw).as_str() {
            "admin" | "superuser" | "administrator" | "administrador" => Role::Admin,
            "supermaster" | "mastersuperior" => Role::SuperMaster,
            "masterproducts" | "masterproductos" | "masterprodotti" => Role::MasterProducts,
            "master" => Role::Master,
            "agent" | "agente" => Role::Agent,
            _ => Role::Dealer,
        }
    }

    /// Whether this role carries the universal operator override.
    pub fn is_operator(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Landing path of the role-prefixed portal area.
    ///
    /// Returned to the login caller so it can pick where to navigate next.
    pub fn area_path(&self) -> &'static str {
        match self {
            Role::Dealer => "/portal/dealer",
            Role::Master => "/portal/master",
            Role::MasterProducts => "/portal/master",
            Role::Agent => "/portal/agent",
            Role::SuperMaster => "/portal/supermaster",
            Role::Admin => "/portal/admin",
        }
    }
}

/// Canonicalize a free-text role value.
///
/// Lowercases, trims, strips diacritics (NFD followed by dropping the
/// combining marks), and removes every non-letter character. Total: any
/// input produces a key, unrecognized values simply pass through reduced.
pub fn normalize_role(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .nfd()
        .filter(|c| c.is_ascii_alphabetic())
        .collect()
}

/// Whether a normalized role key bypasses per-route allow-lists.
pub fn is_operator_key(key: &str) -> bool {
    OPERATOR_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_equivalence_class() {
        for raw in ["Agente", "AGENTE", " agente ", "Agènte"] {
            assert_eq!(normalize_role(raw), "agente", "failed for {:?}", raw);
        }
        assert_eq!(normalize_role("AGENT"), "agent");
        assert_eq!(normalize_role(" agent "), "agent");
    }

    #[test]
    fn test_normalize_strips_punctuation_and_digits() {
        assert_eq!(normalize_role("super_master"), "supermaster");
        assert_eq!(normalize_role("master-products"), "masterproducts");
        assert_eq!(normalize_role("admin2"), "admin");
    }

    #[test]
    fn test_normalize_is_total() {
        assert_eq!(normalize_role(""), "");
        assert_eq!(normalize_role("123!"), "");
        assert_eq!(normalize_role("whoknows"), "whoknows");
    }

    #[test]
    fn test_from_raw_aliases() {
        assert_eq!(Role::from_raw("Agente"), Role::Agent);
        assert_eq!(Role::from_raw("AGENT"), Role::Agent);
        assert_eq!(Role::from_raw("Super_Master"), Role::SuperMaster);
        assert_eq!(Role::from_raw("master-products"), Role::MasterProducts);
        assert_eq!(Role::from_raw("superuser"), Role::Admin);
    }

    #[test]
    fn test_from_raw_defaults_to_dealer() {
        assert_eq!(Role::from_raw(""), Role::Dealer);
        assert_eq!(Role::from_raw("mystery"), Role::Dealer);
    }

    #[test]
    fn test_is_operator() {
        assert!(Role::Admin.is_operator());
        assert!(Role::from_raw("superuser").is_operator());
        assert!(!Role::SuperMaster.is_operator());
        assert!(!Role::Dealer.is_operator());
    }

    #[test]
    fn test_operator_keys() {
        assert!(is_operator_key("admin"));
        assert!(is_operator_key("superuser"));
        assert!(!is_operator_key("supermaster"));
        assert!(!is_operator_key("dealer"));
    }
}
