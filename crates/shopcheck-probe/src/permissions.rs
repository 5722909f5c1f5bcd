//! The six tracked permission scopes and how their two sources combine.
//!
//! Granted scopes come either from `access_scopes.json` (authoritative) or
//! are inferred from which read endpoints answered 200. [`merge_permissions`]
//! is the single place the precedence between them is decided.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ReadPriceRules,
    WritePriceRules,
    ReadDiscounts,
    WriteDiscounts,
    ReadOrders,
    ReadAllOrders,
}

impl Permission {
    pub const ALL: [Permission; 6] = [
        Permission::ReadPriceRules,
        Permission::WritePriceRules,
        Permission::ReadDiscounts,
        Permission::WriteDiscounts,
        Permission::ReadOrders,
        Permission::ReadAllOrders,
    ];

    /// Needed for price-rule and discount-code automation.
    pub const CORE: [Permission; 4] = [
        Permission::ReadPriceRules,
        Permission::WritePriceRules,
        Permission::ReadDiscounts,
        Permission::WriteDiscounts,
    ];

    /// Additionally expected on shops on the Basic plan.
    pub const BASIC_TIER: [Permission; 2] = [Permission::ReadOrders, Permission::ReadAllOrders];

    /// The Shopify scope handle, identical to the permission key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::ReadPriceRules => "read_price_rules",
            Permission::WritePriceRules => "write_price_rules",
            Permission::ReadDiscounts => "read_discounts",
            Permission::WriteDiscounts => "write_discounts",
            Permission::ReadOrders => "read_orders",
            Permission::ReadAllOrders => "read_all_orders",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    pub read_price_rules: bool,
    pub write_price_rules: bool,
    pub read_discounts: bool,
    pub write_discounts: bool,
    pub read_orders: bool,
    pub read_all_orders: bool,
}

impl PermissionSet {
    /// Maps granted scope handles 1:1 onto the tracked keys. Handles outside
    /// the six keys are ignored; no normalisation is applied.
    #[must_use]
    pub fn from_scopes<S: AsRef<str>>(scopes: &[S]) -> Self {
        let mut set = Self::default();
        for permission in Permission::ALL {
            if scopes.iter().any(|s| s.as_ref() == permission.as_str()) {
                set.grant(permission);
            }
        }
        set
    }

    #[must_use]
    pub fn has(&self, permission: Permission) -> bool {
        match permission {
            Permission::ReadPriceRules => self.read_price_rules,
            Permission::WritePriceRules => self.write_price_rules,
            Permission::ReadDiscounts => self.read_discounts,
            Permission::WriteDiscounts => self.write_discounts,
            Permission::ReadOrders => self.read_orders,
            Permission::ReadAllOrders => self.read_all_orders,
        }
    }

    pub fn grant(&mut self, permission: Permission) {
        let flag = match permission {
            Permission::ReadPriceRules => &mut self.read_price_rules,
            Permission::WritePriceRules => &mut self.write_price_rules,
            Permission::ReadDiscounts => &mut self.read_discounts,
            Permission::WriteDiscounts => &mut self.write_discounts,
            Permission::ReadOrders => &mut self.read_orders,
            Permission::ReadAllOrders => &mut self.read_all_orders,
        };
        *flag = true;
    }

    #[must_use]
    pub fn has_all(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has(*p))
    }

    #[must_use]
    pub fn missing(&self, permissions: &[Permission]) -> Vec<Permission> {
        permissions
            .iter()
            .copied()
            .filter(|p| !self.has(*p))
            .collect()
    }

    #[must_use]
    pub fn can_read_orders(&self) -> bool {
        self.read_orders || self.read_all_orders
    }
}

/// Combines probe-inferred permissions with the scopes endpoint's answer.
///
/// When the scopes endpoint answered, its set is returned as-is, including
/// where it disagrees with what the probes inferred. Otherwise the inferred
/// set stands.
#[must_use]
pub fn merge_permissions(inferred: PermissionSet, granted: Option<PermissionSet>) -> PermissionSet {
    granted.unwrap_or(inferred)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_scopes_maps_exact_handles() {
        let set = PermissionSet::from_scopes(&["read_orders", "write_price_rules", "read_products"]);
        assert!(set.read_orders);
        assert!(set.write_price_rules);
        assert!(!set.read_price_rules);
        assert!(!set.read_all_orders);
    }

    #[test]
    fn from_scopes_does_not_normalise_case_or_implication() {
        let set = PermissionSet::from_scopes(&["READ_ORDERS", "write_discounts"]);
        assert!(!set.read_orders);
        assert!(set.write_discounts);
        assert!(!set.read_discounts, "write does not imply read");
    }

    #[test]
    fn grant_and_has_agree_for_every_permission() {
        for permission in Permission::ALL {
            let mut set = PermissionSet::default();
            assert!(!set.has(permission));
            set.grant(permission);
            assert!(set.has(permission));
            assert_eq!(
                PermissionSet::from_scopes(&[permission.as_str()]),
                set,
                "scope handle {permission} should map to its own key only"
            );
        }
    }

    #[test]
    fn merge_prefers_granted_scopes_on_disagreement() {
        let mut inferred = PermissionSet::default();
        inferred.grant(Permission::ReadOrders);
        inferred.grant(Permission::ReadPriceRules);

        let granted = PermissionSet::from_scopes(&["read_price_rules", "write_price_rules"]);
        let merged = merge_permissions(inferred, Some(granted));

        assert_eq!(merged, granted);
        assert!(!merged.read_orders);
    }

    #[test]
    fn merge_keeps_inferred_without_scopes() {
        let mut inferred = PermissionSet::default();
        inferred.grant(Permission::ReadOrders);
        assert_eq!(merge_permissions(inferred, None), inferred);
    }

    #[test]
    fn missing_lists_ungranted_in_order() {
        let set = PermissionSet::from_scopes(&["read_discounts"]);
        assert_eq!(
            set.missing(&Permission::CORE),
            vec![
                Permission::ReadPriceRules,
                Permission::WritePriceRules,
                Permission::WriteDiscounts
            ]
        );
        assert!(!set.has_all(&Permission::CORE));
    }

    #[test]
    fn serializes_with_scope_names_as_keys() {
        let json = serde_json::to_value(PermissionSet::from_scopes(&["read_all_orders"])).unwrap();
        assert_eq!(json["read_all_orders"], true);
        assert_eq!(json["write_discounts"], false);
    }
}
