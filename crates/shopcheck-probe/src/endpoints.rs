//! The fixed battery of read endpoints probed after connecting.

use serde_json::Value;

use crate::permissions::Permission;
use crate::types::{EndpointSummary, OrderPreview, ShopEnvelope};

pub const SHOP_INFO: &str = "Shop Info";
pub const PRICE_RULES: &str = "Price Rules";
pub const PRODUCTS: &str = "Products";
pub const ORDERS: &str = "Orders";
pub const ORDER_COUNT: &str = "Order Count";
pub const DISCOUNTED_ORDERS: &str = "Orders with Discounts";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Shop,
    PriceRules,
    Products,
    Orders,
    OrderCount,
    DiscountedOrders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: &'static str,
    /// Path under `/admin/api/{version}/`, including any query string.
    pub resource: &'static str,
    pub kind: EndpointKind,
}

/// Probed in this order, every time, regardless of earlier failures.
pub const ENDPOINTS: [EndpointSpec; 6] = [
    EndpointSpec {
        name: SHOP_INFO,
        resource: "shop.json",
        kind: EndpointKind::Shop,
    },
    EndpointSpec {
        name: PRICE_RULES,
        resource: "price_rules.json?limit=10",
        kind: EndpointKind::PriceRules,
    },
    EndpointSpec {
        name: PRODUCTS,
        resource: "products.json?limit=1",
        kind: EndpointKind::Products,
    },
    EndpointSpec {
        name: ORDERS,
        resource: "orders.json?limit=1&status=any",
        kind: EndpointKind::Orders,
    },
    EndpointSpec {
        name: ORDER_COUNT,
        resource: "orders/count.json?status=any",
        kind: EndpointKind::OrderCount,
    },
    EndpointSpec {
        name: DISCOUNTED_ORDERS,
        resource: "orders.json?limit=5&status=any&fields=id,name,created_at,financial_status,discount_codes",
        kind: EndpointKind::DiscountedOrders,
    },
];

impl EndpointKind {
    /// Permission proven by this endpoint answering 200.
    #[must_use]
    pub fn inferred_permission(self) -> Option<Permission> {
        match self {
            EndpointKind::PriceRules => Some(Permission::ReadPriceRules),
            EndpointKind::Orders | EndpointKind::OrderCount => Some(Permission::ReadOrders),
            EndpointKind::Shop | EndpointKind::Products | EndpointKind::DiscountedOrders => None,
        }
    }

    /// Pulls the interesting bits out of a 200 body. `None` when the body
    /// does not have the expected top-level key.
    #[must_use]
    pub fn summarize(self, body: &Value) -> Option<EndpointSummary> {
        match self {
            EndpointKind::Shop => {
                let envelope: ShopEnvelope = serde_json::from_value(body.clone()).ok()?;
                Some(EndpointSummary::Shop {
                    name: envelope.shop.name,
                    plan_name: envelope.shop.plan_name,
                    myshopify_domain: envelope.shop.myshopify_domain,
                })
            }
            EndpointKind::PriceRules => Some(EndpointSummary::PriceRules {
                count: body.get("price_rules")?.as_array()?.len(),
            }),
            EndpointKind::Products => Some(EndpointSummary::Products {
                count: body.get("products")?.as_array()?.len(),
            }),
            EndpointKind::Orders | EndpointKind::DiscountedOrders => {
                let orders = body.get("orders")?.as_array()?;
                let first_order = orders
                    .first()
                    .and_then(|o| serde_json::from_value::<OrderPreview>(o.clone()).ok());
                Some(EndpointSummary::Orders {
                    count: orders.len(),
                    first_order,
                })
            }
            EndpointKind::OrderCount => Some(EndpointSummary::OrderCount {
                count: body.get("count")?.as_u64()?,
            }),
        }
    }
}

/// Whether `name` is one of the endpoints that prove order access.
#[must_use]
pub fn reads_orders(name: &str) -> bool {
    name == ORDERS || name == ORDER_COUNT
}
