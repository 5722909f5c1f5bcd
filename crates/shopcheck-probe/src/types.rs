//! Result records produced by a check, plus the slices of Shopify Admin API
//! responses the check reads.
//!
//! ## Shopify response shapes
//!
//! Only the fields the check looks at are modelled and all of them are
//! optional: stores on old API versions omit some, and a partially parsed
//! body is still better evidence than none. IDs are 64-bit integers.

use serde::{Deserialize, Serialize};

use crate::permissions::PermissionSet;

/// Everything learned in one integration check.
///
/// Created fresh per invocation and filled in step by step. `errors` only
/// grows: a failed step appends to it and the next step still runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationResult {
    pub connection: bool,
    /// The identifier exactly as the caller supplied it.
    pub original_domain: String,
    pub domains_tried: Vec<String>,
    /// The candidate host that answered `shop.json` with 200.
    pub connected_domain: Option<String>,
    /// The store's own declared `myshopify_domain`, when it reported one.
    pub official_myshopify_domain: Option<String>,
    /// Host used for every step after connecting.
    pub working_domain: Option<String>,
    pub shop_name: Option<String>,
    pub plan_name: Option<String>,
    pub myshopify_domain: Option<String>,
    pub api_version: String,
    pub token_kind: TokenKind,
    pub permissions: PermissionSet,
    /// Every scope handle the token holds, including untracked ones.
    pub all_scopes: Vec<String>,
    pub endpoints: Vec<EndpointProbeResult>,
    /// Whether the Orders probe succeeded; only set when an orders scope is granted.
    pub orders_api_access: Option<bool>,
    pub price_rule_creation: bool,
    pub price_rule_id: Option<i64>,
    pub price_rule_title: Option<String>,
    pub discount_code_creation: bool,
    pub discount_code: Option<String>,
    pub discount_code_id: Option<i64>,
    pub errors: Vec<String>,
}

impl IntegrationResult {
    #[must_use]
    pub fn new(shop_url: &str, api_version: &str) -> Self {
        Self {
            connection: false,
            original_domain: shop_url.to_owned(),
            domains_tried: Vec::new(),
            connected_domain: None,
            official_myshopify_domain: None,
            working_domain: None,
            shop_name: None,
            plan_name: None,
            myshopify_domain: None,
            api_version: api_version.to_owned(),
            token_kind: TokenKind::Unknown,
            permissions: PermissionSet::default(),
            all_scopes: Vec::new(),
            endpoints: Vec::new(),
            orders_api_access: None,
            price_rule_creation: false,
            price_rule_id: None,
            price_rule_title: None,
            discount_code_creation: false,
            discount_code: None,
            discount_code_id: None,
            errors: Vec::new(),
        }
    }

    /// The host to store for this shop: its declared domain if known,
    /// otherwise the one that connected.
    #[must_use]
    pub fn recommended_domain(&self) -> Option<&str> {
        self.official_myshopify_domain
            .as_deref()
            .or(self.connected_domain.as_deref())
    }

    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<&EndpointProbeResult> {
        self.endpoints.iter().find(|e| e.name == name)
    }
}

/// What kind of credential a token looks like, judged by its prefix alone.
///
/// Purely informational for the report; the token is sent as-is either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    AdminApiAccessToken,
    CustomAppAccessToken,
    PrivateAppPassword,
    StorefrontAccessToken,
    Unknown,
}

impl TokenKind {
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token.starts_with("shpat_") {
            TokenKind::AdminApiAccessToken
        } else if token.starts_with("shpca_") {
            TokenKind::CustomAppAccessToken
        } else if token.starts_with("shppa_") {
            TokenKind::PrivateAppPassword
        } else if token.starts_with("shpss_") {
            TokenKind::StorefrontAccessToken
        } else {
            TokenKind::Unknown
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::AdminApiAccessToken => "Admin API access token",
            TokenKind::CustomAppAccessToken => "Custom app access token",
            TokenKind::PrivateAppPassword => "Private app password",
            TokenKind::StorefrontAccessToken => "Storefront API access token",
            TokenKind::Unknown => "Unknown token type",
        }
    }
}

/// HTTP status of a probe, or a marker that no response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Http(u16),
    Error,
}

impl ProbeStatus {
    #[must_use]
    pub fn is_ok(self) -> bool {
        self == ProbeStatus::Http(200)
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeStatus::Http(code) => write!(f, "{code}"),
            ProbeStatus::Error => f.write_str("Error"),
        }
    }
}

// Serialized as the bare status number, or the string "Error".
impl Serialize for ProbeStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProbeStatus::Http(code) => serializer.serialize_u16(*code),
            ProbeStatus::Error => serializer.serialize_str("Error"),
        }
    }
}

/// Outcome of one GET in the endpoint battery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointProbeResult {
    pub name: String,
    pub url: String,
    pub status: ProbeStatus,
    /// Parsed highlights of a 200 body.
    pub summary: Option<EndpointSummary>,
    /// Shopify's error message, or the transport error, when not 200.
    pub error: Option<String>,
    /// First characters of the raw body.
    pub preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EndpointSummary {
    Shop {
        name: Option<String>,
        plan_name: Option<String>,
        myshopify_domain: Option<String>,
    },
    PriceRules {
        count: usize,
    },
    Products {
        count: usize,
    },
    Orders {
        count: usize,
        first_order: Option<OrderPreview>,
    },
    OrderCount {
        count: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPreview {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub financial_status: Option<String>,
    #[serde(default)]
    pub discount_codes: Vec<OrderDiscountCode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDiscountCode {
    #[serde(default)]
    pub code: Option<String>,
}

/// `GET /admin/api/{version}/shop.json`
#[derive(Debug, Default, Deserialize)]
pub struct ShopEnvelope {
    #[serde(default)]
    pub shop: ShopDetails,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ShopDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub myshopify_domain: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

/// `GET /admin/oauth/access_scopes.json`
#[derive(Debug, Deserialize)]
pub struct AccessScopesEnvelope {
    #[serde(default)]
    pub access_scopes: Vec<AccessScope>,
}

#[derive(Debug, Deserialize)]
pub struct AccessScope {
    pub handle: String,
}

/// Response to `POST price_rules.json`.
#[derive(Debug, Default, Deserialize)]
pub struct PriceRuleEnvelope {
    #[serde(default)]
    pub price_rule: CreatedPriceRule,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatedPriceRule {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Response to `POST price_rules/{id}/discount_codes.json`.
#[derive(Debug, Default, Deserialize)]
pub struct DiscountCodeEnvelope {
    #[serde(default)]
    pub discount_code: CreatedDiscountCode,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatedDiscountCode {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Endpoint battery results for one API version in diagnostic mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionDiagnostic {
    pub api_version: String,
    /// At least one endpoint answered 200.
    pub accessible: bool,
    pub endpoints: Vec<EndpointProbeResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticOutcome {
    NoAccess,
    AccessWithOrders,
    AccessWithoutOrders,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticSummary {
    pub outcome: DiagnosticOutcome,
    pub message: String,
    /// Likely causes, only filled for [`DiagnosticOutcome::NoAccess`].
    pub hypotheses: Vec<String>,
    pub working_versions: Vec<String>,
    pub missing_scope: Option<String>,
}

/// Output of diagnostic mode: every endpoint against every version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    pub original_domain: String,
    pub shop_domain: String,
    pub versions: Vec<VersionDiagnostic>,
    pub summary: DiagnosticSummary,
}
