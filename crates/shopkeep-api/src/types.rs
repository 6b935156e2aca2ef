// Wire types for the shopkeep admin API.
//
// The backend serializes everything camelCase with integer ids. Read
// shapes embed related records (a Role carries its Permissions); write
// shapes carry id lists (`roleIds`, `permissionIds`, `categoryIds`).

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier shared by every resource type.
pub type ResourceId = i64;

// ── Catalog: categories and tags ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: ResourceId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDraft {
    pub name: String,
}

// ── Products ─────────────────────────────────────────────────────────

/// A durable, already-uploaded product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    #[serde(default)]
    pub id: Option<ResourceId>,
    pub url: String,
}

/// A local file pending upload, sent as one multipart `images` part.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    /// Percent off the list price.
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub available_quantity: i64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<ResourceId>,
    #[serde(default)]
    pub tag_ids: Vec<ResourceId>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// Write shape for product create/update. Serialized as the JSON string
/// inside the multipart `product` field, or as the whole body on the
/// pure-JSON path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub available_quantity: i64,
    pub discount: f64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<ResourceId>,
    #[serde(default)]
    pub tag_ids: Vec<ResourceId>,
}

// ── Product list filters ─────────────────────────────────────────────

/// Sales period bucket for filtered product queries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
}

/// Query filters for `GET /api/products`.
///
/// Absent and falsy fields are omitted from the query string entirely;
/// id lists are comma-joined into a single parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub period: Option<Period>,
    pub special_offers: bool,
    pub bestsellers: bool,
    pub category_ids: Vec<ResourceId>,
    pub tag_ids: Vec<ResourceId>,
}

impl ProductFilters {
    /// Build the query pairs in a stable order.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(min) = self.min_price {
            params.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("maxPrice", max.to_string()));
        }
        if let Some(period) = self.period {
            params.push(("period", period.to_string()));
        }
        if self.special_offers {
            params.push(("specialOffers", "true".to_owned()));
        }
        if self.bestsellers {
            params.push(("bestsellers", "true".to_owned()));
        }
        if !self.category_ids.is_empty() {
            params.push(("categoryIds", join_ids(&self.category_ids)));
        }
        if !self.tag_ids.is_empty() {
            params.push(("tagIds", join_ids(&self.tag_ids)));
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.query_params().is_empty()
    }
}

fn join_ids(ids: &[ResourceId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

// ── Orders ───────────────────────────────────────────────────────────

/// Fulfillment state of an order.
///
/// Forward-only ordering `PENDING → CONFIRMED → PROCESSING → SHIPPED →
/// DELIVERED`; `CANCELLED` is reachable from any non-terminal state and
/// is itself terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The single next status in the forward ordering, if one exists.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Processing),
            Self::Processing => Some(Self::Shipped),
            Self::Shipped => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// The statuses an update UI may offer from this one: the current
    /// status (no-op), the next in the ordering when there is one, and
    /// `CANCELLED` unless already cancelled.
    ///
    /// This is a presentation guard only — the update endpoint itself
    /// forwards whatever the caller supplies and leaves authority with
    /// the backend.
    pub fn allowed_transitions(self) -> Vec<Self> {
        if self == Self::Cancelled {
            return vec![Self::Cancelled];
        }
        let mut allowed = vec![self];
        if let Some(next) = self.next() {
            allowed.push(next);
        }
        allowed.push(Self::Cancelled);
        allowed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at order time.
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: ResourceId,
    pub user_id: ResourceId,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
}

// ── Users, roles, permissions ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Embedded on reads; writes go through `RoleDraft::permission_ids`.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permission_ids: Vec<ResourceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ResourceId,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub work_email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Embedded on reads; writes go through `UserDraft::role_ids`.
    #[serde(default)]
    pub roles: Vec<Role>,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: String,
    /// Only sent on create and password changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub work_email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub role_ids: Vec<ResourceId>,
}

/// Body for `PATCH /api/users/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusToggle {
    pub enabled: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn filters_omit_absent_and_falsy_fields() {
        let filters = ProductFilters {
            min_price: Some(10.0),
            max_price: None,
            category_ids: vec![1, 2],
            tag_ids: vec![],
            ..ProductFilters::default()
        };

        assert_eq!(
            filters.query_params(),
            vec![
                ("minPrice", "10".to_owned()),
                ("categoryIds", "1,2".to_owned()),
            ]
        );
    }

    #[test]
    fn filters_serialize_flags_and_period() {
        let filters = ProductFilters {
            period: Some(Period::Month),
            special_offers: true,
            bestsellers: true,
            ..ProductFilters::default()
        };

        assert_eq!(
            filters.query_params(),
            vec![
                ("period", "month".to_owned()),
                ("specialOffers", "true".to_owned()),
                ("bestsellers", "true".to_owned()),
            ]
        );
    }

    #[test]
    fn empty_filters_build_no_query() {
        assert!(ProductFilters::default().is_empty());
    }

    #[test]
    fn pending_offers_itself_next_and_cancelled() {
        assert_eq!(
            OrderStatus::Pending.allowed_transitions(),
            vec![
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Cancelled
            ]
        );
    }

    #[test]
    fn delivered_offers_only_itself_and_cancelled() {
        assert_eq!(
            OrderStatus::Delivered.allowed_transitions(),
            vec![OrderStatus::Delivered, OrderStatus::Cancelled]
        );
    }

    #[test]
    fn cancelled_is_a_dead_end() {
        assert_eq!(
            OrderStatus::Cancelled.allowed_transitions(),
            vec![OrderStatus::Cancelled]
        );
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn order_status_uses_wire_casing() {
        assert_eq!(OrderStatus::Pending.to_string(), "PENDING");
        assert_eq!(
            serde_json::to_string(&OrderStatus::Shipped).unwrap(),
            "\"SHIPPED\""
        );
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"CANCELLED\"").unwrap(),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn user_draft_serializes_role_ids_camel_case() {
        let draft = UserDraft {
            username: "amara".into(),
            role_ids: vec![4, 7],
            ..UserDraft::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["roleIds"], serde_json::json!([4, 7]));
        assert!(value.get("password").is_none());
    }
}
