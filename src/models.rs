//! Catalog entities and their create payloads.
//!
//! List models are `Deserialize`-only: beyond the id and the foreign keys
//! used for joining, every field is opaque display data. Field names on the
//! wire are camelCase, but several endpoints emit PascalCase instead, so
//! each field carries an alias for the uppercase spelling.
//!
//! Create payloads are `Serialize`-only and implement
//! [`RequiredFields`](crate::resource::RequiredFields) so the CRUD shell can
//! reject an incomplete form before any request is issued.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::resource::{Identified, RequiredFields};

/// A record id as the backend sends it: a number from most endpoints, a
/// string from a few. Equality and hashing go through the stringified key,
/// so `RecordId::from(5)` and `RecordId::from("5")` compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric id.
    Int(i64),
    /// Stringified id.
    Text(String),
}

impl RecordId {
    /// The normalized comparison key.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parse the backend's date strings tolerantly (ISO-8601 with or without
/// offset or fractional seconds, or a bare date).
#[must_use]
pub fn parse_backend_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// ── Simple entities ────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(alias = "Id")]
    pub id: RecordId,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Badge", default)]
    pub badge: Option<String>,
    #[serde(alias = "ImageUrl", default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(alias = "Id")]
    pub id: RecordId,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "ImageUrl", default)]
    pub image_url: Option<String>,
    #[serde(alias = "BrandId")]
    pub brand_id: RecordId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGroup {
    #[serde(alias = "Id")]
    pub id: RecordId,
    #[serde(alias = "From")]
    pub from: i32,
    #[serde(alias = "To")]
    pub to: i32,
}

impl YearGroup {
    /// The "from-to" display projection used everywhere year ranges render.
    #[must_use]
    pub fn range_label(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailGroup {
    #[serde(alias = "Id")]
    pub id: RecordId,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "ImageUrl", default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    #[serde(alias = "Id")]
    pub id: RecordId,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Description", default)]
    pub description: Option<String>,
    #[serde(alias = "Oem", alias = "OEM", default)]
    pub oem: Option<String>,
    #[serde(alias = "ImageUrl", default)]
    pub image_url: Option<String>,
    #[serde(alias = "Compatibility", default)]
    pub compatibility: Option<String>,
    #[serde(alias = "Weight", default)]
    pub weight: Option<f64>,
    #[serde(alias = "Price", default)]
    pub price: Option<f64>,
    #[serde(alias = "DiscountPrice", default)]
    pub discount_price: Option<f64>,
    #[serde(alias = "Stock", default)]
    pub stock: Option<i64>,
    #[serde(alias = "IsDisabled", default)]
    pub is_disabled: bool,
    #[serde(alias = "IsDiscount", default)]
    pub is_discount: bool,
    #[serde(alias = "IsHighlight", default)]
    pub is_highlight: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(alias = "Id")]
    pub id: RecordId,
    #[serde(alias = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    #[serde(alias = "Id")]
    pub id: RecordId,
    #[serde(alias = "PromoCode", alias = "code")]
    pub promo_code: String,
    #[serde(alias = "Discount", alias = "discountPercent", default)]
    pub discount: Option<f64>,
    #[serde(alias = "StartDate", default)]
    pub start_date: Option<String>,
    #[serde(alias = "EndDate", default)]
    pub end_date: Option<String>,
    #[serde(alias = "IsDisable", alias = "isDisabled", default)]
    pub is_disable: bool,
    #[serde(alias = "Limit", alias = "usageLimit", default)]
    pub limit: Option<i64>,
    #[serde(alias = "UsageCounter", default)]
    pub usage_counter: Option<i64>,
    // The backend route historically spelled this "mimimumAmount".
    #[serde(
        alias = "MinimumAmount",
        alias = "mimimumAmount",
        alias = "MimimumAmount",
        default
    )]
    pub minimum_amount: Option<f64>,
}

impl PromoCode {
    /// Whether the code's end date lies before `now`. Unparseable or absent
    /// dates count as not expired.
    #[must_use]
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.end_date
            .as_deref()
            .and_then(parse_backend_date)
            .is_some_and(|end| end < now)
    }
}

/// Row of the user listing (bare array, no envelope).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "Id", default)]
    pub id: Option<RecordId>,
    #[serde(alias = "UserName", default)]
    pub user_name: Option<String>,
    #[serde(alias = "Email", default)]
    pub email: Option<String>,
    #[serde(alias = "Role", default)]
    pub role: Option<String>,
}

// ── Link records ───────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelYearGroupLink {
    #[serde(alias = "Id", default)]
    pub id: Option<RecordId>,
    #[serde(alias = "ModelId")]
    pub model_id: RecordId,
    #[serde(alias = "YearGroupId")]
    pub year_group_id: RecordId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailGroupLink {
    #[serde(alias = "Id", default)]
    pub id: Option<RecordId>,
    #[serde(alias = "ModelId")]
    pub model_id: RecordId,
    #[serde(alias = "YearGroupId")]
    pub year_group_id: RecordId,
    #[serde(alias = "DetailGroupId")]
    pub detail_group_id: RecordId,
}

/// The 4-way link list arrives pre-joined: the backend expands the key into
/// display names, so no reference-index lookup is needed on this screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalLinkRow {
    #[serde(alias = "ModelName")]
    pub model_name: String,
    #[serde(alias = "From")]
    pub from: i32,
    #[serde(alias = "To")]
    pub to: i32,
    #[serde(alias = "DetailGroupName")]
    pub detail_group_name: String,
    #[serde(alias = "DetailName")]
    pub detail_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailTagLink {
    #[serde(alias = "Id", default)]
    pub id: Option<RecordId>,
    #[serde(alias = "TagId")]
    pub tag_id: RecordId,
    #[serde(alias = "DetailId")]
    pub detail_id: RecordId,
}

// ── Identified impls (deletable list models) ───────────────────

impl Identified for Brand {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

impl Identified for Model {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

impl Identified for YearGroup {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

impl Identified for DetailGroup {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

impl Identified for Detail {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

impl Identified for Tag {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

impl Identified for PromoCode {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

// ── Create payloads ────────────────────────────────────────────

fn missing(field: &'static str, value: &str, out: &mut Vec<&'static str>) {
    if value.trim().is_empty() {
        out.push(field);
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandCreate {
    pub name: String,
    pub badge: Option<String>,
    pub image_url: String,
}

impl RequiredFields for BrandCreate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        missing("name", &self.name, &mut out);
        missing("imageUrl", &self.image_url, &mut out);
        out
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCreate {
    pub name: String,
    pub image_url: String,
    pub brand_id: Option<RecordId>,
}

impl RequiredFields for ModelCreate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        missing("name", &self.name, &mut out);
        missing("imageUrl", &self.image_url, &mut out);
        if self.brand_id.is_none() {
            out.push("brandId");
        }
        out
    }
}

/// Year bounds come straight from form inputs, so they stay strings here;
/// the backend parses them.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGroupCreate {
    pub from: String,
    pub to: String,
}

impl RequiredFields for YearGroupCreate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        missing("from", &self.from, &mut out);
        missing("to", &self.to, &mut out);
        out
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailGroupCreate {
    pub name: String,
    pub image_url: Option<String>,
}

impl RequiredFields for DetailGroupCreate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        missing("name", &self.name, &mut out);
        out
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailCreate {
    pub name: String,
    pub description: Option<String>,
    pub oem: Option<String>,
    pub image_url: Option<String>,
    pub compatibility: Option<String>,
    pub weight: Option<f64>,
    pub price: Option<f64>,
    pub discount_price: Option<f64>,
    pub stock: Option<i64>,
    pub is_disabled: bool,
    pub is_discount: bool,
    pub is_highlight: bool,
}

impl RequiredFields for DetailCreate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        missing("name", &self.name, &mut out);
        if self.price.is_none() {
            out.push("price");
        }
        out
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCreate {
    pub name: String,
}

impl RequiredFields for TagCreate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        missing("name", &self.name, &mut out);
        out
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeCreate {
    pub promo_code: String,
    pub start_date: String,
    pub end_date: String,
    pub is_disable: bool,
    pub limit: Option<i64>,
    pub discount: Option<f64>,
    pub minimum_amount: Option<f64>,
}

impl RequiredFields for PromoCodeCreate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        missing("promoCode", &self.promo_code, &mut out);
        if self.discount.is_none() {
            out.push("discount");
        }
        missing("startDate", &self.start_date, &mut out);
        missing("endDate", &self.end_date, &mut out);
        out
    }
}

// ── Link create payloads (serialized as query parameters) ──────

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelYearGroupCreate {
    pub model_id: Option<RecordId>,
    pub year_group_id: Option<RecordId>,
}

impl RequiredFields for ModelYearGroupCreate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.model_id.is_none() {
            out.push("modelId");
        }
        if self.year_group_id.is_none() {
            out.push("yearGroupId");
        }
        out
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailGroupLinkCreate {
    pub model_id: Option<RecordId>,
    pub year_group_id: Option<RecordId>,
    pub detail_group_id: Option<RecordId>,
}

impl RequiredFields for DetailGroupLinkCreate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.model_id.is_none() {
            out.push("modelId");
        }
        if self.year_group_id.is_none() {
            out.push("yearGroupId");
        }
        if self.detail_group_id.is_none() {
            out.push("detailGroupId");
        }
        out
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalLinkCreate {
    pub model_id: Option<RecordId>,
    pub year_group_id: Option<RecordId>,
    pub detail_group_id: Option<RecordId>,
    pub detail_id: Option<RecordId>,
}

impl RequiredFields for FinalLinkCreate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.model_id.is_none() {
            out.push("modelId");
        }
        if self.year_group_id.is_none() {
            out.push("yearGroupId");
        }
        if self.detail_group_id.is_none() {
            out.push("detailGroupId");
        }
        if self.detail_id.is_none() {
            out.push("detailId");
        }
        out
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailTagCreate {
    pub tag_id: Option<RecordId>,
    pub detail_id: Option<RecordId>,
}

impl RequiredFields for DetailTagCreate {
    fn missing_required(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.tag_id.is_none() {
            out.push("tagId");
        }
        if self.detail_id.is_none() {
            out.push("detailId");
        }
        out
    }
}

// ── Auth payloads ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "Token", default)]
    pub token: Option<String>,
}
