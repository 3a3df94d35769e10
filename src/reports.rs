//! Promo-code usage reporting.
//!
//! These endpoints return bare JSON rather than the catalog envelope, and
//! numbers rather than records: aggregate totals plus per-usage rows. The
//! only client-side behavior on top is a case-insensitive text filter over
//! the usage rows.

use serde::Deserialize;

use crate::client::ApiClient;
use crate::errors::ApiError;
use crate::models::RecordId;

const ALL_USAGES_PATH: &str = "api/v1/Cart/admin/all-promocode-usages";
const STATISTICS_PATH: &str = "api/v1/Cart/admin/promocode-statistics";
const USAGES_BY_CODE_PATH: &str = "api/v1/Cart/admin/promocode-usages";
const USER_HISTORY_PATH: &str = "api/v1/Cart/admin/user-promocode-history";

/// One redemption of a promo code at checkout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoUsage {
    #[serde(alias = "Id", default)]
    pub id: Option<RecordId>,
    #[serde(alias = "UserName", default)]
    pub user_name: Option<String>,
    #[serde(alias = "UserEmail", default)]
    pub user_email: Option<String>,
    #[serde(alias = "PromocodeText", default)]
    pub promocode_text: Option<String>,
    #[serde(alias = "UsedDate", default)]
    pub used_date: Option<String>,
    #[serde(alias = "OriginalAmount", default)]
    pub original_amount: Option<f64>,
    #[serde(alias = "FinalAmount", default)]
    pub final_amount: Option<f64>,
    #[serde(alias = "DiscountAmount", default)]
    pub discount_amount: Option<f64>,
    #[serde(alias = "DiscountPercent", default)]
    pub discount_percent: Option<f64>,
    #[serde(alias = "IpAddress", default)]
    pub ip_address: Option<String>,
}

/// Usage rows plus their aggregates, as one report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageHistory {
    #[serde(alias = "Usages", default)]
    pub usages: Vec<PromoUsage>,
    #[serde(alias = "TotalUsages", default)]
    pub total_usages: u64,
    #[serde(alias = "TotalRevenue", default)]
    pub total_revenue: f64,
    #[serde(alias = "TotalDiscountGiven", default)]
    pub total_discount_given: f64,
}

impl UsageHistory {
    /// Usage rows whose user name, email, or code contains `term`,
    /// case-insensitively. An empty term matches everything.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&PromoUsage> {
        let needle = term.to_lowercase();
        self.usages
            .iter()
            .filter(|usage| {
                [&usage.user_name, &usage.user_email, &usage.promocode_text]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

/// Aggregates for one promo code within the statistics report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeStat {
    #[serde(alias = "PromocodeText", default)]
    pub promocode_text: Option<String>,
    #[serde(alias = "DiscountPercent", default)]
    pub discount_percent: Option<f64>,
    #[serde(alias = "UsageCount", default)]
    pub usage_count: u64,
    #[serde(alias = "UniqueUsers", default)]
    pub unique_users: u64,
    #[serde(alias = "TotalRevenue", default)]
    pub total_revenue: f64,
    #[serde(alias = "LastUsedDate", default)]
    pub last_used_date: Option<String>,
}

/// The per-code breakdown with overall totals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoStatistics {
    #[serde(alias = "TotalUsages", default)]
    pub total_usages: u64,
    #[serde(alias = "TotalRevenue", default)]
    pub total_revenue: f64,
    #[serde(alias = "TotalDiscountGiven", default)]
    pub total_discount_given: f64,
    #[serde(alias = "TotalPromocodes", default)]
    pub total_promocodes: u64,
    #[serde(alias = "Promocodes", default)]
    pub promocodes: Vec<PromoCodeStat>,
}

/// Every recorded usage across all codes.
pub async fn all_usages(client: &ApiClient) -> Result<UsageHistory, ApiError> {
    client.get_bare(ALL_USAGES_PATH).await
}

/// Per-code aggregates.
pub async fn statistics(client: &ApiClient) -> Result<PromoStatistics, ApiError> {
    client.get_bare(STATISTICS_PATH).await
}

/// Usages of one promo code.
pub async fn usages_by_code(
    client: &ApiClient,
    promocode_id: &RecordId,
) -> Result<UsageHistory, ApiError> {
    client
        .get_bare(&format!("{USAGES_BY_CODE_PATH}/{promocode_id}"))
        .await
}

/// One user's redemption history.
pub async fn user_history(
    client: &ApiClient,
    user_id: &RecordId,
) -> Result<UsageHistory, ApiError> {
    client
        .get_bare(&format!("{USER_HISTORY_PATH}/{user_id}"))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> UsageHistory {
        serde_json::from_str(
            r#"{
                "usages": [
                    {"id": 1, "userName": "Anna", "userEmail": "anna@example.com", "promocodeText": "SAVE10"},
                    {"id": 2, "userName": "Boris", "userEmail": "boris@example.com", "promocodeText": "WINTER"}
                ],
                "totalUsages": 2,
                "totalRevenue": 150.0,
                "totalDiscountGiven": 15.0
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let history = history();
        assert_eq!(history.search("ANNA").len(), 1);
        assert_eq!(history.search("example.com").len(), 2);
        assert_eq!(history.search("winter").len(), 1);
        assert!(history.search("nothing").is_empty());
    }

    #[test]
    fn test_search_empty_term_matches_all() {
        assert_eq!(history().search("").len(), 2);
    }

    #[test]
    fn test_statistics_deserializes_with_defaults() {
        let stats: PromoStatistics = serde_json::from_str(
            r#"{"totalUsages": 5, "totalRevenue": 99.5, "promocodes": [{"promocodeText": "SAVE10", "usageCount": 5}]}"#,
        )
        .unwrap();
        assert_eq!(stats.total_usages, 5);
        assert_eq!(stats.total_promocodes, 0);
        assert_eq!(stats.promocodes[0].usage_count, 5);
        assert!(stats.promocodes[0].last_used_date.is_none());
    }
}
