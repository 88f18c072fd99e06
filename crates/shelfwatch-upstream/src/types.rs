//! Wire types for the inventory API payload.
//!
//! The upstream speaks camelCase JSON:
//! `{ code, message?, data: { skuList: [ { validProductAttrValueIdList, count, price } ] } }`.
//! Unknown fields are ignored.

use serde::Deserialize;

/// Top-level response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuEnvelope {
    /// Business status code; 200 means success.
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<SkuData>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SkuData {
    #[serde(default)]
    pub sku_list: Vec<SkuRecord>,
}

/// One SKU record: a set of attribute-value ids identifying the variant,
/// plus its stock count and price.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuRecord {
    #[serde(default)]
    pub valid_product_attr_value_id_list: Vec<i64>,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub price: f64,
}

impl SkuRecord {
    /// Whether this record carries the given attribute-value id.
    pub fn has_attr(&self, attr_id: i64) -> bool {
        self.valid_product_attr_value_id_list.contains(&attr_id)
    }
}

/// The SKU records from one successful fetch. Owned by the tick that
/// fetched it.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    pub skus: Vec<SkuRecord>,
}

impl InventorySnapshot {
    /// SKU records matching the given attribute-value id, in payload order.
    pub fn matches(&self, attr_id: i64) -> impl Iterator<Item = &SkuRecord> {
        self.skus.iter().filter(move |sku| sku.has_attr(attr_id))
    }
}

/// Result of one poll, matched exhaustively by the monitor.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// HTTP 200 and business code 200.
    Snapshot(InventorySnapshot),
    /// Transport failure, timeout, non-200 HTTP status, or undecodable body.
    FetchFailed(String),
    /// Upstream reachable but reported a non-success business code.
    BusinessRejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "code": 200,
        "message": "ok",
        "data": {
            "skuList": [
                {
                    "validProductAttrValueIdList": [7711440, 12],
                    "count": 5,
                    "price": 399.0,
                    "skuId": 90210
                },
                {
                    "validProductAttrValueIdList": [8888],
                    "count": 0,
                    "price": 399.0
                }
            ]
        }
    }"#;

    #[test]
    fn decodes_envelope_and_ignores_unknown_fields() {
        let envelope: SkuEnvelope = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(envelope.code, 200);

        let skus = envelope.data.unwrap().sku_list;
        assert_eq!(skus.len(), 2);
        assert_eq!(skus[0].count, 5);
        assert_eq!(skus[0].price, 399.0);
        assert!(skus[0].has_attr(7711440));
        assert!(!skus[1].has_attr(7711440));
    }

    #[test]
    fn decodes_rejection_without_data() {
        let envelope: SkuEnvelope =
            serde_json::from_str(r#"{"code": 403, "message": "login required"}"#).unwrap();
        assert_eq!(envelope.code, 403);
        assert_eq!(envelope.message.as_deref(), Some("login required"));
        assert!(envelope.data.is_none());
    }

    #[test]
    fn missing_sku_fields_default() {
        let sku: SkuRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(sku.count, 0);
        assert_eq!(sku.price, 0.0);
        assert!(sku.valid_product_attr_value_id_list.is_empty());
    }

    #[test]
    fn snapshot_matches_filters_by_attr() {
        let envelope: SkuEnvelope = serde_json::from_str(PAYLOAD).unwrap();
        let snapshot = InventorySnapshot {
            skus: envelope.data.unwrap().sku_list,
        };

        let matched: Vec<_> = snapshot.matches(7711440).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].count, 5);
        assert_eq!(snapshot.matches(404).count(), 0);
    }
}
