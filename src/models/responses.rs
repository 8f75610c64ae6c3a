//! Typed views over the JSON bodies Elasticsearch returns.
//!
//! Only the fields the demos print are modelled; everything else in the
//! body is ignored on deserialization.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub tokens: Vec<AnalyzeToken>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeToken {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Acknowledged {
    pub acknowledged: bool,
    #[serde(default)]
    pub shards_acknowledged: bool,
    /// Only set by create-index
    #[serde(default)]
    pub index: Option<String>,
}

/// `{"type": ..., "reason": ...}` as found in item and shard failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorCause {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl std::fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "[{}] {reason}", self.kind),
            None => write!(f, "[{}]", self.kind),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ShardInfo {
    pub total: u32,
    pub successful: u32,
    pub failed: u32,
    #[serde(default)]
    pub failures: Vec<ShardFailure>,
}

impl ShardInfo {
    /// All shard copies (primary and replicas) acknowledged the write.
    pub fn fully_replicated(&self) -> bool {
        self.total == self.successful
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShardFailure {
    #[serde(rename = "_shard", default)]
    pub shard: Option<u32>,
    pub reason: ErrorCause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteResult {
    Created,
    Updated,
    Deleted,
    NotFound,
    Noop,
}

impl std::fmt::Display for WriteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "CREATED"),
            Self::Updated => write!(f, "UPDATED"),
            Self::Deleted => write!(f, "DELETED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Noop => write!(f, "NOOP"),
        }
    }
}

/// Response of index, update and delete on a single document.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteResponse {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    pub result: WriteResult,
    #[serde(rename = "_shards", default)]
    pub shards: ShardInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetResponse {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    /// Set per item by multi-get when the item itself failed
    #[serde(default)]
    pub error: Option<ErrorCause>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultiGetResponse {
    pub docs: Vec<GetResponse>,
}

/// Response of update-by-query and delete-by-query.
#[derive(Debug, Clone, Deserialize)]
pub struct ByQueryResponse {
    #[serde(default)]
    pub took: u64,
    pub total: u64,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub deleted: u64,
    #[serde(default)]
    pub version_conflicts: u64,
    #[serde(default)]
    pub failures: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkResponse {
    pub errors: bool,
    pub items: Vec<BulkItem>,
}

/// One bulk item, tagged with the operation that produced it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkItem {
    Index(BulkItemResult),
    Create(BulkItemResult),
    Update(BulkItemResult),
    Delete(BulkItemResult),
}

impl BulkItem {
    pub fn op_type(&self) -> &'static str {
        match self {
            Self::Index(_) => "index",
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
        }
    }

    pub fn result(&self) -> &BulkItemResult {
        match self {
            Self::Index(r) | Self::Create(r) | Self::Update(r) | Self::Delete(r) => r,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.result().error.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkItemResult {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub status: u16,
    #[serde(default)]
    pub result: Option<WriteResult>,
    #[serde(default)]
    pub error: Option<ErrorCause>,
}

/// Per-index entry of a get-settings response requested with `flat_settings`.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexSettings {
    #[serde(default)]
    pub settings: BTreeMap<String, Value>,
    #[serde(default)]
    pub defaults: BTreeMap<String, Value>,
}

impl IndexSettings {
    /// Explicit value first, then the cluster default.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key).or_else(|| self.defaults.get(key))
    }

    /// Numeric settings come back as strings.
    pub fn get_as_u64(&self, key: &str) -> Option<u64> {
        match self.get(key)? {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexMapping {
    pub mappings: MappingDefinition,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MappingDefinition {
    /// field name -> field definition (type, analyzer, ...)
    #[serde(default)]
    pub properties: BTreeMap<String, BTreeMap<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(rename = "_shards")]
    pub shards: SearchShards,
    pub hits: Hits,
    #[serde(default)]
    pub aggregations: BTreeMap<String, Value>,
}

impl SearchResponse {
    /// Decode a named terms aggregation from the response.
    pub fn terms(&self, name: &str) -> Option<TermsAggregation> {
        serde_json::from_value(self.aggregations.get(name)?.clone()).ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchShards {
    pub total: u32,
    pub successful: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

impl Hits {
    pub fn total_value(&self) -> u64 {
        self.total.as_ref().map(|t| t.value).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TotalHits {
    pub value: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TermsAggregation {
    #[serde(default)]
    pub buckets: Vec<TermsBucket>,
}

impl TermsAggregation {
    pub fn bucket_by_key(&self, key: &str) -> Option<&TermsBucket> {
        self.buckets.iter().find(|b| b.key_as_string() == key)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TermsBucket {
    pub key: Value,
    pub doc_count: u64,
    /// Sub-aggregations keyed by name
    #[serde(flatten)]
    pub sub_aggregations: BTreeMap<String, Value>,
}

impl TermsBucket {
    pub fn key_as_string(&self) -> String {
        match &self.key {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Value of a single-value metric sub-aggregation (avg, sum, min, max).
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.sub_aggregations.get(name)?["value"].as_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn write_response_with_shard_failure() {
        let resp: WriteResponse = serde_json::from_value(json!({
            "_index": "api-demo-idx",
            "_id": "2",
            "_version": 3,
            "result": "updated",
            "_shards": {
                "total": 2,
                "successful": 1,
                "failed": 1,
                "failures": [{
                    "_index": "api-demo-idx",
                    "_shard": 0,
                    "node": "n1",
                    "reason": { "type": "node_disconnected_exception", "reason": "gone" },
                    "status": "INTERNAL_SERVER_ERROR",
                    "primary": false
                }]
            },
            "_seq_no": 4,
            "_primary_term": 1
        }))
        .unwrap();

        assert_eq!(resp.result, WriteResult::Updated);
        assert_eq!(resp.version, Some(3));
        assert!(!resp.shards.fully_replicated());
        assert_eq!(resp.shards.failures[0].shard, Some(0));
        assert_eq!(
            resp.shards.failures[0].reason.to_string(),
            "[node_disconnected_exception] gone"
        );
    }

    #[test]
    fn noop_update_has_zero_shards() {
        let resp: WriteResponse = serde_json::from_value(json!({
            "_index": "api-demo-idx",
            "_id": "3",
            "_version": 2,
            "result": "noop",
            "_shards": { "total": 0, "successful": 0, "failed": 0 }
        }))
        .unwrap();
        assert_eq!(resp.result.to_string(), "NOOP");
        assert!(resp.shards.fully_replicated());
    }

    #[test]
    fn bulk_items_keep_their_op_type() {
        let resp: BulkResponse = serde_json::from_value(json!({
            "took": 30,
            "errors": true,
            "items": [
                { "index": { "_index": "i", "_id": "3", "status": 201, "result": "created" } },
                { "delete": { "_index": "i", "_id": "1", "status": 404, "result": "not_found" } },
                { "update": { "_index": "i", "_id": "2", "status": 404,
                    "error": { "type": "document_missing_exception", "reason": "[2]: document missing" } } }
            ]
        }))
        .unwrap();

        let ops: Vec<&str> = resp.items.iter().map(BulkItem::op_type).collect();
        assert_eq!(ops, vec!["index", "delete", "update"]);
        assert_eq!(resp.items[1].result().result, Some(WriteResult::NotFound));
        assert!(resp.items[2].is_failed());
        assert!(!resp.items[0].is_failed());
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        let settings: IndexSettings = serde_json::from_value(json!({
            "settings": { "index.number_of_shards": "3", "index.number_of_replicas": "1" },
            "defaults": { "index.refresh_interval": "1s", "index.number_of_routing_shards": "1024" }
        }))
        .unwrap();
        assert_eq!(settings.get_as_u64("index.number_of_shards"), Some(3));
        assert_eq!(settings.get_as_u64("index.number_of_routing_shards"), Some(1024));
        assert_eq!(settings.get("index.refresh_interval"), Some(&json!("1s")));
        assert!(settings.get("index.missing").is_none());
    }

    #[test]
    fn terms_bucket_lookup_and_metric() {
        let resp: SearchResponse = serde_json::from_value(json!({
            "took": 5,
            "timed_out": false,
            "_shards": { "total": 3, "successful": 3, "skipped": 0, "failed": 0 },
            "hits": { "total": { "value": 4, "relation": "eq" }, "max_score": 9.63375, "hits": [] },
            "aggregations": {
                "byAuthor": {
                    "doc_count_error_upper_bound": 0,
                    "sum_other_doc_count": 0,
                    "buckets": [
                        { "key": "lisi", "doc_count": 2, "average_salary": { "value": 56000.0 } },
                        { "key": "wangwu", "doc_count": 1, "average_salary": { "value": null } }
                    ]
                }
            }
        }))
        .unwrap();

        assert_eq!(resp.hits.total_value(), 4);
        let by_author = resp.terms("byAuthor").unwrap();
        let bucket = by_author.bucket_by_key("lisi").unwrap();
        assert_eq!(bucket.doc_count, 2);
        assert_eq!(bucket.metric("average_salary"), Some(56000.0));
        assert_eq!(by_author.bucket_by_key("wangwu").unwrap().metric("average_salary"), None);
        assert!(by_author.bucket_by_key("nobody").is_none());
        assert!(resp.terms("missing").is_none());
    }

    #[test]
    fn numeric_bucket_keys_compare_as_strings() {
        let agg: TermsAggregation = serde_json::from_value(json!({
            "buckets": [{ "key": 56000, "doc_count": 2 }]
        }))
        .unwrap();
        assert!(agg.bucket_by_key("56000").is_some());
    }
}
