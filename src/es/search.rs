use elasticsearch::{Elasticsearch, SearchParts};
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::error::{check_response, DemoResult};
use crate::models::responses::SearchResponse;

pub struct SearchClient {
    es: Arc<Elasticsearch>,
    index_name: String,
}

#[derive(Debug, Clone)]
pub enum SearchQuery {
    MatchAll,
    /// Full-text match, analyzed with the field's search analyzer.
    Match { field: String, text: String },
    /// Exact term, not analyzed.
    Term { field: String, value: String },
}

impl SearchQuery {
    pub fn matching(field: &str, text: &str) -> Self {
        Self::Match {
            field: field.into(),
            text: text.into(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::MatchAll => json!({ "match_all": {} }),
            Self::Match { field, text } => json!({ "match": { field: text } }),
            Self::Term { field, value } => json!({ "term": { field: value } }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Avg,
    ValueCount,
}

impl MetricKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::ValueCount => "value_count",
        }
    }
}

/// Single-value metric computed inside each bucket.
#[derive(Debug, Clone)]
pub struct MetricAggregation {
    pub name: String,
    pub kind: MetricKind,
    pub field: String,
}

impl MetricAggregation {
    pub fn new(name: &str, kind: MetricKind, field: &str) -> Self {
        Self {
            name: name.into(),
            kind,
            field: field.into(),
        }
    }
}

/// Terms bucketing on `field`, with metric sub-aggregations per bucket.
#[derive(Debug, Clone)]
pub struct TermsAggregationSpec {
    pub name: String,
    pub field: String,
    pub metrics: Vec<MetricAggregation>,
}

impl TermsAggregationSpec {
    fn to_value(&self) -> Value {
        let mut agg = Map::new();
        agg.insert("terms".into(), json!({ "field": self.field }));
        if !self.metrics.is_empty() {
            let subs: Map<String, Value> = self
                .metrics
                .iter()
                .map(|m| (m.name.clone(), json!({ m.kind.as_str(): { "field": m.field } })))
                .collect();
            agg.insert("aggs".into(), Value::Object(subs));
        }
        Value::Object(agg)
    }
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: SearchQuery,
    pub from: usize,
    pub size: usize,
    pub timeout: Option<String>,
    pub sort_by_score: bool,
    pub aggregation: Option<TermsAggregationSpec>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: SearchQuery::MatchAll,
            from: 0,
            size: 10,
            timeout: None,
            sort_by_score: false,
            aggregation: None,
        }
    }
}

impl SearchClient {
    pub fn new(es: Arc<Elasticsearch>, index_name: String) -> Self {
        Self { es, index_name }
    }

    pub async fn search(&self, params: &SearchParams) -> DemoResult<SearchResponse> {
        let body = self.build_query(params);

        let indices = [self.index_name.as_str()];
        let mut request = self
            .es
            .search(SearchParts::Index(&indices))
            .from(params.from as i64)
            .size(params.size as i64);
        if let Some(ref timeout) = params.timeout {
            request = request.timeout(timeout);
        }
        let response = request.body(body).send().await?;

        let parsed: SearchResponse = check_response(response).await?.json().await?;
        tracing::debug!(
            "Search on '{}' matched {} documents in {}ms",
            self.index_name,
            parsed.hits.total_value(),
            parsed.took
        );
        Ok(parsed)
    }

    fn build_query(&self, params: &SearchParams) -> Value {
        let mut body = Map::new();
        body.insert("query".into(), params.query.to_value());

        if params.sort_by_score {
            body.insert("sort".into(), json!([{ "_score": { "order": "desc" } }]));
        }

        if let Some(ref agg) = params.aggregation {
            body.insert("aggs".into(), json!({ agg.name.as_str(): agg.to_value() }));
        }

        Value::Object(body)
    }
}
