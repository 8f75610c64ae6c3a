use elasticsearch::http::request::JsonBody;
use elasticsearch::params::Refresh;
use elasticsearch::{BulkParts, Elasticsearch};
use serde_json::{json, Value};

use crate::error::{check_response, DemoResult};
use crate::models::article::Article;
use crate::models::responses::BulkResponse;

/// One write inside a bulk request. The target index comes from the request path.
#[derive(Debug, Clone)]
pub enum BulkOperation {
    Index { id: String, doc: Article },
    Update { id: String, doc: Article },
    Delete { id: String },
}

impl BulkOperation {
    /// NDJSON lines for this operation: the action line, then the source line if any.
    pub fn lines(&self) -> DemoResult<Vec<Value>> {
        Ok(match self {
            Self::Index { id, doc } => vec![
                json!({ "index": { "_id": id } }),
                serde_json::to_value(doc)?,
            ],
            Self::Update { id, doc } => vec![
                json!({ "update": { "_id": id } }),
                json!({ "doc": doc }),
            ],
            Self::Delete { id } => vec![json!({ "delete": { "_id": id } })],
        })
    }
}

/// Submit `operations` in order as a single bulk request and wait for the
/// refresh that makes them visible to search.
pub async fn send_bulk(
    es: &Elasticsearch,
    index_name: &str,
    operations: &[BulkOperation],
    timeout: &str,
) -> DemoResult<BulkResponse> {
    let count = operations.len();
    let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(count * 2);
    for op in operations {
        body.extend(op.lines()?.into_iter().map(JsonBody::from));
    }

    tracing::debug!("Sending bulk request with {count} operations to '{index_name}'");

    let response = es
        .bulk(BulkParts::Index(index_name))
        .refresh(Refresh::WaitFor)
        .timeout(timeout)
        .body(body)
        .send()
        .await?;

    let parsed: BulkResponse = check_response(response).await?.json().await?;
    if parsed.errors {
        let failed = parsed.items.iter().filter(|item| item.is_failed()).count();
        tracing::error!("Bulk request had {failed} errors out of {count}");
    } else {
        tracing::debug!("Bulk request applied {count} operations");
    }
    Ok(parsed)
}
