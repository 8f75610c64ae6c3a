use elasticsearch::http::response::Response;
use elasticsearch::params::{OpType, Refresh};
use elasticsearch::{
    DeleteByQueryParts, DeleteParts, Elasticsearch, ExistsParts, GetParts, GetSourceParts,
    IndexParts, MgetParts, UpdateByQueryParts, UpdateParts,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::config::RequestConfig;
use crate::error::{check_response, DemoError, DemoResult};
use crate::models::article::Article;
use crate::models::responses::{ByQueryResponse, GetResponse, MultiGetResponse, WriteResponse};

/// Single-document and by-query operations against one index.
pub struct DocumentClient {
    es: Arc<Elasticsearch>,
    index_name: String,
    requests: RequestConfig,
}

impl DocumentClient {
    pub fn new(es: Arc<Elasticsearch>, index_name: String, requests: RequestConfig) -> Self {
        Self {
            es,
            index_name,
            requests,
        }
    }

    /// Index `article` under `id`. With `create_only`, an existing id is a
    /// conflict instead of an overwrite.
    pub async fn index_document(
        &self,
        id: &str,
        article: &Article,
        create_only: bool,
    ) -> DemoResult<WriteResponse> {
        let mut request = self
            .es
            .index(IndexParts::IndexId(&self.index_name, id))
            .body(article);
        if create_only {
            request = request.op_type(OpType::Create);
        }
        let response = request.send().await?;

        let written: WriteResponse = check_response(response).await?.json().await?;
        tracing::debug!("Indexed document {id}: {}", written.result);
        Ok(written)
    }

    /// A missing document comes back as `found == false`, a missing index as
    /// `DemoError::NotFound`.
    pub async fn get_document(&self, id: &str, source_excludes: &[&str]) -> DemoResult<GetResponse> {
        let mut request = self.es.get(GetParts::IndexId(&self.index_name, id));
        if !source_excludes.is_empty() {
            request = request._source_excludes(source_excludes);
        }
        let response = request.send().await?;

        read_allowing_missing(response, |body| body["found"] == json!(false)).await
    }

    /// Just the `_source` of a document.
    pub async fn get_source(&self, id: &str, source_excludes: &[&str]) -> DemoResult<Map<String, Value>> {
        let mut request = self.es.get_source(GetSourceParts::IndexId(&self.index_name, id));
        if !source_excludes.is_empty() {
            request = request._source_excludes(source_excludes);
        }
        let response = request.send().await?;

        Ok(check_response(response).await?.json().await?)
    }

    pub async fn multi_get(&self, ids: &[&str]) -> DemoResult<MultiGetResponse> {
        let response = self
            .es
            .mget(MgetParts::Index(&self.index_name))
            .body(json!({ "ids": ids }))
            .send()
            .await?;

        Ok(check_response(response).await?.json().await?)
    }

    /// Existence check that fetches neither source nor stored fields.
    pub async fn exists(&self, id: &str) -> DemoResult<bool> {
        let response = self
            .es
            .exists(ExistsParts::IndexId(&self.index_name, id))
            ._source(&["false"])
            .stored_fields(&["_none_"])
            .send()
            .await?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            // HEAD responses carry no body to classify
            status => Err(DemoError::from_status(status, &Value::Null)),
        }
    }

    /// Deleting an absent document yields `result == NotFound` rather than an error.
    pub async fn delete_document(&self, id: &str) -> DemoResult<WriteResponse> {
        let response = self
            .es
            .delete(DeleteParts::IndexId(&self.index_name, id))
            .timeout(&self.requests.timeout)
            .refresh(Refresh::WaitFor)
            .send()
            .await?;

        read_allowing_missing(response, |body| body["result"] == json!("not_found")).await
    }

    /// Merge `doc` into an existing document. Fails with `NotFound` when it is absent.
    pub async fn update_document(&self, id: &str, doc: &Article) -> DemoResult<WriteResponse> {
        self.send_update(id, json!({ "doc": doc })).await
    }

    /// Merge `doc` into the document, creating it from `doc` when absent.
    pub async fn upsert_document(&self, id: &str, doc: &Article) -> DemoResult<WriteResponse> {
        self.send_update(id, json!({ "doc": doc, "upsert": doc })).await
    }

    async fn send_update(&self, id: &str, body: Value) -> DemoResult<WriteResponse> {
        let response = self
            .es
            .update(UpdateParts::IndexId(&self.index_name, id))
            .refresh(Refresh::WaitFor)
            .body(body)
            .send()
            .await?;

        let written: WriteResponse = check_response(response).await?.json().await?;
        tracing::debug!("Updated document {id}: {}", written.result);
        Ok(written)
    }

    /// Run a painless `script` with `params` over every document matching `query`,
    /// then refresh so the rewritten documents are searchable.
    pub async fn update_by_query(
        &self,
        query: Value,
        script: &str,
        params: Value,
    ) -> DemoResult<ByQueryResponse> {
        let response = self
            .es
            .update_by_query(UpdateByQueryParts::Index(&[&self.index_name]))
            .refresh(true)
            .body(json!({
                "query": query,
                "script": {
                    "source": script,
                    "lang": "painless",
                    "params": params
                }
            }))
            .send()
            .await?;

        Ok(check_response(response).await?.json().await?)
    }

    pub async fn delete_by_query(&self, query: Value) -> DemoResult<ByQueryResponse> {
        let response = self
            .es
            .delete_by_query(DeleteByQueryParts::Index(&[&self.index_name]))
            .refresh(true)
            .body(json!({ "query": query }))
            .send()
            .await?;

        Ok(check_response(response).await?.json().await?)
    }
}

/// Parse a 404 whose body still describes the outcome (document absent)
/// instead of classifying it as an error.
async fn read_allowing_missing<T: DeserializeOwned>(
    response: Response,
    is_missing_document: impl Fn(&Value) -> bool,
) -> DemoResult<T> {
    if response.status_code().as_u16() != 404 {
        return Ok(check_response(response).await?.json().await?);
    }

    let body: Value = response.json().await?;
    if is_missing_document(&body) {
        Ok(serde_json::from_value(body)?)
    } else {
        Err(DemoError::from_status(404, &body))
    }
}
