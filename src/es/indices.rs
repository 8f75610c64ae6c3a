use elasticsearch::indices::{
    IndicesCreateParts, IndicesDeleteParts, IndicesGetMappingParts, IndicesGetSettingsParts,
    IndicesPutMappingParts,
};
use elasticsearch::Elasticsearch;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::RequestConfig;
use crate::error::{check_response, DemoResult};
use crate::models::responses::{Acknowledged, IndexMapping, IndexSettings};

/// Index administration: create, delete, settings and mappings.
pub struct IndexAdmin {
    es: Arc<Elasticsearch>,
    requests: RequestConfig,
}

impl IndexAdmin {
    pub fn new(es: Arc<Elasticsearch>, requests: RequestConfig) -> Self {
        Self { es, requests }
    }

    /// `body` carries `settings` and `mappings`, see `es::mapping::index_body`.
    pub async fn create_index(&self, index_name: &str, body: Value) -> DemoResult<Acknowledged> {
        let response = self
            .es
            .indices()
            .create(IndicesCreateParts::Index(index_name))
            .body(body)
            .send()
            .await?;

        let ack: Acknowledged = check_response(response).await?.json().await?;
        tracing::info!("Created index '{index_name}' (acknowledged: {})", ack.acknowledged);
        Ok(ack)
    }

    pub async fn delete_index(&self, index_name: &str) -> DemoResult<Acknowledged> {
        let response = self
            .es
            .indices()
            .delete(IndicesDeleteParts::Index(&[index_name]))
            .timeout(&self.requests.timeout)
            .master_timeout(&self.requests.master_timeout)
            .send()
            .await?;

        let ack: Acknowledged = check_response(response).await?.json().await?;
        tracing::info!("Deleted index '{index_name}'");
        Ok(ack)
    }

    /// Flat (`index.number_of_shards` style) settings of one index,
    /// optionally with the cluster defaults for everything not set explicitly.
    pub async fn get_settings(
        &self,
        index_name: &str,
        include_defaults: bool,
    ) -> DemoResult<Option<IndexSettings>> {
        let response = self
            .es
            .indices()
            .get_settings(IndicesGetSettingsParts::Index(&[index_name]))
            .flat_settings(true)
            .include_defaults(include_defaults)
            .send()
            .await?;

        let mut by_index: BTreeMap<String, IndexSettings> =
            check_response(response).await?.json().await?;
        Ok(by_index.remove(index_name))
    }

    /// Indices that do not exist are left out of the result.
    pub async fn get_mappings(&self, index_names: &[&str]) -> DemoResult<BTreeMap<String, IndexMapping>> {
        let response = self
            .es
            .indices()
            .get_mapping(IndicesGetMappingParts::Index(index_names))
            .ignore_unavailable(true)
            .send()
            .await?;

        Ok(check_response(response).await?.json().await?)
    }

    /// Add fields to an existing mapping. Existing field types cannot change.
    pub async fn put_mapping(&self, index_name: &str, mapping: Value) -> DemoResult<Acknowledged> {
        let response = self
            .es
            .indices()
            .put_mapping(IndicesPutMappingParts::Index(&[index_name]))
            .body(mapping)
            .send()
            .await?;

        Ok(check_response(response).await?.json().await?)
    }
}
