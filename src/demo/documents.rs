use serde_json::json;

use crate::demo::fixtures::{
    bulk_operations, new_article, partial_update, reassign_params, upsert_article,
    REASSIGNED_AUTHOR, REASSIGN_SCRIPT,
};
use crate::demo::handler::Demo;
use crate::demo::render;
use crate::error::DemoResult;
use crate::es::bulk::send_bulk;
use crate::es::search::SearchQuery;

impl Demo {
    pub(super) async fn add_doc(&self, id: &str, create_only: bool) -> DemoResult<Vec<String>> {
        let written = self
            .documents
            .index_document(id, &new_article(), create_only)
            .await?;
        Ok(render::write_outcome(&written))
    }

    pub(super) async fn get_doc(&self, id: &str) -> DemoResult<Vec<String>> {
        let doc = self.documents.get_document(id, &["author", "title"]).await?;
        if !doc.found {
            return Ok(vec![format!(
                "document with id {} does not exist in {}",
                doc.id, doc.index
            )]);
        }

        let mut lines = vec![format!(
            "version -> {}",
            doc.version.map_or_else(|| "-".into(), |v| v.to_string())
        )];
        for (key, value) in &doc.fields {
            lines.push(format!("{key} -> {}", render::scalar(value)));
        }
        if let Some(source) = doc.source.as_ref().and_then(|s| s.as_object()) {
            lines.push(format!("source -> {}", json!(source)));
            for (key, value) in source {
                lines.push(format!("{key} ---> {}", render::scalar(value)));
            }
        }
        Ok(lines)
    }

    pub(super) async fn get_source(&self, id: &str) -> DemoResult<Vec<String>> {
        let source = self.documents.get_source(id, &["title"]).await?;
        Ok(source
            .iter()
            .map(|(key, value)| format!("{key} ---> {}", render::scalar(value)))
            .collect())
    }

    pub(super) async fn multi_get(&self, ids: &[String]) -> DemoResult<Vec<String>> {
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        let resp = self.documents.multi_get(&ids).await?;

        Ok(resp
            .docs
            .iter()
            .map(|doc| match (&doc.error, &doc.source) {
                (Some(error), _) => format!("{}: failed {error}", doc.id),
                (None, Some(source)) if doc.found => format!("{}: {source}", doc.id),
                _ => format!("{}: not found", doc.id),
            })
            .collect())
    }

    pub(super) async fn exists(&self, id: &str) -> DemoResult<Vec<String>> {
        let exists = self.documents.exists(id).await?;
        Ok(vec![format!("isExists -> {exists}")])
    }

    pub(super) async fn delete_doc(&self, id: &str) -> DemoResult<Vec<String>> {
        let written = self.documents.delete_document(id).await?;
        Ok(render::write_outcome(&written))
    }

    pub(super) async fn update_doc(&self, id: &str) -> DemoResult<Vec<String>> {
        let written = self.documents.update_document(id, &partial_update()).await?;
        Ok(render::write_outcome(&written))
    }

    pub(super) async fn upsert_doc(&self, id: &str) -> DemoResult<Vec<String>> {
        let written = self.documents.upsert_document(id, &upsert_article()).await?;
        Ok(render::write_outcome(&written))
    }

    pub(super) async fn update_by_query(&self) -> DemoResult<Vec<String>> {
        let resp = self
            .documents
            .update_by_query(
                author_term("lisi").to_value(),
                REASSIGN_SCRIPT,
                reassign_params(),
            )
            .await?;
        Ok(render::by_query(&resp))
    }

    pub(super) async fn delete_by_query(&self) -> DemoResult<Vec<String>> {
        let resp = self
            .documents
            .delete_by_query(author_term(REASSIGNED_AUTHOR).to_value())
            .await?;
        Ok(render::by_query(&resp))
    }

    pub(super) async fn bulk(&self) -> DemoResult<Vec<String>> {
        let resp = send_bulk(
            &self.es,
            self.index_name(),
            &bulk_operations(),
            &self.config.requests.timeout,
        )
        .await?;
        Ok(render::bulk(&resp))
    }
}

fn author_term(author: &str) -> SearchQuery {
    SearchQuery::Term {
        field: "author".into(),
        value: author.into(),
    }
}
