use serde_json::json;

use crate::demo::fixtures::CHINESE_SAMPLES;
use crate::demo::handler::Demo;
use crate::demo::render;
use crate::error::DemoResult;
use crate::es::analyze::{analyze, AnalyzeRequest};
use crate::es::mapping::{basic_settings, create_mapping, index_body, synonym_settings};

impl Demo {
    pub(super) async fn analyze_english(&self) -> DemoResult<Vec<String>> {
        let request =
            AnalyzeRequest::global("english", &["Some text to analyze", "Some more text to analyze"]);
        Ok(render::tokens(&analyze(&self.es, &request).await?))
    }

    /// Needs the IK analysis plugin on every node.
    pub(super) async fn analyze_ik(&self) -> DemoResult<Vec<String>> {
        let request = AnalyzeRequest::global("ik_smart", &CHINESE_SAMPLES);
        Ok(render::tokens(&analyze(&self.es, &request).await?))
    }

    pub(super) async fn analyze_custom(&self) -> DemoResult<Vec<String>> {
        let request = AnalyzeRequest::Custom {
            tokenizer: "standard".into(),
            char_filters: vec![json!("html_strip")],
            token_filters: vec![
                json!("lowercase"),
                json!({ "type": "stop", "stopwords": ["to"] }),
            ],
            text: vec!["<b>Some text to analyze</b>".into()],
        };
        Ok(render::tokens(&analyze(&self.es, &request).await?))
    }

    pub(super) async fn normalize(&self) -> DemoResult<Vec<String>> {
        let request = AnalyzeRequest::Normalizer {
            char_filters: vec![],
            token_filters: vec![json!("lowercase")],
            text: vec!["<B>Bob</B>".into()],
        };
        Ok(render::tokens(&analyze(&self.es, &request).await?))
    }

    pub(super) async fn create_index(&self) -> DemoResult<Vec<String>> {
        let body = index_body(basic_settings(), create_mapping("ik_max_word"));
        let ack = self.indices.create_index(self.index_name(), body).await?;
        Ok(vec![format!(
            "isAcknowledged -> {}, isShardsAcknowledged -> {}",
            ack.acknowledged, ack.shards_acknowledged
        )])
    }

    pub(super) async fn create_index_with_synonyms(&self) -> DemoResult<Vec<String>> {
        let body = index_body(
            synonym_settings(&self.config.analysis.remote_synonyms_url),
            create_mapping("my_ik_syno_max_word"),
        );
        let ack = self.indices.create_index(self.index_name(), body).await?;
        Ok(vec![format!(
            "isAcknowledged -> {}, isShardsAcknowledged -> {}, index -> {}",
            ack.acknowledged,
            ack.shards_acknowledged,
            ack.index.as_deref().unwrap_or(self.index_name())
        )])
    }

    pub(super) async fn delete_index(&self) -> DemoResult<Vec<String>> {
        let ack = self.indices.delete_index(self.index_name()).await?;
        Ok(vec![format!("isAcknowledged -> {}", ack.acknowledged)])
    }

    pub(super) async fn get_settings(&self) -> DemoResult<Vec<String>> {
        match self.indices.get_settings(self.index_name(), true).await? {
            Some(settings) => Ok(render::settings(&settings)),
            None => Ok(vec![format!("no settings returned for {}", self.index_name())]),
        }
    }

    /// Mappings of the demo index and the pinyin index side by side.
    pub(super) async fn get_mappings(&self) -> DemoResult<Vec<String>> {
        let names = [
            self.index_name(),
            self.config.elasticsearch.pinyin_index_name.as_str(),
        ];
        let mappings = self.indices.get_mappings(&names).await?;

        let mut lines = Vec::new();
        for name in names {
            match mappings.get(name) {
                Some(index) => lines.extend(render::mapping(name, &index.mappings)),
                None => lines.push(format!("[{name}] no mapping")),
            }
        }
        Ok(lines)
    }

    /// New fields only; an existing field's type cannot be changed.
    pub(super) async fn put_mapping(&self) -> DemoResult<Vec<String>> {
        let mapping = json!({ "properties": { "author": { "type": "keyword" } } });
        let ack = self.indices.put_mapping(self.index_name(), mapping).await?;
        Ok(vec![format!("isAcknowledged -> {}", ack.acknowledged)])
    }
}

#[cfg(test)]
mod tests {
    use crate::demo::commands::Command;
    use crate::demo::test_support::demo_for;
    use serde_json::json;
    use wiremock::matchers::path;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn analyzer_demo_prints_terms() {
        let server = MockServer::start().await;
        Mock::given(path("/_analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tokens": [
                    { "token": "some", "type": "<ALPHANUM>", "position": 0 },
                    { "token": "text", "type": "<ALPHANUM>", "position": 1 },
                    { "token": "analyze", "type": "<ALPHANUM>", "position": 3 }
                ]
            })))
            .mount(&server)
            .await;

        let lines = demo_for(&server).execute(&Command::AnalyzeCustom).await.unwrap();
        assert_eq!(
            lines,
            vec![
                "term -> some, type -> <ALPHANUM>",
                "term -> text, type -> <ALPHANUM>",
                "term -> analyze, type -> <ALPHANUM>",
            ]
        );
    }

    #[tokio::test]
    async fn mappings_demo_notes_missing_pinyin_index() {
        let server = MockServer::start().await;
        Mock::given(path("/api-demo-idx,my_pinyin_idx/_mapping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "api-demo-idx": { "mappings": { "properties": { "title": { "type": "text" } } } }
            })))
            .mount(&server)
            .await;

        let lines = demo_for(&server).execute(&Command::GetMappings).await.unwrap();
        assert_eq!(
            lines,
            vec!["[api-demo-idx]", "title", "\ttype -> text", "[my_pinyin_idx] no mapping"]
        );
    }

    #[tokio::test]
    async fn settings_demo_prints_counts() {
        let server = MockServer::start().await;
        Mock::given(path("/api-demo-idx/_settings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "api-demo-idx": {
                    "settings": { "index.number_of_shards": "3", "index.number_of_replicas": "1" },
                    "defaults": {}
                }
            })))
            .mount(&server)
            .await;

        let lines = demo_for(&server).execute(&Command::GetSettings).await.unwrap();
        assert_eq!(lines[0], "number_of_shards -> 3");
        assert_eq!(lines[1], "number_of_replicas -> 1");
        assert!(lines.contains(&"index.number_of_shards --> 3".to_string()));
    }

    #[tokio::test]
    async fn synonym_index_uses_configured_remote_list() {
        let server = MockServer::start().await;
        Mock::given(path("/api-demo-idx"))
            .and(wiremock::matchers::body_string_contains(
                "http://192.168.0.56/syns/mysynonym.txt",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "acknowledged": true, "shards_acknowledged": true, "index": "api-demo-idx"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let lines = demo_for(&server)
            .execute(&Command::CreateIndexSynonyms)
            .await
            .unwrap();
        assert_eq!(lines, vec!["isAcknowledged -> true, isShardsAcknowledged -> true, index -> api-demo-idx"]);
    }
}
