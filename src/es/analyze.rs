use elasticsearch::indices::IndicesAnalyzeParts;
use elasticsearch::Elasticsearch;
use serde_json::{json, Map, Value};

use crate::error::{check_response, DemoResult};
use crate::models::responses::{AnalyzeResponse, AnalyzeToken};

/// What the `_analyze` API should run over the text.
#[derive(Debug, Clone)]
pub enum AnalyzeRequest {
    /// A named analyzer registered on the cluster (e.g. `english`, `ik_smart`).
    Global { analyzer: String, text: Vec<String> },
    /// An ad-hoc analyzer assembled from a tokenizer and filters.
    Custom {
        tokenizer: String,
        char_filters: Vec<Value>,
        token_filters: Vec<Value>,
        text: Vec<String>,
    },
    /// An ad-hoc normalizer: filters only, the input stays a single token.
    Normalizer {
        char_filters: Vec<Value>,
        token_filters: Vec<Value>,
        text: Vec<String>,
    },
}

impl AnalyzeRequest {
    pub fn global(analyzer: &str, text: &[&str]) -> Self {
        Self::Global {
            analyzer: analyzer.into(),
            text: text.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn body(&self) -> Value {
        let mut body = Map::new();
        match self {
            Self::Global { analyzer, text } => {
                body.insert("analyzer".into(), json!(analyzer));
                body.insert("text".into(), json!(text));
            }
            Self::Custom {
                tokenizer,
                char_filters,
                token_filters,
                text,
            } => {
                body.insert("tokenizer".into(), json!(tokenizer));
                insert_filters(&mut body, char_filters, token_filters);
                body.insert("text".into(), json!(text));
            }
            Self::Normalizer {
                char_filters,
                token_filters,
                text,
            } => {
                insert_filters(&mut body, char_filters, token_filters);
                body.insert("text".into(), json!(text));
            }
        }
        Value::Object(body)
    }
}

fn insert_filters(body: &mut Map<String, Value>, char_filters: &[Value], token_filters: &[Value]) {
    if !char_filters.is_empty() {
        body.insert("char_filter".into(), json!(char_filters));
    }
    if !token_filters.is_empty() {
        body.insert("filter".into(), json!(token_filters));
    }
}

pub async fn analyze(es: &Elasticsearch, request: &AnalyzeRequest) -> DemoResult<Vec<AnalyzeToken>> {
    let response = es
        .indices()
        .analyze(IndicesAnalyzeParts::None)
        .body(request.body())
        .send()
        .await?;

    let parsed: AnalyzeResponse = check_response(response).await?.json().await?;
    tracing::debug!("Analyzer produced {} tokens", parsed.tokens.len());
    Ok(parsed.tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::es::client::test_support::mock_client;
    use wiremock::matchers::{body_json, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn custom_analyzer_body() {
        let request = AnalyzeRequest::Custom {
            tokenizer: "standard".into(),
            char_filters: vec![json!("html_strip")],
            token_filters: vec![
                json!("lowercase"),
                json!({ "type": "stop", "stopwords": ["to"] }),
            ],
            text: vec!["<b>Some text to analyze</b>".into()],
        };
        assert_eq!(
            request.body(),
            json!({
                "tokenizer": "standard",
                "char_filter": ["html_strip"],
                "filter": ["lowercase", { "type": "stop", "stopwords": ["to"] }],
                "text": ["<b>Some text to analyze</b>"]
            })
        );
    }

    #[test]
    fn normalizer_has_no_tokenizer() {
        let request = AnalyzeRequest::Normalizer {
            char_filters: vec![],
            token_filters: vec![json!("lowercase")],
            text: vec!["<B>Bob</B>".into()],
        };
        let body = request.body();
        assert!(body.get("tokenizer").is_none());
        assert!(body.get("char_filter").is_none());
        assert_eq!(body["filter"], json!(["lowercase"]));
    }

    #[tokio::test]
    async fn global_analyzer_returns_tokens() {
        let server = MockServer::start().await;
        Mock::given(path("/_analyze"))
            .and(body_json(json!({
                "analyzer": "english",
                "text": ["Some text to analyze", "Some more text to analyze"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tokens": [
                    { "token": "some", "start_offset": 0, "end_offset": 4, "type": "<ALPHANUM>", "position": 0 },
                    { "token": "text", "start_offset": 5, "end_offset": 9, "type": "<ALPHANUM>", "position": 1 },
                    { "token": "analyz", "start_offset": 13, "end_offset": 20, "type": "<ALPHANUM>", "position": 3 }
                ]
            })))
            .mount(&server)
            .await;

        let es = mock_client(&server);
        let request =
            AnalyzeRequest::global("english", &["Some text to analyze", "Some more text to analyze"]);
        let tokens = analyze(&es, &request).await.unwrap();

        let terms: Vec<&str> = tokens.iter().map(|t| t.token.as_str()).collect();
        assert_eq!(terms, vec!["some", "text", "analyz"]);
        assert_eq!(tokens[0].token_type, "<ALPHANUM>");
    }

    #[tokio::test]
    async fn unknown_analyzer_is_a_status_error() {
        let server = MockServer::start().await;
        Mock::given(path("/_analyze"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "type": "illegal_argument_exception", "reason": "failed to find global analyzer [nope]" },
                "status": 400
            })))
            .mount(&server)
            .await;

        let es = mock_client(&server);
        let err = analyze(&es, &AnalyzeRequest::global("nope", &["x"]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to find global analyzer"));
        assert!(!err.is_not_found());
    }
}
