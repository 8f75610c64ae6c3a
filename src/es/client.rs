use elasticsearch::http::transport::TransportBuilder;
use elasticsearch::Elasticsearch;
use std::sync::Arc;
use url::Url;

use crate::error::{DemoError, DemoResult};
use crate::es::pool::RoundRobinConnectionPool;

pub fn create_client(hosts: &[String]) -> DemoResult<Arc<Elasticsearch>> {
    let urls = hosts
        .iter()
        .map(|h| Url::parse(h).map_err(|e| DemoError::Config(format!("invalid host '{h}': {e}"))))
        .collect::<DemoResult<Vec<_>>>()?;

    let pool = RoundRobinConnectionPool::new(urls)
        .ok_or_else(|| DemoError::Config("at least one Elasticsearch host is required".into()))?;
    let nodes = pool.len();
    let transport = TransportBuilder::new(pool).disable_proxy().build().map_err(elasticsearch::Error::from)?;

    tracing::debug!("Transport built over {nodes} node(s): {}", hosts.join(", "));

    Ok(Arc::new(Elasticsearch::new(transport)))
}


#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn rejects_empty_host_list() {
        let err = create_client(&[]).unwrap_err();
        assert!(matches!(err, DemoError::Config(_)));
    }

    #[test]
    fn rejects_unparseable_host() {
        let err = create_client(&["192.168.0.51:9200 ".into(), "::".into()]).unwrap_err();
        assert!(matches!(err, DemoError::Config(_)));
    }

    #[tokio::test]
    async fn requests_rotate_across_nodes() {
        let first = MockServer::start().await;
        let second = MockServer::start().await;
        for server in [&first, &second] {
            Mock::given(method("GET"))
                .and(path("/"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "cluster_name": "demo"
                })))
                .expect(1)
                .mount(server)
                .await;
        }

        let client = create_client(&[first.uri(), second.uri()]).unwrap();
        for _ in 0..2 {
            let response = client.info().send().await.unwrap();
            assert!(response.status_code().is_success());
        }
        // expect(1) on each server is verified on drop
    }
}
