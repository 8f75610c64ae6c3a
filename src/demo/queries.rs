use crate::demo::fixtures::SEARCH_TEXT;
use crate::demo::handler::Demo;
use crate::demo::render;
use crate::error::DemoResult;
use crate::es::search::{
    MetricAggregation, MetricKind, SearchParams, SearchQuery, TermsAggregationSpec,
};

const BY_AUTHOR: &str = "byAuthor";
const COUNT_DOC: &str = "countDoc";
const AVERAGE_SALARY: &str = "average_salary";

impl Demo {
    pub(super) async fn search_all(&self) -> DemoResult<Vec<String>> {
        let params = SearchParams {
            timeout: Some(self.config.requests.search_timeout.clone()),
            ..Default::default()
        };
        Ok(render::search(&self.search.search(&params).await?))
    }

    pub(super) async fn search_scored(&self) -> DemoResult<Vec<String>> {
        let params = SearchParams {
            query: SearchQuery::matching("content", SEARCH_TEXT),
            timeout: Some(self.config.requests.search_timeout.clone()),
            sort_by_score: true,
            ..Default::default()
        };
        Ok(render::search(&self.search.search(&params).await?))
    }

    /// Match on the search text, bucket by author and report one author's
    /// document count, salaried document count and average salary.
    pub(super) async fn search_aggregated(&self, author: &str) -> DemoResult<Vec<String>> {
        let params = SearchParams {
            query: SearchQuery::matching("content", SEARCH_TEXT),
            aggregation: Some(TermsAggregationSpec {
                name: BY_AUTHOR.into(),
                field: "author".into(),
                metrics: vec![
                    MetricAggregation::new(COUNT_DOC, MetricKind::ValueCount, "salary"),
                    MetricAggregation::new(AVERAGE_SALARY, MetricKind::Avg, "salary"),
                ],
            }),
            ..Default::default()
        };
        let resp = self.search.search(&params).await?;

        let mut lines = render::search(&resp);
        let buckets = resp.terms(BY_AUTHOR);
        match buckets.as_ref().and_then(|agg| agg.bucket_by_key(author)) {
            Some(bucket) => {
                lines.push(format!("docCount -> {}", bucket.doc_count));
                lines.push(format!(
                    "countDoc -> {}",
                    bucket
                        .metric(COUNT_DOC)
                        .map_or_else(|| "-".into(), |v| v.to_string())
                ));
                lines.push(format!(
                    "avgSalary -> {}",
                    bucket
                        .metric(AVERAGE_SALARY)
                        .map_or_else(|| "-".into(), |v| v.to_string())
                ));
            }
            None => lines.push(format!("no {BY_AUTHOR} bucket for author {author}")),
        }
        Ok(lines)
    }
}
