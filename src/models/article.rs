use serde::{Deserialize, Serialize};

/// Document shape used by every demo against the demo index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

impl Article {
    pub fn new(author: &str, title: &str, content: &str) -> Self {
        Self {
            author: Some(author.into()),
            title: Some(title.into()),
            content: Some(content.into()),
            salary: None,
        }
    }

    pub fn with_salary(mut self, salary: f64) -> Self {
        self.salary = Some(salary);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_articles_omit_missing_fields() {
        let partial = Article {
            author: Some("lisi".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&partial).unwrap(), json!({ "author": "lisi" }));
    }

    #[test]
    fn reads_source_with_excluded_fields() {
        let article: Article = serde_json::from_value(json!({ "content": "hello" })).unwrap();
        assert_eq!(article.content.as_deref(), Some("hello"));
        assert!(article.author.is_none());
        assert!(article.salary.is_none());
    }
}
