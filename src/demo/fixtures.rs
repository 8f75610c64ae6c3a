//! Sample articles and request bodies shared by the demos.

use serde_json::{json, Value};

use crate::es::bulk::BulkOperation;
use crate::models::article::Article;

/// Text the scored and aggregation searches match on.
pub const SEARCH_TEXT: &str = "搜索引擎";

pub const CHINESE_SAMPLES: [&str; 2] = [
    "全文搜索引擎可以快速地储存和检索数据",
    "中华人民共和国国歌是义勇军进行曲",
];

pub fn new_article() -> Article {
    Article::new(
        "zhangsan",
        "分布式搜索引擎入门",
        "Elasticsearch 是一个分布式的搜索引擎",
    )
}

pub fn partial_update() -> Article {
    Article {
        author: Some("lisi".into()),
        title: Some("搜索引擎原理".into()),
        ..Default::default()
    }
}

pub fn upsert_article() -> Article {
    Article::new("lisi", "倒排索引详解", "索引")
}

/// Author assigned to every `lisi` article by the update-by-query demo.
pub const REASSIGNED_AUTHOR: &str = "wangwu";

pub const REASSIGN_SCRIPT: &str = "ctx._source.author = params.author; \
    ctx._source.title = params.title; \
    ctx._source.content = params.content;";

pub fn reassign_params() -> Value {
    json!({
        "author": REASSIGNED_AUTHOR,
        "title": "批量更新后的标题",
        "content": "hello world，搜索引擎"
    })
}

/// Five inserts, one delete, one partial update.
pub fn bulk_operations() -> Vec<BulkOperation> {
    let index = |id: &str, author: &str, salary: f64, text: &str| BulkOperation::Index {
        id: id.into(),
        doc: Article::new(author, text, text).with_salary(salary),
    };

    vec![
        index("3", "zhangsan", 56000.0, "搜索引擎的倒排索引结构"),
        index("4", "lisi", 23000.0, "中文分词与搜索引擎"),
        index("5", "zhangsan", 56000.0, "搜索引擎集群运维"),
        index("6", "zhaoliu", 31000.0, "搜索引擎的相关性评分"),
        index("7", "sunqi", 38000.0, "日志分析平台"),
        BulkOperation::Delete { id: "1".into() },
        BulkOperation::Update {
            id: "2".into(),
            doc: Article {
                author: Some("lisi".into()),
                title: Some("更新后的标题".into()),
                salary: Some(66000.0),
                content: None,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_batch_is_mixed() {
        let ops = bulk_operations();
        assert_eq!(ops.len(), 7);
        let inserts = ops
            .iter()
            .filter(|op| matches!(op, BulkOperation::Index { .. }))
            .count();
        assert_eq!(inserts, 5);
        assert!(matches!(ops[5], BulkOperation::Delete { .. }));
        assert!(matches!(ops[6], BulkOperation::Update { .. }));
    }

    #[test]
    fn zhangsan_salary_average_is_stable() {
        // update-doc may move one of these to another author before the
        // searches run; the remaining average is the same either way
        let salaries: Vec<f64> = bulk_operations()
            .into_iter()
            .filter_map(|op| match op {
                BulkOperation::Index { doc, .. } if doc.author.as_deref() == Some("zhangsan") => {
                    doc.salary
                }
                _ => None,
            })
            .collect();
        assert_eq!(salaries, vec![56000.0, 56000.0]);
    }
}
