//! Console lines for the response fields each demo shows.

use serde_json::Value;

use crate::models::responses::{
    AnalyzeToken, BulkResponse, ByQueryResponse, IndexSettings, MappingDefinition, SearchResponse,
    ShardInfo, WriteResponse, WriteResult,
};

pub fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

pub fn tokens(tokens: &[AnalyzeToken]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| format!("term -> {}, type -> {}", t.token, t.token_type))
        .collect()
}

/// Shard copy counts plus any per-shard failure reason.
pub fn shard_info(shards: &ShardInfo) -> Vec<String> {
    let mut lines = vec![format!(
        "total -> {}, successful -> {}, failed -> {}",
        shards.total, shards.successful, shards.failed
    )];
    if shards.fully_replicated() {
        lines.push("all shard copies applied the write".into());
    } else {
        lines.push("write not applied on every shard copy".into());
    }
    for failure in &shards.failures {
        lines.push(format!(
            "failure.shard -> {}, failure.reason -> {}",
            failure.shard.map_or_else(|| "-".into(), |s| s.to_string()),
            failure.reason
        ));
    }
    lines
}

pub fn write_outcome(resp: &WriteResponse) -> Vec<String> {
    let summary = match resp.result {
        WriteResult::Created => format!("document {} created", resp.id),
        WriteResult::Updated => format!("document {} updated", resp.id),
        WriteResult::Deleted => format!("document {} deleted", resp.id),
        WriteResult::NotFound => format!("document {} not found", resp.id),
        WriteResult::Noop => format!("document {} unchanged (noop)", resp.id),
    };
    let mut lines = vec![
        summary,
        format!(
            "index -> {}, id -> {}, version -> {}, result -> {}",
            resp.index,
            resp.id,
            resp.version.map_or_else(|| "-".into(), |v| v.to_string()),
            resp.result
        ),
    ];
    lines.extend(shard_info(&resp.shards));
    lines
}

pub fn by_query(resp: &ByQueryResponse) -> Vec<String> {
    let mut lines = vec![format!(
        "took -> {}ms, total -> {}, created -> {}, updated -> {}, deleted -> {}",
        resp.took, resp.total, resp.created, resp.updated, resp.deleted
    )];
    if resp.version_conflicts > 0 {
        lines.push(format!("version_conflicts -> {}", resp.version_conflicts));
    }
    for failure in &resp.failures {
        lines.push(format!("failure -> {failure}"));
    }
    lines
}

pub fn bulk(resp: &BulkResponse) -> Vec<String> {
    let mut lines = vec![format!("bulkResponse.hasFailures -> {}", resp.errors)];
    for item in &resp.items {
        let result = item.result();
        if let Some(ref error) = result.error {
            lines.push(format!(
                "{}: index = {}, id = {}, status = {}, failure = {error}",
                item.op_type(),
                result.index,
                result.id.as_deref().unwrap_or("-"),
                result.status
            ));
            continue;
        }
        lines.push(format!(
            "{}: index = {}, id = {}, result = {}",
            item.op_type(),
            result.index,
            result.id.as_deref().unwrap_or("-"),
            result.result.map_or_else(|| "-".into(), |r| r.to_string())
        ));
    }
    lines
}

/// Shard and replica counts, then every explicit (`-->`) and default (`--->`) key.
pub fn settings(settings: &IndexSettings) -> Vec<String> {
    let mut lines = vec![
        format!(
            "number_of_shards -> {}",
            setting_or_dash(settings.get_as_u64("index.number_of_shards"))
        ),
        format!(
            "number_of_replicas -> {}",
            setting_or_dash(settings.get_as_u64("index.number_of_replicas"))
        ),
    ];
    for (key, value) in &settings.settings {
        lines.push(format!("{key} --> {}", scalar(value)));
    }
    for (key, value) in &settings.defaults {
        lines.push(format!("{key} ---> {}", scalar(value)));
    }
    lines
}

fn setting_or_dash(value: Option<u64>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

pub fn mapping(index_name: &str, mapping: &MappingDefinition) -> Vec<String> {
    let mut lines = vec![format!("[{index_name}]")];
    for (field, definition) in &mapping.properties {
        lines.push(field.clone());
        for (key, value) in definition {
            lines.push(format!("\t{key} -> {}", scalar(value)));
        }
    }
    lines
}

pub fn search(resp: &SearchResponse) -> Vec<String> {
    let mut lines = vec![
        format!("totalShards -> {}", resp.shards.total),
        format!("successfulShards -> {}", resp.shards.successful),
        format!("totalHits -> {}", resp.hits.total_value()),
        format!(
            "maxScore -> {}",
            resp.hits.max_score.map_or_else(|| "-".into(), |s| s.to_string())
        ),
    ];
    for hit in &resp.hits.hits {
        lines.push(format!(
            "id = {}, score = {}, source = {}",
            hit.id,
            hit.score.map_or_else(|| "-".into(), |s| s.to_string()),
            hit.source.as_ref().map_or_else(|| "-".into(), Value::to_string)
        ));
    }
    lines
}

/// Strings without their JSON quotes, everything else as JSON.
pub fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
