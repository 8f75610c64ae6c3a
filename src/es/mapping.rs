use serde_json::{json, Value};

/// `title` as plain text, `content` analyzed with `analyzer`.
pub fn create_mapping(analyzer: &str) -> Value {
    json!({
        "properties": {
            "title":   { "type": "text" },
            "content": { "type": "text", "analyzer": analyzer }
        }
    })
}

pub fn basic_settings() -> Value {
    json!({
        "index.number_of_shards": 3,
        "index.number_of_replicas": 1
    })
}

/// Settings declaring the IK + dynamic-synonym analyzers.
///
/// `dynamic_synonym` comes from the dynamic-synonym plugin; the remote
/// filter re-polls `remote_synonyms_url` every 30 seconds, the local one
/// reads `mylocalsynonym.txt` from the node's config directory.
pub fn synonym_settings(remote_synonyms_url: &str) -> Value {
    json!({
        "number_of_shards": 3,
        "number_of_replicas": 1,
        "analysis": {
            "filter": {
                "my_remote_synonym": {
                    "type": "dynamic_synonym",
                    "synonyms_path": remote_synonyms_url,
                    "interval": 30
                },
                "my_local_synonym": {
                    "type": "dynamic_synonym",
                    "synonyms_path": "mylocalsynonym.txt"
                }
            },
            "analyzer": {
                "my_ik_syno_max_word": {
                    "tokenizer": "ik_max_word",
                    "filter": ["my_remote_synonym", "my_local_synonym"]
                },
                "my_ik_syno_smart": {
                    "tokenizer": "ik_smart",
                    "filter": ["my_remote_synonym", "my_local_synonym"]
                }
            }
        }
    })
}

/// Body of a create-index request.
pub fn index_body(settings: Value, mappings: Value) -> Value {
    json!({ "settings": settings, "mappings": mappings })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_uses_requested_analyzer() {
        let mapping = create_mapping("ik_max_word");
        assert_eq!(mapping["properties"]["content"]["analyzer"], "ik_max_word");
        assert_eq!(mapping["properties"]["title"], json!({ "type": "text" }));
    }

    #[test]
    fn synonym_analyzers_share_both_filters() {
        let settings = synonym_settings("http://syn.example/list.txt");
        let analysis = &settings["analysis"];
        assert_eq!(
            analysis["filter"]["my_remote_synonym"]["synonyms_path"],
            "http://syn.example/list.txt"
        );
        for analyzer in ["my_ik_syno_max_word", "my_ik_syno_smart"] {
            assert_eq!(
                analysis["analyzer"][analyzer]["filter"],
                json!(["my_remote_synonym", "my_local_synonym"])
            );
        }
        assert_eq!(analysis["analyzer"]["my_ik_syno_smart"]["tokenizer"], "ik_smart");
    }
}
