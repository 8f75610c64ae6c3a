use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "es-api-demo")]
#[command(about = "Walk through the Elasticsearch REST API against a live cluster", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Cluster nodes, comma separated (overrides config.toml / ELASTICSEARCH_HOSTS)
    #[arg(long, value_delimiter = ',', global = true)]
    pub hosts: Option<Vec<String>>,

    /// Demo index name (overrides config.toml / ELASTICSEARCH_INDEX)
    #[arg(long, global = true)]
    pub index: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the `english` analyzer over two sentences
    Analyze,
    /// Run the IK `ik_smart` analyzer over Chinese text
    AnalyzeIk,
    /// Ad-hoc analyzer: html_strip, standard tokenizer, lowercase, stop("to")
    AnalyzeCustom,
    /// Ad-hoc lowercase normalizer
    Normalize,
    /// Create the demo index (3 shards, 1 replica, ik_max_word on content)
    CreateIndex,
    /// Create the demo index with IK + dynamic synonym analyzers
    CreateIndexSynonyms,
    /// Delete the demo index
    DeleteIndex,
    /// Print explicit and default index settings
    GetSettings,
    /// Print field mappings of the demo and pinyin indices
    GetMappings,
    /// Add a keyword `author` field to the mapping
    PutMapping,
    /// Index one article
    AddDoc {
        #[arg(long, default_value = "2")]
        id: String,
        /// Fail with a conflict instead of overwriting an existing id
        #[arg(long)]
        create: bool,
    },
    /// Get a document without its author and title
    GetDoc {
        #[arg(long, default_value = "1")]
        id: String,
    },
    /// Get only the source of a document, without its title
    GetSource {
        #[arg(long, default_value = "1")]
        id: String,
    },
    /// Fetch several documents in one request
    MultiGet {
        #[arg(long, value_delimiter = ',', default_value = "1,3")]
        ids: Vec<String>,
    },
    /// Check whether a document exists
    Exists {
        #[arg(long, default_value = "9")]
        id: String,
    },
    /// Delete a document
    DeleteDoc {
        #[arg(long, default_value = "2")]
        id: String,
    },
    /// Partially update an existing document
    UpdateDoc {
        #[arg(long, default_value = "3")]
        id: String,
    },
    /// Update a document, creating it when absent
    UpsertDoc {
        #[arg(long, default_value = "2")]
        id: String,
    },
    /// Rewrite every article by `lisi` with a painless script
    UpdateByQuery,
    /// Delete every article by the author the update-by-query demo assigns
    DeleteByQuery,
    /// Index, delete and update in a single bulk request
    Bulk,
    /// match_all, first page of 10
    Search,
    /// Full-text match on content, sorted by score
    SearchScored,
    /// Terms aggregation by author with average salary per author
    SearchAgg {
        /// Bucket to print
        #[arg(long, default_value = "zhangsan")]
        author: String,
    },
    /// Run every demo in lifecycle order
    All,
}

impl Command {
    /// Demos run by `all` before the searches.
    pub fn setup_sequence() -> Vec<Command> {
        vec![
            Command::Analyze,
            Command::AnalyzeIk,
            Command::AnalyzeCustom,
            Command::Normalize,
            Command::CreateIndex,
            Command::GetSettings,
            Command::PutMapping,
            Command::GetMappings,
            Command::AddDoc {
                id: "1".into(),
                create: false,
            },
            Command::AddDoc {
                id: "2".into(),
                create: true,
            },
            Command::GetDoc { id: "1".into() },
            Command::GetSource { id: "1".into() },
            Command::Exists { id: "9".into() },
            Command::Bulk,
            Command::MultiGet {
                ids: vec!["1".into(), "3".into()],
            },
            Command::UpdateDoc { id: "3".into() },
            Command::UpsertDoc { id: "2".into() },
        ]
    }

    /// Demos run by `all` after the searches.
    pub fn teardown_sequence() -> Vec<Command> {
        vec![
            Command::UpdateByQuery,
            Command::DeleteByQuery,
            Command::DeleteDoc { id: "2".into() },
            Command::DeleteIndex,
        ]
    }
}
