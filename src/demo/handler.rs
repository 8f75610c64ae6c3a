use elasticsearch::Elasticsearch;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::demo::commands::Command;
use crate::demo::render::print_lines;
use crate::error::{DemoError, DemoResult};
use crate::es::documents::DocumentClient;
use crate::es::indices::IndexAdmin;
use crate::es::search::SearchClient;

/// Holds the shared client handle and runs one demo per `Command`.
pub struct Demo {
    pub(super) es: Arc<Elasticsearch>,
    pub(super) config: AppConfig,
    pub(super) indices: IndexAdmin,
    pub(super) documents: DocumentClient,
    pub(super) search: SearchClient,
}

impl Demo {
    pub fn new(es: Arc<Elasticsearch>, config: AppConfig) -> Self {
        let index_name = config.elasticsearch.index_name.clone();
        Self {
            indices: IndexAdmin::new(es.clone(), config.requests.clone()),
            documents: DocumentClient::new(es.clone(), index_name.clone(), config.requests.clone()),
            search: SearchClient::new(es.clone(), index_name),
            es,
            config,
        }
    }

    pub(super) fn index_name(&self) -> &str {
        &self.config.elasticsearch.index_name
    }

    /// Run `command` to completion and return how many demos failed.
    /// Failures are reported, never propagated.
    pub async fn run(&self, command: &Command) -> usize {
        if *command == Command::All {
            return self.run_all().await;
        }
        self.run_reported(command).await
    }

    async fn run_reported(&self, command: &Command) -> usize {
        match self.run_one(command).await {
            Ok(()) => 0,
            Err(e) => {
                report_failure(command, &e);
                1
            }
        }
    }

    /// Every demo in order, each awaited before the next starts. The three
    /// read-only searches run concurrently and are joined before teardown.
    async fn run_all(&self) -> usize {
        let mut failures = self.reset_index().await;

        for command in Command::setup_sequence() {
            failures += self.run_reported(&command).await;
        }

        let search_agg = Command::SearchAgg {
            author: "zhangsan".into(),
        };
        let (plain, scored, aggregated) = futures::join!(
            self.run_one(&Command::Search),
            self.run_one(&Command::SearchScored),
            self.run_one(&search_agg),
        );
        for (command, result) in [
            (Command::Search, plain),
            (Command::SearchScored, scored),
            (search_agg, aggregated),
        ] {
            if let Err(e) = result {
                report_failure(&command, &e);
                failures += 1;
            }
        }

        for command in Command::teardown_sequence() {
            failures += self.run_reported(&command).await;
        }

        tracing::info!("Finished all demos, {failures} failed");
        failures
    }

    /// Drop a demo index left over from an earlier run. Its absence is fine.
    async fn reset_index(&self) -> usize {
        match self.delete_index().await {
            Ok(_) => {
                tracing::info!("Removed existing index '{}'", self.index_name());
                0
            }
            Err(e) if e.is_not_found() => 0,
            Err(e) => {
                report_failure(&Command::DeleteIndex, &e);
                1
            }
        }
    }

    async fn run_one(&self, command: &Command) -> DemoResult<()> {
        let lines = self.execute(command).await?;
        println!("== {command:?}");
        print_lines(lines);
        Ok(())
    }

    /// The console lines a demo produces; printed only once it has completed.
    pub(super) async fn execute(&self, command: &Command) -> DemoResult<Vec<String>> {
        match command {
            Command::Analyze => self.analyze_english().await,
            Command::AnalyzeIk => self.analyze_ik().await,
            Command::AnalyzeCustom => self.analyze_custom().await,
            Command::Normalize => self.normalize().await,
            Command::CreateIndex => self.create_index().await,
            Command::CreateIndexSynonyms => self.create_index_with_synonyms().await,
            Command::DeleteIndex => self.delete_index().await,
            Command::GetSettings => self.get_settings().await,
            Command::GetMappings => self.get_mappings().await,
            Command::PutMapping => self.put_mapping().await,
            Command::AddDoc { id, create } => self.add_doc(id, *create).await,
            Command::GetDoc { id } => self.get_doc(id).await,
            Command::GetSource { id } => self.get_source(id).await,
            Command::MultiGet { ids } => self.multi_get(ids).await,
            Command::Exists { id } => self.exists(id).await,
            Command::DeleteDoc { id } => self.delete_doc(id).await,
            Command::UpdateDoc { id } => self.update_doc(id).await,
            Command::UpsertDoc { id } => self.upsert_doc(id).await,
            Command::UpdateByQuery => self.update_by_query().await,
            Command::DeleteByQuery => self.delete_by_query().await,
            Command::Bulk => self.bulk().await,
            Command::Search => self.search_all().await,
            Command::SearchScored => self.search_scored().await,
            Command::SearchAgg { author } => self.search_aggregated(author).await,
            // Sequenced by `run`, not a demo of its own
            Command::All => {
                tracing::debug!("`all` has no output of its own");
                Ok(Vec::new())
            }
        }
    }
}

/// Print the not-found / conflict / generic diagnostic for a failed demo.
pub fn report_failure(command: &Command, err: &DemoError) {
    match err {
        DemoError::NotFound { index, reason } => tracing::warn!(
            "{command:?}: index or document not found (index {}): {reason}",
            index.as_deref().unwrap_or("?")
        ),
        e if e.is_conflict() => tracing::warn!("{command:?}: version conflict: {e}"),
        DemoError::Elasticsearch(e) => {
            tracing::error!("{command:?}: could not reach the cluster: {e}")
        }
        other => tracing::error!("{command:?}: request failed: {other}"),
    }
}
