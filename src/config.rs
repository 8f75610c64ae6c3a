use anyhow::bail;
use serde::Deserialize;
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub elasticsearch: EsConfig,
    #[serde(default)]
    pub requests: RequestConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EsConfig {
    /// Cluster nodes, e.g. http://192.168.0.51:9200
    pub hosts: Vec<String>,
    pub index_name: String,
    /// Second index whose mapping is listed alongside the demo index
    #[serde(default = "default_pinyin_index")]
    pub pinyin_index_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    /// Write and delete-index timeout, in Elasticsearch time units
    pub timeout: String,
    pub master_timeout: String,
    pub search_timeout: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Where the dynamic synonym filter polls its word list from
    pub remote_synonyms_url: String,
}

fn default_pinyin_index() -> String {
    "my_pinyin_idx".into()
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: "2m".into(),
            master_timeout: "1m".into(),
            search_timeout: "60s".into(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            remote_synonyms_url: "http://192.168.0.56/syns/mysynonym.txt".into(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        // Step 1: Try loading .env file (silently ignore if not found)
        let _ = dotenvy::dotenv();

        // Step 2: Try loading TOML config as base
        let mut config = if Path::new("config.toml").exists() {
            let content = std::fs::read_to_string("config.toml")?;
            toml::from_str::<AppConfig>(&content)?
        } else {
            AppConfig::defaults()
        };

        // Step 3: Override with environment variables where present
        config.apply_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(hosts) = lookup("ELASTICSEARCH_HOSTS") {
            self.elasticsearch.hosts = split_hosts(&hosts);
        }
        if let Some(index) = lookup("ELASTICSEARCH_INDEX") {
            self.elasticsearch.index_name = index;
        }
        if let Some(index) = lookup("ELASTICSEARCH_PINYIN_INDEX") {
            self.elasticsearch.pinyin_index_name = index;
        }
        if let Some(val) = lookup("REQUEST_TIMEOUT") {
            self.requests.timeout = val;
        }
        if let Some(val) = lookup("REQUEST_MASTER_TIMEOUT") {
            self.requests.master_timeout = val;
        }
        if let Some(val) = lookup("SEARCH_TIMEOUT") {
            self.requests.search_timeout = val;
        }
        if let Some(val) = lookup("REMOTE_SYNONYMS_URL") {
            self.analysis.remote_synonyms_url = val;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.elasticsearch.hosts.is_empty() {
            bail!(
                "No Elasticsearch hosts configured. Set ELASTICSEARCH_HOSTS or elasticsearch.hosts in config.toml"
            );
        }
        for host in &self.elasticsearch.hosts {
            let url = Url::parse(host)
                .map_err(|e| anyhow::anyhow!("Invalid Elasticsearch host '{host}': {e}"))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                bail!("Unsupported scheme for host '{host}', expected http or https");
            }
        }
        if self.elasticsearch.index_name.trim().is_empty() {
            bail!("Index name must not be empty");
        }
        Ok(())
    }

    pub(crate) fn defaults() -> Self {
        Self {
            elasticsearch: EsConfig {
                hosts: vec![
                    "http://192.168.0.51:9200".into(),
                    "http://192.168.0.52:9200".into(),
                    "http://192.168.0.53:9200".into(),
                ],
                index_name: "api-demo-idx".into(),
                pinyin_index_name: default_pinyin_index(),
            },
            requests: RequestConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

pub fn split_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(String::from)
        .collect()
}
