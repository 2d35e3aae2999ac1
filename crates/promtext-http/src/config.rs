//! Exporter config loader (strict parsing).

use std::collections::BTreeMap;
use std::fs;

use serde::Deserialize;

use promtext_core::{LabelSet, PromtextError, Result};

pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PromtextError::InvalidConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| PromtextError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    /// Registry-wide labels merged into every rendered series.
    #[serde(default)]
    pub global_labels: BTreeMap<String, String>,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PromtextError::InvalidConfig(
                "version must be 1".into(),
            ));
        }
        self.server.validate()?;
        Ok(())
    }

    /// Global labels as a core label set.
    pub fn global_labels(&self) -> LabelSet {
        LabelSet::from_pairs(self.global_labels.iter().map(|(k, v)| (k.clone(), v.clone())))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,

    #[serde(default = "default_chunk_bytes")]
    pub chunk_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
            chunk_bytes: default_chunk_bytes(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if !self.metrics_path.starts_with('/') {
            return Err(PromtextError::InvalidConfig(
                "server.metrics_path must start with '/'".into(),
            ));
        }
        if !(64..=65536).contains(&self.chunk_bytes) {
            return Err(PromtextError::InvalidConfig(
                "server.chunk_bytes must be between 64 and 65536".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:9100".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
fn default_chunk_bytes() -> usize {
    1024
}
