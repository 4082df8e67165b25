//! Server configuration from the environment and command line.

use std::net::SocketAddr;
use std::path::PathBuf;

use bfviz_graph::Graph;
use tracing::info;

use crate::error::{Error, Result};
use crate::input::{self, DEFAULT_SOURCE};

/// Configuration for the visualizer binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisConfig {
    /// Listen address
    pub addr: SocketAddr,
    /// Edge-list file loaded at startup, the built-in graph when unset
    pub graph_file: Option<PathBuf>,
    /// Source vertex
    pub source: String,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            graph_file: None,
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

impl VisConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub const DEFAULT_FILTER: &'static str = "bfviz=info";

    /// Read `BFVIZ_ADDR`, `BFVIZ_GRAPH` and `BFVIZ_SOURCE`, with defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key-value lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("BFVIZ_ADDR") {
            config.addr = addr
                .parse()
                .map_err(|e| Error::Config(format!("invalid BFVIZ_ADDR {:?}: {}", addr, e)))?;
        }

        if let Some(path) = lookup("BFVIZ_GRAPH").filter(|p| !p.trim().is_empty()) {
            config.graph_file = Some(PathBuf::from(path));
        }

        if let Some(source) = lookup("BFVIZ_SOURCE") {
            let source = source.trim();
            if source.is_empty() {
                return Err(Error::Config("BFVIZ_SOURCE is empty".to_string()));
            }
            config.source = source.to_string();
        }

        Ok(config)
    }

    /// Apply positional arguments `[graph-file] [source]`.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        if let Some(path) = args.next() {
            self.graph_file = Some(PathBuf::from(path));
        }
        if let Some(source) = args.next() {
            self.source = source;
        }
        self
    }

    /// Load the configured graph.
    pub fn load_graph(&self) -> Result<Graph> {
        match &self.graph_file {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                info!(path = %path.display(), source = %self.source, "loading graph");
                input::load_graph(&text, &self.source)
            }
            None => {
                info!(source = %self.source, "loading built-in graph");
                input::graph_from_edges(input::default_edges(), &self.source)
            }
        }
    }
}
