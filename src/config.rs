//! Configuration for link resolution, index building and search.
//!
//! Settings are layered:
//! - Default values
//! - TOML configuration file (`.gir-xref/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `GIRX_` and use double
//! underscores to separate nested levels:
//! - `GIRX_LINKS__FATAL_WARNINGS=true` sets `links.fatal_warnings`
//! - `GIRX_SEARCH__MAX_RESULTS=50` sets `search.max_results`
//! - `GIRX_PARALLEL_THREADS=4` sets `parallel_threads`

use crate::links::LinkOptions;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".gir-xref";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "GIRX_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode
    #[serde(default)]
    pub debug: bool,

    /// Worker threads for batch link resolution
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,

    #[serde(default)]
    pub links: LinksConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct LinksConfig {
    /// Treat unresolved links as errors
    #[serde(default)]
    pub fatal_warnings: bool,

    /// Base URL of the published documentation of each dependency namespace
    #[serde(default)]
    pub dependency_urls: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IndexConfig {
    /// Where `index` writes the search index
    #[serde(default = "default_index_output")]
    pub output: PathBuf,

    /// Value of `meta.generator` in the index
    #[serde(default = "default_generator_name")]
    pub generator_name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of results shown per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_index_output() -> PathBuf {
    PathBuf::from("index.json")
}
fn default_generator_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}
fn default_max_results() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            parallel_threads: default_parallel_threads(),
            links: LinksConfig::default(),
            index: IndexConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            output: default_index_output(),
            generator_name: default_generator_name(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| Path::new(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honouring the
    /// environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels; single underscores
            // stay inside field names
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find `.gir-xref/settings.toml` in the current directory or an ancestor
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join(CONFIG_FILE));
            }
        }

        None
    }

    /// Rendering options for the link parser
    pub fn link_options(&self) -> LinkOptions {
        LinkOptions {
            summary: false,
            dependency_urls: self.links.dependency_urls.clone(),
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        Self::init_config_file_in(Path::new("."), force)
    }

    pub fn init_config_file_in(
        root: &Path,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = format!(
            r#"# gir-xref configuration file

# Version of the configuration schema
version = 1

# Global debug mode
debug = false

# Worker threads for batch link resolution (defaults to CPU count)
# parallel_threads = {}

[links]
# Fail the `links` command when any link does not resolve
fatal_warnings = false

# Published documentation of dependency namespaces. Links into a namespace
# listed here point at its pages; other external links are left for the
# page scripts to resolve.
[links.dependency_urls]
# GObject = "https://docs.gtk.org/gobject/"

[index]
# Where the search index is written
output = "index.json"

# Value of meta.generator in the index
generator_name = "{}"

[search]
# Maximum number of results shown per query
max_results = {}
"#,
            num_cpus::get(),
            default_generator_name(),
            default_max_results()
        );

        std::fs::write(&config_path, template)?;
        Ok(config_path)
    }
}
