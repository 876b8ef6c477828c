//! Layered configuration for favi.
//!
//! Values are merged, later layers winning:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. A config file: TOML, YAML or JSON, picked by extension. Without an
//!    explicit path, `config.toml` in the platform config directory is used
//!    when it exists.
//! 3. Environment variables prefixed with `FAVI_`, nested keys separated by
//!    `__` (`FAVI_RESOLVER__PAGE_LIMIT=65536`).
//!
//! ```toml
//! strategy = "thorough"
//!
//! [resolver]
//! candidates = ["favicon.ico", "favicon.png", "favicon.svg"]
//!
//! [http]
//! timeout = 8
//!
//! [cache]
//! capacity = 1000
//! ttl = 3600
//! ```

pub mod error;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::bail;
use favi_resolve::cache::CacheConfig;
use favi_resolve::{HttpConfig, ResolverConfig, Strategy};
use figment::Figment;
use figment::providers::{Env, Format as _, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "FAVI_";
/// File name looked up in the platform config directory.
pub const FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Strategy used when the command line doesn't name one.
    pub strategy: Strategy,
    pub resolver: ResolverConfig,
    pub http: HttpConfig,
    pub cache: CacheConfig,
}

impl Config {
    /// Loads from the default locations. See [`load_from`](Self::load_from).
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Loads, merges and validates every layer.
    ///
    /// An explicit `path` must exist; the default path is skipped silently
    /// when it doesn't.
    #[instrument(level = "debug")]
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) if !path.is_file() => bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        };
        match &file {
            Some(file) => tracing::debug!(file = %file.display(), "Reading config file"),
            None => tracing::debug!("No config file, using defaults and environment"),
        }
        let config: Self = match Self::figment(file.as_deref())?.extract() {
            Ok(config) => config,
            Err(err) => bail!(ErrorKind::Load(err.to_string())),
        };
        config.validate()?;
        Ok(config)
    }

    /// The merged provider stack, before extraction.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            figment = match FileFormat::of(file)? {
                FileFormat::Toml => figment.merge(Toml::file(file)),
                FileFormat::Yaml => figment.merge(Yaml::file(file)),
                FileFormat::Json => figment.merge(Json::file(file)),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// `config.toml` in the platform config directory, if there is one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "favi").map(|dirs| dirs.config_dir().join(FILE_NAME))
    }

    /// Rejects values that would make the resolver misbehave rather than fail.
    pub fn validate(&self) -> Result<()> {
        let resolver = &self.resolver;
        if resolver.service_url.trim().is_empty() {
            bail!(invalid("resolver.service_url", "must not be empty"));
        }
        if resolver.candidates.is_empty() {
            bail!(invalid("resolver.candidates", "at least one file name is required"));
        }
        if let Some(candidate) = resolver.candidates.iter().find(|c| c.trim().is_empty() || c.contains('/')) {
            bail!(invalid("resolver.candidates", format!("`{candidate}` is not a bare file name")));
        }
        if resolver.icon_rels.is_empty() {
            bail!(invalid("resolver.icon_rels", "at least one rel value is required"));
        }
        if resolver.page_limit == 0 {
            bail!(invalid("resolver.page_limit", "must be greater than zero"));
        }
        if let (Some(connect), Some(total)) = (self.http.connect_timeout, self.http.timeout)
            && connect > total
        {
            bail!(invalid("http.connect_timeout", format!("{connect}s exceeds the {total}s request timeout")));
        }
        if self.cache.capacity == Some(0) {
            bail!(invalid("cache.capacity", "must be greater than zero, or left unset for no limit"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ErrorKind {
    ErrorKind::Invalid {
        field,
        reason: reason.into(),
    }
}

enum FileFormat {
    Toml,
    Yaml,
    Json,
}
impl FileFormat {
    fn of(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(OsStr::to_str).map(str::to_ascii_lowercase);
        match extension.as_deref() {
            None | Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some(other) => bail!(ErrorKind::Load(format!("unsupported config format `.{other}`"))),
        }
    }
}
