// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::remote::RemoteStore;
use crate::store::{RecordStore, RequestContext, SqliteStore};
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Local(PathBuf),
    Remote { api_url: String },
}

/// Where records live and which credential to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
    pub token: Option<String>,
}

impl Config {
    /// Resolved from the global `--db`, `--api-url` and `--token` flags (or
    /// their environment variables). A non-empty API URL wins over `--db`.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let non_empty = |key: &str| {
            m.get_one::<String>(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let backend = match non_empty("api-url") {
            Some(api_url) => Backend::Remote { api_url },
            None => match non_empty("db") {
                Some(path) => Backend::Local(PathBuf::from(path)),
                None => Backend::Local(db::default_db_path()?),
            },
        };
        Ok(Config {
            backend,
            token: non_empty("token"),
        })
    }

    pub fn request_context(&self) -> RequestContext {
        match &self.token {
            Some(t) => RequestContext::with_token(t.clone()),
            None => RequestContext::anonymous(),
        }
    }

    pub fn open_store(&self) -> Result<Box<dyn RecordStore>> {
        match &self.backend {
            Backend::Local(path) => {
                info!(path = %path.display(), "using local store");
                Ok(Box::new(SqliteStore::new(db::open_or_init(path)?)))
            }
            Backend::Remote { api_url } => {
                info!(%api_url, "using remote store");
                Ok(Box::new(RemoteStore::new(api_url)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_overrides_local_path() {
        let m = crate::cli::build_cli().get_matches_from([
            "bridalbooks",
            "--db",
            "/tmp/ledger.sqlite",
            "--api-url",
            "https://ledger.example/",
            "--token",
            "abc",
            "doctor",
        ]);
        let cfg = Config::from_matches(&m).unwrap();
        assert_eq!(
            cfg.backend,
            Backend::Remote {
                api_url: "https://ledger.example/".into()
            }
        );
        assert_eq!(cfg.request_context().bearer(), Some("abc"));
    }

    #[test]
    fn explicit_db_path_is_used() {
        let m = crate::cli::build_cli().get_matches_from([
            "bridalbooks",
            "--db",
            "/tmp/ledger.sqlite",
            "--api-url",
            "",
            "init",
        ]);
        let cfg = Config::from_matches(&m).unwrap();
        assert_eq!(cfg.backend, Backend::Local(PathBuf::from("/tmp/ledger.sqlite")));
        assert_eq!(cfg.request_context(), RequestContext::anonymous());
    }
}
