use std::path::PathBuf;

use toolver_backend::VersionOrdering;

/// Settings shared by every script plugin of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginContext {
    pub installs_dir: PathBuf,
    pub shims_dir: PathBuf,
    /// Forwarded to plugin scripts as `http_proxy` and `https_proxy`.
    pub proxy: Option<String>,
    /// Picks the version shims point at.
    pub ordering: VersionOrdering,
}

impl PluginContext {
    pub fn new(installs_dir: impl Into<PathBuf>, shims_dir: impl Into<PathBuf>) -> Self {
        Self {
            installs_dir: installs_dir.into(),
            shims_dir: shims_dir.into(),
            proxy: None,
            ordering: VersionOrdering::default(),
        }
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    #[must_use]
    pub fn with_ordering(mut self, ordering: VersionOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}

/// Proxy URL for `host` and optional `port`, e.g. `http://proxy.local:3128`.
#[must_use]
pub fn proxy_url(host: &str, port: Option<u16>) -> String {
    let base = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    };
    match port {
        Some(port) => format!("{base}:{port}"),
        None => base,
    }
}
