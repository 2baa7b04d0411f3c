use crate::errors::FsResult;
use crate::logging::{Diagnostics, Verbosity};
use crate::probe::canonicalize;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    #[serde(default)]
    pub tree: Vec<Tree>,
    #[serde(default)]
    pub mounts: Mounts,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
    pub program: Option<String>,
    #[serde(default)]
    pub json: bool,
}

/// Directories to create under one base.
#[derive(Debug, Deserialize, Clone)]
pub struct Tree {
    pub base: PathBuf,
    pub paths: Vec<PathBuf>,
    #[serde(default)]
    pub deny: Vec<PathBuf>,
}

impl Tree {
    /// Deny entries in canonical form, so they compare against the
    /// canonical paths the walk produces.
    pub fn resolved_deny(&self) -> FsResult<Vec<PathBuf>> {
        self.deny.iter().map(|d| canonicalize(d)).collect()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Mounts {
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for t in &self.tree {
            require_absolute("base", &t.base)?;
            if t.paths.is_empty() { anyhow::bail!("tree {} has no paths", t.base.display()); }
            for p in &t.paths { require_absolute("path", p)?; }
            for d in &t.deny { require_absolute("deny", d)?; }
        }
        for p in &self.mounts.paths { require_absolute("mounts.paths", p)?; }
        Ok(())
    }

    /// Diagnostics with `extra_verbose` `-v` flags applied on top of the file.
    pub fn diagnostics(&self, extra_verbose: usize) -> Diagnostics {
        let d = &self.diagnostics;
        let verbosity = (0..extra_verbose).fold(d.verbosity, |v, _| v.louder());
        let program = d.program.clone().unwrap_or_else(default_program);
        Diagnostics { verbosity, program, json: d.json }
    }
}

fn require_absolute(what: &str, p: &Path) -> anyhow::Result<()> {
    if p.as_os_str().is_empty() || !p.is_absolute() {
        anyhow::bail!("{what} must be a non-empty absolute path: {:?}", p);
    }
    Ok(())
}

fn default_program() -> String {
    let argv0 = std::env::args_os().next().unwrap_or_default();
    match Path::new(&argv0).file_name() {
        Some(n) => n.to_string_lossy().into_owned(),
        None => env!("CARGO_PKG_NAME").to_string(),
    }
}
