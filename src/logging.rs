use crate::errors::FsError;
use serde::Deserialize;
use tracing::{debug, error};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// How much chatter goes to stderr. Errors and warnings are always shown.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Error,
    #[default]
    Warning,
    Info,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn filter(self) -> &'static str {
        match self {
            Verbosity::Error => "error",
            Verbosity::Warning => "warn",
            Verbosity::Info => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Debug => "trace",
        }
    }

    /// One step chattier, saturating at `Debug`.
    pub fn louder(self) -> Self {
        match self {
            Verbosity::Error => Verbosity::Warning,
            Verbosity::Warning => Verbosity::Info,
            Verbosity::Info => Verbosity::Verbose,
            Verbosity::Verbose | Verbosity::Debug => Verbosity::Debug,
        }
    }
}

/// Diagnostics settings, fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    pub verbosity: Verbosity,
    pub program: String,
    pub json: bool,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self { verbosity: Verbosity::default(), program: env!("CARGO_PKG_NAME").to_string(), json: false }
    }
}

pub fn init(diag: &Diagnostics) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(diag.verbosity.filter()));
    let fmt_layer = if diag.json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).with_target(false).boxed()
    };
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

/// Log real, effective and saved ids plus supplementary groups.
pub fn log_ids(diag: &Diagnostics, context: &str) {
    if diag.verbosity < Verbosity::Verbose {
        return;
    }
    let (uids, gids) = match (nix::unistd::getresuid(), nix::unistd::getresgid()) {
        (Ok(u), Ok(g)) => (u, g),
        (Err(e), _) | (_, Err(e)) => {
            debug!(context, error = %e, "can't read ids");
            return;
        }
    };
    let groups: Vec<u32> = match nix::unistd::getgroups() {
        Ok(gs) => gs.into_iter().map(|g| g.as_raw()).collect(),
        Err(e) => {
            debug!(context, error = %e, "can't read groups");
            return;
        }
    };
    debug!(
        context,
        uids = %format!("{},{},{}", uids.real, uids.effective, uids.saved),
        gids = %format!("{},{},{}", gids.real, gids.effective, gids.saved),
        groups = ?groups,
        "ids"
    );
}

/// Report `err` once and terminate unsuccessfully.
pub fn fatal(diag: &Diagnostics, err: &FsError) -> ! {
    let pid = std::process::id();
    match err.raw_os_error() {
        Some(errno) => {
            let os = std::io::Error::from_raw_os_error(errno);
            error!(program = %diag.program, pid, code = err.code(), errno, "{err}: {os}");
        }
        None => error!(program = %diag.program, pid, code = err.code(), "{err}"),
    }
    std::process::exit(1);
}
