use anyhow::Context;
use confine::config::Config;
use confine::{logging, path_mount_flags, TreeBuilder};
use std::path::PathBuf;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from("confine.toml");
    let mut verbose = 0;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i >= args.len() { eprintln!("--config requires a path"); std::process::exit(2); }
                config_path = PathBuf::from(&args[i]);
            }
            "--version" => {
                eprintln!("{}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            a if a.len() > 1 && a.starts_with('-') && a[1..].chars().all(|c| c == 'v') => verbose += a.len() - 1,
            other => { eprintln!("unknown argument: {other}"); std::process::exit(2); }
        }
        i += 1;
    }

    let cfg = Config::load(&config_path).context("loading config")?;
    cfg.validate().context("validating config")?;

    let diag = cfg.diagnostics(verbose);
    logging::init(&diag);
    logging::log_ids(&diag, "startup");

    for tree in &cfg.tree {
        let deny = tree.resolved_deny().unwrap_or_else(|e| logging::fatal(&diag, &e));
        let builder = TreeBuilder::new(&diag, &deny);
        for path in &tree.paths {
            if let Err(e) = builder.mkdirs(&tree.base, path) {
                logging::fatal(&diag, &e);
            }
        }
        info!(base = %tree.base.display(), paths = tree.paths.len(), "tree ready");
    }

    for path in &cfg.mounts.paths {
        match path_mount_flags(path) {
            Ok(flags) => println!("{} {:#x}", path.display(), flags.bits()),
            Err(e) => logging::fatal(&diag, &e),
        }
    }
    Ok(())
}
