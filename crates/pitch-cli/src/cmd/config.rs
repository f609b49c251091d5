use crate::output::print_json;
use crate::root;
use clap::Subcommand;
use pitch_core::config::{Config, WarnLevel};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Validate the config for common mistakes
    Check,

    /// Print the effective config (defaults filled in)
    Show,

    /// Write a default pitch.yaml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(explicit: Option<&Path>, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Check => {
            let (config, path) = root::load_config(explicit)?;
            check(&config, path, json)
        }
        ConfigSubcommand::Show => {
            let (config, _) = root::load_config(explicit)?;
            print_json(&config)
        }
        ConfigSubcommand::Init { force } => init(&root::init_target(explicit), force, json),
    }
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

fn check(config: &Config, path: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "path": path,
            "warnings": warnings,
        });
        print_json(&value)?;
    } else {
        match &path {
            Some(p) => println!("Checking {}", p.display()),
            None => println!("No pitch.yaml found; checking built-in defaults"),
        }
        if warnings.is_empty() {
            println!("Config is valid. No warnings.");
        }
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if config.has_errors() {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(path: &Path, force: bool, json: bool) -> anyhow::Result<()> {
    let written = if force {
        Config::default().save(path)?;
        true
    } else {
        Config::write_default(path)?
    };

    if json {
        print_json(&serde_json::json!({ "path": path, "written": written }))?;
    } else if written {
        println!("Wrote {}", path.display());
    } else {
        println!("{} already exists (use --force to overwrite)", path.display());
    }
    Ok(())
}
