mod cli;
mod config;
mod fields_cmd;
mod history_cmd;
mod init;
mod input;
mod render;
mod templates_cmd;

use config::ProjectConfig;
use std::path::Path;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Render(args) => {
            let config = load_config(&args.config)?;
            render::run(args, &config)
        }
        cli::Command::Fields(args) => {
            init_tracing(&config::LogConfig::default().level);
            fields_cmd::run(args)
        }
        cli::Command::History(args) => {
            let config = load_config(&args.config)?;
            history_cmd::run(args, &config)
        }
        cli::Command::Templates(args) => {
            let config = load_config(&args.config)?;
            templates_cmd::run(args, &config)
        }
        cli::Command::Init(args) => init::run(args),
    }
}

fn load_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let config = ProjectConfig::load(path)?;
    init_tracing(&config.file.log.level);
    tracing::debug!(
        target: "n1qlgen.cli",
        config = %path.display(),
        dir = %config.config_dir.display(),
        "loaded config"
    );
    Ok(config)
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}
