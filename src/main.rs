use clap::Parser;
use clawgate::cli::{Cli, Commands, ConfigAction};
use clawgate::config::{default_config_path, Config};
use clawgate::logging;
use clawgate::onboarding::{
    read_config_snapshot, run_onboarding, write_config, ConsolePrompt, OnboardingContext,
    OnboardingError, OnboardingMode,
};
use std::path::PathBuf;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Onboard(opts) => {
            let ctx = OnboardingContext {
                config_path: opts
                    .config
                    .as_deref()
                    .map(PathBuf::from)
                    .unwrap_or_else(default_config_path),
                command: "onboard".to_string(),
                mode: if opts.manual {
                    OnboardingMode::Manual
                } else {
                    OnboardingMode::Quickstart
                },
            };

            let prompt = ConsolePrompt;
            match run_onboarding(&ctx, &prompt).await {
                Ok(_) => {}
                Err(OnboardingError::InvalidConfig { path, issues }) => {
                    error!("Existing config at {} is invalid:", path.display());
                    for issue in &issues {
                        error!("  {issue}");
                    }
                    error!("Fix the file (or run 'clawgate config init') and retry");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Config(opts) => match opts.action {
            ConfigAction::Show => {
                let config = Config::load(opts.config.as_deref())?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::Validate => {
                let path = opts
                    .config
                    .as_deref()
                    .map(PathBuf::from)
                    .unwrap_or_else(default_config_path);
                let snapshot = read_config_snapshot(&path);
                if snapshot.valid {
                    info!("Configuration is valid");
                } else {
                    for issue in &snapshot.issues {
                        error!("  {issue}");
                    }
                    std::process::exit(1);
                }
            }
            ConfigAction::Init => {
                let path = opts
                    .config
                    .as_deref()
                    .map(PathBuf::from)
                    .unwrap_or_else(default_config_path);
                write_config(&path, &Config::default())?;
                info!("Configuration file created at {}", path.display());
            }
        },
        Commands::Version => {
            println!("clawgate {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
