use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "clawgate", version, about = "Multi-channel AI agent gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive setup: resolve, merge, and persist the configuration.
    Onboard(OnboardOpts),
    Config(ConfigOpts),
    Version,
}

#[derive(clap::Args)]
pub struct OnboardOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    /// Ask the full gateway questionnaire instead of accepting defaults.
    #[arg(long)]
    pub manual: bool,
}

#[derive(clap::Args)]
pub struct ConfigOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    Show,
    Validate,
    Init,
}
