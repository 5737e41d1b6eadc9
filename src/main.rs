use anyhow::Context;
use clap::Parser;
use issue_explorer::config::config_manager::ConfigManager;
use issue_explorer::enums::commands::Commands;
use issue_explorer::errors::ErrorHandler;
use issue_explorer::logger::log_setup::LogSetup;
use issue_explorer::structs::cli::Cli;
use issue_explorer::structs::config::config::Config;
use issue_explorer::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // init must work before any configuration exists
    let config = match cli.command {
        Commands::Init => Config::default(),
        _ => ConfigManager::load(cli.config.as_deref()).context("failed to load configuration")?,
    };
    LogSetup::init(&config.logging.level);

    let mut runner = CommandRunner::new(config, cli.config);
    if let Err(e) = runner.run_command(cli.command).await {
        ErrorHandler::handle_error(&e);
        return Err(e).context("command failed");
    }

    Ok(())
}
