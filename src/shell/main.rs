use clap::Parser;
use std::sync::Arc;

use membership_admin::shared::infrastructure::gateway::http::HttpGateway;
use membership_admin::shell::cli::{AssumeYes, Cli, Command, PromptConfirmer, run};
use membership_admin::shell::config::GatewayConfig;
use membership_admin::shell::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = GatewayConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, "membership API");
    let gateway = Arc::new(HttpGateway::new(
        config.base_url,
        config.token,
        config.timeout,
    )?);

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        command @ Command::Key { yes: true, .. } => {
            run(command, gateway, &AssumeYes, &mut stdout).await
        }
        command => run(command, gateway, &PromptConfirmer, &mut stdout).await,
    }
}
