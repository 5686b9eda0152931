use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use portfolio_settings::api::backend::BackendClient;
use portfolio_settings::cli::Cli;
use portfolio_settings::commands::{self, AppContext};
use portfolio_settings::models::Settings;
use portfolio_settings::services::settings_service::SettingsView;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["portfolio_settings=debug", "reqwest=warn", "hyper=warn"] {
        if let Ok(directive) = directive.parse::<tracing_subscriber::filter::Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Backend at {}", cli.backend_url());

    // The icon scan is part of start-up; without it there is no settings store
    let settings = match Settings::load(&cli.icon_dir) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to initialize settings: {}", e);
            std::process::exit(1);
        }
    };

    let client = match BackendClient::new(cli.backend_url(), cli.timeout()) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create backend client: {}", e);
            std::process::exit(1);
        }
    };

    let mut ctx = AppContext::new(SettingsView::new(settings, client));
    if !commands::handle_command(&mut ctx, cli.command).await {
        std::process::exit(1);
    }
}
