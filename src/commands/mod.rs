pub mod convert;
pub mod exchange;
pub mod render;
pub mod set;
pub mod show;

use tracing::{error, warn};

use crate::api::backend::BackendClient;
use crate::cli::Command;
use crate::models::{currencies, Notification, Pages};
use crate::services::settings_service::SettingsView;

/// State shared by every command for the lifetime of the process
pub struct AppContext {
    pub view: SettingsView<BackendClient>,
    pub pages: Pages,
}

impl AppContext {
    pub fn new(view: SettingsView<BackendClient>) -> Self {
        AppContext {
            view,
            pages: Pages::new(),
        }
    }

    /// Pull the current USD→fiat rates from the backend into the store.
    /// Conversions without a rate come out as NaN, so a failure is only logged.
    pub async fn refresh_exchange_rates(&mut self) {
        let tickers: Vec<&str> = currencies()
            .iter()
            .filter(|c| !c.is_usd())
            .map(|c| c.ticker_symbol)
            .collect();

        match self.view.backend().get_fiat_exchange_rates(&tickers).await {
            Ok(rates) => self.view.settings_mut().set_exchange_rates(rates),
            Err(e) => warn!("Could not fetch fiat exchange rates: {}", e),
        }
    }
}

/// Print a notification the way the panel would show it
pub fn show_notification(notification: &Notification) {
    if notification.is_error() {
        eprintln!("[{}] {}", notification.title, notification.message);
    } else {
        println!("[{}] {}", notification.title, notification.message);
    }
}

/// Run one command. Returns false when the command failed.
pub async fn handle_command(ctx: &mut AppContext, command: Command) -> bool {
    let (name, result) = match command {
        Command::Render(args) => ("render", render::execute(ctx, args).await),
        Command::Show => ("show", show::execute(ctx).await),
        Command::Set(args) => ("set", set::execute(ctx, args).await),
        Command::Convert(args) => ("convert", convert::execute(ctx, args).await),
        Command::ToUsd(args) => ("to-usd", convert::execute_to_usd(ctx, args).await),
        Command::Exchange(args) => ("exchange", exchange::execute(ctx, args).await),
    };

    if let Err(e) = result {
        error!("Error executing command {}: {}", name, e);
        eprintln!("❌ {}", e);
        return false;
    }
    true
}
