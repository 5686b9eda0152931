use tracing::warn;

use super::AppContext;
use crate::cli::ExchangeArgs;
use crate::models::assert_exchange_exists;

/// `exchange <name>` - check that an exchange is supported and whether it is connected
pub async fn execute(ctx: &mut AppContext, args: ExchangeArgs) -> Result<(), String> {
    let name = args.name.as_str();
    assert_exchange_exists(name).map_err(|e| e.to_string())?;
    if let Err(e) = ctx.view.sync_from_backend().await {
        warn!("Connected exchanges unknown, backend sync failed: {}", e);
    }

    let connected = ctx
        .view
        .settings()
        .connected_exchanges
        .iter()
        .any(|e| e == name);
    let cached = ctx.pages.exchange_page(name).is_some();
    println!(
        "{} is supported (connected: {}, page cached: {})",
        name,
        if connected { "yes" } else { "no" },
        if cached { "yes" } else { "no" }
    );
    Ok(())
}
