use chrono::DateTime;
use tracing::warn;

use super::AppContext;
use crate::models::Settings;

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn last_balance_save(ts: i64) -> String {
    if ts == 0 {
        return "never".to_string();
    }
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn describe(settings: &Settings) -> Vec<String> {
    let main = settings.main_currency();
    let connected = if settings.connected_exchanges.is_empty() {
        "none".to_string()
    } else {
        settings.connected_exchanges.join(", ")
    };

    let mut lines = vec![
        format!("Main currency:          {} ({} {})", main.full_name, main.ticker_symbol, main.unicode_symbol),
        format!("Floating precision:     {}", settings.floating_precision()),
        format!("Historical data start:  {}", settings.historical_data_start()),
        format!("Eth RPC port:           {}", settings.eth_rpc_port()),
        format!("Balance save frequency: {}h", settings.balance_save_frequency()),
        format!("Last balance save:      {}", last_balance_save(settings.last_balance_save)),
        format!("Anonymized logs:        {}", yes_no(settings.anonymized_logs())),
        format!("Datetime format:        {}", settings.datetime_format),
        format!("Crypto to crypto:       {}", yes_no(settings.include_crypto2crypto)),
        format!("Taxfree after:          {}s", settings.taxfree_after_period),
        format!("Premium:                {} (sync: {})", yes_no(settings.has_premium), yes_no(settings.premium_should_sync)),
        format!("Start suggestion:       {}", settings.start_suggestion),
        format!("Exchanges:              {}", settings.exchanges().join(", ")),
        format!("Connected exchanges:    {}", connected),
        format!("Icons loaded:           {}", settings.icon_map().len()),
    ];
    if let Some(location) = &settings.current_location {
        lines.push(format!("Current location:       {}", location));
    }
    if !main.is_usd() {
        match settings.exchange_rate(main.ticker_symbol) {
            Some(rate) => lines.push(format!("USD rate:               1 USD = {} {}", rate, main.ticker_symbol)),
            None => lines.push("USD rate:               unavailable".to_string()),
        }
    }
    lines
}

/// `show` - print the current settings
pub async fn execute(ctx: &mut AppContext) -> Result<(), String> {
    if let Err(e) = ctx.view.sync_from_backend().await {
        warn!("Showing local settings, backend sync failed: {}", e);
    }
    ctx.refresh_exchange_rates().await;

    println!("{}", describe(ctx.view.settings()).join("\n"));
    Ok(())
}
