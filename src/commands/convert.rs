use super::AppContext;
use crate::cli::{ConvertArgs, ToUsdArgs};
use crate::services::conversion_service::{format_currency_value, get_fiat_usd_value};
use crate::utils::number::to_fixed;

/// `convert <usd_value> [asset] [amount]` - display a USD value in the main currency
pub async fn execute(ctx: &mut AppContext, args: ConvertArgs) -> Result<(), String> {
    ctx.refresh_exchange_rates().await;
    let settings = ctx.view.settings();
    let formatted = format_currency_value(
        settings,
        &args.usd_value,
        args.asset.as_deref(),
        args.amount.as_deref(),
    )
    .map_err(|e| e.to_string())?;

    let main = settings.main_currency();
    println!("{}{} ({})", main.unicode_symbol, formatted, main.ticker_symbol);
    Ok(())
}

/// `to-usd <currency> <amount>` - convert a fiat amount back to USD
pub async fn execute_to_usd(ctx: &mut AppContext, args: ToUsdArgs) -> Result<(), String> {
    ctx.refresh_exchange_rates().await;
    let settings = ctx.view.settings();
    let usd = get_fiat_usd_value(settings, &args.currency, &args.amount);
    println!("${} (USD)", to_fixed(usd, settings.floating_precision()));
    Ok(())
}
