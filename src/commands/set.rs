use super::{show_notification, AppContext};
use crate::cli::SetArgs;
use crate::models::pages::PAGE_SETTINGS;
use crate::services::settings_service::{
    current_form_values, set_checkbox, FormValues, ANONYMIZED_LOGS_ID, BALANCE_SAVE_FREQUENCY_ID,
    ETH_RPC_PORT_ID, FLOATING_PRECISION_ID, HISTORICAL_DATA_START_ID, MAIN_CURRENCY_ID,
};

/// Write the flags that were given over the current form values
fn edit_form(values: &mut FormValues, args: SetArgs) {
    let edits = [
        (FLOATING_PRECISION_ID, args.floating_precision.map(|p| p.to_string())),
        (HISTORICAL_DATA_START_ID, args.historical_data_start),
        (MAIN_CURRENCY_ID, args.main_currency),
        (ETH_RPC_PORT_ID, args.eth_rpc_port),
        (BALANCE_SAVE_FREQUENCY_ID, args.balance_save_frequency.map(|f| f.to_string())),
    ];
    for (id, value) in edits {
        if let Some(value) = value {
            values.insert(id.to_string(), value);
        }
    }
    if let Some(checked) = args.anonymized_logs {
        set_checkbox(values, ANONYMIZED_LOGS_ID, checked);
    }
}

/// `set --<setting> <value> ...` - load the backend's settings, edit the
/// given fields and submit the form
pub async fn execute(ctx: &mut AppContext, args: SetArgs) -> Result<(), String> {
    if args.is_empty() {
        return Err("Nothing to change. Pass at least one setting flag, see `set --help`.".to_string());
    }

    ctx.view
        .sync_from_backend()
        .await
        .map_err(|e| format!("Could not load the current settings: {}", e))?;

    let mut values = current_form_values(ctx.view.settings());
    edit_form(&mut values, args);

    let outcome = ctx.view.submit(&values).await;
    show_notification(&outcome.notification);
    ctx.pages.insert(PAGE_SETTINGS, outcome.markup);
    if !outcome.applied {
        return Err(outcome.notification.message);
    }
    Ok(())
}
