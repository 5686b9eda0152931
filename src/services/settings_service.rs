use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::api::backend::{RemoteSettings, SettingsBackend};
use crate::models::{currencies, currency_by_ticker, Notification, Settings, SettingsUpdate};
use crate::utils::errors::SettingsError;
use crate::utils::number::MAX_FRACTION_DIGITS;
use crate::utils::markup::{
    form, form_button, form_checkbox, form_date_entry, form_entry, form_select, page_header,
    settings_panel,
};

pub const FLOATING_PRECISION_ID: &str = "floating_precision";
pub const ANONYMIZED_LOGS_ID: &str = "anonymized_logs_input";
pub const HISTORICAL_DATA_START_ID: &str = "historical_data_start";
pub const MAIN_CURRENCY_ID: &str = "maincurrencyselector";
pub const ETH_RPC_PORT_ID: &str = "eth_rpc_port";
pub const BALANCE_SAVE_FREQUENCY_ID: &str = "balance_save_frequency";
pub const SUBMIT_ID: &str = "settingssubmit";

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Submitted form fields keyed by element id. A checkbox is checked when its
/// key is present with a truthy value.
pub type FormValues = HashMap<String, String>;

/// Read a checkbox value: `Some(true)` for on/true/1/checked, `Some(false)`
/// for off/false/0 or an empty value, `None` for anything else
pub fn checkbox_state(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "1" | "checked" => Some(true),
        "off" | "false" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Set or clear a checkbox in submitted values; an unchecked box is absent
pub fn set_checkbox(values: &mut FormValues, id: &str, checked: bool) {
    if checked {
        values.insert(id.to_string(), "on".to_string());
    } else {
        values.remove(id);
    }
}

/// Render the settings page from the current state
pub fn create_settings_ui(settings: &Settings) -> String {
    let tickers: Vec<&str> = currencies().iter().map(|c| c.ticker_symbol).collect();

    let mut fields = form_entry(
        "Floating Precision",
        FLOATING_PRECISION_ID,
        &settings.floating_precision().to_string(),
        "",
    );
    fields += &form_checkbox(
        ANONYMIZED_LOGS_ID,
        "Should logs by anonymized?",
        settings.anonymized_logs(),
    );
    fields += &form_date_entry(
        "Date from when to count historical data",
        HISTORICAL_DATA_START_ID,
        settings.historical_data_start(),
    );
    fields += &form_select(
        "Select Main Currency",
        MAIN_CURRENCY_ID,
        &tickers,
        settings.main_currency().ticker_symbol,
    );
    fields += &form_entry("Eth RPC Port", ETH_RPC_PORT_ID, settings.eth_rpc_port(), "");
    fields += &form_entry(
        "Balance data saving frequency in hours",
        BALANCE_SAVE_FREQUENCY_ID,
        &settings.balance_save_frequency().to_string(),
        "",
    );
    fields += &form_button("Save", SUBMIT_ID);

    let mut page = page_header("Settings");
    page += &settings_panel(
        "General Settings",
        "general_settings",
        &form("settings_form", &fields),
    );
    page
}

/// The values a freshly rendered form would submit unchanged
pub fn current_form_values(settings: &Settings) -> FormValues {
    let mut values = FormValues::new();
    values.insert(
        FLOATING_PRECISION_ID.to_string(),
        settings.floating_precision().to_string(),
    );
    set_checkbox(&mut values, ANONYMIZED_LOGS_ID, settings.anonymized_logs());
    values.insert(
        HISTORICAL_DATA_START_ID.to_string(),
        settings.historical_data_start().to_string(),
    );
    values.insert(
        MAIN_CURRENCY_ID.to_string(),
        settings.main_currency().ticker_symbol.to_string(),
    );
    values.insert(ETH_RPC_PORT_ID.to_string(), settings.eth_rpc_port().to_string());
    values.insert(
        BALANCE_SAVE_FREQUENCY_ID.to_string(),
        settings.balance_save_frequency().to_string(),
    );
    values
}

fn field<'a>(values: &'a FormValues, id: &'static str) -> Result<&'a str, SettingsError> {
    values
        .get(id)
        .map(|v| v.trim())
        .ok_or(SettingsError::InvalidField {
            field: id,
            value: String::new(),
        })
}

fn parse_u32(values: &FormValues, id: &'static str) -> Result<u32, SettingsError> {
    let raw = field(values, id)?;
    raw.parse::<u32>().map_err(|_| SettingsError::InvalidField {
        field: id,
        value: raw.to_string(),
    })
}

fn parse_precision(values: &FormValues) -> Result<u8, SettingsError> {
    let raw = field(values, FLOATING_PRECISION_ID)?;
    raw.parse::<u8>()
        .ok()
        .filter(|digits| *digits <= MAX_FRACTION_DIGITS)
        .ok_or_else(|| SettingsError::InvalidField {
            field: FLOATING_PRECISION_ID,
            value: raw.to_string(),
        })
}

fn is_checked(values: &FormValues, id: &str) -> bool {
    values
        .get(id)
        .and_then(|v| checkbox_state(v))
        .unwrap_or(false)
}

/// Validate submitted form values into a staged update
pub fn parse_form(values: &FormValues) -> Result<SettingsUpdate, SettingsError> {
    let floating_precision = parse_precision(values)?;

    let historical_data_start = field(values, HISTORICAL_DATA_START_ID)?;
    NaiveDate::parse_from_str(historical_data_start, DATE_FORMAT).map_err(|_| {
        SettingsError::InvalidField {
            field: HISTORICAL_DATA_START_ID,
            value: historical_data_start.to_string(),
        }
    })?;

    let ticker = field(values, MAIN_CURRENCY_ID)?;
    let main_currency =
        currency_by_ticker(ticker).ok_or_else(|| SettingsError::UnknownCurrency(ticker.to_string()))?;

    let eth_rpc_port = field(values, ETH_RPC_PORT_ID)?.to_string();
    let balance_save_frequency = parse_u32(values, BALANCE_SAVE_FREQUENCY_ID)?;

    Ok(SettingsUpdate {
        floating_precision,
        historical_data_start: historical_data_start.to_string(),
        main_currency,
        eth_rpc_port,
        balance_save_frequency,
        anonymized_logs: is_checked(values, ANONYMIZED_LOGS_ID),
    })
}

/// Overlay what the backend reports on top of the current values and
/// validate the result like a submitted form
pub fn merge_remote(settings: &Settings, remote: &RemoteSettings) -> Result<SettingsUpdate, SettingsError> {
    let mut values = current_form_values(settings);
    let overrides = [
        (FLOATING_PRECISION_ID, remote.ui_floating_precision.map(|p| p.to_string())),
        (HISTORICAL_DATA_START_ID, remote.historical_data_start.clone()),
        (MAIN_CURRENCY_ID, remote.main_currency.clone()),
        (ETH_RPC_PORT_ID, remote.eth_rpc_port.clone()),
        (BALANCE_SAVE_FREQUENCY_ID, remote.balance_save_frequency.map(|f| f.to_string())),
    ];
    for (id, value) in overrides {
        if let Some(value) = value {
            values.insert(id.to_string(), value);
        }
    }
    if let Some(anonymized) = remote.anonymized_logs {
        set_checkbox(&mut values, ANONYMIZED_LOGS_ID, anonymized);
    }
    parse_form(&values)
}

/// Copy the backend-owned fields that are not part of the form
fn apply_remote_extras(settings: &mut Settings, remote: RemoteSettings) {
    if let Some(exchanges) = remote.connected_exchanges {
        settings.connected_exchanges = exchanges;
    }
    if let Some(format) = remote.datetime_format {
        settings.datetime_format = format;
    }
    if let Some(premium) = remote.has_premium {
        settings.has_premium = premium;
    }
    if let Some(sync) = remote.premium_should_sync {
        settings.premium_should_sync = sync;
    }
    if let Some(ts) = remote.last_balance_save {
        settings.last_balance_save = ts;
    }
    if let Some(include) = remote.include_crypto2crypto {
        settings.include_crypto2crypto = include;
    }
    if let Some(period) = remote.taxfree_after_period {
        settings.taxfree_after_period = period;
    }
}

/// What a submit produced: the feedback for the user and the page rendered
/// from the resulting state
#[derive(Debug)]
pub struct SubmitOutcome {
    pub notification: Notification,
    pub markup: String,
    pub applied: bool,
}

/// Owns the settings store and binds it to the settings page.
///
/// Submitted values are staged and only applied once the backend accepts
/// them; a failed submit leaves the store untouched.
pub struct SettingsView<B> {
    settings: Settings,
    backend: B,
}

impl<B: SettingsBackend> SettingsView<B> {
    pub fn new(settings: Settings, backend: B) -> Self {
        SettingsView { settings, backend }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Access for externally populated tables such as exchange rates
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn render(&self) -> String {
        create_settings_ui(&self.settings)
    }

    /// Replace the local state with what the backend holds. Nothing changes
    /// when the backend cannot be reached or reports invalid values.
    pub async fn sync_from_backend(&mut self) -> Result<(), SettingsError> {
        let remote = self.backend.get_settings().await?;
        let update = merge_remote(&self.settings, &remote)?;
        self.settings.apply(update);
        apply_remote_extras(&mut self.settings, remote);
        debug!(
            "Synced settings from backend, main currency is {}",
            self.settings.main_currency().ticker_symbol
        );
        Ok(())
    }

    pub async fn submit(&mut self, values: &FormValues) -> SubmitOutcome {
        let update = match parse_form(values) {
            Ok(update) => update,
            Err(e) => {
                warn!("Rejected settings form: {}", e);
                return self.failed(e.to_string());
            }
        };

        let payload = update.to_payload();
        debug!("Sending settings payload: {:?}", payload);

        match self.backend.set_settings(&payload).await {
            Ok(response) => {
                self.settings.apply(update);
                info!(
                    "Settings updated, main currency is now {}",
                    self.settings.main_currency().ticker_symbol
                );

                let mut message = "Successfully modified settings.".to_string();
                if let Some(extra) = response.message.filter(|m| !m.is_empty()) {
                    message.push(' ');
                    message.push_str(&extra);
                }
                SubmitOutcome {
                    notification: Notification::info("Success", message),
                    markup: self.render(),
                    applied: true,
                }
            }
            Err(e) => {
                warn!("Backend refused settings update: {}", e);
                self.failed(e.message())
            }
        }
    }

    fn failed(&self, reason: String) -> SubmitOutcome {
        SubmitOutcome {
            notification: Notification::error(
                "Settings Error",
                format!("Error at modifying settings: {}", reason),
            ),
            markup: self.render(),
            applied: false,
        }
    }
}
