use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

/// Backend origin. Empty means same origin, so the paths are used as-is.
pub const API_BASE_URL: &str = match option_env!("EXPENSE_API_BASE_URL") {
    Some(url) => url,
    None => "",
};

pub const SETTINGS_KEY: &str = "settings";

pub const CURRENCY_SYMBOLS: [&str; 4] = ["₹", "$", "€", "£"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub currency_symbol: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            currency_symbol: "₹".to_string(),
        }
    }
}

pub fn is_supported_currency(symbol: &str) -> bool {
    CURRENCY_SYMBOLS.contains(&symbol)
}

pub fn currency_label(symbol: &str) -> &'static str {
    match symbol {
        "$" => "USD ($)",
        "€" => "EUR (€)",
        "£" => "GBP (£)",
        _ => "INR (₹)",
    }
}

pub fn load_settings(store: &impl KeyValueStore) -> AppSettings {
    if let Some(raw) = store.get(SETTINGS_KEY) {
        if let Ok(settings) = serde_json::from_str::<AppSettings>(&raw) {
            if is_supported_currency(&settings.currency_symbol) {
                return settings;
            }
        }
    }
    AppSettings::default()
}

pub fn save_settings(store: &impl KeyValueStore, settings: &AppSettings) {
    if let Ok(raw) = serde_json::to_string(settings) {
        store.set(SETTINGS_KEY, &raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn missing_settings_fall_back_to_rupee() {
        let store = MemoryStore::default();
        assert_eq!(load_settings(&store).currency_symbol, "₹");
    }

    #[test]
    fn saved_settings_are_read_back() {
        let store = MemoryStore::default();
        let settings = AppSettings {
            currency_symbol: "$".to_string(),
        };
        save_settings(&store, &settings);
        assert_eq!(load_settings(&store), settings);
    }

    #[test]
    fn unknown_symbol_is_ignored() {
        let store = MemoryStore::default();
        store.set(SETTINGS_KEY, r#"{"currency_symbol":"¥"}"#);
        assert_eq!(load_settings(&store), AppSettings::default());
    }
}
