use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::api::{ExpenseApi, HttpApi};
use crate::config::{
    currency_label, is_supported_currency, save_settings, AppSettings, API_BASE_URL,
    CURRENCY_SYMBOLS,
};
use crate::icons::{icon_moon, icon_sun};
use crate::notify::{BrowserNotifier, Notifier};
use crate::storage::{BrowserStorage, KeyValueStore};
use crate::theme::{Theme, ThemeContext};

/// Push the new symbol to the backend and, once accepted, persist it
/// locally. Returns the settings to apply, or `None` when nothing changed.
pub async fn change_currency(
    api: &impl ExpenseApi,
    notifier: &impl Notifier,
    store: &impl KeyValueStore,
    symbol: &str,
) -> Option<AppSettings> {
    if !is_supported_currency(symbol) {
        notifier.alert("Invalid currency");
        return None;
    }
    match api.change_currency(symbol).await {
        Ok(message) => {
            let next = AppSettings {
                currency_symbol: symbol.to_string(),
            };
            save_settings(store, &next);
            log::info!("currency set to {symbol}");
            notifier.alert(&message);
            Some(next)
        }
        Err(err) => {
            log::error!("error changing currency: {err}");
            notifier.alert(&err.user_message("An error occurred", "Failed to update currency"));
            None
        }
    }
}

/// What the currency select should show once a change has settled.
pub fn currency_to_show(applied: Option<&AppSettings>, previous: &str) -> String {
    applied
        .map(|settings| settings.currency_symbol.clone())
        .unwrap_or_else(|| previous.to_string())
}

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let theme = use_context::<ThemeContext>();

    let current_currency = settings
        .as_ref()
        .map(|s| s.currency_symbol.clone())
        .unwrap_or_else(|| AppSettings::default().currency_symbol);

    let select_ref = use_node_ref();
    let on_currency_change = {
        let settings = settings.clone();
        let select_ref = select_ref.clone();
        let previous = current_currency.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let symbol = select.value();
            let settings = settings.clone();
            let select_ref = select_ref.clone();
            let previous = previous.clone();
            spawn_local(async move {
                let api = HttpApi::new(API_BASE_URL);
                let applied = change_currency(&api, &BrowserNotifier, &BrowserStorage, &symbol).await;
                // a refusal changes no state, so the select is not re-rendered
                if let Some(select) = select_ref.cast::<HtmlSelectElement>() {
                    select.set_value(&currency_to_show(applied.as_ref(), &previous));
                }
                if let (Some(next), Some(settings)) = (applied, settings) {
                    settings.set(next);
                }
            });
        })
    };

    let (active, on_light, on_dark) = match theme {
        Some(ctx) => {
            let set_light = ctx.set.clone();
            let set_dark = ctx.set.clone();
            (
                ctx.theme,
                Callback::from(move |_| set_light.emit(Theme::Light)),
                Callback::from(move |_| set_dark.emit(Theme::Dark)),
            )
        }
        None => (Theme::Light, Callback::noop(), Callback::noop()),
    };
    let button_class = |selected: bool| {
        if selected {
            "flex items-center gap-2 px-4 py-2 rounded-xl text-sm font-bold bg-[#173E63] text-white"
        } else {
            "flex items-center gap-2 px-4 py-2 rounded-xl text-sm font-bold bg-[#B2CBDE] text-[#173E63]"
        }
    };

    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{"Settings"}</h1>
            </div>
            <div class="pt-5 grid grid-cols-1 md:grid-cols-2 gap-6">
                <div class="bg-card rounded-lg p-6 border border-border">
                    <h2 class="text-xl font-bold text-foreground mb-6">{"Appearance"}</h2>
                    <div class="flex gap-3">
                        <button id="lightThemeBtn" class={button_class(active == Theme::Light)} onclick={on_light}>
                            { icon_sun() }
                            {"Light"}
                        </button>
                        <button id="darkThemeBtn" class={button_class(active == Theme::Dark)} onclick={on_dark}>
                            { icon_moon() }
                            {"Dark"}
                        </button>
                    </div>
                </div>

                <div class="bg-card rounded-lg p-6 border border-border">
                    <h2 class="text-xl font-bold text-foreground mb-6">{"Preferences"}</h2>
                    <label class="block text-sm font-medium text-foreground mb-2">{"Currency"}</label>
                    <select ref={select_ref} onchange={on_currency_change} class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary">
                        { for CURRENCY_SYMBOLS.iter().map(|symbol| html! {
                            <option value={*symbol} selected={current_currency == *symbol}>{ currency_label(symbol) }</option>
                        }) }
                    </select>
                    <p class="text-xs text-muted-foreground mt-2">{"Currency updates are applied across the dashboard and charts."}</p>
                </div>
            </div>
        </div>
    }
}
