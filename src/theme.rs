use yew::prelude::*;

use crate::icons::{icon_moon, icon_sun};
use crate::storage::KeyValueStore;

pub const THEME_KEY: &str = "theme";
pub const DARK_CLASS: &str = "dark-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeIcon {
    Sun,
    Moon,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Theme {
        match raw {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// The toggle shows the theme it would switch to.
    pub fn icon(&self) -> ThemeIcon {
        match self {
            Theme::Dark => ThemeIcon::Sun,
            Theme::Light => ThemeIcon::Moon,
        }
    }
}

pub fn load_theme(store: &impl KeyValueStore) -> Theme {
    store
        .get(THEME_KEY)
        .map(|raw| Theme::parse(&raw))
        .unwrap_or_default()
}

/// Persist first, then report the theme to render.
pub fn set_theme(store: &impl KeyValueStore, theme: Theme) -> Theme {
    store.set(THEME_KEY, theme.as_str());
    theme
}

/// Flip the theme on screen, not whatever the store last held.
pub fn toggle_theme(store: &impl KeyValueStore, current: Theme) -> Theme {
    set_theme(store, current.toggled())
}

/// Mirror the theme onto `<body>` as the `dark-theme` class.
pub fn apply_to_body(theme: Theme) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        let classes = body.class_list();
        let _ = match theme {
            Theme::Dark => classes.add_1(DARK_CLASS),
            Theme::Light => classes.remove_1(DARK_CLASS),
        };
    }
}

/// Shared through a `ContextProvider` so the header toggle and the settings
/// buttons drive the same state.
#[derive(Clone, PartialEq)]
pub struct ThemeContext {
    pub theme: Theme,
    pub set: Callback<Theme>,
    pub toggle: Callback<()>,
}

#[derive(Properties, PartialEq)]
pub struct ThemeToggleProps {
    pub theme: Theme,
    pub on_toggle: Callback<()>,
}

#[function_component(ThemeToggle)]
pub fn theme_toggle(props: &ThemeToggleProps) -> Html {
    let onclick = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_| on_toggle.emit(()))
    };
    html! {
        <button id="themeToggle" class="p-2 hover:bg-secondary rounded-full transition-colors" aria-label="Toggle theme" {onclick}>
            { match props.theme.icon() {
                ThemeIcon::Sun => icon_sun(),
                ThemeIcon::Moon => icon_moon(),
            } }
        </button>
    }
}
