use yew::prelude::*;

use crate::config::{load_settings, AppSettings};
use crate::dashboard::DashboardPage;
use crate::icons::{icon_home, icon_layout_grid, icon_menu, icon_settings, icon_x};
use crate::settings::SettingsPage;
use crate::site::{scroll_to_top, LandingPage};
use crate::storage::BrowserStorage;
use crate::theme::{
    apply_to_body, load_theme, set_theme, toggle_theme, Theme, ThemeContext, ThemeToggle,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Page {
    Home,
    Dashboard,
    Settings,
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        label: "Home",
        page: Page::Home,
        icon: icon_home,
    },
    NavItem {
        label: "Dashboard",
        page: Page::Dashboard,
        icon: icon_layout_grid,
    },
    NavItem {
        label: "Settings",
        page: Page::Settings,
        icon: icon_settings,
    },
];

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    open: bool,
    on_select: Callback<Page>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    html! {
        <div id="sidebar" class={classes!("sidebar", "w-[220px]", "h-screen", "bg-[#D8E1E8]", "p-4", "flex-col", "md:flex", if props.open { "active flex" } else { "hidden" })}>
            <div class="flex items-center gap-3 px-2 mb-8">
                <span class="text-[#173E63] text-2xl font-black tracking-tight">{"ExpenseTracker"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for NAV_ITEMS.iter().map(|item| {
                        let class_name = if item.page == props.active_page {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    sidebar_open: bool,
    on_menu: Callback<()>,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let theme = use_context::<ThemeContext>();
    let on_menu = {
        let on_menu = props.on_menu.clone();
        Callback::from(move |_| on_menu.emit(()))
    };

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <button id="menuToggle" class="md:hidden p-2 hover:bg-secondary rounded-full" aria-label="Menu" onclick={on_menu}>
                { if props.sidebar_open { icon_x() } else { icon_menu() } }
            </button>
            <div class="flex-1"></div>
            <div class="flex items-center gap-4">
                {
                    match theme {
                        Some(ctx) => html! { <ThemeToggle theme={ctx.theme} on_toggle={ctx.toggle} /> },
                        None => html! {},
                    }
                }
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    let sidebar_open = use_state(|| false);
    let on_menu = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_| sidebar_open.set(!*sidebar_open))
    };
    // Picking a page on mobile also folds the sidebar away.
    let on_select = {
        let sidebar_open = sidebar_open.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |page: Page| {
            sidebar_open.set(false);
            on_select.emit(page);
        })
    };

    html! {
        <div class="flex h-screen bg-background">
            <Sidebar active_page={props.active_page} open={*sidebar_open} {on_select} />

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header sidebar_open={*sidebar_open} {on_menu} />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let active_page = use_state(|| Page::Home);
    let settings = use_state(|| load_settings(&BrowserStorage));
    let theme = use_state(|| load_theme(&BrowserStorage));

    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    use_effect_with_deps(
        |_| {
            scroll_to_top();
            || ()
        },
        (),
    );

    use_effect_with_deps(
        |theme: &Theme| {
            apply_to_body(*theme);
            || ()
        },
        *theme,
    );

    let theme_ctx = {
        let set = {
            let theme = theme.clone();
            Callback::from(move |next: Theme| theme.set(set_theme(&BrowserStorage, next)))
        };
        let toggle = {
            let theme = theme.clone();
            Callback::from(move |_| theme.set(toggle_theme(&BrowserStorage, *theme)))
        };
        ThemeContext {
            theme: *theme,
            set,
            toggle,
        }
    };

    let content = match *active_page {
        Page::Home => {
            let on_start = {
                let on_select = on_select.clone();
                Callback::from(move |_| on_select.emit(Page::Dashboard))
            };
            html! { <LandingPage {on_start} /> }
        }
        Page::Dashboard => html! {
            <Layout active_page={Page::Dashboard} on_select={on_select.clone()}>
                <DashboardPage />
            </Layout>
        },
        Page::Settings => html! {
            <Layout active_page={Page::Settings} on_select={on_select.clone()}>
                <SettingsPage />
            </Layout>
        },
    };

    html! {
        <ContextProvider<ThemeContext> context={theme_ctx}>
            <ContextProvider<UseStateHandle<AppSettings>> context={settings}>
                { content }
            </ContextProvider<UseStateHandle<AppSettings>>>
        </ContextProvider<ThemeContext>>
    }
}
