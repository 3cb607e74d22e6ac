//! Site-wide behaviors shared by every page: navigation toggles, the FAQ
//! accordion, smooth in-page scrolling and fade-in on scroll.

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};
use yew::prelude::*;

use crate::icons::{icon_chevron_down, icon_menu, icon_x};

pub const FADE_THRESHOLD: f64 = 0.1;
pub const FADE_ROOT_MARGIN: &str = "0px 0px -100px 0px";

/// FAQ state: at most one item is open at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    /// Close every other item, then flip the clicked one.
    pub fn toggle(self, index: usize) -> Accordion {
        if self.open == Some(index) {
            Accordion { open: None }
        } else {
            Accordion { open: Some(index) }
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }
}

#[cfg(test)]
impl Accordion {
    fn open_count(&self) -> usize {
        usize::from(self.open.is_some())
    }
}

/// Element id targeted by an in-page link, if `href` is one.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn scroll_to_anchor(href: &str) {
    let Some(id) = anchor_target(href) else {
        return;
    };
    let target = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id));
    if let Some(target) = target {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

fn set_styles(el: &HtmlElement, styles: &[(&str, &str)]) {
    let style = el.style();
    for (name, value) in styles {
        let _ = style.set_property(name, value);
    }
}

/// Starts the referenced element hidden and offset, then reveals it the
/// first time it scrolls into view.
#[hook]
pub fn use_fade_in() -> NodeRef {
    let node = use_node_ref();
    {
        let node = node.clone();
        use_effect_with_deps(
            move |_| {
                let mut cleanup: Option<(IntersectionObserver, Closure<dyn FnMut(Array, IntersectionObserver)>)> = None;
                if let Some(el) = node.cast::<HtmlElement>() {
                    set_styles(
                        &el,
                        &[
                            ("opacity", "0"),
                            ("transform", "translateY(30px)"),
                            ("transition", "opacity 0.6s ease, transform 0.6s ease"),
                        ],
                    );
                    let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                        move |entries: Array, observer: IntersectionObserver| {
                            for entry in entries.iter() {
                                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                                    continue;
                                };
                                if !entry.is_intersecting() {
                                    continue;
                                }
                                let target = entry.target();
                                if let Some(el) = target.dyn_ref::<HtmlElement>() {
                                    set_styles(el, &[("opacity", "1"), ("transform", "translateY(0)")]);
                                }
                                observer.unobserve(&target);
                            }
                        },
                    );
                    let init = IntersectionObserverInit::new();
                    init.set_threshold(&JsValue::from_f64(FADE_THRESHOLD));
                    init.set_root_margin(FADE_ROOT_MARGIN);
                    match IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init) {
                        Ok(observer) => {
                            observer.observe(&el);
                            cleanup = Some((observer, on_intersect));
                        }
                        Err(_) => {
                            log::warn!("intersection observer unavailable, showing element");
                            set_styles(&el, &[("opacity", "1"), ("transform", "translateY(0)")]);
                        }
                    }
                }
                move || {
                    if let Some((observer, _closure)) = cleanup {
                        observer.disconnect();
                    }
                }
            },
            (),
        );
    }
    node
}

#[derive(Properties, PartialEq)]
pub struct AnchorLinkProps {
    pub href: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    pub children: Children,
}

/// In-page link that scrolls smoothly instead of jumping.
#[function_component(AnchorLink)]
pub fn anchor_link(props: &AnchorLinkProps) -> Html {
    let onclick = {
        let href = props.href.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            scroll_to_anchor(&href);
        })
    };
    html! {
        <a href={props.href.clone()} class={props.class.clone()} {onclick}>
            { for props.children.iter() }
        </a>
    }
}

#[derive(Properties, PartialEq)]
pub struct FadeCardProps {
    #[prop_or_default]
    pub class: Classes,
    pub children: Children,
}

#[function_component(FadeCard)]
pub fn fade_card(props: &FadeCardProps) -> Html {
    let node = use_fade_in();
    html! {
        <div ref={node} class={props.class.clone()}>
            { for props.children.iter() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
    pub on_start: Callback<()>,
}

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    let menu_open = use_state(|| false);
    let on_hamburger = {
        let menu_open = menu_open.clone();
        Callback::from(move |_| menu_open.set(!*menu_open))
    };
    let on_start = {
        let on_start = props.on_start.clone();
        Callback::from(move |_| on_start.emit(()))
    };

    html! {
        <nav class="flex items-center justify-between px-6 h-16 bg-[#D8E1E8] border-b border-border">
            <span class="text-[#173E63] text-2xl font-black tracking-tight">{"ExpenseTracker"}</span>
            <button class="hamburger md:hidden p-2" aria-label="Menu" onclick={on_hamburger}>
                { if *menu_open { icon_x() } else { icon_menu() } }
            </button>
            <div class={classes!("nav-menu", "md:flex", "gap-6", "items-center", if *menu_open { "active flex" } else { "hidden" })}>
                <AnchorLink href="#features" class="text-sm font-medium text-[#173E63]">{"Features"}</AnchorLink>
                <AnchorLink href="#faq" class="text-sm font-medium text-[#173E63]">{"FAQ"}</AnchorLink>
                <button onclick={on_start} class="bg-[#173E63] text-white px-4 py-2 rounded-xl text-sm font-bold">{"Open Dashboard"}</button>
            </div>
        </nav>
    }
}

const FEATURES: [(&str, &str); 4] = [
    ("Track every expense", "Record what you spend with a title, category, date and notes."),
    ("See where it goes", "A category breakdown shows which areas take the most."),
    ("Spot the trend", "Month-by-month totals for the last six months at a glance."),
    ("Export reports", "Download the current month as a PDF report."),
];

const FAQ: [(&str, &str); 4] = [
    ("Is my data private?", "Your expenses are stored on your own account and are never shared."),
    ("Can I edit an expense later?", "Yes. Use the edit button on any row of the expense table."),
    ("Which currencies are supported?", "Rupee, dollar, euro and pound. Change it on the settings page."),
    ("Does it work on mobile?", "Yes. The menu collapses behind the toggle on small screens."),
];

#[function_component(FaqList)]
pub fn faq_list() -> Html {
    let accordion = use_state(Accordion::default);

    html! {
        <div class="space-y-3">
            { for FAQ.iter().enumerate().map(|(idx, (question, answer))| {
                let open = accordion.is_open(idx);
                let onclick = {
                    let accordion = accordion.clone();
                    Callback::from(move |_| accordion.set(accordion.toggle(idx)))
                };
                html! {
                    <div class={classes!("faq-item", "bg-card", "rounded-[10px]", "border", "border-border", open.then_some("active"))}>
                        <button class="faq-question w-full flex items-center justify-between p-4 text-left font-bold text-foreground" {onclick}>
                            <span>{ *question }</span>
                            { icon_chevron_down() }
                        </button>
                        {
                            if open {
                                html! { <p class="faq-answer px-4 pb-4 text-sm text-muted-foreground">{ *answer }</p> }
                            } else { html!{} }
                        }
                    </div>
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LandingPageProps {
    pub on_start: Callback<()>,
}

#[function_component(LandingPage)]
pub fn landing_page(props: &LandingPageProps) -> Html {
    let on_start = {
        let on_start = props.on_start.clone();
        Callback::from(move |_| on_start.emit(()))
    };

    html! {
        <div class="min-h-screen bg-background">
            <NavBar on_start={props.on_start.clone()} />
            <section class="px-6 py-20 text-center max-w-3xl mx-auto">
                <h1 class="text-4xl font-black text-[#173E63]">{"Know where your money goes"}</h1>
                <p class="mt-4 text-muted-foreground">{"A simple personal expense tracker with charts, search and monthly reports."}</p>
                <div class="mt-8 flex gap-3 justify-center">
                    <button onclick={on_start} class="bg-[#173E63] text-white px-6 py-3 rounded-xl font-bold">{"Get Started"}</button>
                    <AnchorLink href="#features" class="px-6 py-3 rounded-xl font-bold bg-[#B2CBDE] text-[#173E63]">{"Learn More"}</AnchorLink>
                </div>
            </section>
            <section id="features" class="px-6 py-16 max-w-5xl mx-auto">
                <h2 class="text-2xl font-bold text-foreground mb-8 text-center">{"Features"}</h2>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                    { for FEATURES.iter().map(|(title, body)| html! {
                        <FadeCard class="feature-card bg-card rounded-[10px] p-6 border border-border">
                            <h3 class="font-bold text-foreground text-lg">{ *title }</h3>
                            <p class="text-sm text-muted-foreground mt-2">{ *body }</p>
                        </FadeCard>
                    }) }
                </div>
            </section>
            <section id="faq" class="px-6 py-16 max-w-3xl mx-auto">
                <h2 class="text-2xl font-bold text-foreground mb-8 text-center">{"Frequently Asked Questions"}</h2>
                <FaqList />
            </section>
        </div>
    }
}
