use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::dashboard::use_channel;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Link constructors supplied by the platform crate, so `ui` does not need to
/// know each platform's `Route` enum.
///
/// Each function receives the label and returns a `Link` containing it:
///
/// ```ignore
/// register_nav(NavBuilder {
///     home: |label| rsx!( Link { class: "navbar__link", to: Route::Home {}, "{label}" } ),
///     dashboard: |label| rsx!( Link { class: "navbar__link", to: Route::Dashboard {}, "{label}" } ),
///     compare: |label| rsx!( Link { class: "navbar__link", to: Route::Compare {}, "{label}" } ),
/// });
/// ```
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub dashboard: fn(label: &str) -> Element,
    pub compare: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

/// First registration wins.
pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    let channel = use_channel();
    let current_title = channel
        .read()
        .analysis
        .as_ref()
        .map(|a| a.channel_title.clone())
        .filter(|title| !title.trim().is_empty());

    let links = NAV_BUILDER.get().map(|b| {
        let home = (b.home)("Home");
        let dashboard = (b.dashboard)("Dashboard");
        let compare = (b.compare)("Compare");
        rsx! {
            nav { class: "navbar__links",
                {home}
                {dashboard}
                {compare}
            }
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Channelscope" }
                    }
                    span { class: "navbar__brand-subtitle", "YouTube channel analytics" }
                }

                match links {
                    Some(nav) => nav,
                    None => rsx! {
                        nav { class: "navbar__links", {children} }
                    },
                }

                if let Some(title) = current_title {
                    span { class: "navbar__channel", title: "Analyzed channel", "{title}" }
                }
            }
        }
    }
}
