use dioxus::prelude::*;

use crate::dashboard::{use_channel, ComparisonPanel};

#[component]
pub fn Compare() -> Element {
    let channel = use_channel();
    let current = channel.read().analysis.clone();

    rsx! {
        section { class: "page page-compare",
            h1 { "Compare channels" }
            p { "Line the analyzed channel up against another one, metric by metric." }

            ComparisonPanel { current }
        }
    }
}
