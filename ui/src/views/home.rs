use dioxus::prelude::*;

use crate::dashboard::{use_channel, ChannelForm};

#[component]
pub fn Home() -> Element {
    let channel = use_channel();
    let ready = channel
        .read()
        .analysis
        .as_ref()
        .map(|a| a.channel_title.clone());

    rsx! {
        section { class: "page page-home",
            h1 { "Channelscope" }
            p { "Engagement statistics and perfume reviews for a YouTube channel, at a glance." }
            p {
                "Paste a channel URL to pull its latest videos from the analysis service. "
                "The dashboard then shows how the channel is doing and which perfumes it talks about."
            }

            ul { class: "page-home__features",
                li { "Engagement, growth and per-view ratios over the newest videos" }
                li { "Perfume mentions with the reviewer's rating, plus per-perfume scores" }
                li { "Word counts, term definitions and questions about a video" }
                li { "Side-by-side comparison with a second channel" }
            }

            ChannelForm {}

            if let Some(title) = ready {
                p { class: "page-home__cta", "{title} is ready. Open the dashboard to explore it." }
            }
        }
    }
}
