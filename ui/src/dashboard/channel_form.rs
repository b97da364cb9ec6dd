use dioxus::prelude::*;

use crate::dashboard::{analyze_channel, use_channel, use_services};

/// Channel URL input that loads the shared channel state.
#[component]
pub fn ChannelForm() -> Element {
    let services = use_services();
    let channel = use_channel();
    let mut url = use_signal(String::new);

    let loading = channel.read().loading;
    let error = channel.read().error.clone();
    let key_services = services.clone();

    rsx! {
        section { class: "dashboard-card channel-form",
            label { r#for: "channel-url", "YouTube channel URL" }
            div { class: "channel-form__row",
                input {
                    id: "channel-url",
                    r#type: "url",
                    value: "{url}",
                    placeholder: "https://www.youtube.com/@channel",
                    oninput: move |evt: FormEvent| url.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            analyze_channel(&key_services, channel, url());
                        }
                    },
                }
                button {
                    class: "button",
                    disabled: loading,
                    onclick: move |_| analyze_channel(&services, channel, url()),
                    if loading { "Analyzing…" } else { "Analyze" }
                }
            }
            if let Some(message) = error {
                p { class: "dashboard-card__error", "{message}" }
            }
        }
    }
}
