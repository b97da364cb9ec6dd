use api::{
    types::{FeedbackData, FeedbackKind},
    VideoRecord,
};
use dioxus::prelude::*;
use tracing::{error, info, warn};

use crate::dashboard::use_services;

const DEFINE_NOTICE: &str = "The search can take a few minutes. Definitions are AI generated; \
don't rely on them for medical, legal or technical purposes.";

/// "Was this useful?" buttons that post to the feedback endpoint.
#[component]
fn FeedbackPrompt(
    kind: FeedbackKind,
    content: String,
    #[props(!optional)] prompt: Option<String>,
) -> Element {
    let services = use_services();
    let mut sent = use_signal(|| false);

    let send = use_callback(move |result: bool| {
        let client = match services.client() {
            Ok(client) => client,
            Err(message) => {
                warn!(%message, "feedback not sent");
                return;
            }
        };
        let feedback = FeedbackData {
            kind,
            result,
            content: content.clone(),
            prompt: prompt.clone(),
        };
        spawn(async move {
            match client.send_feedback(&feedback).await {
                Ok(()) => {
                    info!(kind = ?feedback.kind, result, "feedback stored");
                    sent.set(true);
                }
                Err(err) => error!(%err, "couldn't store feedback"),
            }
        });
    });

    if sent() {
        return rsx! {
            p { class: "feedback__thanks", "Thanks for your feedback." }
        };
    }

    rsx! {
        div { class: "feedback",
            span { "Was this useful?" }
            button { class: "button button--small", onclick: move |_| send.call(true), "Yes" }
            button { class: "button button--small", onclick: move |_| send.call(false), "No" }
        }
    }
}

/// Video summary, term definitions and natural-language queries, each with
/// feedback buttons.
#[component]
pub fn SearchPanel(#[props(!optional)] video: Option<VideoRecord>) -> Element {
    let services = use_services();

    let mut term = use_signal(String::new);
    let mut definition = use_signal(|| None::<(String, Option<String>)>);
    let mut defining = use_signal(|| false);

    let mut question = use_signal(String::new);
    let mut query_result = use_signal(|| None::<String>);
    let mut querying = use_signal(|| false);

    let summary = video
        .and_then(|v| v.summary)
        .filter(|s| !s.trim().is_empty());

    let define_services = services.clone();
    let on_define = move |_: MouseEvent| {
        if defining() {
            return;
        }
        let text = term().trim().to_string();
        if text.is_empty() {
            definition.set(Some(("Enter a term to search for.".to_string(), None)));
            return;
        }
        let client = match define_services.client() {
            Ok(client) => client,
            Err(message) => {
                definition.set(Some((message, None)));
                return;
            }
        };
        defining.set(true);
        definition.set(Some((DEFINE_NOTICE.to_string(), None)));
        spawn(async move {
            let outcome = match client.define_term(&text).await {
                Ok(response) if !response.definition.trim().is_empty() => {
                    (response.definition, response.prompt_user)
                }
                Ok(_) => ("No definition found.".to_string(), None),
                Err(err) => {
                    error!(%err, term = %text, "definition failed");
                    (format!("Couldn't look up the definition: {err}"), None)
                }
            };
            definition.set(Some(outcome));
            defining.set(false);
        });
    };

    let on_query = move |_: MouseEvent| {
        if querying() {
            return;
        }
        let text = question().trim().to_string();
        if text.is_empty() {
            query_result.set(Some("Write a question in plain language.".to_string()));
            return;
        }
        let client = match services.client() {
            Ok(client) => client,
            Err(message) => {
                query_result.set(Some(message));
                return;
            }
        };
        querying.set(true);
        query_result.set(Some("Processing the query, please wait...".to_string()));
        spawn(async move {
            let text = match client.query(&text).await {
                Ok(response) if response.has_results() => serde_json::to_string_pretty(&response.results)
                    .unwrap_or_else(|_| response.results.to_string()),
                Ok(_) => "No results found for this query.".to_string(),
                Err(err) => {
                    error!(%err, "query failed");
                    format!("Couldn't run the query: {err}")
                }
            };
            query_result.set(Some(text));
            querying.set(false);
        });
    };

    rsx! {
        div { class: "search-panel",
            section { class: "dashboard-card",
                h2 { "Video summary" }
                match summary {
                    Some(summary) => rsx! {
                        p { "{summary}" }
                        FeedbackPrompt { kind: FeedbackKind::Summary, content: summary.clone(), prompt: None }
                    },
                    None => rsx! {
                        p { class: "dashboard-card__placeholder", "No summary available for this video." }
                    },
                }
            }

            section { class: "dashboard-card",
                h2 { "Search a term" }
                div { class: "search-panel__form",
                    input {
                        r#type: "text",
                        value: "{term}",
                        placeholder: "Type a term...",
                        oninput: move |evt: FormEvent| term.set(evt.value()),
                    }
                    button {
                        class: "button",
                        disabled: defining(),
                        onclick: on_define,
                        if defining() { "Searching…" } else { "Search" }
                    }
                }
                if let Some((text, prompt)) = definition() {
                    div { class: "search-panel__result",
                        strong { "Definition" }
                        p { "{text}" }
                        if !defining() {
                            FeedbackPrompt { kind: FeedbackKind::Definition, content: text.clone(), prompt }
                        }
                    }
                }
            }

            section { class: "dashboard-card",
                h2 { "Ask the corpus" }
                div { class: "search-panel__form",
                    textarea {
                        value: "{question}",
                        placeholder: "What would you like to know?",
                        oninput: move |evt: FormEvent| question.set(evt.value()),
                    }
                    button {
                        class: "button",
                        disabled: querying(),
                        onclick: on_query,
                        if querying() { "Querying…" } else { "Query" }
                    }
                }
                if let Some(result) = query_result() {
                    pre { class: "search-panel__result", "{result}" }
                    if !querying() {
                        FeedbackPrompt { kind: FeedbackKind::Query, content: result.clone(), prompt: None }
                    }
                }
            }
        }
    }
}

/// Questions answered from a single video's transcript.
#[component]
pub fn VideoQa(#[props(!optional)] video: Option<VideoRecord>) -> Element {
    let services = use_services();
    let mut question = use_signal(String::new);
    let mut answer = use_signal(|| None::<String>);
    let mut error_message = use_signal(|| None::<String>);
    let mut asking = use_signal(|| false);

    let has_video = video.as_ref().is_some_and(|v| !v.video_id.is_empty());

    let ask = use_callback(move |()| {
        if asking() {
            return;
        }
        let Some(video) = video.clone().filter(|v| !v.video_id.is_empty()) else {
            error_message.set(Some("Analyze a channel so there is a video to ask about.".to_string()));
            return;
        };
        let text = question().trim().to_string();
        if text.is_empty() {
            error_message.set(Some("Enter a question.".to_string()));
            return;
        }
        let client = match services.client() {
            Ok(client) => client,
            Err(message) => {
                error_message.set(Some(message));
                return;
            }
        };
        asking.set(true);
        error_message.set(None);
        answer.set(Some("Processing the question. This can take a few minutes...".to_string()));
        spawn(async move {
            match client.ask_question(&video, &text).await {
                Ok(response) if !response.answer.trim().is_empty() => {
                    answer.set(Some(response.answer));
                }
                Ok(_) => {
                    answer.set(None);
                    error_message.set(Some("The server didn't return an answer.".to_string()));
                }
                Err(err) => {
                    error!(%err, "question failed");
                    answer.set(None);
                    error_message.set(Some(format!("Couldn't answer the question: {err}")));
                }
            }
            asking.set(false);
        });
    });

    rsx! {
        section { class: "dashboard-card video-qa",
            h2 { "Questions about the video" }
            p { class: "dashboard-card__hint", "Ask anything covered by the video's transcript." }
            div { class: "search-panel__form",
                input {
                    r#type: "text",
                    value: "{question}",
                    placeholder: "Type your question...",
                    disabled: !has_video,
                    oninput: move |evt: FormEvent| question.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            ask.call(());
                        }
                    },
                }
                button {
                    class: "button",
                    disabled: asking() || !has_video,
                    onclick: move |_| ask.call(()),
                    if asking() { "Asking…" } else { "Ask" }
                }
            }
            if let Some(message) = error_message() {
                p { class: "dashboard-card__error", "{message}" }
            }
            if let Some(text) = answer() {
                div { class: "search-panel__result",
                    strong { "Answer" }
                    p { "{text}" }
                    if !asking() {
                        FeedbackPrompt { kind: FeedbackKind::Answer, content: text.clone(), prompt: None }
                    }
                }
            }
        }
    }
}
