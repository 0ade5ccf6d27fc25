use dioxus::prelude::*;

use corkboard_common::account_view::Notice;
use corkboard_common::shoutbox::{ShoutError, ShoutMessage, ShoutboxMode};

use super::browser_store::shoutbox;
use super::notify::notify;
use super::session_state::{use_session_state, SessionState};

fn load_messages() -> Vec<ShoutMessage> {
    match shoutbox().and_then(|s| s.messages()) {
        Ok(messages) => messages,
        Err(e) => {
            tracing::error!("failed to load shoutbox: {e}");
            Vec::new()
        }
    }
}

fn scroll_to_bottom(list_id: &str) {
    #[cfg(target_family = "wasm")]
    if let Some(list) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(list_id))
    {
        list.set_scroll_top(list.scroll_height());
    }
    #[cfg(not(target_family = "wasm"))]
    let _ = list_id;
}

fn send_shout(
    session_state: Signal<SessionState>,
    mut draft: Signal<String>,
    mut messages: Signal<Vec<ShoutMessage>>,
) {
    let session = session_state.read().session.clone();
    let result = shoutbox().and_then(|s| s.send(session.as_ref(), &draft.read()));
    match result {
        Ok(Some(_)) => {
            draft.set(String::new());
            messages.set(load_messages());
        }
        Ok(None) => {}
        Err(e) => {
            if let ShoutError::Storage(inner) = &e {
                tracing::error!("failed to post shout: {inner}");
            }
            notify(&Notice::from(&e));
        }
    }
}

/// Message list plus an input row that only shows while someone is signed in.
#[component]
pub fn ShoutboxWidget(module_id: String) -> Element {
    let session_state = use_session_state();
    let messages = use_signal(load_messages);
    let mut draft = use_signal(String::new);

    let list_id = format!("{module_id}-messages");
    let mode = ShoutboxMode::for_session(session_state.read().current());

    {
        let list_id = list_id.clone();
        use_effect(move || {
            let _count = messages.read().len();
            scroll_to_bottom(&list_id);
        });
    }

    let shown = messages.cloned();

    rsx! {
        div { class: "shoutbox-container",
            div { class: "shoutbox-messages", id: "{list_id}",
                for (i, msg) in shown.iter().enumerate() {
                    div { key: "{i}", class: "shoutbox-message",
                        div { "{msg.text}" }
                        div { class: "shoutbox-meta", "{msg.meta_line()}" }
                    }
                }
            }
            if mode.shows_input() {
                div { class: "shoutbox-input",
                    input {
                        r#type: "text",
                        placeholder: "Type a message...",
                        value: "{draft}",
                        oninput: move |evt| draft.set(evt.value()),
                        onkeypress: move |evt: KeyboardEvent| {
                            if evt.key() == Key::Enter {
                                send_shout(session_state, draft, messages);
                            }
                        },
                    }
                    button {
                        onclick: move |_| send_shout(session_state, draft, messages),
                        "Send"
                    }
                }
            }
        }
    }
}
