use dioxus::prelude::*;

use corkboard_common::account::AccountError;
use corkboard_common::account_view::{avatar_glyph, profile_label, MenuVisibility, Notice};

use super::browser_store::accounts;
use super::notify::notify;
use super::session_state::use_session_state;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Modal {
    Login,
    Register,
    Profile,
}

fn hidden_unless(visible: bool, class: &str) -> String {
    if visible {
        class.to_string()
    } else {
        format!("{class} hidden")
    }
}

fn report(err: &AccountError) {
    if let AccountError::Storage(e) = err {
        tracing::error!("account storage failed: {e}");
    }
    notify(&Notice::from(err));
}

/// Avatar button, its drop-down menu and the three account dialogs.
#[component]
pub fn AccountMenu() -> Element {
    let mut session_state = use_session_state();
    let mut menu_open = use_signal(|| false);
    let mut open_modal = use_signal(|| None::<Modal>);

    let state = session_state.read();
    let glyph = avatar_glyph(state.current());
    let visible = MenuVisibility::for_session(state.current());
    drop(state);

    let logout = move |_| {
        match accounts().and_then(|a| a.logout()) {
            Ok(()) => {
                session_state.write().session = None;
                tracing::info!("signed out");
            }
            Err(e) => report(&e),
        }
        menu_open.set(false);
    };

    rsx! {
        div { class: "account",
            div {
                id: "accountAvatar",
                class: "account-avatar",
                onclick: move |_| {
                    let open = menu_open();
                    menu_open.set(!open);
                },
                "{glyph}"
            }
            div {
                id: "accountMenu",
                class: hidden_unless(menu_open(), "account-menu"),
                div {
                    id: "menuLogin",
                    class: hidden_unless(visible.login, "menu-entry"),
                    onclick: move |_| open_modal.set(Some(Modal::Login)),
                    "Login"
                }
                div {
                    id: "menuRegister",
                    class: hidden_unless(visible.register, "menu-entry"),
                    onclick: move |_| open_modal.set(Some(Modal::Register)),
                    "Register"
                }
                div {
                    id: "menuProfile",
                    class: hidden_unless(visible.profile, "menu-entry"),
                    onclick: move |_| open_modal.set(Some(Modal::Profile)),
                    "Profile"
                }
                div {
                    id: "menuLogout",
                    class: hidden_unless(visible.logout, "menu-entry"),
                    onclick: logout,
                    "Logout"
                }
            }
        }
        LoginModal { open_modal }
        RegisterModal { open_modal }
        ProfileModal { open_modal }
    }
}

#[component]
fn LoginModal(open_modal: Signal<Option<Modal>>) -> Element {
    let mut open_modal = open_modal;
    let mut session_state = use_session_state();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);

    let submit = move |_| {
        let result = accounts().and_then(|a| a.login(&username.read(), &password.read()));
        match result {
            Ok(session) => {
                tracing::info!("signed in as {}", session.username);
                session_state.write().session = Some(session);
                password.set(String::new());
                open_modal.set(None);
            }
            Err(e) => report(&e),
        }
    };

    rsx! {
        div {
            id: "loginModal",
            class: hidden_unless(open_modal() == Some(Modal::Login), "modal"),
            div { class: "modal-content",
                span {
                    class: "modal-close",
                    onclick: move |_| open_modal.set(None),
                    "×"
                }
                h2 { "Login" }
                input {
                    id: "loginUser",
                    r#type: "text",
                    placeholder: "Username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                input {
                    id: "loginPass",
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button { id: "loginSubmit", onclick: submit, "Login" }
            }
        }
    }
}

#[component]
fn RegisterModal(open_modal: Signal<Option<Modal>>) -> Element {
    let mut open_modal = open_modal;
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);

    // Stays open on failure so the visitor can correct the input.
    let submit = move |_| {
        let result = accounts().and_then(|a| a.register(&username.read(), &password.read()));
        match result {
            Ok(record) => {
                tracing::info!("registered {}", record.username);
                notify(&Notice::Registered);
                username.set(String::new());
                password.set(String::new());
                open_modal.set(None);
            }
            Err(e) => report(&e),
        }
    };

    rsx! {
        div {
            id: "registerModal",
            class: hidden_unless(open_modal() == Some(Modal::Register), "modal"),
            div { class: "modal-content",
                span {
                    class: "modal-close",
                    onclick: move |_| open_modal.set(None),
                    "×"
                }
                h2 { "Register" }
                input {
                    id: "regUser",
                    r#type: "text",
                    placeholder: "Username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                input {
                    id: "regPass",
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button { id: "regSubmit", onclick: submit, "Register" }
            }
        }
    }
}

#[component]
fn ProfileModal(open_modal: Signal<Option<Modal>>) -> Element {
    let mut open_modal = open_modal;
    let session_state = use_session_state();
    let label = session_state.read().current().map(profile_label);

    rsx! {
        div {
            id: "profileModal",
            class: hidden_unless(open_modal() == Some(Modal::Profile), "modal"),
            div { class: "modal-content",
                span {
                    class: "modal-close",
                    onclick: move |_| open_modal.set(None),
                    "×"
                }
                h2 { "Profile" }
                if let Some(label) = label {
                    p { id: "profileName", "{label}" }
                }
            }
        }
    }
}
