use dioxus::prelude::*;

use super::account_menu::AccountMenu;
use super::module_list::ModuleList;
use super::session_state::SessionState;

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(SessionState::load()));

    rsx! {
        div { class: "corkboard-app",
            header { class: "app-header",
                h1 { "Corkboard" }
                AccountMenu {}
            }
            main {
                ModuleList {}
            }
        }
    }
}
