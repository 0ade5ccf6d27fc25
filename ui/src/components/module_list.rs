use dioxus::prelude::*;

use corkboard_common::manifest::{manifest_url, Manifest, ModuleBody, ModuleDescriptor};

use super::shoutbox_view::ShoutboxWidget;

// ─── WASM implementation ─────────────────────────────────────────────────────

#[cfg(target_family = "wasm")]
mod wasm_impl {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    /// GET `url` and return the body text. One attempt, no timeout.
    pub async fn fetch_text(url: &str) -> Result<String, String> {
        let opts = web_sys::RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(web_sys::RequestMode::SameOrigin);

        let request = web_sys::Request::new_with_str_and_init(url, &opts)
            .map_err(|e| format!("Failed to create request: {:?}", e))?;

        let window = web_sys::window().ok_or("No window")?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| format!("Fetch failed: {:?}", e))?;

        let resp: web_sys::Response = resp_value
            .dyn_into()
            .map_err(|_| "Response is not a Response object".to_string())?;

        let status = resp.status();
        if status >= 400 {
            return Err(format!("HTTP {} for {}", status, url));
        }

        let text = JsFuture::from(
            resp.text().map_err(|e| format!("Failed to get text: {:?}", e))?,
        )
        .await
        .map_err(|e| format!("Failed to read body: {:?}", e))?;

        text.as_string()
            .ok_or_else(|| "Response body is not a string".to_string())
    }
}

#[cfg(target_family = "wasm")]
async fn fetch_manifest_text(url: &str) -> Result<String, String> {
    wasm_impl::fetch_text(url).await
}

#[cfg(not(target_family = "wasm"))]
async fn fetch_manifest_text(url: &str) -> Result<String, String> {
    Err(format!("fetching {url} needs a browser"))
}

async fn load_manifest() -> Result<Manifest, String> {
    let url = manifest_url();
    let text = fetch_manifest_text(url).await?;
    let manifest = Manifest::from_json(&text).map_err(|e| e.to_string())?;
    for id in manifest.duplicate_ids() {
        tracing::warn!("module id `{id}` is used more than once");
    }
    tracing::info!("loaded {} modules from {url}", manifest.modules.len());
    Ok(manifest)
}

/// All module cards, in manifest order. Stays empty if the manifest can't
/// be fetched or parsed.
#[component]
pub fn ModuleList() -> Element {
    let manifest = use_resource(|| async move {
        match load_manifest().await {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::error!("failed to load modules: {e}");
                None
            }
        }
    });

    let modules = manifest
        .cloned()
        .flatten()
        .map(|m| m.modules)
        .unwrap_or_default();

    rsx! {
        div { id: "modules", class: "modules",
            for (i, module) in modules.into_iter().enumerate() {
                ModuleCard { key: "{i}", module }
            }
        }
    }
}

#[component]
fn ModuleCard(module: ModuleDescriptor) -> Element {
    let id = module.id.clone();

    // Manifest content is trusted markup; everything else renders as text.
    let content = match module.body() {
        ModuleBody::Shoutbox => rsx! {
            div { class: "module-content", id: "{id}",
                ShoutboxWidget { module_id: id.clone() }
            }
        },
        ModuleBody::Markup(markup) => rsx! {
            div {
                class: "module-content",
                id: "{id}",
                dangerous_inner_html: "{markup}",
            }
        },
    };

    rsx! {
        div { class: "module-card",
            div { class: "module-title", "{module.title}" }
            {content}
        }
    }
}
