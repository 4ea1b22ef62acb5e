//! 首页的 AI 导览入口
//!
//! 先尝试定位并直接取回导览，再带着结果跳转；定位或请求失败时改为让用户输入城市。

use eventspark::guide::{MANUAL_CITY_PROMPT, fetch_by_coords, manual_city_path};
use eventspark::log_warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::web::current_position;
use crate::web::router::use_router;

#[component]
pub fn GuideCta() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (loading, set_loading) = signal(false);
    let (show_city_prompt, set_show_city_prompt) = signal(false);
    let (manual_city, set_manual_city) = signal(String::new());

    let request_city_guide = move |_| {
        set_show_city_prompt.set(false);
        set_loading.set(true);

        let api = api.clone();
        spawn_local(async move {
            let options = api.config().guide_geolocation;
            let guide = match current_position(&options).await {
                Ok(coords) => fetch_by_coords(&api, coords)
                    .await
                    .map_err(|e| log_warn!("[guide] lookup by coordinates failed: {}", e))
                    .ok(),
                Err(e) => {
                    log_warn!("[guide] geolocation failed: {}", e);
                    None
                }
            };

            set_loading.set(false);
            match guide {
                Some(guide) => router.navigate_with_guide(guide),
                None => set_show_city_prompt.set(true),
            }
        });
    };

    let on_manual_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(path) = manual_city_path(&manual_city.get()) {
            router.navigate(&path);
        }
    };

    view! {
        <div class="flex flex-col items-center gap-3 w-full">
            <button
                class="btn btn-lg rounded-2xl border-0 text-white font-bold bg-gradient-to-r from-purple-900 via-pink-500 to-indigo-900 shadow-lg"
                on:click=request_city_guide
                disabled=move || loading.get()
            >
                "✨ Explore with AI Guide ✨"
            </button>

            <Show when=move || show_city_prompt.get()>
                <div class="mt-4 w-full max-w-md rounded-2xl border border-white/20 bg-white/10 p-4 text-left">
                    <p class="text-sm md:text-base mb-3">{MANUAL_CITY_PROMPT}</p>
                    <form class="flex items-center gap-2" on:submit=on_manual_submit>
                        <input
                            type="text"
                            placeholder="e.g., Delhi"
                            class="input input-bordered input-sm w-full text-base-content"
                            prop:value=manual_city
                            on:input=move |ev| set_manual_city.set(event_target_value(&ev))
                        />
                        <button type="submit" class="btn btn-secondary btn-sm">"Explore"</button>
                    </form>
                </div>
            </Show>

            <Show when=move || loading.get()>
                <p class="text-sm opacity-90">"Summoning your AI guide…"</p>
            </Show>
        </div>
    }
}
