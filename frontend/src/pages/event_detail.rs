use eventspark::detail::{DeleteFlow, EventDetailView, delete_as_organizer};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::toast::use_toasts;
use crate::web::router::use_router;

/// 组织者专用的删除区：先确认再请求，失败时停留并显示原因
#[component]
fn DeleteControls(detail: StoredValue<EventDetailView>) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let toasts = use_toasts();
    let flow = RwSignal::new(DeleteFlow::default());

    let on_confirm = move |_| {
        if flow.try_update(DeleteFlow::confirm) != Some(true) {
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            let view = detail.get_value();
            let result = delete_as_organizer(&api, &view).await;
            match flow.try_update(|f| f.finish(result)).flatten() {
                Some(path) => {
                    toasts.success("Event deleted.");
                    router.navigate(&path);
                }
                None => {
                    if let Some(msg) = flow.with_untracked(|f| f.error().map(str::to_string)) {
                        toasts.error(msg);
                    }
                }
            }
        });
    };

    let confirming = move || flow.with(|f| matches!(f, DeleteFlow::Confirming | DeleteFlow::Deleting));
    let busy = move || flow.with(DeleteFlow::is_busy);

    view! {
        <div class="mt-8 flex flex-col items-center gap-3">
            <Show
                when=confirming
                fallback=move || view! {
                    <button class="btn btn-error btn-outline" on:click=move |_| flow.update(DeleteFlow::request)>
                        "🗑️ Delete Event"
                    </button>
                }
            >
                <div role="alert" class="alert alert-warning">
                    <span>"Delete this event? This cannot be undone."</span>
                    <div class="flex gap-2">
                        <button class="btn btn-sm" disabled=busy on:click=move |_| flow.update(DeleteFlow::cancel)>
                            "Cancel"
                        </button>
                        <button class="btn btn-sm btn-error" disabled=busy on:click=on_confirm.clone()>
                            {move || if busy() {
                                view! { <span class="loading loading-spinner loading-xs"></span> "Deleting…" }.into_any()
                            } else {
                                "Yes, delete".into_any()
                            }}
                        </button>
                    </div>
                </div>
            </Show>
            {move || flow.with(|f| f.error().map(str::to_string)).map(|msg| view! {
                <p class="text-sm text-error">{msg}</p>
            })}
        </div>
    }
}

#[component]
pub fn EventDetailPage(detail: EventDetailView) -> impl IntoView {
    let date = detail.display_date();
    let map = detail.map();
    let can_delete = detail.can_delete();
    let title = detail.event.title.clone();
    let location = detail.event.location.clone();
    let description = detail.description().to_string();
    let detail = StoredValue::new(detail);

    view! {
        <article class="card bg-base-100 shadow-xl max-w-3xl mx-auto">
            <div class="card-body">
                <h1 class="text-4xl font-extrabold mb-6 text-transparent bg-clip-text bg-gradient-to-r from-fuchsia-500 to-purple-400">
                    {title}
                </h1>
                {location.map(|loc| view! { <p class="mb-4 text-lg">{format!("📍 {loc}")}</p> })}
                {date.map(|d| view! { <p class="mb-6 text-lg">{format!("🗓️ {d}")}</p> })}
                <p class="leading-relaxed">{description}</p>

                {map.map(|point| view! {
                    <div class="mt-10 rounded-2xl bg-gradient-to-br from-fuchsia-300 to-purple-700 p-4 shadow-2xl">
                        <h3 class="text-white text-lg font-semibold mb-3 text-center">"📍 Event Location Map"</h3>
                        <iframe
                            title="Event Map"
                            width="100%"
                            height="300"
                            loading="lazy"
                            allowfullscreen=true
                            src=point.embed_url()
                        ></iframe>
                        <div class="text-center mt-4">
                            <a class="link text-white" href=point.link_url() target="_blank" rel="noreferrer">
                                "Open in Google Maps ↗"
                            </a>
                        </div>
                    </div>
                })}

                <Show when=move || can_delete>
                    <DeleteControls detail=detail />
                </Show>
            </div>
        </article>
    }
}
