//! 附近活动列表
//!
//! 定位 -> 查询 -> 展示；当前用户变化时重新走一遍，以便重新标记 "我组织的" 活动。

use eventspark::latest::LatestWins;
use eventspark::listing::{
    EventRow, ListingStatus, NearbyListing, empty_list_message, filter_and_sort, load_nearby,
};
use eventspark::paths;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::event_card::EventCard;
use crate::components::toast::use_toasts;
use crate::web::current_position;
use crate::web::router::{Link, use_router};

#[component]
pub fn EventsPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let router = use_router();

    let toasts = use_toasts();
    if router.take_flag("created") {
        toasts.success("Event created!");
    }
    if router.take_flag("signedup") {
        toasts.success("Welcome to EventSpark! Your account is ready.");
    }

    let status = RwSignal::new(ListingStatus::Detecting);
    let rows = RwSignal::new(Vec::<EventRow>::new());
    let (search, set_search) = signal(String::new());

    let lookups = LatestWins::new();
    on_cleanup({
        let lookups = lookups.clone();
        move || lookups.invalidate()
    });

    let viewer_id = Memo::new(move |_| auth.user_id());

    // 观看者变化时重新定位并查询
    Effect::new(move |_| {
        let viewer = viewer_id.get();
        let ticket = lookups.issue();
        let api = api.clone();

        status.set(ListingStatus::Detecting);
        spawn_local(async move {
            let options = api.config().listing_geolocation;
            let coords = match current_position(&options).await {
                Ok(coords) => coords,
                Err(e) => {
                    if ticket.is_current() {
                        status.set(ListingStatus::from_geolocation_error(e));
                    }
                    return;
                }
            };
            if !ticket.is_current() {
                return;
            }

            status.set(ListingStatus::Fetching);
            let NearbyListing { status: next, rows: found } =
                load_nearby(&api, coords, viewer.as_deref()).await;
            if ticket.is_current() {
                rows.set(found);
                status.set(next);
            }
        });
    });

    let shown = Memo::new(move |_| rows.with(|all| filter_and_sort(all, &search.get())));
    let empty_message = move || empty_list_message(rows.with(Vec::len), shown.with(Vec::len));
    let is_authenticated = move || auth.state.with(|s| s.is_authenticated);

    view! {
        <section class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex flex-col items-center gap-3 sm:flex-row sm:justify-between mb-2">
                    <h2 class="text-2xl sm:text-3xl font-extrabold">"✨ Events Near Me ✨"</h2>
                    <Show when=is_authenticated>
                        <Link to=paths::CREATE_EVENT class="btn btn-primary btn-sm">
                            "➕ Create New Event"
                        </Link>
                    </Show>
                </div>

                {move || status.with(ListingStatus::message).map(|text| view! {
                    <div class="mb-3 text-sm text-base-content/70">{text}</div>
                })}

                <input
                    type="text"
                    placeholder="🔍 Search events by title…"
                    class="input input-bordered rounded-full w-full mb-5"
                    prop:value=search
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />

                {move || match empty_message() {
                    Some(text) => view! { <p class="text-center text-base-content/80">{text}</p> }
                        .into_any(),
                    None => view! {
                        <ul class="space-y-6">
                            <For
                                each=move || shown.get()
                                key=|row| row.id.clone()
                                children=|row| view! { <li><EventCard row=row /></li> }
                            />
                        </ul>
                    }
                    .into_any(),
                }}
            </div>
        </section>
    }
}
