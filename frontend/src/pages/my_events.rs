use eventspark::listing::EventRow;
use eventspark::paths;
use eventspark_shared::Event;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::event_card::EventCard;
use crate::web::router::Link;

/// 我组织的活动；数据由路由加载器预取，未登录时加载器已跳转到登录页
#[component]
pub fn MyEventsPage(events: Vec<Event>) -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = move || auth.state.with(|s| s.is_authenticated);
    let rows: Vec<EventRow> = events.iter().map(EventRow::mine_from).collect();
    let is_empty = rows.is_empty();

    view! {
        <section class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="text-2xl sm:text-3xl font-extrabold mb-6 text-center">"✨ My Events ✨"</h2>

                <Show when=move || is_empty>
                    <p class="text-center text-base-content/80">
                        "Seems like you haven't created any events yet. Create an Event & Make it Happen."
                    </p>
                </Show>

                <Show when=is_authenticated>
                    <div class="flex justify-center my-6">
                        <Link to=paths::CREATE_EVENT class="btn btn-outline rounded-xl">"Create Event"</Link>
                    </div>
                </Show>

                <ul class="space-y-6">
                    {rows
                        .into_iter()
                        .map(|row| view! { <li><EventCard row=row /></li> })
                        .collect_view()}
                </ul>
            </div>
        </section>
    }
}
