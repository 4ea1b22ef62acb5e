use eventspark::listing::EventRow;
use eventspark::paths;
use eventspark_shared::date::display_date;
use leptos::prelude::*;

use crate::web::router::Link;

#[component]
pub fn EventCard(row: EventRow) -> impl IntoView {
    let date = display_date(row.date.as_deref());
    let organizer = row.organizer_label().map(|name| format!("Organized by {name}"));

    view! {
        <Link to=paths::event_detail(&row.id) class="block">
            <div class="card bg-base-100 shadow-md hover:shadow-xl transition h-full">
                <div class="card-body">
                    <h3 class="card-title">{row.title}</h3>
                    {row.location.map(|loc| view! { <p class="text-sm">{format!("📍 {loc}")}</p> })}
                    {date.map(|d| view! { <p class="text-sm text-base-content/70">{format!("🗓️ {d}")}</p> })}
                    {organizer.map(|o| view! { <p class="text-xs text-base-content/60">{o}</p> })}
                </div>
            </div>
        </Link>
    }
}
