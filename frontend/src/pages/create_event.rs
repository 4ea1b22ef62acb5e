use eventspark::action::{ActionOutcome, create_event_action};
use eventspark_shared::chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::location_input::LocationInput;
use crate::components::toast::use_toasts;
use crate::web::router::use_router;
use crate::web::submitted_fields;

const FIELDS: [&str; 4] = ["title", "description", "location", "date"];

#[component]
pub fn CreateEventPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let toasts = use_toasts();
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let fields = submitted_fields(&ev, &FIELDS);

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            // datetime-local 的值按浏览器本地时区解释
            match create_event_action(&api, &fields, &Local).await {
                ActionOutcome::Redirect(to) => router.navigate(&to),
                ActionOutcome::Error(msg) => toasts.error(msg),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <section class="card bg-base-100 shadow-2xl max-w-2xl mx-auto">
            <form class="card-body space-y-4" on:submit=on_submit>
                <h2 class="text-3xl font-extrabold text-center">"✨ Create a New Event ✨"</h2>

                <label class="form-control">
                    <span class="label-text mb-1">"Title"</span>
                    <input
                        type="text"
                        name="title"
                        required
                        placeholder="Enter event title"
                        class="input input-bordered"
                    />
                </label>

                <label class="form-control">
                    <span class="label-text mb-1">"Description"</span>
                    <textarea
                        name="description"
                        required
                        rows=4
                        placeholder="Describe your event..."
                        class="textarea textarea-bordered"
                    ></textarea>
                </label>

                <label class="form-control">
                    <span class="label-text mb-1">"Location"</span>
                    <LocationInput required=true />
                </label>

                <label class="form-control">
                    <span class="label-text mb-1">"Date & Time"</span>
                    <input type="datetime-local" name="date" required class="input input-bordered" />
                </label>

                <button class="btn btn-primary w-full" disabled=move || is_submitting.get()>
                    {move || if is_submitting.get() {
                        view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                    } else {
                        "Create Event 🚀".into_any()
                    }}
                </button>
            </form>
        </section>
    }
}
