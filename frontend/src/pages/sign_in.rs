use eventspark::action::{ActionOutcome, sign_in_action};
use eventspark::paths;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::{self, use_auth};
use crate::components::toast::use_toasts;
use crate::web::route::QueryParams;
use crate::web::router::{Link, use_router};
use crate::web::{AuthChannel, LocalAuthFlag, submitted_fields};

#[component]
pub fn SignInPage(query: QueryParams) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let auth_ctx = use_auth();
    let toasts = use_toasts();
    let (is_submitting, set_is_submitting) = signal(false);

    // 被守卫拦下时带回的原地址
    let next = StoredValue::new(query.get("next").map(str::to_string));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let fields = submitted_fields(&ev, &["email", "password"]);

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            let next = next.get_value();
            let outcome =
                sign_in_action(&api, &fields, next.as_deref(), &LocalAuthFlag, &AuthChannel).await;
            match outcome {
                ActionOutcome::Redirect(to) => {
                    auth::confirm(&auth_ctx, &api).await;
                    router.navigate(&to);
                }
                ActionOutcome::Error(msg) => toasts.error(msg),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <section class="hero min-h-[70vh]">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <form class="card-body space-y-4" on:submit=on_submit>
                    <h2 class="text-3xl font-extrabold text-center">"Sign In to EventSpark"</h2>

                    <label class="form-control">
                        <span class="label-text mb-1">"Email"</span>
                        <input
                            name="email"
                            type="email"
                            required
                            placeholder="you@example.com"
                            class="input input-bordered"
                        />
                    </label>

                    <label class="form-control">
                        <span class="label-text mb-1">"Password"</span>
                        <input
                            name="password"
                            type="password"
                            required
                            placeholder="••••••••"
                            class="input input-bordered"
                        />
                    </label>

                    <button type="submit" class="btn btn-primary w-full" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() { "Signing In..." } else { "Sign In 🚀" }}
                    </button>

                    <p class="text-center text-sm">
                        "New to EventSpark? "
                        <Link to=paths::SIGN_UP class="link link-primary">"✨ Create Account"</Link>
                    </p>
                </form>
            </div>
        </section>
    }
}
