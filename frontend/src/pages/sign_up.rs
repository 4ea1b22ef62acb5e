use eventspark::action::{ActionOutcome, sign_up_action};
use eventspark::paths;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::{self, use_auth};
use crate::components::toast::use_toasts;
use crate::web::router::{Link, use_router};
use crate::web::{AuthChannel, LocalAuthFlag, submitted_fields};

#[component]
pub fn SignUpPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let auth_ctx = use_auth();
    let toasts = use_toasts();
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let fields = submitted_fields(&ev, &["name", "email", "password"]);

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            match sign_up_action(&api, &fields, &LocalAuthFlag, &AuthChannel).await {
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
                    <h2 class="text-3xl font-extrabold text-center">"Create Your Account"</h2>

                    <label class="form-control">
                        <span class="label-text mb-1">"Name"</span>
                        <input name="name" type="text" required placeholder="John Doe" class="input input-bordered" />
                    </label>

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
                        {move || if is_submitting.get() { "Creating..." } else { "Sign Up ✨" }}
                    </button>

                    <p class="text-center text-sm">
                        "Already a member of EventSpark? "
                        <Link to=paths::SIGN_IN class="link link-primary">"✨ Sign in Now"</Link>
                    </p>
                </form>
            </div>
        </section>
    }
}
