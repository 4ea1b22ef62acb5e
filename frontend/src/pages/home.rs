use eventspark::paths;
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::guide_cta::GuideCta;
use crate::components::toast::use_toasts;
use crate::web::router::{Link, use_router};

#[component]
fn Hero() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = move || auth.state.with(|s| s.is_authenticated);

    view! {
        <section class="hero min-h-[70vh] rounded-3xl bg-gradient-to-br from-indigo-950 via-purple-900 to-rose-900 text-white">
            <div class="hero-content text-center flex-col max-w-xl">
                <div class="badge badge-outline badge-lg text-white/90">
                    "🎟️ Events • 🎧 Music • 🎭 Culture • 👩‍💻 Tech"
                </div>
                <h1 class="text-4xl font-extrabold leading-tight">
                    "Discover Events That "
                    <span class="bg-gradient-to-r from-indigo-300 via-fuchsia-300 to-rose-300 bg-clip-text text-transparent">
                        "Spark Your Passion"
                    </span>
                </h1>
                <p class="text-white/90">
                    "From workshops to concerts, explore, create, and join memorable moments around you."
                </p>

                <GuideCta />

                <div class="flex items-center justify-center gap-3">
                    <Link to=paths::EVENTS class="btn btn-primary rounded-xl">
                        "Events Near me"
                    </Link>
                    <Show when=is_authenticated>
                        <Link to=paths::CREATE_EVENT class="btn btn-outline rounded-xl text-white">
                            "Create Event"
                        </Link>
                    </Show>
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    if use_router().take_flag("signedin") {
        use_toasts().success("Welcome back! You are signed in.");
    }

    view! { <Hero /> }
}
