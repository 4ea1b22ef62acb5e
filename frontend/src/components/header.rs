use eventspark::paths;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::{logout, use_auth};
use crate::web::router::{Link, use_router};

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let is_authenticated = move || auth.state.with(|s| s.is_authenticated);
    let greeting = move || {
        auth.state.with(|s| {
            s.current_user
                .as_ref()
                .filter(|_| s.is_authenticated)
                .map(|u| format!("Hello, {}", u.name))
        })
    };

    let on_logout = move |_| {
        let api = api.clone();
        spawn_local(async move {
            logout(&auth, &api).await;
            router.navigate(paths::SIGN_IN);
        });
    };

    view! {
        <header class="navbar bg-base-100 shadow-md px-4">
            <div class="flex-1">
                <Link to=paths::HOME class="btn btn-ghost text-xl">
                    "✨ EventSpark ✨"
                </Link>
            </div>
            <nav class="flex-none flex items-center gap-2">
                {move || greeting().map(|text| view! {
                    <span class="hidden sm:inline text-sm text-base-content/70 mr-2">{text}</span>
                })}
                <Link to=paths::HOME class="btn btn-ghost btn-sm">"Home"</Link>
                <Link to=paths::MY_EVENTS class="btn btn-ghost btn-sm">"My Events"</Link>
                <Show
                    when=is_authenticated
                    fallback=|| view! {
                        <Link to=paths::SIGN_UP class="btn btn-ghost btn-sm">"Sign Up"</Link>
                        <Link to=paths::SIGN_IN class="btn btn-primary btn-sm">"Sign In"</Link>
                    }
                >
                    <button class="btn btn-outline btn-sm" on:click=on_logout.clone()>
                        "Sign Out"
                    </button>
                </Show>
            </nav>
        </header>
    }
}
