use eventspark::paths;
use leptos::prelude::*;

use crate::web::router::Link;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <Link to=paths::HOME class="btn btn-primary mt-6">"Back Home"</Link>
            </div>
        </div>
    }
}

/// 路由加载器失败时的错误页
#[component]
pub fn RouteErrorPage(message: String, status: Option<u16>) -> impl IntoView {
    let heading = match status {
        Some(code) => format!("Error {code}"),
        None => "Something went wrong".to_string(),
    };

    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div role="alert" class="card bg-base-100 shadow-xl max-w-lg">
                <div class="card-body text-center">
                    <h1 class="text-3xl font-bold text-error">{heading}</h1>
                    <p class="mt-2">{message}</p>
                    <Link to=paths::HOME class="btn btn-primary mt-6">"Back Home"</Link>
                </div>
            </div>
        </div>
    }
}
