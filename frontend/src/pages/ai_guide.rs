use eventspark::guide::{GuidePage, GuideView, LOADING_MESSAGE, NO_CITY_MESSAGE, fetch_by_city};
use eventspark::paths;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::city_guide_panel::CityGuidePanel;
use crate::web::route::QueryParams;
use crate::web::router::use_router;

#[component]
fn BackHome(message: String) -> impl IntoView {
    let router = use_router();

    view! {
        <div class="card bg-base-100 shadow-xl p-8 mt-4">
            <p class="mb-4">{message}</p>
            <button class="btn btn-secondary w-fit" on:click=move |_| router.navigate(paths::HOME)>
                "Back Home"
            </button>
        </div>
    }
}

#[component]
pub fn AiGuidePage(query: QueryParams) -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let city = query.get("city");
    let page = RwSignal::new(GuidePage::new(router.take_guide(), city));

    // 没有交接的导览时按城市参数取一次
    if let Some((city, ticket)) = page.try_update(|p| p.begin_fetch(city)).flatten() {
        spawn_local(async move {
            let result = fetch_by_city(&api, &city).await;
            page.update(|p| {
                p.finish(&ticket, result);
            });
        });
    }

    view! {
        <section class="w-full">
            {move || match page.with(GuidePage::view) {
                GuideView::Loading => view! {
                    <div class="card bg-base-100 shadow-xl p-8 mt-4">
                        <p class="opacity-95">{LOADING_MESSAGE}</p>
                    </div>
                }
                .into_any(),
                GuideView::Failed(message) => view! { <BackHome message=message /> }.into_any(),
                GuideView::NoCity => view! { <BackHome message=NO_CITY_MESSAGE.to_string() /> }.into_any(),
                GuideView::Ready(guide) => {
                    let welcome = format!("Welcome to {}", guide.city);
                    let summary = guide.summary.clone();
                    view! {
                        <header class="card bg-base-100 shadow-xl p-6 md:p-8 mt-4">
                            <h1 class="text-2xl md:text-3xl font-extrabold mb-2">{welcome}</h1>
                            <p class="opacity-95 max-w-3xl">{summary}</p>
                        </header>
                        <div class="mt-6">
                            <CityGuidePanel guide=guide />
                        </div>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}
