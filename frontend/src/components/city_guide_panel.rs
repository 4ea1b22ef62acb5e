use eventspark_shared::{CityGuide, GuideCategory, GuideItem};
use leptos::prelude::*;

fn section_backdrop(category: GuideCategory) -> &'static str {
    match category {
        GuideCategory::HistoryMonuments => "bg-gradient-to-br from-amber-900 to-stone-900",
        GuideCategory::ClubsBars => "bg-gradient-to-br from-fuchsia-900 to-indigo-950",
        GuideCategory::ParksNature => "bg-gradient-to-br from-emerald-900 to-teal-950",
        GuideCategory::Shopping => "bg-gradient-to-br from-rose-900 to-purple-950",
    }
}

#[component]
fn GuideSection(category: GuideCategory, items: Vec<GuideItem>) -> impl IntoView {
    view! {
        <div class=format!(
            "card rounded-2xl border border-white/20 shadow-lg text-white {}",
            section_backdrop(category),
        )>
            <div class="card-body p-5">
                <h3 class="text-xl font-extrabold mb-3 tracking-wide">{category.title()}</h3>
                <ul class="space-y-3">
                    {items
                        .into_iter()
                        .map(|item| view! {
                            <li class="rounded-lg border border-white/15 bg-white/10 p-3">
                                <p class="font-semibold">{item.name}</p>
                                {item.neighborhood.map(|n| view! {
                                    <p class="text-sm text-white/80">{n}</p>
                                })}
                                <p class="text-sm text-white/90 font-light">{item.why}</p>
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}

/// 四个固定分类的导览卡片
#[component]
pub fn CityGuidePanel(guide: CityGuide) -> impl IntoView {
    view! {
        <div class="grid md:grid-cols-2 xl:grid-cols-4 gap-6">
            {guide
                .sections
                .iter()
                .map(|(category, items)| view! {
                    <GuideSection category=category items=items.to_vec() />
                })
                .collect_view()}
        </div>
    }
}
