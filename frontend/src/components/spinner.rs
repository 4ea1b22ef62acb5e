use leptos::prelude::*;

/// 加载器运行期间覆盖内容区的转圈
#[component]
pub fn LoaderOverlay() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[40vh]" aria-busy="true">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 行内的小号转圈，可附带说明文字
#[component]
pub fn Spinner(#[prop(optional, into)] label: String) -> impl IntoView {
    view! {
        <div class="flex items-center gap-3 text-base-content/70">
            <span class="loading loading-spinner loading-md text-primary"></span>
            <span>{label}</span>
        </div>
    }
}
