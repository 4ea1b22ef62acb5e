use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <footer class="footer footer-center p-4 bg-base-300 text-base-content">
            <p>{format!("© {year} EventSpark: Light up your city life ✨")}</p>
        </footer>
    }
}
