//! Full-page placeholder shown until the dashboard settings arrive.

use leptos::prelude::*;

#[component]
pub fn Loading(
    /// Text shown next to the spinner.
    #[prop(default = "Loading\u{2026}".into(), into)]
    message: String,
) -> impl IntoView {
    view! {
        <div class="loading" aria-busy="true">
            <span class="spinner"></span>
            <span>{message}</span>
        </div>
    }
}
