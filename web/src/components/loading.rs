use leptos::prelude::*;
use thaw::{Spinner, SpinnerSize};

#[component]
pub fn LoadingView(
    #[prop(optional, into)] message: Option<String>,
    #[prop(optional)] compact: bool,
) -> impl IntoView {
    let size = if compact {
        SpinnerSize::Small
    } else {
        SpinnerSize::Large
    };

    view! {
        <div class=if compact { "loading-container loading-compact" } else { "loading-container" }>
            <Spinner size=size />
            <p class="loading-message">
                {message.unwrap_or_else(|| "Loading, please wait...".to_string())}
            </p>
        </div>
    }
}
