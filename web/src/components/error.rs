use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

/// Full-width error block. `title` is shown above the message when given.
#[component]
pub fn ErrorView(
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] message: Option<String>,
) -> impl IntoView {
    view! {
        <div class="error-container">
            {title.map(|title| view! { <h2 class="error-title">{title}</h2> })}
            <MessageBar intent=MessageBarIntent::Error>
                {message.unwrap_or_else(|| "An error occurred. Please try again.".to_string())}
            </MessageBar>
        </div>
    }
}
