use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <div class="not-found-container">
            <div class="not-found-card">
                <div class="not-found-code">"404"</div>
                <h1>"Page Not Found"</h1>
                <p>"The page you're looking for doesn't exist. Booking links look like /book/your-business."</p>
                <button class="btn-primary" on:click=move |_| navigate("/", Default::default())>
                    "Go Home"
                </button>
            </div>
        </div>
    }
}
