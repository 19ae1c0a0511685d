use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

/// Path of the public booking page for `username`, or `None` when there is nothing to open.
pub fn booking_path(username: &str) -> Option<String> {
    let username = username.trim().trim_start_matches('@');
    if username.is_empty() {
        return None;
    }
    Some(format!("/book/{}", urlencoding::encode(username)))
}

#[component]
pub fn HomePage() -> impl IntoView {
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let can_open = Memo::new(move |_| booking_path(&username.get()).is_some());

    let open_booking = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(path) = booking_path(&username.get_untracked()) {
            navigate(&path, Default::default());
        }
    };

    view! {
        <div class="homepage-container">
            <div class="homepage-hero">
                <h1>"Cloktrix"</h1>
                <p>"Book your next appointment online"</p>
            </div>

            <form class="homepage-lookup" on:submit=open_booking>
                <label for="business-username">"Business username"</label>
                <Input id="business-username" value=username placeholder="e.g. ana-studio" />
                <button type="submit" class="btn-primary" disabled=move || !can_open.get()>
                    "Open booking page"
                </button>
            </form>
        </div>
    }
}
