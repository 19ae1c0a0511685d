/// Full-page navigation, used when the session is gone and the SPA state is useless.
pub fn redirect_to(path: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                leptos::logging::error!("Failed to redirect to {}: {:?}", path, e);
            }
        }
    }

    #[cfg(not(feature = "hydrate"))]
    {
        tracing::debug!(path, "redirect requested outside the browser");
    }
}

/// `scheme://host[:port]` of the current page, when running in a browser.
pub fn page_origin() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().and_then(|window| window.location().origin().ok())
    }

    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
