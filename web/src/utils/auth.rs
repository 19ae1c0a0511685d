/// Reads the bearer token a signed-in provider left in localStorage.
///
/// Public visitors normally have none; the booking calls work without it.
/// On the server there is no localStorage, so this is always `None` there.
pub fn stored_auth_token(storage_key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::prelude::*;

        #[wasm_bindgen]
        extern "C" {
            #[wasm_bindgen(js_namespace = localStorage)]
            fn getItem(key: &str) -> Option<String>;
        }

        getItem(storage_key).filter(|token| !token.trim().is_empty())
    }

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = storage_key;
        None
    }
}
