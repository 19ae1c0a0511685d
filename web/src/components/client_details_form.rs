use leptos::prelude::*;
use thaw::*;

use crate::booking::{ContactField, ValidationErrors};

fn field_error(errors: Signal<ValidationErrors>, field: ContactField) -> impl IntoView {
    move || {
        errors
            .get()
            .get(field)
            .map(|message| view! { <p class="field-error">{message}</p> })
    }
}

/// Last step of the wizard. Submission is disabled while a request is in flight.
#[component]
pub fn ClientDetailsForm(
    name: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    #[prop(into)] errors: Signal<ValidationErrors>,
    #[prop(into)] submitting: Signal<bool>,
    on_submit: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let is_button_disabled = Memo::new(move |_| submitting.get());

    view! {
        <form class="client-details-form" on:submit=move |ev| {
            ev.prevent_default();
            if !submitting.get_untracked() {
                on_submit();
            }
        }>
            <div class="form-group">
                <label for="client-name">"Full Name *"</label>
                <Input id="client-name" placeholder="Your full name" value=name />
                {field_error(errors, ContactField::Name)}
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="client-email">"Email Address *"</label>
                    <Input
                        id="client-email"
                        input_type=InputType::Email
                        placeholder="your@email.com"
                        value=email
                    />
                    {field_error(errors, ContactField::Email)}
                </div>
                <div class="form-group">
                    <label for="client-phone">"Phone Number *"</label>
                    <Input
                        id="client-phone"
                        input_type=InputType::Tel
                        placeholder="(11) 99999-9999"
                        value=phone
                    />
                    {field_error(errors, ContactField::Phone)}
                </div>
            </div>

            <div class="form-actions">
                <Button
                    button_type=ButtonType::Submit
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::from(is_button_disabled)
                    loading=submitting
                >
                    {move || if submitting.get() { "Booking..." } else { "Confirm Booking" }}
                </Button>
            </div>
        </form>
    }
}
