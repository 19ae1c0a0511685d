use leptos::prelude::*;

use crate::booking::BookingConfirmation;
use crate::components::BookingSummaryCard;

/// Shown once the appointment is accepted. Nothing on it leads back into the wizard.
#[component]
pub fn BookingConfirmationView(confirmation: BookingConfirmation) -> impl IntoView {
    let BookingConfirmation {
        summary,
        client_name,
        client_email,
        appointment,
    } = confirmation;

    let status = appointment
        .status
        .filter(|status| !status.trim().is_empty())
        .map(|status| format!("Status: {}", status));

    view! {
        <div class="booking-confirmation-container">
            <div class="booking-confirmation-content">
                <div class="booking-confirmation-header">
                    <div class="booking-confirmation-success-icon">"✓"</div>
                    <h1 class="booking-confirmation-title">"Appointment booked!"</h1>
                    <p class="booking-confirmation-subtitle">
                        {format!("Thank you, {}. Your appointment has been scheduled.", client_name)}
                    </p>
                </div>

                <div class="booking-confirmation-details">
                    <div class="booking-confirmation-reference">
                        <h2 class="booking-confirmation-reference-title">"Booking reference"</h2>
                        <p class="booking-confirmation-reference-number">{format!("#{}", appointment.id)}</p>
                        {status.map(|status| view! {
                            <p class="booking-confirmation-reference-note">{status}</p>
                        })}
                    </div>

                    <BookingSummaryCard summary=summary />

                    <p class="booking-confirmation-contact">
                        {format!("Any updates will be sent to {}.", client_email)}
                    </p>
                </div>
            </div>
        </div>
    }
}
