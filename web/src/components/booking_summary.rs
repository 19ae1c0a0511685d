use leptos::prelude::*;

use crate::booking::BookingSummary;
use crate::utils::format::{format_booking_date, format_duration, format_price};

#[component]
pub fn BookingSummaryCard(summary: BookingSummary) -> impl IntoView {
    let BookingSummary {
        business_name,
        service,
        professional_name,
        unit_name,
        date,
        time,
    } = summary;

    view! {
        <dl class="booking-summary">
            <div class="booking-summary-row">
                <dt>"Where"</dt>
                <dd>
                    {business_name}
                    {unit_name.map(|unit| view! { <span class="booking-summary-unit">{format!(" · {}", unit)}</span> })}
                </dd>
            </div>
            <div class="booking-summary-row">
                <dt>"Service"</dt>
                <dd>
                    {format!(
                        "{} ({}, {})",
                        service.name,
                        format_duration(service.duration),
                        format_price(service.price),
                    )}
                </dd>
            </div>
            <div class="booking-summary-row">
                <dt>"With"</dt>
                <dd>{professional_name}</dd>
            </div>
            <div class="booking-summary-row">
                <dt>"When"</dt>
                <dd>{format!("{} at {}", format_booking_date(date), time)}</dd>
            </div>
        </dl>
    }
}
