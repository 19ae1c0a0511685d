use leptos::prelude::*;
use shared_types::Service;

use super::selector::{empty_message, empty_selector, option_button, SelectorOption};
use crate::utils::format::{format_duration, format_price};

pub fn service_options(services: &[Service], selected: Option<i64>) -> Vec<SelectorOption<Service>> {
    services
        .iter()
        .map(|service| SelectorOption {
            value: service.clone(),
            title: service.name.clone(),
            detail: Some(format!(
                "{} · {}",
                format_duration(service.duration),
                format_price(service.price)
            )),
            selected: selected == Some(service.id),
        })
        .collect()
}

#[component]
pub fn ServiceSelector(
    services: Vec<Service>,
    #[prop(into)] selected: Signal<Option<i64>>,
    on_select: impl Fn(Service) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    if let Some(message) = empty_message(&services) {
        return empty_selector(message).into_any();
    }

    view! {
        <div class="selector-grid service-selector">
            {move || {
                service_options(&services, selected.get())
                    .into_iter()
                    .map(|option| option_button(option, on_select))
                    .collect::<Vec<_>>()
            }}
        </div>
    }
    .into_any()
}
