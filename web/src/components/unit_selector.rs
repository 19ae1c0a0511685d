use leptos::prelude::*;
use shared_types::Unit;

use super::selector::{empty_message, empty_selector, option_button, SelectorOption};

pub fn unit_options(units: &[Unit], selected: Option<&str>) -> Vec<SelectorOption<Unit>> {
    units
        .iter()
        .map(|unit| SelectorOption {
            value: unit.clone(),
            title: unit.name.clone(),
            detail: unit.address.clone(),
            selected: selected == Some(unit.id.as_str()),
        })
        .collect()
}

/// Only rendered for businesses with more than one unit; it narrows the time step.
#[component]
pub fn UnitSelector(
    units: Vec<Unit>,
    #[prop(into)] selected: Signal<Option<String>>,
    on_select: impl Fn(Unit) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    if let Some(message) = empty_message(&units) {
        return empty_selector(message).into_any();
    }

    view! {
        <div class="selector-grid unit-selector">
            {move || {
                let selected = selected.get();
                unit_options(&units, selected.as_deref())
                    .into_iter()
                    .map(|option| option_button(option, on_select))
                    .collect::<Vec<_>>()
            }}
        </div>
    }
    .into_any()
}
