use leptos::prelude::*;
use shared_types::Professional;

use super::selector::{empty_message, empty_selector, option_button, SelectorOption};

pub fn professional_options(
    professionals: &[Professional],
    selected: Option<&str>,
) -> Vec<SelectorOption<Professional>> {
    professionals
        .iter()
        .map(|professional| SelectorOption {
            value: professional.clone(),
            title: professional.name.clone(),
            detail: professional.specialty.clone(),
            selected: selected == Some(professional.id.as_str()),
        })
        .collect()
}

#[component]
pub fn ProfessionalSelector(
    professionals: Vec<Professional>,
    #[prop(into)] selected: Signal<Option<String>>,
    on_select: impl Fn(Professional) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    if let Some(message) = empty_message(&professionals) {
        return empty_selector(message).into_any();
    }

    view! {
        <div class="selector-grid professional-selector">
            {move || {
                let selected = selected.get();
                professional_options(&professionals, selected.as_deref())
                    .into_iter()
                    .map(|option| option_button(option, on_select))
                    .collect::<Vec<_>>()
            }}
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::selector::NO_OPTIONS_MESSAGE;

    fn professional(id: &str, name: &str) -> Professional {
        Professional {
            id: id.into(),
            name: name.into(),
            avatar_url: None,
            specialty: Some("Barbeiro".into()),
        }
    }

    #[test]
    fn every_professional_appears_once_with_selection() {
        let list = vec![professional("p2", "Bruno"), professional("p1", "Ana")];
        let options = professional_options(&list, Some("p1"));

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value.id, "p2");
        assert!(!options[0].selected);
        assert!(options[1].selected);
        assert_eq!(options[1].detail.as_deref(), Some("Barbeiro"));
    }

    #[test]
    fn empty_list_shows_the_no_options_message() {
        assert!(professional_options(&[], None).is_empty());
        assert_eq!(empty_message::<Professional>(&[]), Some(NO_OPTIONS_MESSAGE));
    }
}
