use leptos::prelude::*;
use thaw::*;

/// One entry in a selector grid, carrying the entity it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorOption<T> {
    pub value: T,
    pub title: String,
    pub detail: Option<String>,
    pub selected: bool,
}

pub const NO_OPTIONS_MESSAGE: &str = "No options available";

/// Text shown in place of the grid when there is nothing to choose from.
pub fn empty_message<T>(candidates: &[T]) -> Option<&'static str> {
    candidates.is_empty().then_some(NO_OPTIONS_MESSAGE)
}

pub fn empty_selector(message: &'static str) -> impl IntoView {
    view! {
        <div class="selector-empty">
            <p>{message}</p>
        </div>
    }
}

pub fn option_button<T>(
    option: SelectorOption<T>,
    on_select: impl Fn(T) + 'static + Copy + Send + Sync,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let SelectorOption {
        value,
        title,
        detail,
        selected,
    } = option;

    view! {
        <Button
            class=if selected { "selector-option selected" } else { "selector-option" }
            appearance=if selected {
                ButtonAppearance::Primary
            } else {
                ButtonAppearance::Secondary
            }
            on_click=move |_| on_select(value.clone())
        >
            <div class="selector-option-content">
                <span class="selector-option-title">{title}</span>
                {detail.map(|detail| view! { <span class="selector-option-detail">{detail}</span> })}
            </div>
        </Button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidate_list_gets_a_message() {
        assert_eq!(empty_message::<String>(&[]), Some("No options available"));
        assert_eq!(empty_message(&["Corte".to_string()]), None);
    }
}
