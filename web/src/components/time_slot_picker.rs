use leptos::prelude::*;
use thaw::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOption {
    pub value: String,
    pub selected: bool,
}

/// What the slot section shows. Slot strings come pre-formatted from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotListState {
    /// Nothing to fetch yet; earlier choices are missing.
    Waiting,
    Loading,
    Failed(String),
    Empty,
    Populated(Vec<SlotOption>),
}

pub fn slot_list_state(
    slots: Option<&[String]>,
    loading: bool,
    error: Option<&str>,
    selected: Option<&str>,
) -> SlotListState {
    if loading {
        return SlotListState::Loading;
    }
    if let Some(message) = error {
        return SlotListState::Failed(message.to_string());
    }

    match slots {
        None => SlotListState::Waiting,
        Some([]) => SlotListState::Empty,
        Some(slots) => SlotListState::Populated(
            slots
                .iter()
                .map(|slot| SlotOption {
                    value: slot.clone(),
                    selected: selected == Some(slot.as_str()),
                })
                .collect(),
        ),
    }
}

#[component]
pub fn TimeSlotPicker(
    #[prop(into)] slots: Signal<Option<Vec<String>>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] selected: Signal<Option<String>>,
    on_slot_selected: impl Fn(String) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let state = Memo::new(move |_| {
        let slots = slots.get();
        let error = error.get();
        let selected = selected.get();
        slot_list_state(
            slots.as_deref(),
            loading.get(),
            error.as_deref(),
            selected.as_deref(),
        )
    });

    view! {
        <div class="time-slot-picker">
            {move || match state.get() {
                SlotListState::Waiting => view! {
                    <div class="time-slot-picker-empty">
                        <p>"Choose the options above to see available times."</p>
                    </div>
                }.into_any(),
                SlotListState::Loading => view! {
                    <div class="time-slot-picker-loading">
                        <Spinner size=SpinnerSize::Small />
                        <p>"Loading available time slots..."</p>
                    </div>
                }.into_any(),
                SlotListState::Failed(message) => view! {
                    <div class="time-slot-picker-error">
                        <MessageBar intent=MessageBarIntent::Error>
                            {format!("Could not load available times: {}", message)}
                        </MessageBar>
                        <p class="time-slot-picker-suggestion">"Try another date or professional."</p>
                    </div>
                }.into_any(),
                SlotListState::Empty => view! {
                    <div class="time-slot-picker-empty">
                        <p>"No slots available for this date."</p>
                        <p class="time-slot-picker-suggestion">"Please try selecting a different date."</p>
                    </div>
                }.into_any(),
                SlotListState::Populated(options) => view! {
                    <div class="time-slot-picker-grid">
                        {options.into_iter().map(|option| {
                            let value = option.value.clone();
                            view! {
                                <Button
                                    class=if option.selected { "time-slot-button selected" } else { "time-slot-button" }
                                    appearance=if option.selected {
                                        ButtonAppearance::Primary
                                    } else {
                                        ButtonAppearance::Secondary
                                    }
                                    on_click=move |_| on_slot_selected(value.clone())
                                >
                                    <span class="time-slot-time">{option.value}</span>
                                </Button>
                            }
                        }).collect::<Vec<_>>()}
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn loading_wins_over_any_previous_data() {
        let previous = slots(&["09:00"]);
        assert_eq!(
            slot_list_state(Some(previous.as_slice()), true, None, Some("09:00")),
            SlotListState::Loading
        );
    }

    #[test]
    fn loaded_empty_list_is_empty_state() {
        assert_eq!(slot_list_state(Some(&[][..]), false, None, None), SlotListState::Empty);
        assert_eq!(slot_list_state(None, false, None, None), SlotListState::Waiting);
    }

    #[test]
    fn failure_is_reported() {
        assert_eq!(
            slot_list_state(None, false, Some("timeout"), None),
            SlotListState::Failed("timeout".into())
        );
    }

    #[test]
    fn populated_keeps_order_and_highlights_selection() {
        let available = slots(&["10:00", "09:00"]);
        let SlotListState::Populated(options) =
            slot_list_state(Some(available.as_slice()), false, None, Some("09:00"))
        else {
            panic!("expected populated state");
        };

        assert_eq!(
            options,
            vec![
                SlotOption { value: "10:00".into(), selected: false },
                SlotOption { value: "09:00".into(), selected: true },
            ]
        );
    }
}
