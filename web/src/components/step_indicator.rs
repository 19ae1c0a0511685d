use std::collections::BTreeSet;

use leptos::prelude::*;

use crate::booking::WizardStep;

/// How one step is drawn in the progress header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMarker {
    pub step: WizardStep,
    pub label: &'static str,
    pub ordinal: usize,
    pub completed: bool,
    pub current: bool,
}

impl StepMarker {
    /// The connector leading into the step lights up once the step is reached.
    pub fn connector_active(&self) -> bool {
        self.completed || self.current
    }

    pub fn glyph(&self) -> String {
        if self.completed {
            "✓".to_string()
        } else {
            self.ordinal.to_string()
        }
    }
}

pub fn step_markers(
    steps: &[WizardStep],
    current: WizardStep,
    completed: &BTreeSet<WizardStep>,
) -> Vec<StepMarker> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| StepMarker {
            step: *step,
            label: step.label(),
            ordinal: index + 1,
            completed: completed.contains(step),
            current: *step == current,
        })
        .collect()
}

/// Read-only progress header. Steps are not clickable.
#[component]
pub fn StepIndicator(
    steps: Vec<WizardStep>,
    #[prop(into)] current: Signal<WizardStep>,
    #[prop(into)] completed: Signal<BTreeSet<WizardStep>>,
) -> impl IntoView {
    view! {
        <ol class="step-indicator">
            {move || {
                step_markers(&steps, current.get(), &completed.get())
                    .into_iter()
                    .map(|marker| {
                        let item_class = match (marker.current, marker.completed) {
                            (true, _) => "step-indicator-item current",
                            (false, true) => "step-indicator-item completed",
                            (false, false) => "step-indicator-item",
                        };
                        let connector_class = if marker.connector_active() {
                            "step-connector active"
                        } else {
                            "step-connector"
                        };
                        let glyph = marker.glyph();

                        view! {
                            <li class=item_class>
                                <span class=connector_class></span>
                                <span class="step-marker">{glyph}</span>
                                <span class="step-label">{marker.label}</span>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </ol>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_follow_step_order_and_state() {
        let completed = BTreeSet::from([WizardStep::Service, WizardStep::Professional]);
        let markers = step_markers(&WizardStep::ALL, WizardStep::Time, &completed);

        let glyphs: Vec<String> = markers.iter().map(StepMarker::glyph).collect();
        assert_eq!(glyphs, vec!["✓", "✓", "3", "4"]);

        let active: Vec<bool> = markers.iter().map(StepMarker::connector_active).collect();
        assert_eq!(active, vec![true, true, true, false]);

        assert!(markers[2].current);
        assert!(!markers[2].completed);
        assert_eq!(markers[3].label, "Your details");
    }

    #[test]
    fn a_completed_step_can_also_be_current_again() {
        let completed = BTreeSet::from([WizardStep::Service, WizardStep::Professional, WizardStep::Time]);
        let markers = step_markers(&WizardStep::ALL, WizardStep::Professional, &completed);

        assert!(markers[1].current && markers[1].completed);
        assert_eq!(markers[1].glyph(), "✓");
        assert!(!markers[3].connector_active());
    }
}
