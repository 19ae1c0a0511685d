//! Public booking flow: wizard state, keyed fetches, contact validation.

pub mod fetch;
pub mod validation;
pub mod wizard;

pub use fetch::{AvailabilityKey, FetchState, FetchTicket, FetchTracker};
pub use validation::{ClientDetails, ContactField, ValidationErrors};
pub use wizard::{
    BookingConfirmation, BookingFlow, BookingSummary, SubmitError, UnitPolicy, Wizard,
    WizardError, WizardStep,
};
