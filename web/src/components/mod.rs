pub mod booking_summary;
pub mod client_details_form;
pub mod error;
pub mod loading;
pub mod notice;
pub mod professional_selector;
pub mod selector;
pub mod service_selector;
pub mod step_indicator;
pub mod time_slot_picker;
pub mod unit_selector;

// Re-export commonly used types
pub use booking_summary::BookingSummaryCard;
pub use client_details_form::ClientDetailsForm;
pub use error::ErrorView;
pub use loading::LoadingView;
pub use notice::{Notice, NoticeBar, NoticeKind};
pub use professional_selector::ProfessionalSelector;
pub use service_selector::ServiceSelector;
pub use step_indicator::StepIndicator;
pub use time_slot_picker::TimeSlotPicker;
pub use unit_selector::UnitSelector;
