pub mod booking;
pub mod booking_confirmation;
pub mod home;
pub mod not_found;

pub use booking::BookingPage;
pub use booking_confirmation::BookingConfirmationView;
pub use home::HomePage;
pub use not_found::NotFoundPage;
