pub mod models;
pub mod token;

pub use models::booking::Booking;
pub use token::BookingToken;
