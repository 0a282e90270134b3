// ドメインモデル（エンティティと値オブジェクト）

mod booking;
mod flight;
mod value_objects;

pub use value_objects::{BookingId, BookingStatus, Currency, FlightId, Money};

pub use booking::Booking;
pub use flight::Flight;
