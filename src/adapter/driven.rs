// ドリブンアダプター（出力ポートの実装）

pub mod allocation_store;
pub mod booking_repository;
pub mod console_logger;
pub mod flight_repository;
pub mod in_memory_store;

pub use allocation_store::MySqlAllocationStore;
pub use booking_repository::MySqlBookingRepository;
pub use console_logger::ConsoleLogger;
pub use flight_repository::MySqlFlightRepository;
pub use in_memory_store::InMemoryStore;
