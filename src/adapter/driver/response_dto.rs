use crate::domain::model::{Booking, Flight};
use serde::Serialize;

/// 予約用のレスポンスDTO
#[derive(Serialize)]
pub struct BookingResponse {
    pub booking_id: String,
    pub flight_id: String,
    pub passenger_name: String,
    pub quantity: u32,
    pub total_price_amount: i64,
    pub total_price_currency: String,
    pub status: String,
}

/// フライト詳細用のレスポンスDTO
#[derive(Serialize)]
pub struct FlightDetailResponse {
    pub flight_id: String,
    pub flight_number: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub airline: String,
    pub price_amount: i64,
    pub price_currency: String,
    pub available_seats: i32,
}

/// フライト検索結果の1件分のレスポンスDTO
/// 一覧には便名と空席数を含めない
#[derive(Serialize)]
pub struct FlightSearchItemResponse {
    pub flight_id: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub airline: String,
    pub price_amount: i64,
    pub price_currency: String,
}

/// フライト検索結果のレスポンスDTO
#[derive(Serialize)]
pub struct SearchFlightsResponse {
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub data: Vec<FlightSearchItemResponse>,
}

impl BookingResponse {
    /// ドメインオブジェクトからBookingResponseを作成
    pub fn from_booking(booking: &Booking) -> Self {
        let total_price = booking.total_price();
        Self {
            booking_id: booking.id().to_string(),
            flight_id: booking.flight_id().to_string(),
            passenger_name: booking.passenger_name().to_string(),
            quantity: booking.quantity(),
            total_price_amount: total_price.amount(),
            total_price_currency: total_price.currency(),
            status: booking.status().to_string(),
        }
    }
}

impl FlightDetailResponse {
    /// ドメインオブジェクトからFlightDetailResponseを作成
    pub fn from_flight(flight: &Flight) -> Self {
        Self {
            flight_id: flight.id().to_string(),
            flight_number: flight.flight_number().to_string(),
            departure_airport: flight.departure_airport().to_string(),
            arrival_airport: flight.arrival_airport().to_string(),
            departure_time: flight.departure_time().format("%Y-%m-%dT%H:%M:%S").to_string(),
            arrival_time: flight.arrival_time().format("%Y-%m-%dT%H:%M:%S").to_string(),
            airline: flight.airline().to_string(),
            price_amount: flight.price().amount(),
            price_currency: flight.price().currency(),
            available_seats: flight.available_seats(),
        }
    }
}

impl FlightSearchItemResponse {
    /// ドメインオブジェクトからFlightSearchItemResponseを作成
    pub fn from_flight(flight: &Flight) -> Self {
        Self {
            flight_id: flight.id().to_string(),
            departure_airport: flight.departure_airport().to_string(),
            arrival_airport: flight.arrival_airport().to_string(),
            departure_time: flight.departure_time().format("%Y-%m-%dT%H:%M:%S").to_string(),
            arrival_time: flight.arrival_time().format("%Y-%m-%dT%H:%M:%S").to_string(),
            airline: flight.airline().to_string(),
            price_amount: flight.price().amount(),
            price_currency: flight.price().currency(),
        }
    }
}
