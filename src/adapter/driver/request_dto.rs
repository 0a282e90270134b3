use chrono::NaiveDateTime;
use serde::Deserialize;
use uuid::Uuid;

/// 予約作成リクエストDTO
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub flight_id: Uuid,
    pub passenger_name: String,
    pub quantity: u32,
}

/// フライト登録リクエストDTO（テスト用）
#[derive(Deserialize)]
pub struct CreateFlightRequest {
    pub flight_number: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub airline: String,
    pub price: i64,
    pub available_seats: i32,
}

/// フライト検索用クエリパラメータ
#[derive(Deserialize)]
pub struct FlightsQueryParams {
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub airline: Option<String>,
    pub date: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}
