use crate::domain::error::DomainError;
use crate::domain::model::{BookingStatus, FlightId, Money};
use chrono::NaiveDateTime;

/// フライト集約
/// フライトの基本情報と空席数を管理する
/// 空席数はオーバーセルにより負の値になり得る（下限は -オーバーセル上限）
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    id: FlightId,
    flight_number: String,
    departure_airport: String,
    arrival_airport: String,
    departure_time: NaiveDateTime,
    arrival_time: NaiveDateTime,
    airline: String,
    price: Money,
    available_seats: i32,
}

impl Flight {
    /// 新しいフライトを作成
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: FlightId,
        flight_number: String,
        departure_airport: String,
        arrival_airport: String,
        departure_time: NaiveDateTime,
        arrival_time: NaiveDateTime,
        airline: String,
        price: Money,
        available_seats: i32,
    ) -> Self {
        Self {
            id,
            flight_number,
            departure_airport,
            arrival_airport,
            departure_time,
            arrival_time,
            airline,
            price,
            available_seats,
        }
    }

    /// フライトIDを取得
    pub fn id(&self) -> FlightId {
        self.id
    }

    /// 便名を取得
    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    /// 出発空港を取得
    pub fn departure_airport(&self) -> &str {
        &self.departure_airport
    }

    /// 到着空港を取得
    pub fn arrival_airport(&self) -> &str {
        &self.arrival_airport
    }

    /// 出発時刻を取得
    pub fn departure_time(&self) -> NaiveDateTime {
        self.departure_time
    }

    /// 到着時刻を取得
    pub fn arrival_time(&self) -> NaiveDateTime {
        self.arrival_time
    }

    /// 航空会社を取得
    pub fn airline(&self) -> &str {
        &self.airline
    }

    /// 座席単価を取得
    pub fn price(&self) -> Money {
        self.price
    }

    /// 空席数を取得
    pub fn available_seats(&self) -> i32 {
        self.available_seats
    }

    /// 予約リクエストを現在の空席数とオーバーセル上限で分類する
    /// 状態は変更しない
    ///
    /// # Returns
    /// * `Ok(BookingStatus::Confirmed)` - 空席数で賄える（`available_seats >= quantity`）
    /// * `Ok(BookingStatus::Waitlisted)` - オーバーセル枠を使えば賄える
    ///   （`available_seats + oversell_limit >= quantity`）
    /// * `Err(DomainError::InsufficientSeats)` - オーバーセル枠でも賄えない
    pub fn classify_request(
        &self,
        quantity: u32,
        oversell_limit: u32,
    ) -> Result<BookingStatus, DomainError> {
        // 比較は i64 で行い、quantity が大きくてもオーバーフローしない
        let requested = i64::from(quantity);
        let available = i64::from(self.available_seats);

        if available >= requested {
            Ok(BookingStatus::Confirmed)
        } else if available + i64::from(oversell_limit) >= requested {
            Ok(BookingStatus::Waitlisted)
        } else {
            Err(DomainError::InsufficientSeats)
        }
    }

    /// 座席を割り当てる
    /// 分類に成功した場合のみ空席数を減算する（負の値になり得る）
    ///
    /// # Arguments
    /// * `quantity` - 割り当てる座席数（1以上）
    /// * `oversell_limit` - オーバーセル上限（0以上）
    ///
    /// # Returns
    /// * `Ok(BookingStatus)` - 割り当て成功（Confirmed または Waitlisted）
    /// * `Err(DomainError)` - 割り当て失敗（空席数は変わらない）
    pub fn allocate_seats(
        &mut self,
        quantity: u32,
        oversell_limit: u32,
    ) -> Result<BookingStatus, DomainError> {
        let delta = i32::try_from(quantity).map_err(|_| DomainError::InvalidQuantity)?;
        if delta == 0 {
            return Err(DomainError::InvalidQuantity);
        }

        let status = self.classify_request(quantity, oversell_limit)?;
        self.available_seats -= delta;
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_flight(available_seats: i32) -> Flight {
        let departure = NaiveDateTime::parse_from_str("2025-04-01 10:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let arrival = NaiveDateTime::parse_from_str("2025-04-01 12:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        Flight::new(
            FlightId::new(),
            "NH123".to_string(),
            "HND".to_string(),
            "CTS".to_string(),
            departure,
            arrival,
            "ANA".to_string(),
            Money::jpy(15_000),
            available_seats,
        )
    }

    #[test]
    fn test_allocate_exact_remaining_seats_is_confirmed() {
        // 残席ちょうどの予約は Confirmed（キャンセル待ちではない）
        let mut flight = sample_flight(5);
        let status = flight.allocate_seats(5, 10).unwrap();
        assert_eq!(status, BookingStatus::Confirmed);
        assert_eq!(flight.available_seats(), 0);
    }

    #[test]
    fn test_allocate_within_oversell_is_waitlisted() {
        // オーバーセル枠ちょうどまで使う予約は Waitlisted
        let mut flight = sample_flight(0);
        let status = flight.allocate_seats(10, 10).unwrap();
        assert_eq!(status, BookingStatus::Waitlisted);
        assert_eq!(flight.available_seats(), -10);
    }

    #[test]
    fn test_allocate_beyond_oversell_fails() {
        let mut flight = sample_flight(0);
        let result = flight.allocate_seats(11, 10);
        assert_eq!(result.unwrap_err(), DomainError::InsufficientSeats);
        assert_eq!(flight.available_seats(), 0); // 空席数は変わらない
    }

    #[test]
    fn test_allocate_partial_oversell() {
        let mut flight = sample_flight(3);
        let status = flight.allocate_seats(5, 10).unwrap();
        assert_eq!(status, BookingStatus::Waitlisted);
        assert_eq!(flight.available_seats(), -2);
    }

    #[test]
    fn test_allocate_zero_quantity_fails() {
        let mut flight = sample_flight(10);
        let result = flight.allocate_seats(0, 10);
        assert_eq!(result.unwrap_err(), DomainError::InvalidQuantity);
        assert_eq!(flight.available_seats(), 10);
    }

    #[test]
    fn test_allocate_with_zero_oversell_limit() {
        let mut flight = sample_flight(2);
        assert_eq!(
            flight.allocate_seats(2, 0).unwrap(),
            BookingStatus::Confirmed
        );
        assert_eq!(
            flight.allocate_seats(1, 0).unwrap_err(),
            DomainError::InsufficientSeats
        );
    }

    #[test]
    fn test_classify_request_does_not_mutate() {
        let flight = sample_flight(5);
        let status = flight.classify_request(3, 10).unwrap();
        assert_eq!(status, BookingStatus::Confirmed);
        assert_eq!(flight.available_seats(), 5);
    }

    #[test]
    fn test_classify_from_negative_available_seats() {
        // 既にオーバーセル済みのフライトでも残り枠内なら受け付ける
        let flight = sample_flight(-3);
        assert_eq!(
            flight.classify_request(7, 10).unwrap(),
            BookingStatus::Waitlisted
        );
        assert_eq!(
            flight.classify_request(8, 10).unwrap_err(),
            DomainError::InsufficientSeats
        );
    }
}
