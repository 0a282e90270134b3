use crate::domain::error::DomainError;
use crate::domain::model::{BookingId, BookingStatus, FlightId, Money};

/// 予約集約
/// 座席割り当ての結果として一度だけ作成され、以後変更されない
/// total_price と status は割り当て時点の座席状態を反映する
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    id: BookingId,
    flight_id: FlightId,
    passenger_name: String,
    quantity: u32,
    total_price: Money,
    status: BookingStatus,
}

impl Booking {
    /// 新しい予約を作成
    /// 数量は1以上である必要がある
    pub fn new(
        id: BookingId,
        flight_id: FlightId,
        passenger_name: String,
        quantity: u32,
        total_price: Money,
        status: BookingStatus,
    ) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }
        Ok(Self {
            id,
            flight_id,
            passenger_name,
            quantity,
            total_price,
            status,
        })
    }

    /// データベースから取得したデータで予約を再構築
    /// リポジトリでの使用を想定
    pub fn reconstruct(
        id: BookingId,
        flight_id: FlightId,
        passenger_name: String,
        quantity: u32,
        total_price: Money,
        status: BookingStatus,
    ) -> Result<Self, DomainError> {
        Self::new(id, flight_id, passenger_name, quantity, total_price, status)
    }

    /// 予約IDを取得
    pub fn id(&self) -> BookingId {
        self.id
    }

    /// フライトIDを取得
    pub fn flight_id(&self) -> FlightId {
        self.flight_id
    }

    /// 搭乗者名を取得
    pub fn passenger_name(&self) -> &str {
        &self.passenger_name
    }

    /// 座席数を取得
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// 合計金額を取得
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// 予約ステータスを取得
    pub fn status(&self) -> BookingStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_creation() {
        let booking = Booking::new(
            BookingId::new(),
            FlightId::new(),
            "山田太郎".to_string(),
            2,
            Money::jpy(30_000),
            BookingStatus::Confirmed,
        )
        .unwrap();
        assert_eq!(booking.quantity(), 2);
        assert_eq!(booking.total_price().amount(), 30_000);
        assert_eq!(booking.status(), BookingStatus::Confirmed);
    }

    #[test]
    fn test_booking_zero_quantity_fails() {
        let result = Booking::new(
            BookingId::new(),
            FlightId::new(),
            "山田太郎".to_string(),
            0,
            Money::jpy(0),
            BookingStatus::Confirmed,
        );
        assert_eq!(result.unwrap_err(), DomainError::InvalidQuantity);
    }

    #[test]
    fn test_booking_reconstruct() {
        let id = BookingId::new();
        let flight_id = FlightId::new();
        let booking = Booking::reconstruct(
            id,
            flight_id,
            "Test User".to_string(),
            3,
            Money::jpy(45_000),
            BookingStatus::Waitlisted,
        )
        .unwrap();
        assert_eq!(booking.id(), id);
        assert_eq!(booking.flight_id(), flight_id);
        assert_eq!(booking.status(), BookingStatus::Waitlisted);
    }
}
