// ドメインサービス
// 座席割り当てのトランザクションスクリプトを実装する

use crate::domain::error::DomainError;
use crate::domain::model::{Booking, BookingId, FlightId};
use crate::domain::port::{AllocationStore, RepositoryError};
use thiserror::Error;

/// 座席割り当てで発生するエラー
#[derive(Debug, Error)]
pub enum AllocationError {
    /// 対象のフライトが存在しない
    #[error("Flight not found: {0}")]
    FlightNotFound(FlightId),
    /// ビジネスルール違反（数量不正、座席不足など）
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    /// ストア操作の失敗
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 座席割り当てサービス
/// フライト行の排他ロック、分類、減算、予約作成を
/// ひとつのトランザクションとして実行する
pub struct SeatAllocationService<S: AllocationStore> {
    store: S,
    oversell_limit: u32,
}

impl<S: AllocationStore> SeatAllocationService<S> {
    /// 新しい座席割り当てサービスを作成
    ///
    /// # Arguments
    /// * `store` - 割り当てストア
    /// * `oversell_limit` - フライトごとのオーバーセル上限
    pub fn new(store: S, oversell_limit: u32) -> Self {
        Self {
            store,
            oversell_limit,
        }
    }

    /// オーバーセル上限を取得
    pub fn oversell_limit(&self) -> u32 {
        self.oversell_limit
    }

    /// 座席を割り当てて予約を作成する
    ///
    /// フライト行をロックして読み取り、現在の空席数に基づいて
    /// Confirmed / Waitlisted を判定し、空席数の減算と予約の作成を
    /// 同一トランザクションでコミットする。
    /// 途中で失敗した場合はトランザクションがロールバックされ、
    /// 空席数も予約も変化しない。
    ///
    /// # Arguments
    /// * `flight_id` - 対象のフライトID
    /// * `passenger_name` - 搭乗者名
    /// * `quantity` - 座席数（1以上）
    ///
    /// # Returns
    /// * `Ok(Booking)` - 作成された予約
    /// * `Err(AllocationError)` - 割り当て失敗
    pub async fn allocate(
        &self,
        flight_id: FlightId,
        passenger_name: String,
        quantity: u32,
    ) -> Result<Booking, AllocationError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity.into());
        }

        let mut tx = self.store.begin().await?;

        let mut flight = self
            .store
            .lock_flight(&mut tx, flight_id)
            .await?
            .ok_or(AllocationError::FlightNotFound(flight_id))?;

        let status = flight.allocate_seats(quantity, self.oversell_limit)?;
        self.store.save_flight(&mut tx, &flight).await?;

        let total_price = flight.price().multiply(quantity);
        let booking = Booking::new(
            BookingId::new(),
            flight_id,
            passenger_name,
            quantity,
            total_price,
            status,
        )?;
        self.store.insert_booking(&mut tx, &booking).await?;

        self.store.commit(tx).await?;
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::driven::in_memory_store::InMemoryStore;
    use crate::domain::model::{BookingStatus, Flight, FlightId, Money};
    use crate::domain::port::FlightRepository;
    use chrono::NaiveDateTime;

    fn sample_flight(id: FlightId, available_seats: i32) -> Flight {
        let departure =
            NaiveDateTime::parse_from_str("2025-04-01 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let arrival =
            NaiveDateTime::parse_from_str("2025-04-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        Flight::new(
            id,
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

    #[tokio::test]
    async fn test_allocate_confirmed_booking() {
        let store = InMemoryStore::new();
        let flight_id = FlightId::new();
        store.save(&sample_flight(flight_id, 5)).await.unwrap();

        let service = SeatAllocationService::new(store.clone(), 10);
        let booking = service
            .allocate(flight_id, "山田太郎".to_string(), 2)
            .await
            .unwrap();

        assert_eq!(booking.status(), BookingStatus::Confirmed);
        assert_eq!(booking.total_price(), Money::jpy(30_000));
        let flight = store.find_by_id(flight_id).await.unwrap().unwrap();
        assert_eq!(flight.available_seats(), 3);
    }

    #[tokio::test]
    async fn test_allocate_waitlisted_booking() {
        let store = InMemoryStore::new();
        let flight_id = FlightId::new();
        store.save(&sample_flight(flight_id, 1)).await.unwrap();

        let service = SeatAllocationService::new(store.clone(), 10);
        let booking = service
            .allocate(flight_id, "山田太郎".to_string(), 4)
            .await
            .unwrap();

        assert_eq!(booking.status(), BookingStatus::Waitlisted);
        let flight = store.find_by_id(flight_id).await.unwrap().unwrap();
        assert_eq!(flight.available_seats(), -3);
    }

    #[tokio::test]
    async fn test_allocate_insufficient_seats_leaves_state_unchanged() {
        let store = InMemoryStore::new();
        let flight_id = FlightId::new();
        store.save(&sample_flight(flight_id, 2)).await.unwrap();

        let service = SeatAllocationService::new(store.clone(), 3);
        let result = service.allocate(flight_id, "山田太郎".to_string(), 6).await;

        assert!(matches!(
            result,
            Err(AllocationError::Domain(DomainError::InsufficientSeats))
        ));
        let flight = store.find_by_id(flight_id).await.unwrap().unwrap();
        assert_eq!(flight.available_seats(), 2);
        assert_eq!(store.booking_count().await, 0);
    }

    #[tokio::test]
    async fn test_allocate_flight_not_found() {
        let store = InMemoryStore::new();
        let service = SeatAllocationService::new(store, 10);
        let result = service
            .allocate(FlightId::new(), "山田太郎".to_string(), 1)
            .await;
        assert!(matches!(result, Err(AllocationError::FlightNotFound(_))));
    }

    #[tokio::test]
    async fn test_allocate_zero_quantity_rejected_before_lock() {
        let store = InMemoryStore::new();
        let flight_id = FlightId::new();
        store.save(&sample_flight(flight_id, 5)).await.unwrap();

        let service = SeatAllocationService::new(store.clone(), 10);
        let result = service.allocate(flight_id, "山田太郎".to_string(), 0).await;

        assert!(matches!(
            result,
            Err(AllocationError::Domain(DomainError::InvalidQuantity))
        ));
        assert_eq!(store.booking_count().await, 0);
    }
}
