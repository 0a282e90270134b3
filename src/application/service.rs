// アプリケーションサービス
// ユースケースごとにドメインサービスとリポジトリを組み合わせる

pub mod flight_query_service;

pub use flight_query_service::FlightQueryService;

use crate::application::error::ApplicationError;
use crate::domain::model::{Booking, BookingId, FlightId};
use crate::domain::port::{AllocationStore, BookingRepository, Logger};
use crate::domain::service::{AllocationError, SeatAllocationService};
use std::sync::Arc;

/// 予約アプリケーションサービス
/// 予約の作成と参照のユースケースを提供する
pub struct BookingApplicationService<S: AllocationStore> {
    allocation_service: SeatAllocationService<S>,
    booking_repository: Arc<dyn BookingRepository>,
    logger: Arc<dyn Logger>,
}

impl<S: AllocationStore> BookingApplicationService<S> {
    /// 新しい予約アプリケーションサービスを作成
    ///
    /// # Arguments
    /// * `allocation_service` - 座席割り当てサービス
    /// * `booking_repository` - 予約リポジトリ
    /// * `logger` - ロガー
    pub fn new(
        allocation_service: SeatAllocationService<S>,
        booking_repository: Arc<dyn BookingRepository>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            allocation_service,
            booking_repository,
            logger,
        }
    }

    /// 予約を作成する
    ///
    /// # Arguments
    /// * `flight_id` - 対象のフライトID
    /// * `passenger_name` - 搭乗者名
    /// * `quantity` - 座席数
    ///
    /// # Returns
    /// * `Ok(Booking)` - 作成された予約
    /// * `Err(ApplicationError)` - 作成失敗
    pub async fn create_booking(
        &self,
        flight_id: FlightId,
        passenger_name: String,
        quantity: u32,
    ) -> Result<Booking, ApplicationError> {
        self.logger.info(
            "BookingApplicationService",
            &format!(
                "予約作成を開始: flight_id={}, quantity={}",
                flight_id, quantity
            ),
        );

        let result = self
            .allocation_service
            .allocate(flight_id, passenger_name, quantity)
            .await;

        match result {
            Ok(booking) => {
                self.logger.info(
                    "BookingApplicationService",
                    &format!(
                        "予約を作成しました: booking_id={}, status={}",
                        booking.id(),
                        booking.status()
                    ),
                );
                Ok(booking)
            }
            Err(AllocationError::FlightNotFound(id)) => {
                self.logger.warn(
                    "BookingApplicationService",
                    &format!("フライトが見つかりません: flight_id={}", id),
                );
                Err(ApplicationError::NotFound(format!(
                    "Flight not found: {}",
                    id
                )))
            }
            Err(AllocationError::Domain(e)) => {
                self.logger.warn(
                    "BookingApplicationService",
                    &format!("予約作成を拒否しました: {}", e),
                );
                Err(ApplicationError::DomainError(e))
            }
            Err(AllocationError::Repository(e)) => {
                self.logger.error(
                    "BookingApplicationService",
                    &format!("予約作成に失敗しました: {}", e),
                );
                Err(ApplicationError::RepositoryError(e))
            }
        }
    }

    /// 予約IDで予約を取得する
    ///
    /// # Arguments
    /// * `booking_id` - 予約ID
    ///
    /// # Returns
    /// * `Ok(Booking)` - 予約
    /// * `Err(ApplicationError::NotFound)` - 予約が存在しない
    pub async fn get_booking(&self, booking_id: BookingId) -> Result<Booking, ApplicationError> {
        self.booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Booking not found: {}", booking_id)))
    }
}
