use crate::adapter::database_error::DatabaseError;
use crate::domain::model::{Booking, BookingId, BookingStatus, FlightId, Money};
use crate::domain::port::{BookingRepository, RepositoryError};
use async_trait::async_trait;

// MySQL関連のインポート
use sqlx::{MySql, Pool, Row};

/// MySQL予約リポジトリ
/// MySQLデータベースから予約を取得する
#[derive(Clone)]
pub struct MySqlBookingRepository {
    pool: Pool<MySql>,
}

impl MySqlBookingRepository {
    /// 新しいMySQL予約リポジトリを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    ///
    /// # Returns
    /// * MySqlBookingRepositoryのインスタンス
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        // bookingsテーブルから予約を取得
        let row = sqlx::query(
            r#"
            SELECT id, flight_id, passenger_name, quantity,
                   total_price_amount, total_price_currency, booking_status
            FROM bookings
            WHERE id = ?
            "#,
        )
        .bind(booking_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::QueryError(format!("予約の取得に失敗しました: {}", e)))
        .map_err(RepositoryError::from)?;

        match row {
            Some(row) => {
                let booking_id = BookingId::from_string(row.get("id")).map_err(|e| {
                    RepositoryError::FetchFailed(format!("予約IDの解析に失敗しました: {}", e))
                })?;

                let flight_id = FlightId::from_string(row.get("flight_id")).map_err(|e| {
                    RepositoryError::FetchFailed(format!("フライトIDの解析に失敗しました: {}", e))
                })?;

                let total_price = Money::new(
                    row.get::<i64, _>("total_price_amount"),
                    row.get("total_price_currency"),
                )
                .map_err(|e| {
                    RepositoryError::FetchFailed(format!("金額の解析に失敗しました: {}", e))
                })?;

                let status =
                    BookingStatus::from_string(row.get("booking_status")).map_err(|e| {
                        RepositoryError::FetchFailed(format!(
                            "予約ステータスの解析に失敗しました: {}",
                            e
                        ))
                    })?;

                let booking = Booking::reconstruct(
                    booking_id,
                    flight_id,
                    row.get("passenger_name"),
                    row.get::<u32, _>("quantity"),
                    total_price,
                    status,
                )
                .map_err(|e| {
                    RepositoryError::FetchFailed(format!("予約の再構築に失敗しました: {}", e))
                })?;

                Ok(Some(booking))
            }
            None => Ok(None),
        }
    }
}
