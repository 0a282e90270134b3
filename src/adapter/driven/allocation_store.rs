use crate::adapter::database_error::DatabaseError;
use crate::adapter::driven::flight_repository::flight_from_row;
use crate::domain::model::{Booking, Flight, FlightId};
use crate::domain::port::{AllocationStore, RepositoryError};
use async_trait::async_trait;

// MySQL関連のインポート
use sqlx::{MySql, Pool, Transaction};

/// MySQL割り当てストア
/// 座席割り当てユニットをMySQLのトランザクションとして実行する
/// フライト行の直列化は SELECT ... FOR UPDATE の行ロックに任せる
#[derive(Clone)]
pub struct MySqlAllocationStore {
    pool: Pool<MySql>,
}

impl MySqlAllocationStore {
    /// 新しいMySQL割り当てストアを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    ///
    /// # Returns
    /// * MySqlAllocationStoreのインスタンス
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AllocationStore for MySqlAllocationStore {
    type Tx = Transaction<'static, MySql>;

    async fn begin(&self) -> Result<Self::Tx, RepositoryError> {
        self.pool
            .begin()
            .await
            .map_err(|e| {
                DatabaseError::ConnectionError(format!(
                    "トランザクションの開始に失敗しました: {}",
                    e
                ))
            })
            .map_err(RepositoryError::from)
    }

    async fn lock_flight(
        &self,
        tx: &mut Self::Tx,
        flight_id: FlightId,
    ) -> Result<Option<Flight>, RepositoryError> {
        // 排他ロック付きでフライト行を読み取る
        // 同じフライトへの並行割り当てはここで直列化される
        let row = sqlx::query(
            r#"
            SELECT id, flight_number, departure_airport, arrival_airport,
                   departure_time, arrival_time, airline,
                   price_amount, price_currency, available_seats
            FROM flights
            WHERE id = ?
            FOR UPDATE
            "#,
        )
        .bind(flight_id.to_string())
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            DatabaseError::QueryError(format!("フライトのロック取得に失敗しました: {}", e))
        })
        .map_err(RepositoryError::from)?;

        match row {
            Some(row) => Ok(Some(flight_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn save_flight(
        &self,
        tx: &mut Self::Tx,
        flight: &Flight,
    ) -> Result<(), RepositoryError> {
        // 割り当てで変化するのは空席数のみ
        sqlx::query("UPDATE flights SET available_seats = ? WHERE id = ?")
            .bind(flight.available_seats())
            .bind(flight.id().to_string())
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                DatabaseError::QueryError(format!("空席数の更新に失敗しました: {}", e))
            })
            .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn insert_booking(
        &self,
        tx: &mut Self::Tx,
        booking: &Booking,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, flight_id, passenger_name, quantity,
                total_price_amount, total_price_currency, booking_status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.id().to_string())
        .bind(booking.flight_id().to_string())
        .bind(booking.passenger_name())
        .bind(booking.quantity())
        .bind(booking.total_price().amount())
        .bind(booking.total_price().currency())
        .bind(booking.status().to_string())
        .execute(&mut **tx)
        .await
        .map_err(|e| DatabaseError::QueryError(format!("予約の保存に失敗しました: {}", e)))
        .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), RepositoryError> {
        tx.commit()
            .await
            .map_err(|e| {
                DatabaseError::QueryError(format!(
                    "トランザクションのコミットに失敗しました: {}",
                    e
                ))
            })
            .map_err(RepositoryError::from)
    }
}
