use crate::adapter::database_error::DatabaseError;
use crate::domain::model::{Flight, FlightId, Money};
use crate::domain::port::{FlightRepository, FlightSearchCriteria, RepositoryError};
use async_trait::async_trait;
use chrono::NaiveDateTime;

// MySQL関連のインポート
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Pool, Row};

/// MySQLフライトリポジトリ
/// MySQLデータベースを使用してフライトを永続化する
#[derive(Clone)]
pub struct MySqlFlightRepository {
    pool: Pool<MySql>,
}

impl MySqlFlightRepository {
    /// 新しいMySQLフライトリポジトリを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    ///
    /// # Returns
    /// * MySqlFlightRepositoryのインスタンス
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

/// 行データからフライトを再構築する
pub(crate) fn flight_from_row(row: &MySqlRow) -> Result<Flight, RepositoryError> {
    let flight_id = FlightId::from_string(row.get("id"))
        .map_err(|e| RepositoryError::FetchFailed(format!("フライトIDの解析に失敗しました: {}", e)))?;

    let price = Money::new(row.get::<i64, _>("price_amount"), row.get("price_currency"))
        .map_err(|e| RepositoryError::FetchFailed(format!("金額の解析に失敗しました: {}", e)))?;

    Ok(Flight::new(
        flight_id,
        row.get("flight_number"),
        row.get("departure_airport"),
        row.get("arrival_airport"),
        row.get::<NaiveDateTime, _>("departure_time"),
        row.get::<NaiveDateTime, _>("arrival_time"),
        row.get("airline"),
        price,
        row.get::<i32, _>("available_seats"),
    ))
}

#[async_trait]
impl FlightRepository for MySqlFlightRepository {
    async fn save(&self, flight: &Flight) -> Result<(), RepositoryError> {
        // フライトデータをflightsテーブルにUPSERT
        sqlx::query(
            r#"
            INSERT INTO flights (
                id, flight_number, departure_airport, arrival_airport,
                departure_time, arrival_time, airline,
                price_amount, price_currency, available_seats
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                flight_number = VALUES(flight_number),
                departure_airport = VALUES(departure_airport),
                arrival_airport = VALUES(arrival_airport),
                departure_time = VALUES(departure_time),
                arrival_time = VALUES(arrival_time),
                airline = VALUES(airline),
                price_amount = VALUES(price_amount),
                price_currency = VALUES(price_currency),
                available_seats = VALUES(available_seats)
            "#,
        )
        .bind(flight.id().to_string())
        .bind(flight.flight_number())
        .bind(flight.departure_airport())
        .bind(flight.arrival_airport())
        .bind(flight.departure_time())
        .bind(flight.arrival_time())
        .bind(flight.airline())
        .bind(flight.price().amount())
        .bind(flight.price().currency())
        .bind(flight.available_seats())
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::QueryError(format!("フライトの保存に失敗しました: {}", e)))
        .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn find_by_id(&self, flight_id: FlightId) -> Result<Option<Flight>, RepositoryError> {
        // flightsテーブルからフライトを取得
        let row = sqlx::query(
            r#"
            SELECT id, flight_number, departure_airport, arrival_airport,
                   departure_time, arrival_time, airline,
                   price_amount, price_currency, available_seats
            FROM flights
            WHERE id = ?
            "#,
        )
        .bind(flight_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::QueryError(format!("フライトの取得に失敗しました: {}", e)))
        .map_err(RepositoryError::from)?;

        match row {
            Some(row) => Ok(Some(flight_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn search(
        &self,
        criteria: &FlightSearchCriteria,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Flight>, i64), RepositoryError> {
        // 検索条件からWHERE句を組み立てる
        // 指定されていない条件は絞り込みに使わない
        let mut where_clause = String::from(" WHERE 1=1");
        if criteria.departure_airport.is_some() {
            where_clause.push_str(" AND departure_airport = ?");
        }
        if criteria.arrival_airport.is_some() {
            where_clause.push_str(" AND arrival_airport = ?");
        }
        if criteria.airline.is_some() {
            where_clause.push_str(" AND airline = ?");
        }
        if criteria.departure_date.is_some() {
            where_clause.push_str(" AND DATE(departure_time) = ?");
        }

        // 総件数の取得
        let count_sql = format!("SELECT COUNT(*) AS total FROM flights{}", where_clause);
        let mut count_query = sqlx::query(&count_sql);
        if let Some(departure_airport) = &criteria.departure_airport {
            count_query = count_query.bind(departure_airport);
        }
        if let Some(arrival_airport) = &criteria.arrival_airport {
            count_query = count_query.bind(arrival_airport);
        }
        if let Some(airline) = &criteria.airline {
            count_query = count_query.bind(airline);
        }
        if let Some(departure_date) = &criteria.departure_date {
            count_query = count_query.bind(*departure_date);
        }

        let total: i64 = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DatabaseError::QueryError(format!("フライト件数の取得に失敗しました: {}", e))
            })
            .map_err(RepositoryError::from)?
            .get("total");

        // ページ指定でフライトを取得
        // 出発時刻の昇順で並べる
        let select_sql = format!(
            r#"
            SELECT id, flight_number, departure_airport, arrival_airport,
                   departure_time, arrival_time, airline,
                   price_amount, price_currency, available_seats
            FROM flights{}
            ORDER BY departure_time ASC
            LIMIT ? OFFSET ?
            "#,
            where_clause
        );
        let mut select_query = sqlx::query(&select_sql);
        if let Some(departure_airport) = &criteria.departure_airport {
            select_query = select_query.bind(departure_airport);
        }
        if let Some(arrival_airport) = &criteria.arrival_airport {
            select_query = select_query.bind(arrival_airport);
        }
        if let Some(airline) = &criteria.airline {
            select_query = select_query.bind(airline);
        }
        if let Some(departure_date) = &criteria.departure_date {
            select_query = select_query.bind(*departure_date);
        }

        let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);
        let rows = select_query
            .bind(i64::from(page_size))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError(format!("フライト検索に失敗しました: {}", e)))
            .map_err(RepositoryError::from)?;

        let mut flights = Vec::new();
        for row in rows {
            flights.push(flight_from_row(&row)?);
        }

        Ok((flights, total))
    }
}
