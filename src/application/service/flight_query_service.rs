use crate::application::error::ApplicationError;
use crate::domain::model::{Flight, FlightId};
use crate::domain::port::{FlightRepository, FlightSearchCriteria};
use std::sync::Arc;

/// フライト検索結果
/// ページ情報と総件数を含む
#[derive(Debug)]
pub struct FlightSearchResult {
    pub flights: Vec<Flight>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

/// フライトクエリサービス
/// フライトの参照系ユースケースを提供する
pub struct FlightQueryService {
    flight_repository: Arc<dyn FlightRepository>,
}

impl FlightQueryService {
    /// 新しいフライトクエリサービスを作成
    ///
    /// # Arguments
    /// * `flight_repository` - フライトリポジトリ
    pub fn new(flight_repository: Arc<dyn FlightRepository>) -> Self {
        Self { flight_repository }
    }

    /// フライトIDでフライトを取得する
    ///
    /// # Arguments
    /// * `flight_id` - フライトID
    ///
    /// # Returns
    /// * `Ok(Flight)` - フライト
    /// * `Err(ApplicationError::NotFound)` - フライトが存在しない
    pub async fn get_flight_by_id(&self, flight_id: FlightId) -> Result<Flight, ApplicationError> {
        self.flight_repository
            .find_by_id(flight_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Flight not found: {}", flight_id)))
    }

    /// 検索条件に一致するフライトをページ指定で取得する
    ///
    /// # Arguments
    /// * `criteria` - 検索条件
    /// * `page` - ページ番号（1始まり）
    /// * `page_size` - 1ページあたりの件数
    pub async fn search_flights(
        &self,
        criteria: &FlightSearchCriteria,
        page: u32,
        page_size: u32,
    ) -> Result<FlightSearchResult, ApplicationError> {
        let (flights, total) = self
            .flight_repository
            .search(criteria, page, page_size)
            .await?;
        Ok(FlightSearchResult {
            flights,
            total,
            page,
            page_size,
        })
    }

    /// フライトを登録する
    /// テストデータの投入や運用ツールからの利用を想定
    pub async fn register_flight(&self, flight: &Flight) -> Result<(), ApplicationError> {
        self.flight_repository.save(flight).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::driven::in_memory_store::InMemoryStore;
    use crate::domain::model::Money;
    use chrono::{NaiveDate, NaiveDateTime};

    fn flight_at(
        number: &str,
        departure_airport: &str,
        airline: &str,
        departure: &str,
    ) -> Flight {
        let departure =
            NaiveDateTime::parse_from_str(departure, "%Y-%m-%d %H:%M:%S").unwrap();
        let arrival = departure + chrono::Duration::hours(2);
        Flight::new(
            FlightId::new(),
            number.to_string(),
            departure_airport.to_string(),
            "OKA".to_string(),
            departure,
            arrival,
            airline.to_string(),
            Money::jpy(25_000),
            100,
        )
    }

    async fn seeded_service() -> FlightQueryService {
        let store = InMemoryStore::new();
        store
            .save(&flight_at("NH467", "HND", "ANA", "2025-04-01 09:00:00"))
            .await
            .unwrap();
        store
            .save(&flight_at("JL903", "HND", "JAL", "2025-04-01 11:00:00"))
            .await
            .unwrap();
        store
            .save(&flight_at("NH1203", "KIX", "ANA", "2025-04-02 08:00:00"))
            .await
            .unwrap();
        FlightQueryService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_get_flight_by_id() {
        let store = InMemoryStore::new();
        let flight = flight_at("NH467", "HND", "ANA", "2025-04-01 09:00:00");
        store.save(&flight).await.unwrap();

        let service = FlightQueryService::new(Arc::new(store));
        let found = service.get_flight_by_id(flight.id()).await.unwrap();
        assert_eq!(found, flight);
    }

    #[tokio::test]
    async fn test_get_flight_by_id_not_found() {
        let service = FlightQueryService::new(Arc::new(InMemoryStore::new()));
        let result = service.get_flight_by_id(FlightId::new()).await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_search_by_departure_airport() {
        let service = seeded_service().await;
        let criteria = FlightSearchCriteria {
            departure_airport: Some("HND".to_string()),
            ..Default::default()
        };
        let result = service.search_flights(&criteria, 1, 10).await.unwrap();
        assert_eq!(result.total, 2);
        // 出発時刻の昇順
        assert_eq!(result.flights[0].flight_number(), "NH467");
        assert_eq!(result.flights[1].flight_number(), "JL903");
    }

    #[tokio::test]
    async fn test_search_by_airline_and_date() {
        let service = seeded_service().await;
        let criteria = FlightSearchCriteria {
            airline: Some("ANA".to_string()),
            departure_date: NaiveDate::from_ymd_opt(2025, 4, 2),
            ..Default::default()
        };
        let result = service.search_flights(&criteria, 1, 10).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.flights[0].flight_number(), "NH1203");
    }

    #[tokio::test]
    async fn test_search_pagination() {
        let service = seeded_service().await;
        let criteria = FlightSearchCriteria::default();
        let result = service.search_flights(&criteria, 2, 2).await.unwrap();
        assert_eq!(result.total, 3);
        assert_eq!(result.flights.len(), 1);
        assert_eq!(result.page, 2);
    }
}
