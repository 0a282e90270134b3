use crate::domain::model::{Booking, BookingId, Flight, FlightId};
use crate::domain::port::{
    AllocationStore, BookingRepository, FlightRepository, FlightSearchCriteria, RepositoryError,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// インメモリストアの内部データ
#[derive(Debug, Default)]
struct InMemoryData {
    flights: HashMap<FlightId, Flight>,
    bookings: HashMap<BookingId, Booking>,
}

/// インメモリトランザクション
/// ストア全体のロックを保持し、書き込みはコミットまでバッファする
/// コミットせずにドロップした場合、バッファは破棄される（ロールバック）
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<InMemoryData>,
    flight_update: Option<Flight>,
    booking_insert: Option<Booking>,
}

/// インメモリストア
/// MySQLを使わないテストや開発時の起動のための実装
/// トランザクション中はストア全体をロックするため、
/// 同一フライトへの並行割り当ては直列化される
#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<Mutex<InMemoryData>>,
}

impl InMemoryStore {
    /// 新しいインメモリストアを作成
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(InMemoryData::default())),
        }
    }

    /// 保存されている予約の件数を取得
    pub async fn booking_count(&self) -> usize {
        self.data.lock().await.bookings.len()
    }
}

#[async_trait]
impl AllocationStore for InMemoryStore {
    type Tx = InMemoryTransaction;

    async fn begin(&self) -> Result<Self::Tx, RepositoryError> {
        let guard = self.data.clone().lock_owned().await;
        Ok(InMemoryTransaction {
            guard,
            flight_update: None,
            booking_insert: None,
        })
    }

    async fn lock_flight(
        &self,
        tx: &mut Self::Tx,
        flight_id: FlightId,
    ) -> Result<Option<Flight>, RepositoryError> {
        Ok(tx.guard.flights.get(&flight_id).cloned())
    }

    async fn save_flight(
        &self,
        tx: &mut Self::Tx,
        flight: &Flight,
    ) -> Result<(), RepositoryError> {
        tx.flight_update = Some(flight.clone());
        Ok(())
    }

    async fn insert_booking(
        &self,
        tx: &mut Self::Tx,
        booking: &Booking,
    ) -> Result<(), RepositoryError> {
        tx.booking_insert = Some(booking.clone());
        Ok(())
    }

    async fn commit(&self, mut tx: Self::Tx) -> Result<(), RepositoryError> {
        if let Some(flight) = tx.flight_update.take() {
            tx.guard.flights.insert(flight.id(), flight);
        }
        if let Some(booking) = tx.booking_insert.take() {
            tx.guard.bookings.insert(booking.id(), booking);
        }
        Ok(())
    }
}

#[async_trait]
impl FlightRepository for InMemoryStore {
    async fn save(&self, flight: &Flight) -> Result<(), RepositoryError> {
        let mut data = self.data.lock().await;
        data.flights.insert(flight.id(), flight.clone());
        Ok(())
    }

    async fn find_by_id(&self, flight_id: FlightId) -> Result<Option<Flight>, RepositoryError> {
        let data = self.data.lock().await;
        Ok(data.flights.get(&flight_id).cloned())
    }

    async fn search(
        &self,
        criteria: &FlightSearchCriteria,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Flight>, i64), RepositoryError> {
        let data = self.data.lock().await;

        let mut matched: Vec<Flight> = data
            .flights
            .values()
            .filter(|flight| {
                criteria
                    .departure_airport
                    .as_ref()
                    .map_or(true, |airport| flight.departure_airport() == airport)
                    && criteria
                        .arrival_airport
                        .as_ref()
                        .map_or(true, |airport| flight.arrival_airport() == airport)
                    && criteria
                        .airline
                        .as_ref()
                        .map_or(true, |airline| flight.airline() == airline)
                    && criteria
                        .departure_date
                        .map_or(true, |date| flight.departure_time().date() == date)
            })
            .cloned()
            .collect();

        // 出発時刻の昇順で並べる
        matched.sort_by_key(|flight| flight.departure_time());

        let total = matched.len() as i64;
        let offset = (page.saturating_sub(1) as usize) * page_size as usize;
        let flights = matched
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();

        Ok((flights, total))
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        let data = self.data.lock().await;
        Ok(data.bookings.get(&booking_id).cloned())
    }
}
