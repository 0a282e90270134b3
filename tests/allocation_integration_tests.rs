use chrono::NaiveDateTime;
use flight_booking_api::adapter::driven::{ConsoleLogger, InMemoryStore};
use flight_booking_api::application::error::ApplicationError;
use flight_booking_api::application::service::BookingApplicationService;
use flight_booking_api::domain::error::DomainError;
use flight_booking_api::domain::model::{BookingId, BookingStatus, Flight, FlightId, Money};
use flight_booking_api::domain::port::FlightRepository;
use flight_booking_api::domain::service::SeatAllocationService;
use std::sync::Arc;

fn sample_flight(flight_id: FlightId, available_seats: i32) -> Flight {
    let departure =
        NaiveDateTime::parse_from_str("2025-04-01 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    let arrival =
        NaiveDateTime::parse_from_str("2025-04-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    Flight::new(
        flight_id,
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

fn build_service(
    store: InMemoryStore,
    oversell_limit: u32,
) -> BookingApplicationService<InMemoryStore> {
    let allocation_service = SeatAllocationService::new(store.clone(), oversell_limit);
    BookingApplicationService::new(
        allocation_service,
        Arc::new(store),
        Arc::new(ConsoleLogger::new()),
    )
}

#[tokio::test]
async fn test_booking_until_seats_and_oversell_are_exhausted() {
    let store = InMemoryStore::new();
    let flight_id = FlightId::new();
    store.save(&sample_flight(flight_id, 3)).await.unwrap();

    let service = build_service(store.clone(), 2);

    // 空席内はConfirmed
    let first = service
        .create_booking(flight_id, "搭乗者A".to_string(), 3)
        .await
        .unwrap();
    assert_eq!(first.status(), BookingStatus::Confirmed);

    // 空席が尽きた後はオーバーセル枠でWaitlisted
    let second = service
        .create_booking(flight_id, "搭乗者B".to_string(), 2)
        .await
        .unwrap();
    assert_eq!(second.status(), BookingStatus::Waitlisted);

    // オーバーセル枠も尽きたら拒否
    let third = service
        .create_booking(flight_id, "搭乗者C".to_string(), 1)
        .await;
    assert_eq!(
        third.unwrap_err(),
        ApplicationError::DomainError(DomainError::InsufficientSeats)
    );

    let flight = store.find_by_id(flight_id).await.unwrap().unwrap();
    assert_eq!(flight.available_seats(), -2);
    assert_eq!(store.booking_count().await, 2);
}

#[tokio::test]
async fn test_total_price_reflects_quantity() {
    let store = InMemoryStore::new();
    let flight_id = FlightId::new();
    store.save(&sample_flight(flight_id, 10)).await.unwrap();

    let service = build_service(store, 0);
    let booking = service
        .create_booking(flight_id, "搭乗者A".to_string(), 4)
        .await
        .unwrap();

    assert_eq!(booking.total_price(), Money::jpy(60_000));
    assert_eq!(booking.quantity(), 4);
}

#[tokio::test]
async fn test_rejected_booking_is_not_persisted() {
    let store = InMemoryStore::new();
    let flight_id = FlightId::new();
    store.save(&sample_flight(flight_id, 1)).await.unwrap();

    let service = build_service(store.clone(), 0);
    let result = service
        .create_booking(flight_id, "搭乗者A".to_string(), 5)
        .await;

    assert!(result.is_err());
    assert_eq!(store.booking_count().await, 0);
    let flight = store.find_by_id(flight_id).await.unwrap().unwrap();
    assert_eq!(flight.available_seats(), 1);
}

#[tokio::test]
async fn test_get_booking_round_trip() {
    let store = InMemoryStore::new();
    let flight_id = FlightId::new();
    store.save(&sample_flight(flight_id, 5)).await.unwrap();

    let service = build_service(store, 0);
    let created = service
        .create_booking(flight_id, "搭乗者A".to_string(), 2)
        .await
        .unwrap();

    let fetched = service.get_booking(created.id()).await.unwrap();
    assert_eq!(fetched, created);

    let missing = service.get_booking(BookingId::new()).await;
    assert!(matches!(missing, Err(ApplicationError::NotFound(_))));
}

#[tokio::test]
async fn test_concurrent_bookings_never_exceed_oversell_limit() {
    let store = InMemoryStore::new();
    let flight_id = FlightId::new();
    store.save(&sample_flight(flight_id, 10)).await.unwrap();

    let service = Arc::new(build_service(store.clone(), 5));

    // 20件の並行予約（各1席）: 10件Confirmed、5件Waitlisted、5件拒否になるはず
    let mut handles = Vec::new();
    for i in 0..20 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .create_booking(flight_id, format!("搭乗者{}", i), 1)
                .await
        }));
    }

    let mut confirmed = 0;
    let mut waitlisted = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(booking) => match booking.status() {
                BookingStatus::Confirmed => confirmed += 1,
                BookingStatus::Waitlisted => waitlisted += 1,
            },
            Err(ApplicationError::DomainError(DomainError::InsufficientSeats)) => rejected += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(confirmed, 10);
    assert_eq!(waitlisted, 5);
    assert_eq!(rejected, 5);

    let flight = store.find_by_id(flight_id).await.unwrap().unwrap();
    assert_eq!(flight.available_seats(), -5);
    assert_eq!(store.booking_count().await, 15);
}

#[tokio::test]
async fn test_concurrent_bookings_conserve_seats() {
    let store = InMemoryStore::new();
    let flight_id = FlightId::new();
    store.save(&sample_flight(flight_id, 30)).await.unwrap();

    let service = Arc::new(build_service(store.clone(), 10));

    let mut handles = Vec::new();
    for i in 0u32..15 {
        let service = Arc::clone(&service);
        let quantity = (i % 4) + 1;
        handles.push(tokio::spawn(async move {
            service
                .create_booking(flight_id, format!("搭乗者{}", i), quantity)
                .await
        }));
    }

    let mut allocated: i64 = 0;
    for handle in handles {
        if let Ok(booking) = handle.await.unwrap() {
            allocated += i64::from(booking.quantity());
        }
    }

    let flight = store.find_by_id(flight_id).await.unwrap().unwrap();
    assert_eq!(i64::from(flight.available_seats()), 30 - allocated);
    assert!(i64::from(flight.available_seats()) >= -10);
}
