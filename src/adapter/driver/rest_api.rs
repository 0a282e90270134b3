use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::service::{BookingApplicationService, FlightQueryService};
use crate::adapter::driver::request_dto::{
    CreateBookingRequest, CreateFlightRequest, FlightsQueryParams,
};
use crate::adapter::driver::response_dto::{
    BookingResponse, FlightDetailResponse, FlightSearchItemResponse, SearchFlightsResponse,
};
use crate::domain::model::{BookingId, Flight, FlightId, Money};
use crate::domain::port::{AllocationStore, FlightSearchCriteria};

// REST API用のレスポンスDTO
#[derive(Serialize, Deserialize)]
pub struct CreateFlightResponse {
    pub flight_id: Uuid,
}

#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

// アプリケーションサービスを含む状態
pub type AppState<S> = AppStateInner<S>;

pub struct AppStateInner<S: AllocationStore> {
    pub booking_service: Arc<BookingApplicationService<S>>,
    pub flight_query_service: Arc<FlightQueryService>,
}

impl<S: AllocationStore> Clone for AppStateInner<S> {
    fn clone(&self) -> Self {
        Self {
            booking_service: Arc::clone(&self.booking_service),
            flight_query_service: Arc::clone(&self.flight_query_service),
        }
    }
}

// REST APIルーターを作成
pub fn create_router<S: AllocationStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/flights", get(search_flights::<S>))
        .route("/flights", post(create_flight::<S>))
        .route("/flights/:flight_id", get(get_flight_by_id::<S>))
        .route("/bookings", post(create_booking::<S>))
        .route("/bookings/:booking_id", get(get_booking_by_id::<S>))
}

// ヘルスチェックエンドポイント
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "flight-booking-api",
        "version": "0.1.0"
    }))
}

// フライト検索エンドポイント
async fn search_flights<S: AllocationStore>(
    State(state): State<AppState<S>>,
    query: Result<Query<FlightsQueryParams>, axum::extract::rejection::QueryRejection>,
) -> Result<Json<SearchFlightsResponse>, (StatusCode, Json<ApiError>)> {
    let Query(params) = query.map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "無効なクエリパラメータです".to_string(),
                code: "INVALID_PARAMETER".to_string(),
            }),
        )
    })?;

    // 出発日はYYYY-MM-DD形式のみ受け付ける
    let departure_date = match &params.date {
        Some(date_str) => match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiError {
                        error: format!("無効な日付形式です: {}", date_str),
                        code: "INVALID_DATE".to_string(),
                    }),
                ))
            }
        },
        None => None,
    };

    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(10);
    if page == 0 || page_size == 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "pageとpage_sizeは1以上である必要があります".to_string(),
                code: "INVALID_PARAMETER".to_string(),
            }),
        ));
    }

    let criteria = FlightSearchCriteria {
        departure_airport: params.departure,
        arrival_airport: params.arrival,
        airline: params.airline,
        departure_date,
    };

    match state
        .flight_query_service
        .search_flights(&criteria, page, page_size)
        .await
    {
        Ok(result) => {
            let data: Vec<FlightSearchItemResponse> = result
                .flights
                .iter()
                .map(FlightSearchItemResponse::from_flight)
                .collect();
            Ok(Json(SearchFlightsResponse {
                total: result.total,
                page: result.page,
                page_size: result.page_size,
                data,
            }))
        }
        Err(err) => Err(map_application_error(err)),
    }
}

// フライト詳細取得エンドポイント
async fn get_flight_by_id<S: AllocationStore>(
    State(state): State<AppState<S>>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<FlightDetailResponse>, (StatusCode, Json<ApiError>)> {
    let flight_id = FlightId::from_uuid(flight_id);

    match state.flight_query_service.get_flight_by_id(flight_id).await {
        Ok(flight) => Ok(Json(FlightDetailResponse::from_flight(&flight))),
        Err(ApplicationError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: "指定されたフライトが見つかりません".to_string(),
                code: "FLIGHT_NOT_FOUND".to_string(),
            }),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// フライト登録エンドポイント（テスト用）
async fn create_flight<S: AllocationStore>(
    State(state): State<AppState<S>>,
    Json(request): Json<CreateFlightRequest>,
) -> Result<(StatusCode, Json<CreateFlightResponse>), (StatusCode, Json<ApiError>)> {
    let flight = Flight::new(
        FlightId::new(),
        request.flight_number,
        request.departure_airport,
        request.arrival_airport,
        request.departure_time,
        request.arrival_time,
        request.airline,
        Money::jpy(request.price),
        request.available_seats,
    );

    match state.flight_query_service.register_flight(&flight).await {
        Ok(()) => Ok((
            StatusCode::CREATED,
            Json(CreateFlightResponse {
                flight_id: flight.id().as_uuid(),
            }),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// 予約作成エンドポイント
async fn create_booking<S: AllocationStore>(
    State(state): State<AppState<S>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, (StatusCode, Json<ApiError>)> {
    let flight_id = FlightId::from_uuid(request.flight_id);

    match state
        .booking_service
        .create_booking(flight_id, request.passenger_name, request.quantity)
        .await
    {
        Ok(booking) => Ok(Json(BookingResponse::from_booking(&booking))),
        Err(ApplicationError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: "指定されたフライトが見つかりません".to_string(),
                code: "FLIGHT_NOT_FOUND".to_string(),
            }),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// 予約詳細取得エンドポイント
async fn get_booking_by_id<S: AllocationStore>(
    State(state): State<AppState<S>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, (StatusCode, Json<ApiError>)> {
    let booking_id = BookingId::from_uuid(booking_id);

    match state.booking_service.get_booking(booking_id).await {
        Ok(booking) => Ok(Json(BookingResponse::from_booking(&booking))),
        Err(ApplicationError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: "指定された予約が見つかりません".to_string(),
                code: "BOOKING_NOT_FOUND".to_string(),
            }),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// アプリケーションエラーをHTTPエラーにマッピング
fn map_application_error(err: ApplicationError) -> (StatusCode, Json<ApiError>) {
    match err {
        ApplicationError::DomainError(domain_err) => map_domain_error(domain_err),
        ApplicationError::RepositoryError(repo_err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError {
                error: format!("{}", repo_err),
                code: "REPOSITORY_ERROR".to_string(),
            }),
        ),
        ApplicationError::NotFound(msg) => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: msg,
                code: "NOT_FOUND".to_string(),
            }),
        ),
    }
}

// ドメインエラーを適切なHTTPステータスコードとエラーコードにマッピング
fn map_domain_error(domain_err: crate::domain::error::DomainError) -> (StatusCode, Json<ApiError>) {
    use crate::domain::error::DomainError;

    match domain_err {
        DomainError::InvalidQuantity => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "無効な数量です".to_string(),
                code: "INVALID_QUANTITY".to_string(),
            }),
        ),
        DomainError::InsufficientSeats => (
            StatusCode::CONFLICT,
            Json(ApiError {
                error: "座席が不足しています".to_string(),
                code: "INSUFFICIENT_SEATS".to_string(),
            }),
        ),
        DomainError::CurrencyMismatch => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "通貨が一致しません".to_string(),
                code: "CURRENCY_MISMATCH".to_string(),
            }),
        ),
        DomainError::InvalidValue(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: msg,
                code: "INVALID_VALUE".to_string(),
            }),
        ),
    }
}
