use flight_booking_api::adapter::database_config::DatabaseConfig;
use flight_booking_api::adapter::database_migration::DatabaseMigration;
use flight_booking_api::adapter::driven::{
    ConsoleLogger, MySqlAllocationStore, MySqlBookingRepository, MySqlFlightRepository,
};
use flight_booking_api::adapter::driver::rest_api::{create_router, AppStateInner};
use flight_booking_api::adapter::service_config::ServiceConfig;
use flight_booking_api::application::service::{BookingApplicationService, FlightQueryService};
use flight_booking_api::domain::service::SeatAllocationService;

use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== フライト予約システム REST API ===");
    println!();

    // .envファイルから環境変数を読み込む
    dotenvy::dotenv().ok();

    // 設定を読み込む
    let db_config = DatabaseConfig::from_env()?;
    let service_config = ServiceConfig::from_env()?;
    println!(
        "データベース設定を読み込みました: {}:{}",
        db_config.host, db_config.port
    );
    println!(
        "オーバーセル上限: {}席/フライト",
        service_config.oversell_limit
    );

    // 接続プールを作成
    let pool = MySqlPoolOptions::new()
        .max_connections(db_config.max_connections)
        .connect(&db_config.connection_string())
        .await?;
    println!("データベース接続プールを作成しました");

    // マイグレーションを実行
    let migration = DatabaseMigration::new(pool.clone());
    migration.run().await?;
    println!("データベースマイグレーションを実行しました");

    // MySQLリポジトリとストアを作成
    let flight_repository = Arc::new(MySqlFlightRepository::new(pool.clone()));
    let booking_repository = Arc::new(MySqlBookingRepository::new(pool.clone()));
    let allocation_store = MySqlAllocationStore::new(pool.clone());

    // ロガーを作成
    let logger = Arc::new(ConsoleLogger::new());

    // ドメインサービスとアプリケーションサービスを作成
    let allocation_service =
        SeatAllocationService::new(allocation_store, service_config.oversell_limit);
    let booking_service =
        BookingApplicationService::new(allocation_service, booking_repository, logger);
    let flight_query_service = FlightQueryService::new(flight_repository);

    // アプリケーション状態を作成
    let app_state = AppStateInner {
        booking_service: Arc::new(booking_service),
        flight_query_service: Arc::new(flight_query_service),
    };

    // REST APIルーターを作成
    let app = create_router()
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // サーバーを起動
    let listener =
        tokio::net::TcpListener::bind(("0.0.0.0", service_config.server_port)).await?;
    println!(
        "REST APIサーバーが起動しました: http://localhost:{}",
        service_config.server_port
    );
    println!(
        "ヘルスチェック: GET http://localhost:{}/health",
        service_config.server_port
    );
    println!("API仕様:");
    println!("  GET  /flights - フライト検索");
    println!("  GET  /flights/:id - フライト詳細取得");
    println!("  POST /flights - フライト登録（テスト用）");
    println!("  POST /bookings - 予約作成");
    println!("  GET  /bookings/:id - 予約詳細取得");
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}
