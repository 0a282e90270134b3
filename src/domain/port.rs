// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::model::{Booking, BookingId, Flight, FlightId};
use async_trait::async_trait;
use chrono::NaiveDate;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// ロガートレイト
/// ログ出力を抽象化するポート
pub trait Logger: Send + Sync {
    /// デバッグレベルのログを出力
    fn debug(&self, component: &str, message: &str);

    /// 情報レベルのログを出力
    fn info(&self, component: &str, message: &str);

    /// 警告レベルのログを出力
    fn warn(&self, component: &str, message: &str);

    /// エラーレベルのログを出力
    fn error(&self, component: &str, message: &str);
}

/// リポジトリエラー型
/// リポジトリ操作で発生するエラーを表現する
/// 呼び出し元から見て一時的（リトライ可能）なエラーのクラス
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::enum_variant_names)]
pub enum RepositoryError {
    /// データベース接続に失敗
    ConnectionFailed(String),
    /// 操作に失敗
    OperationFailed(String),
    /// データの取得に失敗
    FetchFailed(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            RepositoryError::OperationFailed(msg) => write!(f, "Operation failed: {}", msg),
            RepositoryError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// フライト検索条件
/// 指定されたフィールドのみで絞り込む
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightSearchCriteria {
    /// 出発空港コード
    pub departure_airport: Option<String>,
    /// 到着空港コード
    pub arrival_airport: Option<String>,
    /// 航空会社
    pub airline: Option<String>,
    /// 出発日（出発時刻の日付部分と比較）
    pub departure_date: Option<NaiveDate>,
}

/// フライトリポジトリトレイト
/// フライト集約の読み取りを抽象化する
/// フライトの作成・更新は外部の在庫管理プロセスが担うため、
/// save はシード用途（テスト・運用ツール）に限る
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// フライトを保存する
    ///
    /// # Arguments
    /// * `flight` - 保存するフライト
    ///
    /// # Returns
    /// * `Ok(())` - 保存成功
    /// * `Err(RepositoryError)` - 保存失敗
    async fn save(&self, flight: &Flight) -> Result<(), RepositoryError>;

    /// フライトIDでフライトを検索する
    ///
    /// # Arguments
    /// * `flight_id` - 検索するフライトID
    ///
    /// # Returns
    /// * `Ok(Some(Flight))` - フライトが見つかった
    /// * `Ok(None)` - フライトが見つからなかった
    /// * `Err(RepositoryError)` - 検索失敗
    async fn find_by_id(&self, flight_id: FlightId) -> Result<Option<Flight>, RepositoryError>;

    /// 検索条件に一致するフライトをページ指定で取得する
    /// 出発時刻の昇順で並べて返す
    ///
    /// # Arguments
    /// * `criteria` - 検索条件
    /// * `page` - ページ番号（1始まり）
    /// * `page_size` - 1ページあたりの件数
    ///
    /// # Returns
    /// * `Ok((Vec<Flight>, i64))` - フライトのリストと総件数
    /// * `Err(RepositoryError)` - 検索失敗
    async fn search(
        &self,
        criteria: &FlightSearchCriteria,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Flight>, i64), RepositoryError>;
}

/// 予約リポジトリトレイト
/// 予約集約の読み取りを抽象化する
/// 予約の作成は割り当てトランザクションの内部でのみ行われる
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 予約IDで予約を検索する
    ///
    /// # Arguments
    /// * `booking_id` - 検索する予約ID
    ///
    /// # Returns
    /// * `Ok(Some(Booking))` - 予約が見つかった
    /// * `Ok(None)` - 予約が見つからなかった
    /// * `Err(RepositoryError)` - 検索失敗
    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>, RepositoryError>;
}

/// 割り当てストアトレイト
/// 座席割り当てユニット（ロック付き読み取り → 更新 → 予約作成）を
/// ひとつのトランザクションとして実行するためのポート
///
/// 契約:
/// * `lock_flight` は同一フライトIDに対する並行呼び出しを
///   トランザクション終了まで直列化する（排他ロック）
/// * `save_flight` / `insert_booking` は同じトランザクション内でのみ有効
/// * `commit` せずに `Tx` をドロップした場合はロールバックされ、
///   部分的な状態は一切残らない
#[async_trait]
pub trait AllocationStore: Send + Sync {
    /// トランザクションハンドル
    type Tx: Send;

    /// トランザクションを開始する
    async fn begin(&self) -> Result<Self::Tx, RepositoryError>;

    /// フライト行を排他ロック付きで読み取る
    ///
    /// # Returns
    /// * `Ok(Some(Flight))` - ロックを取得してフライトを読み取った
    /// * `Ok(None)` - フライトが存在しない
    /// * `Err(RepositoryError)` - ロック取得または読み取りに失敗
    async fn lock_flight(
        &self,
        tx: &mut Self::Tx,
        flight_id: FlightId,
    ) -> Result<Option<Flight>, RepositoryError>;

    /// 空席数を更新したフライトを保存する
    async fn save_flight(&self, tx: &mut Self::Tx, flight: &Flight)
        -> Result<(), RepositoryError>;

    /// 予約を作成する
    async fn insert_booking(
        &self,
        tx: &mut Self::Tx,
        booking: &Booking,
    ) -> Result<(), RepositoryError>;

    /// トランザクションをコミットする
    async fn commit(&self, tx: Self::Tx) -> Result<(), RepositoryError>;
}
