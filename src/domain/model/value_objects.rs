use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// フライトの一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightId(Uuid);

impl FlightId {
    /// 新しい一意のFlightIdを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// UUIDから FlightId を作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 文字列からFlightIdを作成
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        let uuid = Uuid::parse_str(s)?;
        Ok(Self(uuid))
    }

    /// 内部のUUIDを取得
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for FlightId {
    fn default() -> Self {
        Self::new()
    }
}

/// 予約の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    /// 新しい一意のBookingIdを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// UUIDから BookingId を作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 文字列からBookingIdを作成
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        let uuid = Uuid::parse_str(s)?;
        Ok(Self(uuid))
    }

    /// 内部のUUIDを取得
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

/// 通貨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// 日本円
    #[allow(clippy::upper_case_acronyms)]
    JPY,
}

/// 金額を表す値オブジェクト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// 金額と通貨から作成
    pub fn new(amount: i64, currency: String) -> Result<Self, DomainError> {
        let currency = match currency.as_str() {
            "JPY" => Currency::JPY,
            _ => {
                return Err(DomainError::InvalidValue(format!(
                    "サポートされていない通貨: {}",
                    currency
                )))
            }
        };
        Ok(Self { amount, currency })
    }

    /// 日本円の金額を作成
    pub fn jpy(amount: i64) -> Self {
        Self {
            amount,
            currency: Currency::JPY,
        }
    }

    /// 金額を取得
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// 通貨を文字列として取得
    pub fn currency(&self) -> String {
        match self.currency {
            Currency::JPY => "JPY".to_string(),
        }
    }

    /// 金額を加算
    pub fn add(&self, other: &Money) -> Result<Money, DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch);
        }
        Ok(Money {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// 金額を乗算（座席数 × 単価の計算に使用）
    pub fn multiply(&self, factor: u32) -> Money {
        Money {
            amount: self.amount * factor as i64,
            currency: self.currency,
        }
    }
}

/// 予約のステータス
/// Rejected は永続化されず、エラーとして呼び出し元に返される
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// 確約済み（現在の空席数で賄える）
    Confirmed,
    /// キャンセル待ち（オーバーセル枠を使って受け付けた）
    Waitlisted,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Waitlisted => "Waitlisted",
        };
        write!(f, "{}", status_str)
    }
}

impl BookingStatus {
    /// 文字列からBookingStatusを作成
    pub fn from_string(s: &str) -> Result<Self, DomainError> {
        match s {
            "Confirmed" => Ok(BookingStatus::Confirmed),
            "Waitlisted" => Ok(BookingStatus::Waitlisted),
            _ => Err(DomainError::InvalidValue(format!(
                "無効な予約ステータス: {}",
                s
            ))),
        }
    }
}
