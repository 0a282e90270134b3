// アダプター層
// 外部システムとの接続を担当する

pub mod database_config;
pub mod database_error;
pub mod database_migration;
pub mod driven;
pub mod driver;
pub mod service_config;
