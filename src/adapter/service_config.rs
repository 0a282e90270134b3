use crate::adapter::database_config::ConfigError;
use std::env;

/// サービス全体の設定を管理する構造体
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTPサーバーの待ち受けポート
    pub server_port: u16,
    /// フライトごとのオーバーセル上限
    pub oversell_limit: u32,
}

impl ServiceConfig {
    /// 環境変数から設定を読み取る
    /// 環境変数が設定されていない場合はデフォルト値を使用
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid SERVER_PORT: {}", e)))?;

        let oversell_limit = env::var("OVERSELL_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid OVERSELL_LIMIT: {}", e)))?;

        Ok(Self {
            server_port,
            oversell_limit,
        })
    }
}
