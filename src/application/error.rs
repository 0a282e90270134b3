use crate::domain::error::DomainError;
use crate::domain::port::RepositoryError;

/// アプリケーション層のエラー型
/// ドメインエラーとリポジトリエラーをラップする
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationError {
    /// ドメインエラー
    DomainError(DomainError),
    /// リポジトリエラー
    RepositoryError(RepositoryError),
    /// リソースが見つからない
    NotFound(String),
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::DomainError(e) => write!(f, "Domain error: {}", e),
            ApplicationError::RepositoryError(e) => write!(f, "Repository error: {}", e),
            ApplicationError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for ApplicationError {}

impl From<DomainError> for ApplicationError {
    fn from(e: DomainError) -> Self {
        ApplicationError::DomainError(e)
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(e: RepositoryError) -> Self {
        ApplicationError::RepositoryError(e)
    }
}
