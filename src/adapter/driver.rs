// ドライバーアダプター（入力ポートの実装）

pub mod request_dto;
pub mod response_dto;
pub mod rest_api;
