use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// 适配器层的操作结果
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    ValidatorError(#[from] validator::ValidationErrors),
}

impl AppError {
    /// 结构化错误码，供上层UI拼装 { success: false, error } 响应
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::ValidatorError(_) => "VALIDATION_ERROR",
        }
    }
}

// 便利函数，用于创建常见错误
impl AppError {
    pub fn not_found(resource: &str) -> Self {
        Self::NotFound(format!("{} not found", resource))
    }

    pub fn bad_request(msg: &str) -> Self {
        Self::BadRequest(msg.to_string())
    }

    pub fn validation(msg: &str) -> Self {
        Self::Validation(msg.to_string())
    }
}

// 从其他错误类型转换
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// 后端适配器的错误分类。
///
/// `Recoverable` 表示基础设施层面的故障（网络不可达、表不存在、5xx），
/// 选择器收到后允许降级到本地缓存重做一次；`Fatal` 表示后端明确拒绝了
/// 这次操作，降级无意义，直接向调用方冒泡。
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Recoverable backend error: {0}")]
    Recoverable(String),

    #[error("Fatal backend error: {0}")]
    Fatal(String),
}

impl StoreError {
    pub fn recoverable(msg: impl Into<String>) -> Self {
        Self::Recoverable(msg.into())
    }

    pub fn fatal(msg: impl Into<String>) -> Self {
        Self::Fatal(msg.into())
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable(_))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Recoverable(msg) => AppError::ServiceUnavailable(msg),
            StoreError::Fatal(msg) => AppError::ExternalService(msg),
        }
    }
}
