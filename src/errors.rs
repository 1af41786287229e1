use std::fmt;

#[derive(Debug, Clone)]
pub enum ShorturlError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    KeyConflict(String),
    Serialization(String),
    FileOperation(String),
}

impl ShorturlError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShorturlError::DatabaseConfig(_) => "E001",
            ShorturlError::DatabaseConnection(_) => "E002",
            ShorturlError::DatabaseOperation(_) => "E003",
            ShorturlError::Validation(_) => "E004",
            ShorturlError::NotFound(_) => "E005",
            ShorturlError::KeyConflict(_) => "E006",
            ShorturlError::Serialization(_) => "E007",
            ShorturlError::FileOperation(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShorturlError::DatabaseConfig(_) => "Database Configuration Error",
            ShorturlError::DatabaseConnection(_) => "Database Connection Error",
            ShorturlError::DatabaseOperation(_) => "Database Operation Error",
            ShorturlError::Validation(_) => "Validation Error",
            ShorturlError::NotFound(_) => "Resource Not Found",
            ShorturlError::KeyConflict(_) => "Key Conflict",
            ShorturlError::Serialization(_) => "Serialization Error",
            ShorturlError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShorturlError::DatabaseConfig(msg) => msg,
            ShorturlError::DatabaseConnection(msg) => msg,
            ShorturlError::DatabaseOperation(msg) => msg,
            ShorturlError::Validation(msg) => msg,
            ShorturlError::NotFound(msg) => msg,
            ShorturlError::KeyConflict(msg) => msg,
            ShorturlError::Serialization(msg) => msg,
            ShorturlError::FileOperation(msg) => msg,
        }
    }

    /// Whether this error came from a storage-level unique-constraint
    /// rejection. The creation path uses this to tell a lost insert race
    /// apart from other database failures.
    pub fn is_key_conflict(&self) -> bool {
        matches!(self, ShorturlError::KeyConflict(_))
    }
}

impl fmt::Display for ShorturlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for ShorturlError {}

// 便捷的构造函数
impl ShorturlError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ShorturlError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ShorturlError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ShorturlError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShorturlError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShorturlError::NotFound(msg.into())
    }

    pub fn key_conflict<T: Into<String>>(msg: T) -> Self {
        ShorturlError::KeyConflict(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShorturlError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ShorturlError::FileOperation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ShorturlError {
    fn from(err: sea_orm::DbErr) -> Self {
        ShorturlError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ShorturlError {
    fn from(err: serde_json::Error) -> Self {
        ShorturlError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ShorturlError {
    fn from(err: std::io::Error) -> Self {
        ShorturlError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShorturlError>;
