use std::fmt;

#[derive(Debug, Clone)]
pub enum LinkRotatorError {
    StorageUnavailable(String),
    FileOperation(String),
    Serialization(String),
    InvalidPoolFormat(String),
    EmptyPool(String),
    NotFound(String),
    Validation(String),
}

impl LinkRotatorError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkRotatorError::StorageUnavailable(_) => "E001",
            LinkRotatorError::FileOperation(_) => "E002",
            LinkRotatorError::Serialization(_) => "E003",
            LinkRotatorError::InvalidPoolFormat(_) => "E004",
            LinkRotatorError::EmptyPool(_) => "E005",
            LinkRotatorError::NotFound(_) => "E006",
            LinkRotatorError::Validation(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkRotatorError::StorageUnavailable(_) => "Storage Unavailable",
            LinkRotatorError::FileOperation(_) => "File Operation Error",
            LinkRotatorError::Serialization(_) => "Serialization Error",
            LinkRotatorError::InvalidPoolFormat(_) => "Invalid Pool Format",
            LinkRotatorError::EmptyPool(_) => "Empty Pool",
            LinkRotatorError::NotFound(_) => "Resource Not Found",
            LinkRotatorError::Validation(_) => "Validation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkRotatorError::StorageUnavailable(msg) => msg,
            LinkRotatorError::FileOperation(msg) => msg,
            LinkRotatorError::Serialization(msg) => msg,
            LinkRotatorError::InvalidPoolFormat(msg) => msg,
            LinkRotatorError::EmptyPool(msg) => msg,
            LinkRotatorError::NotFound(msg) => msg,
            LinkRotatorError::Validation(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 CLI 出错时）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkRotatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkRotatorError {}

// 便捷的构造函数
impl LinkRotatorError {
    pub fn storage_unavailable<T: Into<String>>(msg: T) -> Self {
        LinkRotatorError::StorageUnavailable(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkRotatorError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkRotatorError::Serialization(msg.into())
    }

    pub fn invalid_pool_format<T: Into<String>>(msg: T) -> Self {
        LinkRotatorError::InvalidPoolFormat(msg.into())
    }

    pub fn empty_pool<T: Into<String>>(msg: T) -> Self {
        LinkRotatorError::EmptyPool(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkRotatorError::NotFound(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkRotatorError::Validation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for LinkRotatorError {
    fn from(err: std::io::Error) -> Self {
        LinkRotatorError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkRotatorError {
    fn from(err: serde_json::Error) -> Self {
        LinkRotatorError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LinkRotatorError {
    fn from(err: chrono::ParseError) -> Self {
        LinkRotatorError::InvalidPoolFormat(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkRotatorError>;
