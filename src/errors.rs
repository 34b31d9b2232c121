//! file-finder 的错误类型
//!
//! 条件构造失败（无效的正则表达式、未知的文件类别）在构造时立即返回错误；
//! 遍历过程中的访问失败（权限不足、文件消失）只会降级为跳过，不会向调用方传播。

use std::path::PathBuf;

use thiserror::Error;

/// Result type for operations that can produce FindError
pub type FindResult<T> = Result<T, FindError>;

/// file-finder 的自定义错误类型
#[derive(Debug, Error)]
pub enum FindError {
    /// 模式匹配错误（无效的正则表达式）
    #[error("模式匹配错误: {message}")]
    PatternError { message: String },

    /// 无效的文件类别（--file-type 参数）
    #[error("无效的文件类别: {0}")]
    InvalidFileType(String),

    /// 指定的路径无效
    #[error("无效路径: {0}")]
    InvalidPath(PathBuf),
}

impl From<regex::Error> for FindError {
    fn from(err: regex::Error) -> Self {
        FindError::PatternError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_display() {
        let err = FindError::PatternError {
            message: "bad pattern".to_string(),
        };
        assert_eq!(err.to_string(), "模式匹配错误: bad pattern");
    }

    #[test]
    fn test_invalid_path_display() {
        let err = FindError::InvalidPath(PathBuf::from("/invalid/path"));
        assert_eq!(err.to_string(), "无效路径: /invalid/path");
    }

    #[test]
    fn test_invalid_file_type_display() {
        let err = FindError::InvalidFileType("spreadsheet".to_string());
        assert_eq!(err.to_string(), "无效的文件类别: spreadsheet");
    }

    #[test]
    fn test_from_regex_error() {
        let regex_err = regex::Regex::new("[").unwrap_err();
        let err: FindError = regex_err.into();
        assert!(matches!(err, FindError::PatternError { .. }));
    }
}
