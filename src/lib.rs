//! 按条件查找文件的库
//!
//! 本库提供了灵活的文件搜索功能，支持：
//! - 可组合的搜索条件（扩展名、大小、名称、路径、位置、时间）
//! - AND/OR 条件链，带短路求值
//! - 惰性（迭代器）或急切（列表）两种结果消费方式
//! - 深度受限、符号链接可控的目录遍历
//!
//! ## 使用场景
//!
//! - 在项目中查找特定类型或大小的文件
//! - 清理过时或超大文件
//! - 构建自动化工具链
//!
//! # 示例
//!
//! 基本用法：
//! ```no_run
//! use file_finder::{Condition, FileFinder, SearchOptions};
//!
//! // 创建查找器并设置选项
//! let finder = FileFinder::new(".")
//!     .with_max_depth(Some(3))       // 最大搜索深度
//!     .with_follow_symlinks(false);  // 不跟随符号链接
//!
//! // 组合搜索条件：大于 1KB 的 .png 或 .jpg 文件
//! let condition = Condition::extension([".png", ".jpg"])
//!     .and(Condition::size_greater_than(1024));
//!
//! // 执行搜索（急切模式）
//! let results = finder.search(&condition, &SearchOptions::new());
//! for path in results {
//!     println!("找到文件: {}", path.display());
//! }
//!
//! // 或者惰性消费，随时停止
//! for path in finder.search_iter(&condition, &SearchOptions::new()).take(10) {
//!     println!("找到文件: {}", path.display());
//! }
//! ```
//!
//! 更多用法请参考各模块文档。

pub mod cli;
pub mod config;
pub mod errors;
pub mod finder;

// Re-export main types for convenience
pub use config::{setup_logging, Config};
pub use errors::{FindError, FindResult};
pub use finder::{Condition, FileFinder, Operator, SearchIter, SearchOptions};
