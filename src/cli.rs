//! file-finder 的命令行接口
//!
//! 本模块提供命令行参数的解析和验证，并把各个筛选参数组装成一条
//! AND 组合的搜索条件。

use clap::Parser;

use crate::config::Config;
use crate::errors::{FindError, FindResult};
use crate::finder::{Condition, FileFinder, SearchOptions};

/// 按条件查找文件
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 搜索路径（默认：当前目录）
    #[arg(default_value = ".")]
    pub path: String,

    /// 按扩展名匹配（可多次指定，任一命中即可）
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// 文件名包含指定子串
    #[arg(long, value_name = "SUBSTR")]
    pub name_contains: Option<String>,

    /// 文件名精确匹配
    #[arg(long, value_name = "NAME")]
    pub name_equals: Option<String>,

    /// 文件名匹配正则表达式
    #[arg(long, value_name = "PATTERN")]
    pub name_regex: Option<String>,

    /// 完整路径匹配正则表达式
    #[arg(long, value_name = "PATTERN")]
    pub path_regex: Option<String>,

    /// 仅搜索指定目录内的文件（可多次指定）
    #[arg(long = "in-dir", value_name = "DIR")]
    pub in_dirs: Vec<String>,

    /// 排除指定目录内的文件（可多次指定）
    #[arg(long = "not-in-dir", value_name = "DIR")]
    pub not_in_dirs: Vec<String>,

    /// 仅匹配大于指定字节数的文件
    #[arg(long, value_name = "BYTES")]
    pub larger_than: Option<u64>,

    /// 仅匹配小于指定字节数的文件
    #[arg(long, value_name = "BYTES")]
    pub smaller_than: Option<u64>,

    /// 仅匹配最近 N 天内修改过的文件
    #[arg(long, value_name = "DAYS")]
    pub modified_within: Option<u64>,

    /// 仅匹配最近 N 天内创建的文件
    #[arg(long, value_name = "DAYS")]
    pub created_within: Option<u64>,

    /// 按文件类别匹配 (image/video/audio/document/archive)
    #[arg(short = 't', long, value_name = "TYPE")]
    pub file_type: Option<String>,

    /// 最大搜索深度（0 表示只搜索根目录内容）
    #[arg(long, value_name = "NUM")]
    pub max_depth: Option<usize>,

    /// 跟随符号链接
    #[arg(short = 'L', long)]
    pub follow_symlinks: bool,

    /// 最多返回的结果数
    #[arg(long, value_name = "NUM")]
    pub max_results: Option<usize>,

    /// 不进入子目录
    #[arg(long)]
    pub no_recursive: bool,

    /// 名称匹配区分大小写
    #[arg(long)]
    pub case_sensitive: bool,

    /// 只输出匹配数量
    #[arg(short, long)]
    pub count: bool,

    /// 启用调试日志
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// 验证命令行参数
    pub fn validate(&self) -> FindResult<()> {
        if !std::path::Path::new(&self.path).exists() {
            return Err(FindError::InvalidPath(std::path::PathBuf::from(&self.path)));
        }
        Ok(())
    }

    /// 把全部筛选参数组装成一条 AND 链
    ///
    /// 未指定任何筛选参数时返回匹配所有文件的条件。
    pub fn build_condition(&self) -> FindResult<Condition> {
        let mut conditions: Vec<Condition> = Vec::new();

        if !self.extensions.is_empty() {
            conditions.push(Condition::extension(&self.extensions));
        }
        if let Some(substr) = &self.name_contains {
            conditions.push(Condition::name_contains(substr, self.case_sensitive));
        }
        if let Some(name) = &self.name_equals {
            conditions.push(Condition::name_equals(name, self.case_sensitive));
        }
        if let Some(pattern) = &self.name_regex {
            conditions.push(Condition::name_matches(pattern)?);
        }
        if let Some(pattern) = &self.path_regex {
            conditions.push(Condition::path_matches(pattern)?);
        }
        if !self.in_dirs.is_empty() {
            conditions.push(Condition::in_directory(&self.in_dirs));
        }
        if !self.not_in_dirs.is_empty() {
            conditions.push(Condition::not_in_directory(&self.not_in_dirs));
        }
        if let Some(bytes) = self.larger_than {
            conditions.push(Condition::size_greater_than(bytes));
        }
        if let Some(bytes) = self.smaller_than {
            conditions.push(Condition::size_less_than(bytes));
        }
        if let Some(days) = self.modified_within {
            conditions.push(Condition::modified_within_days(days));
        }
        if let Some(days) = self.created_within {
            conditions.push(Condition::created_within_days(days));
        }
        if let Some(file_type) = &self.file_type {
            conditions.push(Self::file_type_condition(file_type)?);
        }

        // 从右向左折叠，保持链式求值的右结合顺序
        let combined = conditions
            .into_iter()
            .rev()
            .reduce(|rest, condition| condition.and(rest));
        Ok(combined.unwrap_or_else(Condition::any_file))
    }

    fn file_type_condition(file_type: &str) -> FindResult<Condition> {
        match file_type.to_lowercase().as_str() {
            "image" => Ok(Condition::is_image()),
            "video" => Ok(Condition::is_video()),
            "audio" => Ok(Condition::is_audio()),
            "document" => Ok(Condition::is_document()),
            "archive" => Ok(Condition::is_archive()),
            other => Err(FindError::InvalidFileType(other.to_string())),
        }
    }

    /// 构建查找器，命令行参数优先于环境配置
    pub fn build_finder(&self, config: &Config) -> FileFinder {
        FileFinder::new(&self.path)
            .with_follow_symlinks(self.follow_symlinks || config.default_follow_symlinks)
            .with_max_depth(self.max_depth.or(config.default_max_depth))
    }

    /// 构建搜索选项，命令行参数优先于环境配置
    pub fn search_options(&self, config: &Config) -> SearchOptions {
        SearchOptions::new()
            .with_recursive(!self.no_recursive)
            .with_max_results(self.max_results.or(config.default_max_results))
    }
}
