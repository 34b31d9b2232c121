//! 文件查找模块
//!
//! 这个模块提供基于条件的文件搜索功能：[`FileFinder`] 持有根目录、符号链接
//! 策略和最大深度，把 [`FileWalker`] 产出的候选文件逐个交给 [`Condition`]
//! 评估，命中的路径按需产出（惰性）或收集为列表（急切）。

pub mod condition;
pub mod options;
pub mod walker;

use std::path::{Path, PathBuf};

use log::{debug, info};

pub use self::condition::{Condition, Operator};
pub use self::options::SearchOptions;
pub use self::walker::FileWalker;

use crate::config::Config;

/// 文件查找器
///
/// # 示例
///
/// ```no_run
/// use file_finder::{Condition, FileFinder, SearchOptions};
///
/// let finder = FileFinder::new("/path/to/search");
/// let results = finder.search(
///     &Condition::extension([".png"]).and(Condition::size_greater_than(1024)),
///     &SearchOptions::new(),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FileFinder {
    root_path: PathBuf,
    follow_symlinks: bool,
    max_depth: Option<usize>,
}

impl FileFinder {
    /// 创建以指定目录为根的查找器
    pub fn new<P: Into<PathBuf>>(root_path: P) -> Self {
        let finder = Self {
            root_path: root_path.into(),
            follow_symlinks: false,
            max_depth: None,
        };
        info!(
            "Initialized FileFinder: root={}, follow_symlinks={}, max_depth={:?}",
            finder.root_path.display(),
            finder.follow_symlinks,
            finder.max_depth
        );
        finder
    }

    /// 创建以当前工作目录为根的查找器
    pub fn current_dir() -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(root)
    }

    /// 设置是否跟随符号链接
    pub fn with_follow_symlinks(mut self, follow_symlinks: bool) -> Self {
        self.follow_symlinks = follow_symlinks;
        self
    }

    /// 设置最大递归深度（None 表示不限制；0 表示只扫描根目录内容）
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 从环境配置读取默认的符号链接策略和最大深度
    pub fn from_config<P: Into<PathBuf>>(root_path: P, config: &Config) -> Self {
        Self::new(root_path)
            .with_follow_symlinks(config.default_follow_symlinks)
            .with_max_depth(config.default_max_depth)
    }

    /// 查找器的根目录
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// 是否跟随符号链接
    pub fn follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    /// 最大递归深度
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// 急切搜索：遍历完成后返回全部匹配（受 max_results 截断）
    pub fn search(&self, condition: &Condition, options: &SearchOptions) -> Vec<PathBuf> {
        info!(
            "Starting search: recursive={}, max_results={:?}, condition={}",
            options.recursive,
            options.max_results,
            condition.description()
        );
        let results: Vec<PathBuf> = self.search_iter(condition, options).collect();
        info!("Search completed: found {} files", results.len());
        results
    }

    /// 惰性搜索：返回按需遍历的迭代器
    ///
    /// 迭代器是单遍、只进的；每次调用都从根目录重新开始。消费者中途放弃
    /// 迭代即停止全部 I/O。
    pub fn search_iter<'a>(
        &self,
        condition: &'a Condition,
        options: &SearchOptions,
    ) -> SearchIter<'a> {
        SearchIter {
            walker: FileWalker::new(
                &self.root_path,
                self.follow_symlinks,
                self.max_depth,
                options.recursive,
            ),
            condition,
            max_results: options.max_results,
            yielded: 0,
        }
    }
}

impl Default for FileFinder {
    fn default() -> Self {
        Self::current_dir()
    }
}

/// 惰性搜索结果迭代器
///
/// 达到 max_results 后立即停止：不再扫描目录，也不再发起 stat 调用。
pub struct SearchIter<'a> {
    walker: FileWalker,
    condition: &'a Condition,
    max_results: Option<usize>,
    yielded: usize,
}

impl Iterator for SearchIter<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if let Some(max) = self.max_results {
            if self.yielded >= max {
                debug!("Reached max_results limit: {}", max);
                return None;
            }
        }

        for path in self.walker.by_ref() {
            if self.condition.evaluate(&path, None) {
                debug!("Match found: {}", path.display());
                self.yielded += 1;
                return Some(path);
            }
        }
        None
    }
}
