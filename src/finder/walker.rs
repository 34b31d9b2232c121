//! 文件系统遍历功能
//!
//! 本模块提供惰性的目录遍历迭代器：每次拉取产出一个候选文件路径，
//! 遍历状态（当前目录的待产出文件、待递归子目录、深度）保存在一个显式的
//! 帧栈上，消费者停止拉取即停止一切 I/O。
//!
//! 产出顺序：同一目录内先产出全部文件，再按目录列表顺序逐个递归子目录。
//! 目录列表在单个 `read_dir` 作用域内一次性读完，不会跨产出点持有句柄。

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

/// 单个目录的遍历帧
struct Frame {
    /// 本目录中尚未产出的文件
    files: std::vec::IntoIter<PathBuf>,
    /// 本目录中尚未进入的子目录（按列表顺序）
    dirs: std::vec::IntoIter<PathBuf>,
    /// 本目录的深度（根目录内容为 0）
    depth: usize,
}

/// 基于显式帧栈的惰性文件遍历器
///
/// 根目录在第一次拉取时才被扫描，不存在的根目录与任何不可读目录一样被
/// 跳过（记录警告），产出空序列而不是错误。
pub struct FileWalker {
    pending_root: Option<PathBuf>,
    stack: Vec<Frame>,
    follow_symlinks: bool,
    max_depth: Option<usize>,
    recursive: bool,
}

impl FileWalker {
    /// 创建新的遍历器
    ///
    /// `recursive = false` 时完全不进入子目录，`max_depth` 不再起作用。
    pub fn new<P: AsRef<Path>>(
        root: P,
        follow_symlinks: bool,
        max_depth: Option<usize>,
        recursive: bool,
    ) -> Self {
        Self {
            pending_root: Some(root.as_ref().to_path_buf()),
            stack: Vec::new(),
            follow_symlinks,
            max_depth,
            recursive,
        }
    }

    /// 扫描单个目录，把它的直接条目分拣为文件和子目录
    ///
    /// 不可读的目录或条目直接跳过；符号链接在不跟随时整体忽略，
    /// 跟随时按解析后的类型处理（悬空链接跳过）。
    fn scan_dir(dir: &Path, depth: usize, follow_symlinks: bool, recursive: bool) -> Frame {
        debug!("Scanning directory: {} (depth={})", dir.display(), depth);

        let mut files = Vec::new();
        let mut dirs = Vec::new();

        match fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries {
                    let entry = match entry {
                        Ok(entry) => entry,
                        Err(_) => continue,
                    };
                    let file_type = match entry.file_type() {
                        Ok(file_type) => file_type,
                        Err(_) => continue,
                    };
                    let path = entry.path();

                    let (is_file, is_dir) = if file_type.is_symlink() {
                        if !follow_symlinks {
                            continue;
                        }
                        // 跟随符号链接：按目标类型处理
                        match fs::metadata(&path) {
                            Ok(meta) => (meta.is_file(), meta.is_dir()),
                            Err(_) => continue,
                        }
                    } else {
                        (file_type.is_file(), file_type.is_dir())
                    };

                    if is_file {
                        files.push(path);
                    } else if is_dir && recursive {
                        dirs.push(path);
                    }
                }
            }
            Err(err) => {
                warn!("Cannot access directory {}: {}", dir.display(), err);
            }
        }

        Frame {
            files: files.into_iter(),
            dirs: dirs.into_iter(),
            depth,
        }
    }
}

impl Iterator for FileWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if let Some(root) = self.pending_root.take() {
            let frame = Self::scan_dir(&root, 0, self.follow_symlinks, self.recursive);
            self.stack.push(frame);
        }

        loop {
            let frame = self.stack.last_mut()?;

            if let Some(file) = frame.files.next() {
                return Some(file);
            }

            match frame.dirs.next() {
                Some(dir) => {
                    let depth = frame.depth + 1;
                    // 深度恰好等于 max_depth 的目录仍会被扫描
                    if self.max_depth.map_or(true, |max| depth <= max) {
                        let frame =
                            Self::scan_dir(&dir, depth, self.follow_symlinks, self.recursive);
                        self.stack.push(frame);
                    } else {
                        debug!("Reached max_depth at: {}", dir.display());
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_file(path: &Path) {
        File::create(path).unwrap().write_all(b"test").unwrap();
    }

    /// temp_dir/
    /// ├── top1.txt
    /// ├── top2.txt
    /// └── sub/
    ///     ├── mid.txt
    ///     └── deep/
    ///         └── bottom.txt
    fn create_test_structure() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        create_file(&temp_dir.path().join("top1.txt"));
        create_file(&temp_dir.path().join("top2.txt"));
        std::fs::create_dir(temp_dir.path().join("sub")).unwrap();
        create_file(&temp_dir.path().join("sub/mid.txt"));
        std::fs::create_dir(temp_dir.path().join("sub/deep")).unwrap();
        create_file(&temp_dir.path().join("sub/deep/bottom.txt"));
        temp_dir
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_walker_yields_all_files() {
        let temp_dir = create_test_structure();
        let walker = FileWalker::new(temp_dir.path(), false, None, true);
        let entries: Vec<_> = walker.collect();
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_walker_files_before_subdirectories() {
        let temp_dir = create_test_structure();
        let walker = FileWalker::new(temp_dir.path(), false, None, true);
        let entries: Vec<_> = walker.collect();
        let found = names(&entries);

        // 根目录的文件在任何子目录文件之前产出
        let mid = found.iter().position(|n| n == "mid.txt").unwrap();
        let bottom = found.iter().position(|n| n == "bottom.txt").unwrap();
        for top in ["top1.txt", "top2.txt"] {
            let pos = found.iter().position(|n| n == top).unwrap();
            assert!(pos < mid);
        }
        // 同理 sub 的文件在 sub/deep 的文件之前
        assert!(mid < bottom);
    }

    #[test]
    fn test_walker_max_depth_zero_is_root_contents_only() {
        let temp_dir = create_test_structure();
        let walker = FileWalker::new(temp_dir.path(), false, Some(0), true);
        let entries: Vec<_> = walker.collect();
        let mut found = names(&entries);
        found.sort();
        assert_eq!(found, vec!["top1.txt", "top2.txt"]);
    }

    #[test]
    fn test_walker_max_depth_one() {
        let temp_dir = create_test_structure();
        let walker = FileWalker::new(temp_dir.path(), false, Some(1), true);
        let entries: Vec<_> = walker.collect();
        let found = names(&entries);
        assert_eq!(entries.len(), 3);
        assert!(found.contains(&"mid.txt".to_string()));
        assert!(!found.contains(&"bottom.txt".to_string()));
    }

    #[test]
    fn test_walker_non_recursive_ignores_depth() {
        let temp_dir = create_test_structure();
        let walker = FileWalker::new(temp_dir.path(), false, None, false);
        let entries: Vec<_> = walker.collect();
        let mut found = names(&entries);
        found.sort();
        assert_eq!(found, vec!["top1.txt", "top2.txt"]);
    }

    #[test]
    fn test_walker_nonexistent_root_is_empty() {
        let walker = FileWalker::new("/no/such/directory", false, None, true);
        let entries: Vec<_> = walker.collect();
        assert!(entries.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_skips_symlinks_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.txt");
        create_file(&target);
        std::os::unix::fs::symlink(&target, temp_dir.path().join("link.txt")).unwrap();

        std::fs::create_dir(temp_dir.path().join("realdir")).unwrap();
        create_file(&temp_dir.path().join("realdir/inner.txt"));
        std::os::unix::fs::symlink(
            temp_dir.path().join("realdir"),
            temp_dir.path().join("linkdir"),
        )
        .unwrap();

        let walker = FileWalker::new(temp_dir.path(), false, None, true);
        let entries: Vec<_> = walker.collect();
        let mut found = names(&entries);
        found.sort();
        // 链接既不算文件也不被当作目录进入；真实目标正常产出
        assert_eq!(found, vec!["inner.txt", "real.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_follows_symlinks_when_enabled() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.txt");
        create_file(&target);
        std::os::unix::fs::symlink(&target, temp_dir.path().join("link.txt")).unwrap();

        let walker = FileWalker::new(temp_dir.path(), true, None, true);
        let entries: Vec<_> = walker.collect();
        let mut found = names(&entries);
        found.sort();
        assert_eq!(found, vec!["link.txt", "real.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_skips_broken_symlink_when_following() {
        let temp_dir = TempDir::new().unwrap();
        create_file(&temp_dir.path().join("ok.txt"));
        std::os::unix::fs::symlink("/nonexistent/target", temp_dir.path().join("broken")).unwrap();

        let walker = FileWalker::new(temp_dir.path(), true, None, true);
        let entries: Vec<_> = walker.collect();
        assert_eq!(names(&entries), vec!["ok.txt"]);
    }

    #[test]
    fn test_walker_is_lazy() {
        let temp_dir = create_test_structure();
        let mut walker = FileWalker::new(temp_dir.path(), false, None, true);

        // 只拉取一个结果然后放弃，不应 panic 或继续遍历
        let first = walker.next();
        assert!(first.is_some());
        drop(walker);
    }
}
