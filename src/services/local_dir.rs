use crate::error::{AccessError, AccessResult, Capability};
use crate::services::RepoAccess;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

// 不跟随符号链接，因此遍历不会成环
const SKIP_DIR_NAMES: &[&str] = &[".git"];

/// 本地目录仓库：只提供文件相关能力
pub struct LocalDirAccess {
    root: PathBuf,
}

impl LocalDirAccess {
    pub fn new(root: impl Into<PathBuf>) -> AccessResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AccessError::NotFound(format!(
                "Directory does not exist: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> AccessResult<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(AccessError::NotFound(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl RepoAccess for LocalDirAccess {
    fn supports(&self, capability: Capability) -> bool {
        matches!(capability, Capability::FileListing | Capability::FileContent)
    }

    fn list_files(&self, predicate: &dyn Fn(&str) -> bool) -> AccessResult<Vec<String>> {
        let mut files = Vec::new();
        let mut iter = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(next) = iter.next() {
            let entry = match next {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("Failed to read directory entry under {:?}: {}", self.root, e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    if SKIP_DIR_NAMES.contains(&name) {
                        log::debug!("Skipping directory: {:?}", entry.path());
                        iter.skip_current_dir();
                    }
                }
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }

            let rel = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            // 统一使用 `/` 作为分隔符
            let rel_str = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if predicate(&rel_str) {
                files.push(rel_str);
            }
        }

        Ok(files)
    }

    fn file_reader(&self, path: &str) -> AccessResult<Box<dyn Read + '_>> {
        let full = self.resolve(path)?;
        let file = std::fs::File::open(&full).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AccessError::NotFound(path.to_string()),
            _ => AccessError::Io(e),
        })?;
        Ok(Box::new(file))
    }
}
