use crate::error::{AccessError, Capability};
use crate::services::RepoAccess;
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::io::Read;

/// 路径匹配规则（glob）
#[derive(Debug, Clone)]
pub struct PathMatcher {
    pub pattern: &'static str,
    pub case_sensitive: bool,
}

impl PathMatcher {
    fn compile(&self) -> Result<GlobMatcher> {
        let glob = GlobBuilder::new(self.pattern)
            .case_insensitive(!self.case_sensitive)
            .literal_separator(false)
            .build()
            .with_context(|| format!("invalid path pattern: {}", self.pattern))?;
        Ok(glob.compile_matcher())
    }
}

/// Lists files matching `matcher`; an unsupported listing yields no files.
pub fn matching_files(access: &dyn RepoAccess, matcher: &PathMatcher) -> Result<Vec<String>> {
    let glob = matcher.compile()?;
    match access.list_files(&|path| glob.is_match(path)) {
        Ok(files) => Ok(files),
        Err(AccessError::Unsupported(capability)) => {
            log::warn!("File listing unsupported ({:?}), treating repository as empty", capability);
            Ok(Vec::new())
        }
        Err(e) => Err(e).context("listing repository files"),
    }
}

/// Calls `on_file` with a reader for each matching file until it returns
/// `Ok(false)`.
pub fn on_matching_file_reader_do<F>(
    access: &dyn RepoAccess,
    matcher: &PathMatcher,
    mut on_file: F,
) -> Result<()>
where
    F: FnMut(&str, &mut dyn Read) -> Result<bool>,
{
    if !access.supports(Capability::FileContent) {
        log::warn!("File content unsupported, skipping {}", matcher.pattern);
        return Ok(());
    }
    for path in matching_files(access, matcher)? {
        let mut boxed = access
            .file_reader(&path)
            .with_context(|| format!("opening {}", path))?;
        let reader: &mut dyn Read = &mut boxed;
        if !on_file(&path, reader)? {
            break;
        }
    }
    Ok(())
}

/// Same as [`on_matching_file_reader_do`] with the whole content loaded.
pub fn on_matching_file_content_do<F>(
    access: &dyn RepoAccess,
    matcher: &PathMatcher,
    mut on_file: F,
) -> Result<()>
where
    F: FnMut(&str, &[u8]) -> Result<bool>,
{
    on_matching_file_reader_do(access, matcher, |path, reader| {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .with_context(|| format!("reading {}", path))?;
        on_file(path, &content)
    })
}
