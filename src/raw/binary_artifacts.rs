use crate::error::Capability;
use crate::models::{BinaryArtifactData, File, FileKind};
use crate::raw::file_matcher::{on_matching_file_content_do, on_matching_file_reader_do, PathMatcher};
use crate::services::{query_optional, RepoAccess};
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use std::collections::HashSet;
use std::io::Read;

/// 判断文本/二进制时读取的字节数
const BINARY_TEST_LEN: u64 = 1024;
const UTF8_MAX: usize = 4;

const GRADLE_WRAPPER_JAR: &str = "gradle-wrapper.jar";
const GRADLE_VALIDATION_ACTIONS: &[&str] = &[
    "gradle/wrapper-validation-action@",
    "gradle/actions/wrapper-validation@",
];

const ALL_FILES: PathMatcher = PathMatcher {
    pattern: "*",
    case_sensitive: false,
};

const WORKFLOW_FILES: PathMatcher = PathMatcher {
    pattern: ".github/workflows/*",
    case_sensitive: false,
};

lazy_static! {
    /// 可执行文件、库、归档与字节码格式
    static ref BINARY_FILE_TYPES: HashSet<&'static str> = [
        "crx", "deb", "dex", "dey", "elf", "o", "a", "so", "macho", "iso", "class", "jar",
        "bundle", "dylib", "lib", "msi", "dll", "drv", "efi", "exe", "ocx", "pyc", "pyo",
        "par", "rpm", "wasm", "whl",
    ]
    .into_iter()
    .collect();
}

/// Magic numbers, checked in order; the first match wins.
///
/// ISO 9660 images carry their signature at offset 0x8001, past the sniffed
/// prefix, so they are only caught by extension.
const MAGIC_SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x7fELF", "elf"),
    (b"\xfe\xed\xfa\xce", "macho"),
    (b"\xfe\xed\xfa\xcf", "macho"),
    (b"\xce\xfa\xed\xfe", "macho"),
    (b"\xcf\xfa\xed\xfe", "macho"),
    (b"\xca\xfe\xba\xbe", "class"),
    (b"\x00asm", "wasm"),
    (b"!<arch>\ndebian", "deb"),
    // 其余 ar 归档按静态库处理
    (b"!<arch>\n", "a"),
    (b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1", "msi"),
    (b"\xed\xab\xee\xdb", "rpm"),
    (b"dex\n", "dex"),
    (b"dey\n", "dey"),
    (b"Cr24", "crx"),
    (b"MZ", "exe"),
    (b"PK\x03\x04", "zip"),
    (b"%PDF", "pdf"),
    (b"\x89PNG\r\n\x1a\n", "png"),
    (b"GIF8", "gif"),
];

/// 收集仓库中的二进制文件
pub fn collect(access: &dyn RepoAccess) -> Result<BinaryArtifactData> {
    let mut files = Vec::new();

    on_matching_file_reader_do(access, &ALL_FILES, |path, reader| {
        let mut prefix = Vec::with_capacity(BINARY_TEST_LEN as usize);
        reader
            .take(BINARY_TEST_LEN)
            .read_to_end(&mut prefix)
            .with_context(|| format!("reading file: {}", path))?;

        if classify(path, &prefix) == FileKind::Binary {
            files.push(File::new(path, FileKind::Binary));
        }
        Ok(true)
    })?;

    mark_validated_gradle_wrappers(access, &mut files)?;

    Ok(BinaryArtifactData { files })
}

/// Classifies one file from its path and at most the first 1024 bytes.
pub fn classify(path: &str, prefix: &[u8]) -> FileKind {
    if prefix.is_empty() {
        return FileKind::Source;
    }

    if let Some(sniffed) = sniff_extension(prefix) {
        if BINARY_FILE_TYPES.contains(sniffed) {
            return FileKind::Binary;
        }
    }

    let known_extension = normalized_extension(path)
        .map(|ext| BINARY_FILE_TYPES.contains(ext.as_str()))
        .unwrap_or(false);
    if known_extension && !is_text(prefix) {
        return FileKind::Binary;
    }

    FileKind::Source
}

fn sniff_extension(prefix: &[u8]) -> Option<&'static str> {
    MAGIC_SIGNATURES
        .iter()
        .find(|(magic, _)| prefix.starts_with(magic))
        .map(|(_, ext)| *ext)
}

fn normalized_extension(path: &str) -> Option<String> {
    std::path::Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// 控制字符（TAB/LF/CR 除外）说明不是文本
///
/// Control bytes never occur inside a multi-byte UTF-8 sequence, so a byte
/// scan is enough. The last `UTF8_MAX - 1` bytes may hold a truncated
/// character and are ignored.
fn is_text(prefix: &[u8]) -> bool {
    let prefix = &prefix[..prefix.len().min(BINARY_TEST_LEN as usize)];
    let checked = prefix.len().saturating_sub(UTF8_MAX - 1);
    !prefix[..checked]
        .iter()
        .any(|&b| b < b' ' && b != b'\n' && b != b'\t' && b != b'\r')
}

fn is_gradle_wrapper(path: &str) -> bool {
    file_name(path) == GRADLE_WRAPPER_JAR
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// 已被 CI 校验的 gradle-wrapper.jar 标记为 BinaryVerified（保留在列表中）
fn mark_validated_gradle_wrappers(access: &dyn RepoAccess, files: &mut [File]) -> Result<()> {
    let has_wrapper = files
        .iter()
        .any(|f| f.kind == FileKind::Binary && is_gradle_wrapper(&f.path));
    if !has_wrapper {
        return Ok(());
    }

    let validated = gradle_wrapper_validated(access)
        .context("failure checking for Gradle wrapper validating Action")?;
    if !validated {
        return Ok(());
    }

    for file in files.iter_mut().filter(|f| is_gradle_wrapper(&f.path)) {
        log::debug!("Gradle wrapper validated on head commit: {}", file.path);
        file.kind = FileKind::BinaryVerified;
    }
    Ok(())
}

fn gradle_wrapper_validated(access: &dyn RepoAccess) -> Result<bool> {
    let mut validating_workflow = None;
    on_matching_file_content_do(access, &WORKFLOW_FILES, |path, content| {
        if workflow_validates_gradle_wrapper(content) {
            validating_workflow = Some(file_name(path).to_string());
            return Ok(false);
        }
        Ok(true)
    })?;

    let Some(workflow) = validating_workflow else {
        return Ok(false);
    };

    let runs = query_optional(access, Capability::WorkflowRuns, || {
        access.list_successful_workflow_runs(&workflow)
    })
    .context("failure listing workflow runs")?;
    let Some(runs) = runs else {
        return Ok(false);
    };

    let commits = query_optional(access, Capability::CommitHistory, || access.list_commits())
        .context("failure listing commits")?;
    let Some(head) = commits.as_ref().and_then(|c| c.first()) else {
        return Ok(false);
    };

    Ok(runs.iter().any(|run| run.head_sha == head.sha))
}

fn workflow_validates_gradle_wrapper(content: &[u8]) -> bool {
    let Ok(doc) = serde_yaml::from_slice::<serde_yaml::Value>(content) else {
        // 解析失败：不是我们要找的工作流
        return false;
    };
    let Some(jobs) = doc.get("jobs").and_then(|j| j.as_mapping()) else {
        return false;
    };

    jobs.values()
        .filter_map(|job| job.get("steps").and_then(|s| s.as_sequence()))
        .flatten()
        .filter_map(|step| step.get("uses").and_then(|u| u.as_str()))
        .any(|uses| GRADLE_VALIDATION_ACTIONS.iter().any(|p| uses.starts_with(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Commit, WorkflowRun};
    use crate::services::fake_repo::FakeRepo;
    use chrono::Utc;

    const VALIDATION_WORKFLOW: &str = r#"
name: gradle
on: [push]
jobs:
  validation:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: gradle/actions/wrapper-validation@v3
"#;

    fn commit(sha: &str) -> Commit {
        Commit {
            sha: sha.to_string(),
            message: "update".to_string(),
            author: "dev".to_string(),
            committed_at: Utc::now(),
            merge_request: None,
        }
    }

    fn run_on(sha: &str) -> WorkflowRun {
        WorkflowRun {
            head_sha: sha.to_string(),
            url: format!("https://ci.example/{}", sha),
        }
    }

    fn jar_bytes() -> Vec<u8> {
        let mut bytes = b"PK\x03\x04".to_vec();
        bytes.extend_from_slice(&[0x14, 0x00, 0x08, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        bytes
    }

    fn gradle_repo() -> FakeRepo {
        FakeRepo::new()
            .with_file("gradle/wrapper/gradle-wrapper.jar", jar_bytes())
            .with_file(".github/workflows/gradle.yml", VALIDATION_WORKFLOW)
    }

    #[test]
    fn test_empty_file_is_source() {
        assert_eq!(classify("tool.exe", b""), FileKind::Source);
    }

    #[test]
    fn test_printable_exe_with_pe_magic_is_binary() {
        let prefix = b"MZThis program cannot be run in DOS mode";
        assert!(is_text(prefix));
        assert_eq!(classify("tool.exe", prefix), FileKind::Binary);
    }

    #[test]
    fn test_exe_extension_with_control_byte_is_binary() {
        let prefix = b"hello\x01world, this is not really text";
        assert_eq!(classify("tool.exe", prefix), FileKind::Binary);
    }

    #[test]
    fn test_exe_extension_with_plain_text_is_source() {
        let prefix = b"echo hello\n\tworld\r\n";
        assert_eq!(classify("tool.exe", prefix), FileKind::Source);
    }

    #[test]
    fn test_sniffed_magic_wins_over_extension() {
        assert_eq!(classify("notes.txt", b"\x7fELF\x02\x01\x01"), FileKind::Binary);
        assert_eq!(classify("module.bin", b"\x00asm\x01\x00\x00\x00"), FileKind::Binary);
    }

    #[test]
    fn test_sniffed_archive_and_bytecode_types_without_extension() {
        assert_eq!(classify("classes.odex", b"dey\n036\0dex\n035\0"), FileKind::Binary);
        assert_eq!(classify("libfoo", b"!<arch>\n/               0           "), FileKind::Binary);
        assert_eq!(
            classify("installer", b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1\x00\x00"),
            FileKind::Binary
        );
        assert_eq!(classify("app.deb", b"!<arch>\ndebian-binary   "), FileKind::Binary);
    }

    #[test]
    fn test_iso_is_caught_by_extension_only() {
        assert_eq!(classify("disk.iso", b"\x00\x00\x00\x00\x01"), FileKind::Binary);
        assert_eq!(classify("disk", b"\x00\x00\x00\x00\x01"), FileKind::Source);
    }

    #[test]
    fn test_non_binary_sniffed_type_falls_through() {
        // PNG 不在二进制集合中，扩展名也不在
        assert_eq!(classify("logo.png", b"\x89PNG\r\n\x1a\n\x00\x00"), FileKind::Source);
        // zip 魔数 + jar 扩展名 + 控制字符 => Binary
        assert_eq!(classify("lib/app.JAR", &jar_bytes()), FileKind::Binary);
    }

    #[test]
    fn test_unknown_extension_with_control_bytes_is_source() {
        assert_eq!(classify("data.dat", b"\x01\x02\x03\x04\x05\x06"), FileKind::Source);
    }

    #[test]
    fn test_is_text_ignores_trailing_partial_sequence() {
        assert!(is_text(b"plain text\x01"));
        assert!(!is_text(b"plain\x01 text"));
        assert!(is_text("héllo wörld".as_bytes()));
    }

    #[test]
    fn test_collect_records_only_binaries() {
        let repo = FakeRepo::new()
            .with_file("README.md", "# readme")
            .with_file("empty.exe", "")
            .with_file("bin/tool.exe", b"MZ\x90\x00\x03".to_vec())
            .with_file("lib/native.so", b"\x7fELF\x02".to_vec());

        let data = collect(&repo).unwrap();
        let paths: Vec<&str> = data.files.iter().map(|f| f.path.as_str()).collect();

        assert_eq!(paths, vec!["bin/tool.exe", "lib/native.so"]);
        assert!(data.files.iter().all(|f| f.kind == FileKind::Binary));
    }

    #[test]
    fn test_gradle_wrapper_validated_on_head_is_verified() {
        let repo = gradle_repo()
            .with_commits(vec![commit("head"), commit("older")])
            .with_workflow_runs("gradle.yml", vec![run_on("older"), run_on("head")]);

        let data = collect(&repo).unwrap();

        assert_eq!(data.files.len(), 1);
        assert_eq!(data.files[0].path, "gradle/wrapper/gradle-wrapper.jar");
        assert_eq!(data.files[0].kind, FileKind::BinaryVerified);
    }

    #[test]
    fn test_gradle_wrapper_validated_on_old_commit_stays_binary() {
        let repo = gradle_repo()
            .with_commits(vec![commit("head"), commit("older")])
            .with_workflow_runs("gradle.yml", vec![run_on("older")]);

        let data = collect(&repo).unwrap();
        assert_eq!(data.files[0].kind, FileKind::Binary);
    }

    #[test]
    fn test_gradle_wrapper_without_workflow_runs_support_stays_binary() {
        let repo = gradle_repo()
            .with_commits(vec![commit("head")])
            .without(Capability::WorkflowRuns);

        let data = collect(&repo).unwrap();
        assert_eq!(data.files[0].kind, FileKind::Binary);
    }

    #[test]
    fn test_gradle_commit_listing_failure_is_an_error() {
        let repo = gradle_repo()
            .with_workflow_runs("gradle.yml", vec![run_on("head")])
            .failing(Capability::CommitHistory);

        let err = collect(&repo).unwrap_err();
        assert!(format!("{:#}", err).contains("Gradle wrapper"));
    }

    #[test]
    fn test_unparsable_workflow_is_ignored() {
        assert!(!workflow_validates_gradle_wrapper(b"jobs: [unclosed"));
        assert!(workflow_validates_gradle_wrapper(VALIDATION_WORKFLOW.as_bytes()));
    }

    #[test]
    fn test_file_listing_failure_is_an_error() {
        let repo = FakeRepo::new().failing(Capability::FileListing);
        assert!(collect(&repo).is_err());
    }
}
