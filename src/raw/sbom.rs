use crate::error::Capability;
use crate::models::{File, FileKind, SbomData, SbomFile, SbomOrigin};
use crate::raw::file_matcher::{matching_files, PathMatcher};
use crate::services::{query_optional, RepoAccess};
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;

/// 检查 SBOM 资产的最近发布数量
const RELEASE_LOOKBACK: usize = 5;

const ALL_FILES: PathMatcher = PathMatcher {
    pattern: "*",
    case_sensitive: false,
};

lazy_static! {
    pub static ref SBOM_FILE: Regex = Regex::new(
        r"(?i).+\.(cdx.json|cdx.xml|spdx|spdx.json|spdx.xml|spdx.y[a?]ml|spdx.rdf|spdx.rdf.xm)"
    )
    .expect("SBOM file pattern is valid");
}

pub fn collect(access: &dyn RepoAccess) -> Result<SbomData> {
    let mut files = Vec::new();

    for path in matching_files(access, &ALL_FILES)? {
        if SBOM_FILE.is_match(&path) {
            let origin = if path.contains('/') {
                SbomOrigin::Source
            } else {
                SbomOrigin::Standards
            };
            files.push(SbomFile {
                name: path.rsplit('/').next().unwrap_or(&path).to_string(),
                origin,
                file: File::new(path.as_str(), FileKind::Source),
            });
        }
    }

    let releases = query_optional(access, Capability::Releases, || access.list_releases())
        .context("failure listing releases")?
        .unwrap_or_default();
    let release_count = releases.len().min(RELEASE_LOOKBACK);

    for release in releases.iter().take(RELEASE_LOOKBACK) {
        for asset in release.assets.iter().filter(|a| SBOM_FILE.is_match(&a.name)) {
            files.push(SbomFile {
                name: asset.name.clone(),
                origin: SbomOrigin::Release,
                file: File::new(asset.url.as_str(), FileKind::Url),
            });
        }
    }

    Ok(SbomData {
        files,
        release_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Release, ReleaseAsset};
    use crate::services::fake_repo::FakeRepo;

    fn release(assets: &[&str]) -> Release {
        Release {
            tag_name: "v1.0.0".to_string(),
            target_commitish: "main".to_string(),
            url: "https://example.com/releases/v1.0.0".to_string(),
            assets: assets
                .iter()
                .map(|name| ReleaseAsset {
                    name: name.to_string(),
                    url: format!("https://example.com/download/{}", name),
                })
                .collect(),
        }
    }

    #[test]
    fn test_sbom_in_release_artifacts() {
        let repo = FakeRepo::new().with_releases(vec![release(&["test-sbom.cdx.json", "app.tar.gz"])]);

        let data = collect(&repo).unwrap();

        assert_eq!(data.release_count, 1);
        assert_eq!(data.files.len(), 1);
        assert_eq!(data.files[0].name, "test-sbom.cdx.json");
        assert_eq!(data.files[0].origin, SbomOrigin::Release);
        assert_eq!(data.files[0].file.kind, FileKind::Url);
    }

    #[test]
    fn test_sbom_in_source() {
        let repo = FakeRepo::new()
            .with_file("docs/test-sbom.SPDX.json", "{}")
            .with_file("src/lib.rs", "");

        let data = collect(&repo).unwrap();

        assert_eq!(data.files.len(), 1);
        assert_eq!(data.files[0].name, "test-sbom.SPDX.json");
        assert_eq!(data.files[0].file.kind, FileKind::Source);
        assert_eq!(data.files[0].origin, SbomOrigin::Source);
        assert_eq!(data.release_count, 0);
    }

    #[test]
    fn test_root_sbom_is_standards_origin() {
        let repo = FakeRepo::new()
            .with_file("bom.cdx.json", "{}")
            .with_file("third_party/vendor.spdx", "");

        let data = collect(&repo).unwrap();
        let origins: Vec<SbomOrigin> = data.files.iter().map(|f| f.origin).collect();

        assert_eq!(origins, vec![SbomOrigin::Standards, SbomOrigin::Source]);
        assert!(origins.iter().all(|o| o.in_source_tree()));
    }

    #[test]
    fn test_without_sbom() {
        let repo = FakeRepo::new().with_file("README.md", "hello");
        assert_eq!(collect(&repo).unwrap(), SbomData::default());
    }

    #[test]
    fn test_only_recent_releases_are_inspected() {
        let mut releases = vec![release(&[]); RELEASE_LOOKBACK];
        releases.push(release(&["old.spdx"]));
        let repo = FakeRepo::new().with_releases(releases);

        let data = collect(&repo).unwrap();

        assert_eq!(data.release_count, RELEASE_LOOKBACK);
        assert!(data.files.is_empty());
    }

    #[test]
    fn test_release_failure_is_an_error() {
        let repo = FakeRepo::new().failing(Capability::Releases);
        assert!(collect(&repo).is_err());
    }
}
