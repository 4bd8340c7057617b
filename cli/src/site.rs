use std::path::{Path, PathBuf};

use serde::Serialize;

use kalandkonyv_core::catalog::{CACHE_VERSION, IMAGE_ASSETS, STATIC_ASSETS};
use kalandkonyv_core::{page_paths, precache_list};

#[derive(Debug, Serialize)]
pub struct PrecacheManifest {
    pub cache_name: String,
    pub total_pages: u32,
    pub urls: Vec<String>,
}

pub fn precache_manifest(total_pages: u32) -> PrecacheManifest {
    PrecacheManifest {
        cache_name: CACHE_VERSION.to_string(),
        total_pages,
        urls: precache_list(STATIC_ASSETS, IMAGE_ASSETS, total_pages),
    }
}

#[derive(Debug, Default, Serialize)]
pub struct SiteReport {
    pub checked: usize,
    pub missing: Vec<String>,
}

impl SiteReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Remote URLs and the site root are served by someone else.
fn is_local_file(asset: &str) -> bool {
    !(asset == "/" || asset.starts_with("http://") || asset.starts_with("https://"))
}

fn site_path(root: &Path, asset: &str) -> PathBuf {
    root.join(asset.trim_start_matches('/'))
}

pub fn check_site(root: &Path, total_pages: u32, with_assets: bool) -> SiteReport {
    let mut expected = page_paths(total_pages);
    if with_assets {
        expected.extend(
            STATIC_ASSETS
                .iter()
                .chain(IMAGE_ASSETS.iter())
                .filter(|asset| is_local_file(asset))
                .map(|asset| asset.to_string()),
        );
    }
    let mut report = SiteReport::default();
    for asset in expected {
        report.checked += 1;
        if !site_path(root, &asset).is_file() {
            report.missing.push(asset);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_and_root_assets_are_skipped() {
        assert!(!is_local_file("/"));
        assert!(!is_local_file("https://fonts.googleapis.com/css2?family=Cinzel"));
        assert!(is_local_file("index.html"));
    }

    #[test]
    fn manifest_matches_page_count() {
        let manifest = precache_manifest(4);
        assert_eq!(
            manifest.urls.len(),
            STATIC_ASSETS.len() + IMAGE_ASSETS.len() + 5
        );
        assert_eq!(manifest.cache_name, CACHE_VERSION);
    }
}
