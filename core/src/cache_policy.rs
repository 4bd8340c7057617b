use std::fmt;
use std::str::FromStr;

use crate::book::page_paths;
use crate::catalog;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteClass {
    /// `/images/` and `/files/`.
    Asset,
    /// `/pages/` documents.
    Page,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchPolicy {
    CacheFirst,
    NetworkFirst,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyParseError {
    pub value: String,
}

impl fmt::Display for PolicyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown fetch policy '{}', expected cache-first or network-first",
            self.value
        )
    }
}

impl std::error::Error for PolicyParseError {}

impl FromStr for FetchPolicy {
    type Err = PolicyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "cache-first" => Ok(FetchPolicy::CacheFirst),
            "network-first" => Ok(FetchPolicy::NetworkFirst),
            other => Err(PolicyParseError {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchPolicy::CacheFirst => f.write_str("cache-first"),
            FetchPolicy::NetworkFirst => f.write_str("network-first"),
        }
    }
}

pub fn classify(path: &str) -> RouteClass {
    if path.starts_with("/images/") || path.starts_with("/files/") {
        RouteClass::Asset
    } else if path.starts_with("/pages/") {
        RouteClass::Page
    } else {
        RouteClass::Other
    }
}

/// Install-time population list: shell files, images, then every page.
pub fn precache_list(static_assets: &[&str], image_assets: &[&str], total_pages: u32) -> Vec<String> {
    static_assets
        .iter()
        .chain(image_assets.iter())
        .map(|asset| asset.to_string())
        .chain(page_paths(total_pages))
        .collect()
}

/// Cache buckets left over from earlier generations.
pub fn stale_caches<'a>(keys: &'a [String], current: &str) -> Vec<&'a str> {
    keys.iter()
        .map(String::as_str)
        .filter(|key| *key != current)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStrategy {
    pub cache_name: String,
    pub asset: FetchPolicy,
    pub page: FetchPolicy,
    pub other: FetchPolicy,
    pub offline_page: String,
}

impl CacheStrategy {
    pub fn from_catalog() -> Self {
        Self {
            cache_name: catalog::CACHE_VERSION.to_string(),
            asset: catalog::ASSET_POLICY,
            page: catalog::PAGE_POLICY,
            other: catalog::OTHER_POLICY,
            offline_page: catalog::OFFLINE_PAGE.to_string(),
        }
    }

    pub fn policy_for(&self, class: RouteClass) -> FetchPolicy {
        match class {
            RouteClass::Asset => self.asset,
            RouteClass::Page => self.page,
            RouteClass::Other => self.other,
        }
    }

    /// Whether a network response is written back into the cache.
    pub fn should_store(
        &self,
        class: RouteClass,
        method: &str,
        ok: bool,
        content_type: Option<&str>,
    ) -> bool {
        if !ok {
            return false;
        }
        match class {
            RouteClass::Asset => true,
            RouteClass::Page => method.eq_ignore_ascii_case("GET"),
            RouteClass::Other => {
                method.eq_ignore_ascii_case("GET")
                    && content_type
                        .map(|value| value.contains("text/html"))
                        .unwrap_or(false)
            }
        }
    }

    pub fn offline_fallback(&self, class: RouteClass) -> Option<&str> {
        match class {
            RouteClass::Page => Some(self.offline_page.as_str()),
            _ => None,
        }
    }

    pub fn precache_list(&self, total_pages: u32) -> Vec<String> {
        precache_list(catalog::STATIC_ASSETS, catalog::IMAGE_ASSETS, total_pages)
    }
}

impl Default for CacheStrategy {
    fn default() -> Self {
        Self::from_catalog()
    }
}
