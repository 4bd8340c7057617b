use std::collections::HashSet;
use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Deserialize)]
struct CatalogFile {
    title: String,
    total_pages: u32,
    free_pages: Option<u32>,
    cache_version: String,
    sound: Option<String>,
    cache: CacheSection,
    #[serde(default)]
    chapters: Vec<ChapterEntry>,
}

#[derive(Deserialize)]
struct CacheSection {
    offline_page: String,
    asset_policy: Option<String>,
    page_policy: Option<String>,
    other_policy: Option<String>,
    #[serde(default)]
    static_assets: Vec<String>,
    #[serde(default)]
    image_assets: Vec<String>,
}

#[derive(Deserialize)]
struct ChapterEntry {
    id: String,
    title: String,
    page: u32,
}

const DEFAULT_SOUND: &str = "sounds/pageturn.mp3";

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().unwrap_or(&manifest_dir);
    let env_path = workspace_root.join(".env");
    let env_local_path = workspace_root.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-env-changed=BOOK_CATALOG_PATH");
    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    let catalog_path = resolve_catalog_path(workspace_root);
    println!("cargo:rerun-if-changed={}", catalog_path.display());

    let contents = fs::read_to_string(&catalog_path).unwrap_or_else(|err| {
        panic!(
            "failed to read book catalog at {}: {err}",
            catalog_path.display()
        )
    });

    let catalog: CatalogFile = toml::from_str(&contents).unwrap_or_else(|err| {
        panic!(
            "failed to parse book catalog at {}: {err}",
            catalog_path.display()
        )
    });

    validate_catalog(&catalog, &catalog_path);

    let asset_policy = policy_tokens(catalog.cache.asset_policy.as_deref(), "asset_policy", &catalog_path);
    let page_policy = policy_tokens(catalog.cache.page_policy.as_deref(), "page_policy", &catalog_path);
    let other_policy = policy_tokens(catalog.cache.other_policy.as_deref(), "other_policy", &catalog_path);
    let free_pages = match catalog.free_pages {
        Some(limit) => format!("Some({limit})"),
        None => "None".to_string(),
    };

    let mut output = String::new();
    writeln!(&mut output, "pub const BOOK_TITLE: &str = {};", rust_string(&catalog.title)).unwrap();
    writeln!(&mut output, "pub const TOTAL_PAGES: u32 = {};", catalog.total_pages).unwrap();
    writeln!(&mut output, "pub const FREE_PAGES: Option<u32> = {};", free_pages).unwrap();
    writeln!(
        &mut output,
        "pub const CACHE_VERSION: &str = {};",
        rust_string(&catalog.cache_version)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const TURN_SOUND: &str = {};",
        rust_string(catalog.sound.as_deref().unwrap_or(DEFAULT_SOUND))
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const OFFLINE_PAGE: &str = {};",
        rust_string(&catalog.cache.offline_page)
    )
    .unwrap();
    writeln!(&mut output, "pub const ASSET_POLICY: FetchPolicy = {};", asset_policy).unwrap();
    writeln!(&mut output, "pub const PAGE_POLICY: FetchPolicy = {};", page_policy).unwrap();
    writeln!(&mut output, "pub const OTHER_POLICY: FetchPolicy = {};", other_policy).unwrap();
    writeln!(&mut output).unwrap();

    write_str_list(&mut output, "STATIC_ASSETS", &catalog.cache.static_assets);
    write_str_list(&mut output, "IMAGE_ASSETS", &catalog.cache.image_assets);

    writeln!(&mut output, "pub const CHAPTERS: &[Chapter] = &[").unwrap();
    for chapter in &catalog.chapters {
        writeln!(&mut output, "    Chapter {{").unwrap();
        writeln!(&mut output, "        id: {},", rust_string(&chapter.id)).unwrap();
        writeln!(&mut output, "        title: {},", rust_string(&chapter.title)).unwrap();
        writeln!(&mut output, "        page: {},", chapter.page).unwrap();
        writeln!(&mut output, "    }},").unwrap();
    }
    writeln!(&mut output, "];").unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("book_catalog.rs");
    fs::write(&out_path, output).unwrap_or_else(|err| {
        panic!("failed to write {}: {err}", out_path.display())
    });
}

fn resolve_catalog_path(workspace_root: &Path) -> PathBuf {
    let env_value = env::var("BOOK_CATALOG_PATH").ok();
    let raw_path = match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => workspace_root.join("book/catalog.toml"),
    };
    if raw_path.is_relative() {
        workspace_root.join(raw_path)
    } else {
        raw_path
    }
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

fn write_str_list(output: &mut String, name: &str, values: &[String]) {
    writeln!(output, "pub const {name}: &[&str] = &[").unwrap();
    for value in values {
        writeln!(output, "    {},", rust_string(value)).unwrap();
    }
    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
}

fn policy_tokens(raw: Option<&str>, field: &str, catalog_path: &Path) -> &'static str {
    match raw.map(str::trim) {
        None | Some("cache-first") => "FetchPolicy::CacheFirst",
        Some("network-first") => "FetchPolicy::NetworkFirst",
        Some(other) => panic!(
            "{field} must be 'cache-first' or 'network-first', got '{other}' in {}",
            catalog_path.display()
        ),
    }
}

fn validate_catalog(catalog: &CatalogFile, catalog_path: &Path) {
    if catalog.cache_version.trim().is_empty() {
        panic!("cache_version cannot be empty in {}", catalog_path.display());
    }
    if catalog.cache.offline_page.trim().is_empty() {
        panic!("cache.offline_page cannot be empty in {}", catalog_path.display());
    }
    if let Some(limit) = catalog.free_pages {
        if limit > catalog.total_pages {
            panic!(
                "free_pages {} exceeds total_pages {} in {}",
                limit,
                catalog.total_pages,
                catalog_path.display()
            );
        }
    }

    let mut assets = HashSet::new();
    for asset in catalog
        .cache
        .static_assets
        .iter()
        .chain(catalog.cache.image_assets.iter())
    {
        if asset.trim().is_empty() {
            panic!("cache asset cannot be empty in {}", catalog_path.display());
        }
        if !assets.insert(asset.as_str()) {
            panic!(
                "duplicate cache asset '{}' in {}",
                asset,
                catalog_path.display()
            );
        }
    }

    let mut ids = HashSet::new();
    for chapter in &catalog.chapters {
        if chapter.title.trim().is_empty() {
            panic!(
                "chapter '{}' has an empty title in {}",
                chapter.id,
                catalog_path.display()
            );
        }
        if chapter.page > catalog.total_pages {
            panic!(
                "chapter '{}' points at page {} beyond total_pages {} in {}",
                chapter.id,
                chapter.page,
                catalog.total_pages,
                catalog_path.display()
            );
        }
        if !ids.insert(chapter.id.as_str()) {
            panic!(
                "duplicate chapter id '{}' in {}",
                chapter.id,
                catalog_path.display()
            );
        }
    }
}
