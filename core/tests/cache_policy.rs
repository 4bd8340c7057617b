use kalandkonyv_core::catalog::{CACHE_VERSION, IMAGE_ASSETS, STATIC_ASSETS, TOTAL_PAGES};
use kalandkonyv_core::{precache_list, stale_caches, CacheStrategy, COVER_PAGE_PATH};

#[test]
fn activation_drops_every_other_generation() {
    let keys = vec![
        "kalandkonyv-cache-v1".to_string(),
        CACHE_VERSION.to_string(),
        "some-other-app".to_string(),
    ];
    let stale = stale_caches(&keys, CACHE_VERSION);
    assert_eq!(stale, vec!["kalandkonyv-cache-v1", "some-other-app"]);
    assert!(!stale.contains(&CACHE_VERSION));
}

#[test]
fn activation_keeps_lone_current_bucket() {
    let keys = vec![CACHE_VERSION.to_string()];
    assert!(stale_caches(&keys, CACHE_VERSION).is_empty());
}

#[test]
fn precache_lists_shell_then_pages() {
    let list = precache_list(&["/", "index.html"], &["images/d1.png"], 2);
    assert_eq!(
        list,
        vec![
            "/",
            "index.html",
            "images/d1.png",
            "pages/borito.html",
            "pages/1.html",
            "pages/2.html",
        ]
    );
}

#[test]
fn catalog_precache_covers_every_page() {
    let strategy = CacheStrategy::from_catalog();
    let list = strategy.precache_list(TOTAL_PAGES);
    let pages = TOTAL_PAGES as usize + 1;
    assert_eq!(list.len(), STATIC_ASSETS.len() + IMAGE_ASSETS.len() + pages);
    assert_eq!(list[STATIC_ASSETS.len() + IMAGE_ASSETS.len()], COVER_PAGE_PATH);
    assert_eq!(list.last().map(String::as_str), Some(format!("pages/{TOTAL_PAGES}.html").as_str()));
    assert_eq!(strategy.cache_name, CACHE_VERSION);
}
