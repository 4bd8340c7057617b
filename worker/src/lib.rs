//! Offline service worker for the reader.
//!
//! `web/sw.js` registers the event listeners synchronously and forwards each
//! event here once the module has loaded.

use js_sys::{Array, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys::{
    Cache, CacheStorage, ExtendableEvent, FetchEvent, Request, Response, ServiceWorkerGlobalScope,
    Url,
};

use kalandkonyv_core::catalog::TOTAL_PAGES;
use kalandkonyv_core::{classify, stale_caches, CacheStrategy, FetchPolicy, RouteClass};

fn scope() -> Result<ServiceWorkerGlobalScope, JsValue> {
    js_sys::global()
        .dyn_into::<ServiceWorkerGlobalScope>()
        .map_err(|_| JsValue::from_str("not running in a service worker"))
}

fn caches(scope: &ServiceWorkerGlobalScope) -> Result<CacheStorage, JsValue> {
    scope.caches()
}

async fn open_cache(caches: &CacheStorage, name: &str) -> Result<Cache, JsValue> {
    JsFuture::from(caches.open(name)).await?.dyn_into::<Cache>()
}

fn log_err(context: &str, err: &JsValue) {
    let message = err
        .as_string()
        .or_else(|| err.dyn_ref::<js_sys::Error>().map(|err| String::from(err.message())))
        .unwrap_or_else(|| "js error".to_string());
    gloo::console::error!(format!("sw: {context}"), message);
}

#[wasm_bindgen]
pub fn handle_install(_event: ExtendableEvent) -> Promise {
    future_to_promise(async move {
        let scope = scope()?;
        let strategy = CacheStrategy::from_catalog();
        let result = precache(&scope, &strategy).await;
        if let Err(err) = &result {
            log_err("install failed", err);
        }
        result?;
        JsFuture::from(scope.skip_waiting()?).await?;
        Ok(JsValue::UNDEFINED)
    })
}

async fn precache(scope: &ServiceWorkerGlobalScope, strategy: &CacheStrategy) -> Result<(), JsValue> {
    let cache = open_cache(&caches(scope)?, &strategy.cache_name).await?;
    let urls = strategy
        .precache_list(TOTAL_PAGES)
        .into_iter()
        .map(JsValue::from)
        .collect::<Array>();
    gloo::console::log!("sw: precaching", urls.length(), strategy.cache_name.clone());
    JsFuture::from(cache.add_all_with_str_sequence(&urls)).await?;
    Ok(())
}

#[wasm_bindgen]
pub fn handle_activate(_event: ExtendableEvent) -> Promise {
    future_to_promise(async move {
        let scope = scope()?;
        let strategy = CacheStrategy::from_catalog();
        purge_stale(&caches(&scope)?, &strategy.cache_name).await?;
        JsFuture::from(scope.clients().claim()).await?;
        Ok(JsValue::UNDEFINED)
    })
}

/// Deletes every cache bucket except `current`. Returns the deleted names.
async fn purge_stale(caches: &CacheStorage, current: &str) -> Result<Vec<String>, JsValue> {
    let keys = JsFuture::from(caches.keys()).await?;
    let keys = Array::from(&keys)
        .iter()
        .filter_map(|key| key.as_string())
        .collect::<Vec<_>>();
    let mut deleted = Vec::new();
    for name in stale_caches(&keys, current) {
        JsFuture::from(caches.delete(name)).await?;
        gloo::console::log!("sw: deleted cache", name);
        deleted.push(name.to_string());
    }
    Ok(deleted)
}

#[wasm_bindgen]
pub fn handle_fetch(event: FetchEvent) -> Promise {
    let request = event.request();
    future_to_promise(async move {
        let scope = scope()?;
        let caches = caches(&scope)?;
        let strategy = CacheStrategy::from_catalog();
        let class = classify(&Url::new(&request.url())?.pathname());
        respond(&scope, &caches, &strategy, class, request)
            .await
            .map(JsValue::from)
    })
}

async fn respond(
    scope: &ServiceWorkerGlobalScope,
    caches: &CacheStorage,
    strategy: &CacheStrategy,
    class: RouteClass,
    request: Request,
) -> Result<Response, JsValue> {
    match strategy.policy_for(class) {
        FetchPolicy::CacheFirst => {
            if let Some(cached) = cached(caches, &request).await? {
                return Ok(cached);
            }
            match network(scope, caches, strategy, class, &request).await {
                Ok(response) => Ok(response),
                Err(err) => offline(caches, strategy, class, err).await,
            }
        }
        FetchPolicy::NetworkFirst => match network(scope, caches, strategy, class, &request).await {
            Ok(response) => Ok(response),
            Err(err) => match cached(caches, &request).await? {
                Some(cached) => Ok(cached),
                None => offline(caches, strategy, class, err).await,
            },
        },
    }
}

async fn cached(caches: &CacheStorage, request: &Request) -> Result<Option<Response>, JsValue> {
    let value = JsFuture::from(caches.match_with_request(request)).await?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    value.dyn_into::<Response>().map(Some)
}

async fn network(
    scope: &ServiceWorkerGlobalScope,
    caches: &CacheStorage,
    strategy: &CacheStrategy,
    class: RouteClass,
    request: &Request,
) -> Result<Response, JsValue> {
    let response = JsFuture::from(scope.fetch_with_request(request))
        .await?
        .dyn_into::<Response>()?;
    let content_type = response.headers().get("content-type").ok().flatten();
    if strategy.should_store(class, &request.method(), response.ok(), content_type.as_deref()) {
        store(caches, &strategy.cache_name, request, &response)?;
    }
    Ok(response)
}

/// Writes a copy into the cache in the background; the caller keeps the
/// original response.
fn store(caches: &CacheStorage, name: &str, request: &Request, response: &Response) -> Result<(), JsValue> {
    // Inherent `clone` on Response tees the body stream.
    let copy = response.clone()?;
    let request: Request = Clone::clone(request);
    let caches = caches.clone();
    let name = name.to_string();
    spawn_local(async move {
        let result = async {
            let cache = open_cache(&caches, &name).await?;
            JsFuture::from(cache.put_with_request(&request, &copy)).await?;
            Ok::<(), JsValue>(())
        }
        .await;
        if let Err(err) = result {
            log_err("cache write failed", &err);
        }
    });
    Ok(())
}

async fn offline(
    caches: &CacheStorage,
    strategy: &CacheStrategy,
    class: RouteClass,
    err: JsValue,
) -> Result<Response, JsValue> {
    let Some(page) = strategy.offline_fallback(class) else {
        return Err(err);
    };
    let value = JsFuture::from(caches.match_with_str(page)).await?;
    if value.is_undefined() || value.is_null() {
        return Err(err);
    }
    value.dyn_into::<Response>()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_service_worker);

    #[wasm_bindgen_test]
    async fn purge_keeps_current_generation() {
        let scope = scope().expect("service worker scope");
        let caches = caches(&scope).expect("caches");
        open_cache(&caches, "kalandkonyv-test-old").await.expect("open old");
        open_cache(&caches, "kalandkonyv-test-current")
            .await
            .expect("open current");

        let deleted = purge_stale(&caches, "kalandkonyv-test-current")
            .await
            .expect("purge");
        assert!(deleted.contains(&"kalandkonyv-test-old".to_string()));
        assert!(!deleted.contains(&"kalandkonyv-test-current".to_string()));

        let has_current = JsFuture::from(caches.has("kalandkonyv-test-current"))
            .await
            .expect("has");
        assert_eq!(has_current.as_bool(), Some(true));
    }

    #[wasm_bindgen_test]
    async fn missing_entry_is_none() {
        let scope = scope().expect("service worker scope");
        let caches = caches(&scope).expect("caches");
        let request = Request::new_with_str("/pages/does-not-exist.html").expect("request");
        assert!(cached(&caches, &request).await.expect("match").is_none());
    }
}
