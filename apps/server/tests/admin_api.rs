mod support;

use axum::http::{Method, StatusCode};
use serde_json::Value;
use support::*;

#[tokio::test]
async fn cache_status_starts_empty() -> anyhow::Result<()> {
    let app = TestApp::new(sample_companies()).await?;
    let (status, _headers, body) = app.request(Method::GET, "/admin/cache", None).await?;
    assert_status(status, StatusCode::OK, "cache status");

    let body: Value = serde_json::from_slice(&body)?;
    assert_eq!(body["populated"], false);
    assert_eq!(body["records"], 0);
    assert_eq!(body["ttl_seconds"], 300);
    assert_eq!(app.store.fetch_count(), 0);
    Ok(())
}

#[tokio::test]
async fn warm_on_startup_populates_the_cache() -> anyhow::Result<()> {
    let app = TestApp::new_with_config(sample_companies(), |config| {
        config.cache.warm_on_startup = true;
        config.cache.ttl_seconds = 60;
    })
    .await?;
    assert_eq!(app.store.fetch_count(), 1);

    let (_, _, body) = app.request(Method::GET, "/admin/cache", None).await?;
    let body: Value = serde_json::from_slice(&body)?;
    assert_eq!(body["populated"], true);
    assert_eq!(body["valid"], true);
    assert_eq!(body["records"], 4);
    assert_eq!(body["ttl_seconds"], 60);

    app.search(&[]).await?;
    assert_eq!(app.store.fetch_count(), 1);
    Ok(())
}

#[tokio::test]
async fn searches_recover_after_store_outage() -> anyhow::Result<()> {
    let store_rows = sample_companies();
    let app = TestApp::new_with_config(store_rows, |config| {
        config.cache.warm_on_startup = true;
    })
    .await?;
    app.store.set_failing(true);
    app.state.cache.invalidate().await;

    let (status, _) = app.search(&[]).await?;
    assert_status(status, StatusCode::SERVICE_UNAVAILABLE, "failing store");

    app.store.set_failing(false);
    let (status, body) = app.search(&[]).await?;
    assert_status(status, StatusCode::OK, "recovered store");
    assert_eq!(record_names(&body)?.len(), 4);
    Ok(())
}

#[tokio::test]
async fn invalidate_reloads_on_next_search() -> anyhow::Result<()> {
    let app = TestApp::new(sample_companies()).await?;
    let (_, body) = app.search(&[]).await?;
    assert_eq!(record_names(&body)?.len(), 4);

    app.store.replace(sample_companies().into_iter().take(1).collect());

    // Still served from the snapshot.
    let (_, body) = app.search(&[]).await?;
    assert_eq!(record_names(&body)?.len(), 4);

    let (status, _headers, body) = app
        .request(Method::POST, "/admin/cache/invalidate", None)
        .await?;
    assert_status(status, StatusCode::OK, "invalidate");
    let body: Value = serde_json::from_slice(&body)?;
    assert_eq!(body["invalidated"], true);
    assert_eq!(body["cache"]["populated"], false);

    let (_, body) = app.search(&[]).await?;
    assert_eq!(record_names(&body)?, ["Acme"]);
    assert_eq!(app.store.fetch_count(), 2);
    Ok(())
}

#[tokio::test]
async fn invalid_config_is_rejected_as_validation_error() -> anyhow::Result<()> {
    let Err(err) = TestApp::new_with_config(sample_companies(), |config| {
        config.cache.ttl_seconds = 0;
    })
    .await
    else {
        anyhow::bail!("zero TTL should fail validation");
    };

    let validation = err
        .chain()
        .find_map(|cause| match cause.downcast_ref::<tally::Error>() {
            Some(tally::Error::Validation(message)) => Some(message.clone()),
            _ => None,
        });
    assert!(
        validation.is_some_and(|message| message.contains("ttl_seconds")),
        "expected a validation error, got {err:#}"
    );
    Ok(())
}
