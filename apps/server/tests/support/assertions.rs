use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "{context}: unexpected status");
}

/// Names of the records in a search response, in response order.
pub fn record_names(body: &Value) -> anyhow::Result<Vec<String>> {
    let records = body.as_array().context("search response is an array")?;
    records
        .iter()
        .map(|r| {
            r.get("name")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .context("record has a name")
        })
        .collect()
}
