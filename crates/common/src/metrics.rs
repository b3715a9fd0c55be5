use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder};

// Prometheus metrics (default registry)
pub static STORE_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cat_shelter_store_operations_total",
        "Cat store operations by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register store_operations_total")
});

pub static CATS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "cat_shelter_cats",
        "Number of cats in the collection after the last list or mutation"
    )
    .expect("register cats gauge")
});

/// Count one store operation. `outcome` is `ok`, `invalid`, `not_found` or `error`.
pub fn record_operation(operation: &str, outcome: &str) {
    STORE_OPERATIONS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

pub fn set_collection_size(n: usize) {
    CATS.set(n as i64);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    // Touch the statics so the families show up before the first request.
    Lazy::force(&STORE_OPERATIONS_TOTAL);
    Lazy::force(&CATS);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_are_exported() {
        record_operation("create", "ok");
        set_collection_size(3);
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("cat_shelter_store_operations_total"));
        assert!(body.contains("operation=\"create\""));
        assert!(body.contains("cat_shelter_cats"));
    }
}
