//! Account Store Metrics
//!
//! 存储操作指标记录

use std::time::Duration;

use bank_errors::PersistenceError;
use metrics::{counter, histogram};

/// 记录一次存储操作
pub fn record_operation(
    backend: &'static str,
    operation: &'static str,
    elapsed: Duration,
    error: Option<&PersistenceError>,
) {
    let outcome = if error.is_some() { "error" } else { "ok" };

    counter!(
        "account_store_operations_total",
        "backend" => backend,
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        "account_store_operation_duration_seconds",
        "backend" => backend,
        "operation" => operation
    )
    .record(elapsed.as_secs_f64());

    if let Some(err) = error {
        counter!(
            "account_store_operation_errors_total",
            "backend" => backend,
            "operation" => operation,
            "kind" => err.kind()
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    fn has_line(rendered: &str, name: &str, labels: &[&str], value: &str) -> bool {
        rendered.lines().any(|line| {
            line.starts_with(&format!("{}{{", name))
                && labels.iter().all(|l| line.contains(l))
                && line.ends_with(&format!(" {}", value))
        })
    }

    #[test]
    fn test_records_counters_and_duration() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_operation("memory", "save", Duration::from_millis(3), None);
            record_operation(
                "memory",
                "find_page",
                Duration::from_millis(1),
                Some(&PersistenceError::invalid_query("Unknown sort property")),
            );
        });

        let rendered = handle.render();
        assert!(has_line(
            &rendered,
            "account_store_operations_total",
            &[r#"backend="memory""#, r#"operation="save""#, r#"outcome="ok""#],
            "1"
        ));
        assert!(has_line(
            &rendered,
            "account_store_operations_total",
            &[r#"operation="find_page""#, r#"outcome="error""#],
            "1"
        ));
        assert!(has_line(
            &rendered,
            "account_store_operation_duration_seconds_count",
            &[r#"operation="save""#],
            "1"
        ));
        assert!(has_line(
            &rendered,
            "account_store_operation_errors_total",
            &[r#"operation="find_page""#, r#"kind="invalid_query""#],
            "1"
        ));
        assert!(!has_line(
            &rendered,
            "account_store_operation_errors_total",
            &[r#"operation="save""#],
            "1"
        ));
    }
}
