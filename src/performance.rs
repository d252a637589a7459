//! Performance report lines
//!
//! CI log scrapers pick up results printed as `[Performance][item]: value`.

use tracing::info;

/// Format and emit one performance result, returning the report line
pub fn log_performance(item: &str, value: &str) -> String {
    let line = format!("[Performance][{}]: {}", item, value);
    info!("{}", line);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_line_format() {
        assert_eq!(
            log_performance("mqtt_publish_qos1_throughput", "412.5 msg/s"),
            "[Performance][mqtt_publish_qos1_throughput]: 412.5 msg/s"
        );
    }

    #[test]
    fn test_performance_line_empty_value() {
        assert_eq!(log_performance("heap_free", ""), "[Performance][heap_free]: ");
    }
}
