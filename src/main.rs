//! MQTT Test Fixtures MCP Server

use clap::Parser;
use tracing::{info, error, debug};
use tracing_subscriber::{EnvFilter, fmt};
use rmcp::{ServiceExt, transport::stdio};

use mqtt_test_fixtures::{Args, Config, FixtureToolHandler};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    info!("Starting MQTT Test Fixtures MCP Server v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_args(&args);
    debug!("Fixture defaults: {:?}", config);

    let service = FixtureToolHandler::new(config)
        .serve(stdio()).await.inspect_err(|e| {
            error!("Serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}

fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(false)
        .with_line_number(false);

    if let Some(log_file) = &args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    debug!("Logging initialized with level: {}", args.log_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use mqtt_test_fixtures::config::Args;

    #[test]
    fn test_args_parsing_defaults() {
        let args = Args::parse_from(["mqtt-test-fixtures"]);
        assert!(args.app_path.is_none());
        assert!(args.build_dir.is_none());
        assert_eq!(args.dut_count, 1);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_args_parsing_multi_dut() {
        let args = Args::parse_from([
            "mqtt-test-fixtures",
            "--target", "esp32|esp32s3",
            "--dut-count", "2",
            "--log-level", "debug",
        ]);
        assert_eq!(args.target.unwrap(), "esp32|esp32s3");
        assert_eq!(args.dut_count, 2);
        assert_eq!(args.log_level, "debug");
    }
}
