use simkit_logger::{LogRotation, Logger, LoggingConfig};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_output_from_config_section() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let config = LoggingConfig {
        level: "debug".to_owned(),
        console: false,
        directory: Some(log_dir.clone()),
        rotation: LogRotation::Never,
        json: true,
        ..LoggingConfig::default()
    };
    let logger = Logger::from_config("simkit-file", &config)?;
    assert!(logger.writes_file());

    tracing::debug!(models = 3, "registry configured");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let first_line = contents.lines().next().expect("at least one line");
    let event: serde_json::Value = serde_json::from_str(first_line)?;
    assert_eq!(event["level"], "DEBUG");
    assert_eq!(event["fields"]["message"], "registry configured");
    assert_eq!(event["fields"]["models"], 3);

    Ok(())
}
