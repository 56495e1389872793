use base::logging::{FileLogger, StdoutLogger, format_today};
use log::Log;
use std::fs;

#[test]
fn test_stdout_logger_implements_log_trait() {
    let logger = StdoutLogger;
    let record = log::RecordBuilder::new()
        .level(log::Level::Info)
        .target("test")
        .file(Some("test.rs"))
        .line(Some(42))
        .args(format_args!("test message"))
        .build();

    // must not panic
    logger.log(&record);
    logger.flush();
}

#[test]
fn test_file_logger_writes_to_todays_file() {
    let test_dir = std::env::temp_dir().join(format!("snitch-log-test-{}-write", std::process::id()));
    let _ = fs::remove_dir_all(&test_dir);

    let logger = FileLogger::new(&test_dir).expect("Failed to create FileLogger");
    let record = log::RecordBuilder::new()
        .level(log::Level::Warn)
        .target("alert")
        .file(Some("manager.rs"))
        .line(Some(7))
        .args(format_args!("guardian delivery failed"))
        .build();
    logger.log(&record);
    logger.flush();

    let content = fs::read_to_string(test_dir.join(format!("{}.log", format_today())))
        .expect("Failed to read log file");
    assert!(content.contains("[WARN]"));
    assert!(content.contains("manager.rs:7"));
    assert!(content.contains("guardian delivery failed"));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn test_file_logger_rejects_unusable_directory() {
    // a regular file cannot serve as the log directory
    let path = std::env::temp_dir().join(format!("snitch-log-test-{}-file", std::process::id()));
    fs::write(&path, b"not a directory").expect("Failed to create file");
    assert!(FileLogger::new(&path).is_err());
    fs::remove_file(&path).ok();
}
