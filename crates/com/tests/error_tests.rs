use {com::ComError, std::io};

#[test]
fn test_from_io_error() {
    let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe broken");
    let com_err: ComError = io_err.into();
    match com_err {
        ComError::Io(_) => {} // Expected
        _ => panic!("Expected ComError::Io variant"),
    }
}

#[test]
fn test_from_json_error() {
    let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
    let com_err: ComError = json_err.into();
    assert!(matches!(com_err, ComError::Json(_)));
    assert!(com_err.to_string().starts_with("invalid json"));
}

#[test]
fn test_display() {
    assert_eq!(ComError::ConnectionClosed.to_string(), "connection closed");
    assert_eq!(
        ComError::MessageTooLarge(5000).to_string(),
        "message too large: 5000 bytes"
    );
    assert_eq!(
        ComError::BadRequest("no method".to_string()).to_string(),
        "bad request: no method"
    );
}

#[test]
fn test_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(ComError::ConnectionClosed);
    assert_eq!(err.to_string(), "connection closed");
}
