use super::*;

fn rejected(message: Option<&str>) -> RemoteError {
    RemoteError::Rejected { status: 400, message: message.map(str::to_owned) }
}

#[test]
fn validation_message_comes_from_payload() {
    let err = SyncError::Validation(rejected(Some("Validation error")));
    assert_eq!(err.display_message(), "Validation error");
}

#[test]
fn update_message_comes_from_payload() {
    let err = SyncError::Update(rejected(Some("disk full")));
    assert_eq!(err.display_message(), "disk full");
}

#[test]
fn missing_payload_falls_back_to_generic_message() {
    let err = SyncError::Validation(rejected(None));
    assert_eq!(err.display_message(), GENERIC_SYNC_MESSAGE);

    let err = SyncError::Update(RemoteError::Request("connection refused".into()));
    assert_eq!(err.display_message(), GENERIC_SYNC_MESSAGE);
}

#[test]
fn fetch_failures_use_fetch_message() {
    let err = SyncError::Fetch(rejected(Some("ignored")));
    assert_eq!(err.display_message(), FETCH_FAILED_MESSAGE);
}

#[test]
fn remote_accessor_returns_inner_error() {
    let inner = RemoteError::Parse("bad json".into());
    let err = SyncError::Update(inner.clone());
    assert_eq!(err.remote(), &inner);
}

#[test]
fn payload_message_only_for_rejections() {
    assert_eq!(rejected(Some("nope")).payload_message(), Some("nope"));
    assert_eq!(rejected(None).payload_message(), None);
    assert_eq!(RemoteError::Request("x".into()).payload_message(), None);
}

#[test]
fn error_display_strings() {
    assert_eq!(rejected(None).to_string(), "remote rejected request: status 400");
    assert_eq!(
        SyncError::Validation(RemoteError::Request("timeout".into())).to_string(),
        "validation failed: remote request failed: timeout"
    );
    assert_eq!(FieldError::NotANumber("abc".into()).to_string(), "not a number: \"abc\"");
    assert!(ParseDirectionError("up".into()).to_string().contains("'up'"));
}
