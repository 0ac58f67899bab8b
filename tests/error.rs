use arbalest::error::ActionError;

#[test]
fn display_missing_credential() {
    let err = ActionError::MissingCredential;
    assert_eq!(err.to_string(), "api token is empty; set the api-token input");
}

#[test]
fn display_command_failed_includes_exit_code() {
    let err = ActionError::CommandFailed {
        command: "npx wrangler versions upload".into(),
        code: 2,
    };
    assert_eq!(
        err.to_string(),
        "command failed: npx wrangler versions upload (exit code 2)"
    );
}

#[test]
fn display_command_not_found() {
    let err = ActionError::CommandNotFound("wrangler".into());
    assert_eq!(err.to_string(), "command not found: wrangler");
}

#[test]
fn display_version_id_not_found() {
    let err = ActionError::VersionIdNotFound;
    assert_eq!(
        err.to_string(),
        "no Worker Version ID found in upload output; cannot deploy"
    );
}

#[test]
fn display_other() {
    let err = ActionError::Other("custom error".into());
    assert_eq!(err.to_string(), "custom error");
}

#[test]
fn from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err: ActionError = io_err.into();
    assert!(matches!(err, ActionError::Io(_)));
}

#[test]
fn from_json_error() {
    let json_err = serde_json::from_str::<Vec<u64>>("invalid").unwrap_err();
    let err: ActionError = json_err.into();
    assert!(matches!(err, ActionError::Json(_)));
}
