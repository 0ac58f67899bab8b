use arbalest::extract;

// Captured from a real `wrangler versions upload` run,
// trimmed to the interesting lines.
const UPLOAD_OUTPUT: &str = "\
Total Upload: 12.34 KiB / gzip: 4.56 KiB
Uploaded my-worker (2.34 sec)
Worker Version ID: 5e33cafe-8c29-4a4c-b4f6-66c4ce09fbae
To deploy this version to production traffic use the command:
  wrangler versions deploy
";

const DEPLOY_OUTPUT: &str = "\
Deployed my-worker version 5e33cafe-8c29-4a4c-b4f6-66c4ce09fbae
Current Version ID: 5e33cafe-8c29-4a4c-b4f6-66c4ce09fbae
  https://my-worker.acme.workers.dev
";

#[test]
fn version_id_from_upload_output() {
    assert_eq!(
        extract::version_id(UPLOAD_OUTPUT).as_deref(),
        Some("5e33cafe-8c29-4a4c-b4f6-66c4ce09fbae")
    );
}

#[test]
fn upload_output_has_no_url_worth_publishing() {
    // The upload phase prints no deployment URL; the pipeline
    // only looks for one after deploy.
    assert_eq!(extract::deployment_url(UPLOAD_OUTPUT), None);
}

#[test]
fn deployment_url_from_deploy_output() {
    assert_eq!(
        extract::deployment_url(DEPLOY_OUTPUT).as_deref(),
        Some("https://my-worker.acme.workers.dev")
    );
}

#[test]
fn extraction_misses_return_none_not_errors() {
    let garbage = "wrangler changed its output format again";

    assert_eq!(extract::version_id(garbage), None);
    assert_eq!(extract::deployment_url(garbage), None);
}

#[test]
fn id_with_uppercase_hex_stops_at_first_invalid_char() {
    // The id charset is lowercase hex and hyphens; anything
    // else ends the match.
    assert_eq!(
        extract::version_id("Worker Version ID: abc123XYZ").as_deref(),
        Some("abc123")
    );
}
