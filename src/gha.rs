//! GitHub Actions surface: step outputs and the fatal-status
//! annotation channel. Workflow commands are plain lines on
//! stdout; outputs go to the file named by `GITHUB_OUTPUT`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::ActionResult;

/// Publish a step output. Outside of Actions (no
/// `GITHUB_OUTPUT` in the environment) the value is logged
/// instead so local runs stay useful.
pub fn set_output(name: &str, value: &str) -> ActionResult<()> {
    match std::env::var("GITHUB_OUTPUT") {
        Ok(path) => append_output(Path::new(&path), name, value),
        Err(_) => {
            info!("output {name}={value}");
            Ok(())
        }
    }
}

/// Append one output entry to the given outputs file, using
/// the heredoc form when the value spans multiple lines.
pub fn append_output(path: &Path, name: &str, value: &str) -> ActionResult<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    if value.contains('\n') {
        let mut delimiter = "EOF".to_string();
        while value.contains(&delimiter) {
            delimiter.push('_');
        }
        writeln!(file, "{name}<<{delimiter}\n{value}\n{delimiter}")?;
    } else {
        writeln!(file, "{name}={value}")?;
    }

    Ok(())
}

/// Emit an `::error::` annotation. The runner renders it as a
/// red failure message attached to the step.
pub fn error(message: &str) {
    println!("::error::{}", escape_data(message));
}

// Workflow command data escaping: %, CR, LF.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
