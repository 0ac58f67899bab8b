//! CI deployment step for Cloudflare Workers.
//!
//! Arbalest wraps the `wrangler` CLI inside a GitHub Actions
//! step: it uploads a Worker version, then deploys it, and
//! annotates both phases with a message and tag rendered from
//! commit metadata. The name follows the siege-weapon
//! tradition: a crossbow that puts your artifact on target.
//!
//! # Flow
//!
//! 1. **Collect** run facts from the `GITHUB_*` environment
//!    and the last commit ([`Metadata`]).
//! 2. **Render** the message and tag templates against those
//!    facts ([`template`]), or synthesize a
//!    `branch@sha: commit` default message.
//! 3. **Upload** via `wrangler versions upload`, streaming
//!    output to the log while capturing it.
//! 4. **Extract** the Worker version id from the captured
//!    output ([`extract`]).
//! 5. **Deploy** via `wrangler versions deploy <id> --yes`
//!    (skipped in upload-only mode) and extract the
//!    deployment URL.
//! 6. **Publish** version id, URL, message, and tag as step
//!    outputs ([`gha`]).
//!
//! Extraction is best-effort text scraping of wrangler's
//! human-readable output; the matching rules live in one
//! place ([`extract`]) so they can follow wrangler without
//! touching the flow.
//!
//! # Example
//!
//! ```rust,no_run
//! use arbalest::{Inputs, Pipeline};
//! use clap::Parser;
//!
//! fn main() -> anyhow::Result<()> {
//!     let outcome = Pipeline::new(Inputs::parse()).run()?;
//!     outcome.publish()?;
//!     Ok(())
//! }
//! ```

// Allow noisy pedantic lints that don't add value for a
// deployment tool crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod args;
pub mod cmd;
pub mod error;
pub mod extract;
pub mod gha;
pub mod metadata;
pub mod pipeline;
pub mod template;
pub mod wrangler;

pub use cmd::{Captured, CommandRunner, CommandSpec, SystemRunner};
pub use error::{ActionError, ActionResult};
pub use metadata::Metadata;
pub use pipeline::{DeployOutcome, Inputs, Pipeline};
pub use template::TemplateContext;
pub use wrangler::Wrangler;
