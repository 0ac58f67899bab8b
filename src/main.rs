use clap::Parser;
use tracing::error;

use arbalest::{Inputs, Pipeline, gha};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let inputs = Inputs::parse();

    match Pipeline::new(inputs).run() {
        Ok(outcome) => {
            if let Err(e) = outcome.publish() {
                error!("failed to publish step outputs: {e}");
                gha::error(&format!("failed to publish step outputs: {e}"));
                std::process::exit(1);
            }
        }
        Err(e) => {
            // Fatal-status channel: the annotation marks the
            // step red, the exit code fails the job.
            gha::error(&e.to_string());
            std::process::exit(1);
        }
    }
}
