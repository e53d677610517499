//! Check command - asserts named player behaviors

use anyhow::Result;
use clap::Args;
use embedprobe::{Expectation, ExpectationOutcome, ProbeConfig, WebDriverSession};
use serde::Serialize;
use tracing::debug;

use super::{attach, release};
use crate::output::{print_error, print_list, print_success, OutputFormat, TableDisplay};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Behaviors to assert, each against a fresh snapshot
    #[arg(short, long = "expect", value_enum, required = true)]
    pub expectations: Vec<Expectation>,
}

#[derive(Serialize)]
pub struct OutcomeDisplay(ExpectationOutcome);

impl TableDisplay for OutcomeDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Expectation", "Result", "Observed"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.0.expectation.to_string(),
            if self.0.passed { "pass" } else { "FAIL" }.to_string(),
            self.0.detail.clone(),
        ]
    }
}

/// Returns whether every expectation held
pub async fn execute(config: &ProbeConfig, args: CheckArgs, format: OutputFormat) -> Result<bool> {
    let session = WebDriverSession::connect(&config.webdriver).await?;
    let result = run(config, &session, &args.expectations).await;
    release(session).await;

    let outcomes = result?;
    let failed = outcomes.iter().filter(|o| !o.0.passed).count();
    print_list(&outcomes, format);

    if failed == 0 {
        print_success(&format!("{} expectation(s) passed", outcomes.len()));
    } else {
        print_error(&format!("{} of {} expectation(s) failed", failed, outcomes.len()));
    }
    Ok(failed == 0)
}

async fn run(
    config: &ProbeConfig,
    session: &WebDriverSession,
    expectations: &[Expectation],
) -> Result<Vec<OutcomeDisplay>> {
    let mut player = attach(config, session).await?;
    let mut outcomes = Vec::with_capacity(expectations.len());

    for expectation in expectations {
        let snapshot = player.refresh().await?;
        let outcome = expectation.check(snapshot);
        debug!("{} -> {}", expectation, outcome.passed);
        outcomes.push(OutcomeDisplay(outcome));
    }

    Ok(outcomes)
}
