//! # mallard
//!
//! A Java submission analyzer, test-harness injector, and sandbox-output
//! decoder for autograders.
//!
//! The pipeline: a submission is lexed and parsed into an AST, checked
//! for structural containment of a problem's required template, rewritten
//! in place with instrumentation that serializes expected-vs-actual
//! results and timing into tagged output lines, and handed off as a job
//! payload for sandboxed execution. Afterwards the captured output is
//! decoded back into typed pass/fail and timing results. Execution
//! itself, and the transport that dispatches it, are the caller's
//! concern.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Structural compliance analysis over parsed submissions.
pub mod analysis;
/// A module defining a bunch of constant values to be used throughout.
pub mod constants;
/// Decoding of captured sandbox output into typed reports.
pub mod decode;
/// Job payloads and statuses exchanged with the execution sandbox.
pub mod exec;
/// Harness injection into the owned submission buffer.
pub mod harness;
/// Lexing, parsing, and the AST for the Java source language.
pub mod java;
/// For all parsers of tagged control-line payloads.
pub mod parsers;
/// Utility functions for convenience.
pub mod util;

use anyhow::{Context, Result};
use uuid::Uuid;

pub use analysis::{AnalyzeError, Analyzer, CodeAnalysisResult, ExecutionStyle};
pub use decode::{DryRunReport, OutputDecoder, SubmissionReport, TestResult};
pub use exec::{ExecutionJob, JobStatus, SandboxResponse};
pub use harness::{HarnessInjector, InjectionError, TestCase, UserSolutionData};

/// Runs the full pre-execution pipeline for a graded submission:
/// analyze against the template, inject timing and test cases, and
/// produce the dispatchable job payload.
///
/// Returns the analysis result, the job payload, and the signing key
/// the caller will need to decode the captured output.
pub fn prepare_submission(
    source: &str,
    template: Option<&str>,
    cases: &[TestCase],
) -> Result<(CodeAnalysisResult, ExecutionJob, Uuid)> {
    let mut solution = UserSolutionData::new(source, ExecutionStyle::Submission);

    let analyzer = match template {
        Some(template) => Analyzer::with_template(&mut solution, template)
            .context("Could not analyze the submission against its template")?,
        None => Analyzer::new(&mut solution).context("Could not analyze the submission")?,
    };
    let result = analyzer.analyze()?;
    solution.ingest(result.clone());

    let mut injector = HarnessInjector::new(&mut solution);
    injector.insert_timing()?;
    if !cases.is_empty() {
        injector.insert_test_cases(cases)?;
    }

    let signing_key = solution.signing_key();
    let job = solution.into_job()?;
    Ok((result, job, signing_key))
}

/// Runs the pre-execution pipeline for a dry run: analyze without
/// grading, inject timing only, produce the job payload.
pub fn prepare_dry_run(source: &str) -> Result<(CodeAnalysisResult, ExecutionJob, Uuid)> {
    let mut solution = UserSolutionData::new(source, ExecutionStyle::DryRun);

    let analyzer = Analyzer::new(&mut solution).context("Could not analyze the submission")?;
    let result = analyzer.analyze()?;
    solution.ingest(result.clone());

    HarnessInjector::new(&mut solution).insert_timing()?;

    let signing_key = solution.signing_key();
    let job = solution.into_job()?;
    Ok((result, job, signing_key))
}
