#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # mallard
//!
//! Command-line front end for the submission analysis pipeline: check a
//! submission against a template, produce an instrumented job payload,
//! or decode captured sandbox output.

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use mallard::{
    Analyzer, ExecutionStyle, JobStatus, OutputDecoder, SandboxResponse, TestCase,
    UserSolutionData, prepare_dry_run, prepare_submission,
};
use tabled::Table;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};
use uuid::Uuid;

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Parse a submission and check template containment.
    Check {
        /// Path to the submission.
        file:     String,
        /// Path to the template, if the problem has one.
        template: Option<String>,
    },
    /// Produce an instrumented job payload.
    Instrument {
        /// Path to the submission.
        file:     String,
        /// Path to the template, if the problem has one.
        template: Option<String>,
        /// Path to a JSON list of test cases.
        cases:    Option<String>,
        /// Dry run instead of graded submission.
        dry_run:  bool,
    },
    /// Decode captured sandbox stdout back into results.
    Decode {
        /// The job's signing key.
        key:        String,
        /// Path to the captured stdout.
        file:       String,
        /// Decode per-test-case results as well as timing.
        submission: bool,
    },
}

/// Parse the command line arguments and return a `Cmd` enum.
fn options() -> Cmd {
    /// parses the submission file path
    fn f() -> impl Parser<String> {
        positional("FILE").help("Path to the Java source file")
    }

    /// parses the optional template path
    fn t() -> impl Parser<Option<String>> {
        long("template")
            .help("Path to the required-structure template")
            .argument::<String>("TEMPLATE")
            .optional()
    }

    let check = {
        let file = f();
        let template = t();
        construct!(Cmd::Check { template, file })
            .to_options()
            .command("check")
            .help("Check a submission for syntax errors and template containment")
    };

    let instrument = {
        let file = f();
        let template = t();
        let cases = long("cases")
            .help("Path to a JSON list of test cases")
            .argument::<String>("CASES")
            .optional();
        let dry_run = long("dry-run")
            .help("Instrument for a dry run (timing only, no grading)")
            .switch();
        construct!(Cmd::Instrument {
            template,
            cases,
            dry_run,
            file
        })
        .to_options()
        .command("instrument")
        .help("Inject the test harness and print the job payload")
    };

    let decode = {
        let key = long("key")
            .help("Signing key the job was instrumented with")
            .argument::<String>("KEY");
        let submission = long("submission")
            .help("Decode per-test-case results as well as timing")
            .switch();
        let file = positional("STDOUT").help("Path to the captured stdout");
        construct!(Cmd::Decode {
            key,
            submission,
            file
        })
        .to_options()
        .command("decode")
        .help("Decode captured sandbox output back into results")
    };

    let cmd = construct!([check, instrument, decode]);

    cmd.to_options()
        .descr("Submission analysis and harness injection for autograders")
        .run()
}

fn main() -> Result<()> {
    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match options() {
        Cmd::Check { file, template } => {
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("Could not read file: {file}"))?;
            let template = template
                .map(|path| {
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Could not read template: {path}"))
                })
                .transpose()?;

            let mut solution = UserSolutionData::new(source, ExecutionStyle::Submission);
            let analyzer = match template.as_deref() {
                Some(template) => Analyzer::with_template(&mut solution, template)?,
                None => Analyzer::new(&mut solution)?,
            };
            let result = analyzer.analyze()?;

            if result.passed {
                println!("{} entry class `{}`", "PASSED".green().bold(), result.entry_class);
            } else {
                println!("{}", "FAILED".red().bold());
                if let Some(reason) = &result.mismatch {
                    println!("{reason}");
                }
            }
        }
        Cmd::Instrument {
            file,
            template,
            cases,
            dry_run,
        } => {
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("Could not read file: {file}"))?;
            let template = template
                .map(|path| {
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Could not read template: {path}"))
                })
                .transpose()?;
            let cases: Vec<TestCase> = cases
                .map(|path| -> Result<Vec<TestCase>> {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("Could not read test cases: {path}"))?;
                    serde_json::from_str(&raw)
                        .with_context(|| format!("Could not parse test cases: {path}"))
                })
                .transpose()?
                .unwrap_or_default();

            let (result, job, signing_key) = if dry_run {
                prepare_dry_run(&source)?
            } else {
                prepare_submission(&source, template.as_deref(), &cases)?
            };

            let envelope = serde_json::json!({
                "signing_key": signing_key,
                "passed": result.passed,
                "mismatch": result.mismatch,
                "job": job,
            });
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Cmd::Decode {
            key,
            file,
            submission,
        } => {
            let key: Uuid = key.parse().context("Signing key is not a valid UUID")?;
            let captured = std::fs::read_to_string(&file)
                .with_context(|| format!("Could not read file: {file}"))?;
            let response = SandboxResponse {
                job_id:    Uuid::new_v4(),
                status:    JobStatus::Completed,
                stdout:    captured,
                stderr:    String::new(),
                exit_code: 0,
            };

            let decoder = OutputDecoder::new(key);
            if submission {
                let report = decoder.decode_submission(&response)?;
                let passed = report.test_results.iter().filter(|r| r.passed).count();
                let total = report.test_results.len();
                println!("{}", Table::new(&report.test_results));
                let verdict = format!("{passed}/{total} test cases passed");
                if passed == total {
                    println!("{}", verdict.green().bold());
                } else {
                    println!("{}", verdict.red().bold());
                }
                println!("elapsed: {}ms", report.elapsed_ms);
                if !report.stdout.is_empty() {
                    println!("{}", report.stdout);
                }
            } else {
                let report = decoder.decode_dry_run(&response)?;
                println!("elapsed: {}ms", report.elapsed_ms);
                if !report.stdout.is_empty() {
                    println!("{}", report.stdout);
                }
            }
        }
    }

    Ok(())
}
