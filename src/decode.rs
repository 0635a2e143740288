#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tabled::Tabled;
use thiserror::Error;
use uuid::Uuid;

use crate::constants::{ANSWER_KIND, CONTROL_PREFIX, TIME_KIND};
use crate::exec::{JobStatus, SandboxResponse};
use crate::parsers::parser;

/// A corruption of the injection/decoding contract itself.
///
/// Raised when a line carries the job's signing-key marker but the
/// following bytes match no recognized kind, or a recognized kind
/// carries an unparseable payload. This is a bug, not a user error:
/// fatal for the job, logged loudly, reported generically to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Marker present, kind unrecognized.
    #[error("control line carries the job signing key but no recognized kind")]
    MangledControlLine {
        /// The offending line, kept for server-side logs.
        line: String,
    },
    /// Recognized kind, unparseable payload.
    #[error("malformed `{kind}` control payload")]
    MalformedPayload {
        /// Which kind failed to parse.
        kind:    &'static str,
        /// The offending payload, kept for server-side logs.
        payload: String,
    },
}

/// The outcome of one injected test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct TestResult {
    #[tabled(rename = "Test case")]
    /// Identifier of the test case, as tagged in the control line.
    pub test_id: String,
    #[tabled(rename = "Passed")]
    /// Whether the normalized comparison came out equal.
    pub passed:  bool,
}

/// What a dry run produces: output and timing, no grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DryRunReport {
    /// The user program's own standard output, control lines removed.
    pub stdout:     String,
    /// Raw standard error.
    pub stderr:     String,
    /// Elapsed wall-clock milliseconds reported by the harness.
    pub elapsed_ms: i64,
    /// Terminal status of the run.
    pub status:     JobStatus,
}

/// What a graded submission produces: output, timing, and the ordered
/// per-test-case verdicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReport {
    /// The user program's own standard output, control lines removed.
    pub stdout:       String,
    /// Raw standard error.
    pub stderr:       String,
    /// Elapsed wall-clock milliseconds reported by the harness.
    pub elapsed_ms:   i64,
    /// Per-test-case results in emission order.
    pub test_results: Vec<TestResult>,
    /// Terminal status of the run.
    pub status:       JobStatus,
}

/// Intermediate product of one demultiplexing pass over captured
/// stdout.
struct Demuxed {
    /// User-program lines, joined back together.
    stdout:       String,
    /// Decoded test results in emission order.
    test_results: Vec<TestResult>,
    /// Decoded elapsed milliseconds, 0 when no timing line appeared.
    elapsed_ms:   i64,
}

/// Reconstructs typed results from the sandbox's raw captured output
/// using the job's signing key.
pub struct OutputDecoder {
    /// The per-job key injected into every control marker.
    signing_key: Uuid,
}

impl OutputDecoder {
    /// Creates a decoder for one job's signing key.
    pub fn new(signing_key: Uuid) -> Self {
        Self { signing_key }
    }

    /// Decodes a dry run: user output and timing.
    pub fn decode_dry_run(&self, response: &SandboxResponse) -> Result<DryRunReport, DecodeError> {
        let demuxed = self.demux(&response.stdout)?;
        Ok(DryRunReport {
            stdout:     demuxed.stdout,
            stderr:     response.stderr.clone(),
            elapsed_ms: demuxed.elapsed_ms,
            status:     response.status,
        })
    }

    /// Decodes a graded submission: user output, timing, and the
    /// ordered pass/fail list.
    pub fn decode_submission(
        &self,
        response: &SandboxResponse,
    ) -> Result<SubmissionReport, DecodeError> {
        let demuxed = self.demux(&response.stdout)?;
        Ok(SubmissionReport {
            stdout:       demuxed.stdout,
            stderr:       response.stderr.clone(),
            elapsed_ms:   demuxed.elapsed_ms,
            test_results: demuxed.test_results,
            status:       response.status,
        })
    }

    /// Splits captured stdout into user output and control lines.
    ///
    /// Lines without the signing-key marker are user program output and
    /// are preserved verbatim, in order.
    fn demux(&self, captured: &str) -> Result<Demuxed, DecodeError> {
        let marker = format!("{CONTROL_PREFIX}{}", self.signing_key);

        let mut user_lines = Vec::new();
        let mut test_results = Vec::new();
        let mut elapsed_ms = 0i64;

        for line in captured.lines() {
            let Some(at) = line.find(&marker) else {
                user_lines.push(line);
                continue;
            };

            let rest = &line[at + marker.len()..];
            if let Some(payload) = rest.strip_prefix("-answ:") {
                let (test_id, passed) = parser::answer_payload(payload).map_err(|_| {
                    tracing::error!(%line, "unparseable answer control payload");
                    DecodeError::MalformedPayload {
                        kind:    ANSWER_KIND,
                        payload: payload.to_string(),
                    }
                })?;
                test_results.push(TestResult { test_id, passed });
            } else if let Some(payload) = rest.strip_prefix("-time:") {
                elapsed_ms = parser::timing_payload(payload).map_err(|_| {
                    tracing::error!(%line, "unparseable timing control payload");
                    DecodeError::MalformedPayload {
                        kind:    TIME_KIND,
                        payload: payload.to_string(),
                    }
                })?;
            } else {
                tracing::error!(
                    %line,
                    "control marker with unrecognized kind; injection/decoding contract violated"
                );
                return Err(DecodeError::MangledControlLine {
                    line: line.to_string(),
                });
            }
        }

        Ok(Demuxed {
            stdout: user_lines.iter().join("\n"),
            test_results,
            elapsed_ms,
        })
    }
}
