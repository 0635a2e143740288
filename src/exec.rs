#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a dispatched execution job.
///
/// The progression is closed: Queued → Compiling → Executing → one
/// terminal state. Consumers must treat every terminal state as final
/// and stop waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Accepted, not yet picked up by the sandbox.
    Queued,
    /// The sandbox is compiling the instrumented source.
    Compiling,
    /// The compiled program is running.
    Executing,
    /// The program ran to completion.
    Completed,
    /// The instrumented source did not compile.
    CompilationFailure,
    /// The program crashed at runtime.
    RuntimeError,
    /// The sandbox itself failed.
    ServiceFailure,
    /// The program exceeded its time budget.
    Timeout,
}

impl JobStatus {
    /// Whether this status ends the job's lifecycle.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Completed
                | JobStatus::CompilationFailure
                | JobStatus::RuntimeError
                | JobStatus::ServiceFailure
                | JobStatus::Timeout
        )
    }

    /// Whether this status can still progress.
    pub fn is_intermediate(self) -> bool {
        !self.is_terminal()
    }
}

/// The payload handed to the execution sandbox: an id plus the
/// instrumented sources by file name. The queue transport that carries
/// it is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionJob {
    /// Unique job identifier.
    pub job_id:     Uuid,
    /// Name of the class holding the entry method.
    pub entrypoint: String,
    /// File name → instrumented source text.
    pub files:      BTreeMap<String, String>,
}

/// The raw result the sandbox reports back, consumed by the output
/// decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxResponse {
    /// Identifier of the job this result belongs to.
    pub job_id:    Uuid,
    /// Terminal status of the run.
    pub status:    JobStatus,
    /// Raw captured standard output.
    #[serde(default)]
    pub stdout:    String,
    /// Raw captured standard error.
    #[serde(default)]
    pub stderr:    String,
    /// Process exit code.
    #[serde(default)]
    pub exit_code: i32,
}
