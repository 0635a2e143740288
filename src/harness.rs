#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::analysis::{CodeAnalysisResult, ExecutionStyle};
use crate::constants::{
    ANSWER_KIND, ENTRYPOINT_CLASS_PLACEHOLDER, GSON_IMPORT, NORMALIZER_CLASS,
    NORMALIZER_CLASS_NAME, TEST_ID_FLAG, TIME_KIND,
};
use crate::exec::ExecutionJob;
use crate::java::ast::Span;
use crate::util::{helper_prefix, java_identifier_from, signing_marker};

/// A programming error inside the injection contract.
///
/// Reported generically to callers ("internal error") and logged in
/// full detail server-side; never a user-facing outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InjectionError {
    /// An insertion was requested before an analysis result was
    /// ingested, so no entry-method range exists to anchor on.
    #[error("no entry method range has been established for this solution")]
    MissingEntryMethod,
}

/// One test case to be arranged, called, and asserted inside the entry
/// method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct TestCase {
    /// Unique identifier; its textual form tags the result line.
    pub id:            Uuid,
    /// Arrange code inserted ahead of the call. Occurrences of
    /// `${ENTRYPOINT_CLASS_NAME}` are replaced with the entry class.
    #[builder(default, setter(into))]
    pub setup:         String,
    /// The function to call, as written at the call site.
    #[builder(setter(into))]
    pub call:          String,
    /// Literal argument expressions, in order.
    #[builder(default)]
    pub args:          Vec<String>,
    /// Java expression producing the expected value.
    #[builder(setter(into))]
    pub expected:      String,
    /// Whether element order matters when comparing collections.
    #[builder(default = true)]
    pub order_matters: bool,
}

/// Per-request state for one submission: the mutable source buffer, the
/// signing identifiers, and the live entry-method span.
///
/// The struct exclusively owns the buffer. Every mutation goes through
/// [`UserSolutionData::splice`], the only code path permitted to move
/// the live span, so the anchor invariant cannot be violated by a
/// forgotten manual increment. Created per incoming request and
/// discarded after dispatch; no cross-request state is retained.
#[derive(Debug)]
pub struct UserSolutionData {
    /// The submission source, mutated in place by injection.
    source:      String,
    /// Unique id of this execution job.
    job_id:      Uuid,
    /// High-entropy key distinguishing control output from user output.
    signing_key: Uuid,
    /// Dry run or graded submission.
    style:       ExecutionStyle,
    /// The ingested analysis result, absent until [`Self::ingest`].
    analysis:    Option<CodeAnalysisResult>,
}

impl UserSolutionData {
    /// Wraps a submission buffer with freshly generated identifiers.
    pub fn new(source: impl Into<String>, style: ExecutionStyle) -> Self {
        Self {
            source:      source.into(),
            job_id:      Uuid::new_v4(),
            signing_key: Uuid::new_v4(),
            style,
            analysis:    None,
        }
    }

    /// The current contents of the owned buffer.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Unique id of this execution job.
    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    /// The per-job signing key embedded in injected print statements.
    pub fn signing_key(&self) -> Uuid {
        self.signing_key
    }

    /// The execution style this solution was created under.
    pub fn style(&self) -> ExecutionStyle {
        self.style
    }

    /// Stores the analysis result, establishing the injection anchors.
    pub fn ingest(&mut self, result: CodeAnalysisResult) {
        self.analysis = Some(result);
    }

    /// The ingested analysis result, if any.
    pub fn analysis(&self) -> Option<&CodeAnalysisResult> {
        self.analysis.as_ref()
    }

    /// The ingested result, or the fail-fast injection error.
    fn ingested(&self) -> Result<&CodeAnalysisResult, InjectionError> {
        self.analysis.as_ref().ok_or(InjectionError::MissingEntryMethod)
    }

    /// The live entry-method span, if analysis has been ingested.
    pub fn entry_span(&self) -> Option<Span> {
        self.analysis.as_ref().map(|a| a.entry_span)
    }

    /// Inserts `text` at byte offset `at` and shifts the live
    /// entry-method span by exactly the inserted length.
    ///
    /// This is the single insert-and-shift primitive: text landing
    /// before the span moves both ends, text landing inside it moves
    /// only the end, text after it moves nothing.
    pub(crate) fn splice(&mut self, at: usize, text: &str) {
        self.source.insert_str(at, text);
        if let Some(result) = self.analysis.as_mut() {
            let span = &mut result.entry_span;
            if at <= span.begin {
                span.begin += text.len();
                span.end += text.len();
            } else if at < span.end {
                span.end += text.len();
            }
        }
    }

    /// Consumes the solution into the dispatchable job payload.
    pub fn into_job(self) -> Result<ExecutionJob, InjectionError> {
        let entry_class = match &self.analysis {
            Some(analysis) => analysis.entry_class.clone(),
            None => return Err(InjectionError::MissingEntryMethod),
        };

        let mut files = BTreeMap::new();
        files.insert(format!("{entry_class}.java"), self.source);

        Ok(ExecutionJob {
            job_id: self.job_id,
            entrypoint: entry_class,
            files,
        })
    }
}

/// Mutates the owned buffer so that, when executed, the program emits
/// machine-parseable markers alongside whatever the user's own code
/// prints.
pub struct HarnessInjector<'a> {
    /// The solution being instrumented.
    solution: &'a mut UserSolutionData,
}

impl<'a> HarnessInjector<'a> {
    /// Wraps a solution whose analysis result has been ingested.
    pub fn new(solution: &'a mut UserSolutionData) -> Self {
        Self { solution }
    }

    /// Inserts wall-clock reads at the entry method's boundaries and a
    /// tagged print of the elapsed milliseconds.
    pub fn insert_timing(&mut self) -> Result<(), InjectionError> {
        let prefix = helper_prefix(&self.solution.job_id());
        let start_var = format!("{prefix}_start");
        let end_var = format!("{prefix}_end");

        self.insert_at_entry_start(&timing_variable(&start_var))?;
        self.insert_at_entry_end(&timing_variable(&end_var))?;

        let elapsed = format!("({end_var} - {start_var})");
        let line = self.signed_print(&elapsed, TIME_KIND);
        self.insert_at_entry_end(&line)?;

        tracing::debug!(job_id = %self.solution.job_id(), "timing instrumentation inserted");
        Ok(())
    }

    /// Inserts every test case: arrange code, the call binding its
    /// result to a per-case variable, and the tagged comparison print.
    ///
    /// Expected and actual values both go through the injected JSON
    /// normalizer, so equality is structural.
    pub fn insert_test_cases(&mut self, cases: &[TestCase]) -> Result<(), InjectionError> {
        let entry_class = self.solution.ingested()?.entry_class.clone();

        let tail = self.solution.source().len();
        self.solution.splice(tail, NORMALIZER_CLASS);
        self.solution.splice(0, GSON_IMPORT);

        for case in cases {
            let arranged = case.setup.replace(ENTRYPOINT_CLASS_PLACEHOLDER, &entry_class);
            self.insert_at_entry_end(&arranged)?;
        }
        for case in cases {
            self.insert_at_entry_end(&act_statement(case))?;
        }
        for case in cases {
            let line = self.signed_print(&assertion_expression(case), ANSWER_KIND);
            self.insert_at_entry_end(&line)?;
        }

        tracing::debug!(
            job_id = %self.solution.job_id(),
            cases = cases.len(),
            "test case instrumentation inserted"
        );
        Ok(())
    }

    /// Inserts immediately after the entry method's opening brace.
    fn insert_at_entry_start(&mut self, code: &str) -> Result<(), InjectionError> {
        let span = self.solution.ingested()?.entry_span;
        self.solution.splice(span.begin + 1, code);
        Ok(())
    }

    /// Inserts immediately before the entry method's closing brace.
    fn insert_at_entry_end(&mut self, code: &str) -> Result<(), InjectionError> {
        let span = self.solution.ingested()?.entry_span;
        self.solution.splice(span.end - 1, code);
        Ok(())
    }

    /// A print statement prefixed with the signed control marker.
    fn signed_print(&self, contents: &str, kind: &str) -> String {
        let marker = signing_marker(&self.solution.signing_key(), kind);
        format!("System.out.println(\"{marker}\" + {contents});\n")
    }
}

/// A statement reading the current wall clock into `name`.
fn timing_variable(name: &str) -> String {
    format!("long {name} = System.currentTimeMillis();\n")
}

/// The statement binding a test case's call result to its variable.
fn act_statement(case: &TestCase) -> String {
    let args = case.args.join(",");
    format!(
        "var {} = {}({});",
        java_identifier_from(&case.id),
        case.call,
        args
    )
}

/// The comparison expression printed behind the `answ` marker: the
/// tagged test-case id, then normalized-equality of expected vs actual.
fn assertion_expression(case: &TestCase) -> String {
    let order = if case.order_matters { "true" } else { "false" };
    format!(
        "\" {TEST_ID_FLAG}{} \" + {NORMALIZER_CLASS_NAME}.normalize({}, {order}).equals({NORMALIZER_CLASS_NAME}.normalize({}, {order}))",
        case.id,
        case.expected,
        java_identifier_from(&case.id)
    )
}
