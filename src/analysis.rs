#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{BASELINE_ENTRY_METHOD, ENTRY_METHOD_NAME};
use crate::harness::UserSolutionData;
use crate::java::ast::{
    AccessModifier, Ast, MemberFunction, MemberVariable, Modifier, Span, TypeId, TypeKind, TypeRef,
};
use crate::java::{ParseError, Parser};

/// How a submission is being run, which decides how much of the
/// analysis applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStyle {
    /// Run for output and timing only; no structural grading.
    DryRun,
    /// Graded submission; the template containment check runs.
    Submission,
}

/// Everything one analysis run produces.
///
/// Produced once per run and consumed exactly once by
/// [`UserSolutionData::ingest`] to seed the injection anchors. The entry
/// span is returned regardless of pass/fail so callers can still show
/// the user's raw structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeAnalysisResult {
    /// Whether the submission structurally contains the template.
    pub passed:      bool,
    /// Byte range of the entry method's `{ ... }` body.
    pub entry_span:  Span,
    /// Name of the class hosting the entry method.
    pub entry_class: String,
    /// The execution style the analysis ran under.
    pub style:       ExecutionStyle,
    /// Description of the first structural mismatch, when `passed` is
    /// false. Phrased for the submitter, not for operators.
    pub mismatch:    Option<String>,
}

/// Errors that prevent analysis from producing a result at all.
///
/// Distinct from a compliance failure, which is the normal
/// `passed = false` outcome: a submission that does not parse cannot be
/// structurally evaluated, and that distinction is preserved for the
/// caller.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// The submission (or the template) failed to lex or parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The submission has no public class to host an entry point.
    #[error("no public class is available to host the program entry point")]
    EntrypointNotFound,
}

/// Decides whether a submitted AST contains a required template AST and
/// locates the entry method's source bounds for later injection.
///
/// Running the analyzer twice on byte-identical inputs yields identical
/// results; it is a pure function of the submission, the template, and
/// the execution style, except for the one sanctioned mutation of
/// synthesizing a missing entry method into the owned buffer.
#[derive(Debug)]
pub struct Analyzer<'a> {
    /// The solution whose buffer is being analyzed.
    solution: &'a mut UserSolutionData,
    /// Parsed submission.
    user:     Ast,
    /// Parsed template, absent for dry runs and template-less problems.
    template: Option<Ast>,
}

impl<'a> Analyzer<'a> {
    /// Parses the solution buffer and prepares an analyzer without a
    /// template.
    pub fn new(solution: &'a mut UserSolutionData) -> Result<Self, AnalyzeError> {
        let user = Parser::parse_program(solution.source())?;
        Ok(Self {
            solution,
            user,
            template: None,
        })
    }

    /// Parses both the solution buffer and a template describing the
    /// required structure.
    pub fn with_template(
        solution: &'a mut UserSolutionData,
        template: &str,
    ) -> Result<Self, AnalyzeError> {
        let template = Parser::parse_program(template)?;
        let user = Parser::parse_program(solution.source())?;
        Ok(Self {
            solution,
            user,
            template: Some(template),
        })
    }

    /// Runs the analysis: locates (or synthesizes) the entry method and,
    /// for graded submissions, checks structural containment.
    pub fn analyze(mut self) -> Result<CodeAnalysisResult, AnalyzeError> {
        let style = self.solution.style();
        let (entry_class, entry_span) = self.locate_entry()?;

        let (passed, mismatch) = if style == ExecutionStyle::Submission {
            self.check_containment()
        } else {
            (true, None)
        };

        match &mismatch {
            None => tracing::debug!(%entry_class, passed, "structural analysis complete"),
            Some(reason) => tracing::info!(%entry_class, %reason, "submission failed containment"),
        }

        Ok(CodeAnalysisResult {
            passed,
            entry_span,
            entry_class,
            style,
            mismatch,
        })
    }

    /// Finds the entry method's body span, synthesizing a baseline entry
    /// method at the end of the primary public class when none exists.
    fn locate_entry(&mut self) -> Result<(String, Span), AnalyzeError> {
        let public_classes: Vec<TypeId> = self
            .user
            .top_level()
            .iter()
            .copied()
            .filter(|id| {
                let decl = self.user.type_decl(*id);
                decl.kind == TypeKind::Class && decl.access == AccessModifier::Public
            })
            .collect();

        if public_classes.is_empty() {
            return Err(AnalyzeError::EntrypointNotFound);
        }

        for id in &public_classes {
            let decl = self.user.type_decl(*id);
            if let Some(span) = decl
                .functions()
                .find(|f| is_entry_method(f))
                .and_then(|f| f.body)
            {
                return Ok((decl.name.clone(), span));
            }
        }

        let host = public_classes[0];
        let name = self.user.type_decl(host).name.clone();
        let span = self.synthesize_entry(host);
        Ok((name, span))
    }

    /// Splices a baseline `main` just before the closing brace of
    /// `host`, returning the span of its empty body.
    fn synthesize_entry(&mut self, host: TypeId) -> Span {
        let class_body = self.user.type_decl(host).body;
        let insert_at = class_body.end - 1;
        self.solution.splice(insert_at, BASELINE_ENTRY_METHOD);
        tracing::debug!(offset = insert_at, "synthesized baseline entry method");

        // The synthesized method's braces are its final two characters.
        Span {
            begin: insert_at + BASELINE_ENTRY_METHOD.len() - 2,
            end:   insert_at + BASELINE_ENTRY_METHOD.len(),
        }
    }

    /// One-directional containment: every template class, member, and
    /// signature must have a structurally matching counterpart in the
    /// submission. Fails fast on the first mismatch.
    fn check_containment(&self) -> (bool, Option<String>) {
        let Some(template) = &self.template else {
            return (true, None);
        };

        let template_index = path_index(template);
        let user_index = path_index(&self.user);

        for (path, template_id) in &template_index {
            let Some(user_id) = user_index.get(path) else {
                return (false, Some(format!("required class `{path}` is missing")));
            };

            let required = template.type_decl(*template_id);
            let actual = self.user.type_decl(*user_id);

            if required.kind != actual.kind {
                return (
                    false,
                    Some(format!(
                        "`{path}` is required to be declared as a {}",
                        match required.kind {
                            TypeKind::Class => "class",
                            TypeKind::Interface => "interface",
                        }
                    )),
                );
            }

            if required.generics != actual.generics {
                return (
                    false,
                    Some(format!(
                        "generic parameters of `{path}` do not match the required declaration"
                    )),
                );
            }

            for function in required.functions() {
                if !actual
                    .functions()
                    .any(|candidate| function_matches(function, candidate))
                {
                    return (
                        false,
                        Some(format!(
                            "no matching declaration for required method `{path}.{}`",
                            function.name
                        )),
                    );
                }
            }

            for variable in required.variables() {
                if !actual
                    .variables()
                    .any(|candidate| variable_matches(variable, candidate))
                {
                    return (
                        false,
                        Some(format!(
                            "no matching declaration for required field `{path}.{}`",
                            variable.name
                        )),
                    );
                }
            }
        }

        (true, None)
    }
}

/// Qualified-path index of every type declaration in an AST, making
/// nested-class matching independent of declaration order.
fn path_index(ast: &Ast) -> BTreeMap<String, TypeId> {
    ast.all_types()
        .map(|id| (ast.qualified_name(id), id))
        .collect()
}

/// Whether a function is the designated program entry point:
/// `public static void main(String[] args)` with a body.
fn is_entry_method(function: &MemberFunction) -> bool {
    !function.is_constructor
        && function.name == ENTRY_METHOD_NAME
        && function.access == AccessModifier::Public
        && function.modifiers.contains(&Modifier::Static)
        && function.return_type.as_ref().is_some_and(TypeRef::is_void)
        && function.params.len() == 1
        && function.params[0].ty.name == "String"
        && function.params[0].ty.dims == 1
        && function.body.is_some()
}

/// Signature containment for one member function.
///
/// Modifier keywords compare as required ⊆ actual; generic parameters
/// and parameter types compare as ordered sequences; parameter names do
/// not participate.
fn function_matches(required: &MemberFunction, actual: &MemberFunction) -> bool {
    if required.is_constructor != actual.is_constructor {
        return false;
    }
    if !required.is_constructor && required.name != actual.name {
        return false;
    }
    if required.access != actual.access {
        return false;
    }
    if !required
        .modifiers
        .iter()
        .all(|m| actual.modifiers.contains(m))
    {
        return false;
    }
    if required.generics != actual.generics {
        return false;
    }

    let return_types_match = match (&required.return_type, &actual.return_type) {
        (None, None) => true,
        (Some(a), Some(b)) => type_matches(a, b),
        _ => false,
    };
    if !return_types_match {
        return false;
    }

    required.params.len() == actual.params.len()
        && required
            .params
            .iter()
            .zip(&actual.params)
            .all(|(a, b)| type_matches(&a.ty, &b.ty))
}

/// Identifier and exact type (base name plus array dimension) for one
/// member variable.
fn variable_matches(required: &MemberVariable, actual: &MemberVariable) -> bool {
    required.name == actual.name && type_matches(&required.ty, &actual.ty)
}

/// Base name and array-dimension equality for two type references.
fn type_matches(a: &TypeRef, b: &TypeRef) -> bool {
    a.name == b.name && a.dims == b.dims && a.varargs == b.varargs
}
