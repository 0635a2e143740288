use mallard::{AnalyzeError, Analyzer, CodeAnalysisResult, ExecutionStyle, UserSolutionData};

/// Runs a graded analysis of `submission` against `template`.
fn analyze_pair(template: &str, submission: &str) -> CodeAnalysisResult {
    let mut solution = UserSolutionData::new(submission, ExecutionStyle::Submission);
    let analyzer =
        Analyzer::with_template(&mut solution, template).expect("inputs should parse");
    analyzer.analyze().expect("analysis should produce a result")
}

const SOLVE_TEMPLATE: &str = "public class Main {
    public static int solve(int x) { return x; }
}";

#[test]
fn containment_ignores_extra_members_and_classes() {
    let submission = "public class Main {
        public static int solve(int x) { return x + 0; }
        public static int helper() { return 0; }
        public static void main(String[] args) { System.out.println(solve(1)); }
    }
    class Scratch { int unused; }";

    let result = analyze_pair(SOLVE_TEMPLATE, submission);
    assert!(result.passed);
    assert!(result.mismatch.is_none());
}

#[test]
fn missing_required_sibling_class_fails_even_when_primary_matches() {
    let template = "public class Main {
        public static int solve(int x) { return x; }
    }
    class Helper {
        static int twice(int x) { return x * 2; }
    }";
    let submission = "public class Main {
        public static int solve(int x) { return x; }
        public static void main(String[] args) {}
    }";

    let result = analyze_pair(template, submission);
    assert!(!result.passed);
    let reason = result.mismatch.expect("mismatch reason should be present");
    assert!(reason.contains("Helper"));
}

#[test]
fn generic_parameter_order_is_significant() {
    let template = "public class Main<T, U, V> {
        public static void go() {}
    }";
    let submission = "public class Main<U, T, V> {
        public static void go() {}
        public static void main(String[] args) {}
    }";

    let result = analyze_pair(template, submission);
    assert!(!result.passed);
}

#[test]
fn array_dimension_is_significant() {
    let template = "public class Main {
        public static int[] flatten(int[] xs) { return xs; }
    }";

    let deeper = "public class Main {
        public static int[] flatten(int[][] xs) { return xs[0]; }
        public static void main(String[] args) {}
    }";
    assert!(!analyze_pair(template, deeper).passed);

    let exact = "public class Main {
        public static int[] flatten(int[] xs) { return xs; }
        public static void main(String[] args) {}
    }";
    assert!(analyze_pair(template, exact).passed);
}

#[test]
fn missing_required_modifier_fails() {
    let template = "public class Main {
        public static void tick() {}
    }";
    let submission = "public class Main {
        public void tick() {}
        public static void main(String[] args) {}
    }";

    let result = analyze_pair(template, submission);
    assert!(!result.passed);
    let reason = result.mismatch.expect("mismatch reason should be present");
    assert!(reason.contains("tick"));
}

#[test]
fn extra_modifiers_on_the_submission_are_not_constrained() {
    let template = "public class Main {
        public void tick() {}
    }";
    let submission = "public class Main {
        public final void tick() {}
        public static void main(String[] args) {}
    }";

    assert!(analyze_pair(template, submission).passed);
}

#[test]
fn required_field_matches_by_identifier_and_type() {
    let template = "public class Main {
        static int[] seen;
    }";

    let wrong_type = "public class Main {
        static long[] seen;
        public static void main(String[] args) {}
    }";
    assert!(!analyze_pair(template, wrong_type).passed);

    let matching = "public class Main {
        static int[] seen;
        public static void main(String[] args) {}
    }";
    assert!(analyze_pair(template, matching).passed);
}

#[test]
fn deeply_nested_classes_match_by_qualified_path() {
    let template = "public class Main {
        class Outer {
            class Inner {
                int depth;
            }
        }
    }";
    let submission = "public class Main {
        class Outer {
            class Inner {
                int depth;
                int extra;
            }
            class Sibling {}
        }
        public static void main(String[] args) {}
    }";

    assert!(analyze_pair(template, submission).passed);

    let wrong_leaf = "public class Main {
        class Outer {
            class Inner {
                long depth;
            }
        }
        public static void main(String[] args) {}
    }";
    let result = analyze_pair(template, wrong_leaf);
    assert!(!result.passed);
    let reason = result.mismatch.expect("mismatch reason should be present");
    assert!(reason.contains("Main.Outer.Inner"));
}

#[test]
fn analysis_is_deterministic_over_identical_inputs() {
    let submission = "public class Main {
        public static int solve(int x) { return x; }
        public static void main(String[] args) {}
    }";

    let first = analyze_pair(SOLVE_TEMPLATE, submission);
    let second = analyze_pair(SOLVE_TEMPLATE, submission);
    assert_eq!(first, second);
}

#[test]
fn entry_method_span_points_at_its_body() {
    let submission = "public class Main {
        public static void main(String[] args) { System.out.println(1); }
    }";
    let mut solution = UserSolutionData::new(submission, ExecutionStyle::DryRun);
    let result = Analyzer::new(&mut solution)
        .expect("submission should parse")
        .analyze()
        .expect("analysis should produce a result");

    assert_eq!(result.entry_class, "Main");
    let body = &submission[result.entry_span.begin..result.entry_span.end];
    assert!(body.starts_with('{'));
    assert!(body.ends_with('}'));
    assert!(body.contains("System.out.println(1);"));
}

#[test]
fn entry_span_is_returned_even_when_containment_fails() {
    let template = "public class Main {
        public static void absent() {}
    }";
    let submission = "public class Main {
        public static void main(String[] args) {}
    }";

    let result = analyze_pair(template, submission);
    assert!(!result.passed);
    assert!(!result.entry_span.is_empty());
}

#[test]
fn missing_entry_method_is_synthesized_into_the_buffer() {
    let submission = "public class Main { public static int f() { return 1; } }";
    let mut solution = UserSolutionData::new(submission, ExecutionStyle::DryRun);
    let result = Analyzer::new(&mut solution)
        .expect("submission should parse")
        .analyze()
        .expect("analysis should produce a result");

    assert!(
        solution
            .source()
            .contains("public static void main(String[] args){}")
    );
    let body = &solution.source()[result.entry_span.begin..result.entry_span.end];
    assert_eq!(body, "{}");
}

#[test]
fn submission_without_a_public_class_is_rejected() {
    let mut solution = UserSolutionData::new("class Hidden {}", ExecutionStyle::DryRun);
    let err = Analyzer::new(&mut solution)
        .expect("submission should parse")
        .analyze()
        .expect_err("analysis should reject the submission");
    assert!(matches!(err, AnalyzeError::EntrypointNotFound));
}

#[test]
fn unparseable_submission_is_a_syntax_error_not_a_compliance_failure() {
    let mut solution = UserSolutionData::new("public class {", ExecutionStyle::Submission);
    let err = Analyzer::with_template(&mut solution, SOLVE_TEMPLATE)
        .expect_err("submission should fail to parse");
    assert!(matches!(err, AnalyzeError::Parse(_)));
}

#[test]
fn dry_runs_skip_template_grading() {
    let submission = "public class Main {
        public static void main(String[] args) {}
    }";
    let mut solution = UserSolutionData::new(submission, ExecutionStyle::DryRun);
    let result = Analyzer::with_template(&mut solution, SOLVE_TEMPLATE)
        .expect("inputs should parse")
        .analyze()
        .expect("analysis should produce a result");

    assert!(result.passed);
    assert_eq!(result.style, ExecutionStyle::DryRun);
}
