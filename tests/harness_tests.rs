use mallard::{
    Analyzer, ExecutionStyle, HarnessInjector, InjectionError, TestCase, UserSolutionData,
};
use uuid::Uuid;

const SUBMISSION: &str = "public class Main {
    public static void main(String[] args) { System.out.println(\"hi\"); }
    public static int solve(int x) { return x; }
}";

/// A solution whose analysis result has been ingested.
fn analyzed_solution() -> UserSolutionData {
    let mut solution = UserSolutionData::new(SUBMISSION, ExecutionStyle::Submission);
    let result = Analyzer::new(&mut solution)
        .expect("submission should parse")
        .analyze()
        .expect("analysis should produce a result");
    solution.ingest(result);
    solution
}

fn sample_case() -> TestCase {
    TestCase::builder()
        .id(Uuid::new_v4())
        .call("Main.solve")
        .args(vec!["21".to_string()])
        .expected("21")
        .build()
}

#[test]
fn injection_before_ingest_fails_fast() {
    let mut solution = UserSolutionData::new(SUBMISSION, ExecutionStyle::Submission);
    let err = HarnessInjector::new(&mut solution)
        .insert_timing()
        .expect_err("injection without an ingested analysis must fail");
    assert_eq!(err, InjectionError::MissingEntryMethod);

    let mut solution = UserSolutionData::new(SUBMISSION, ExecutionStyle::Submission);
    let err = HarnessInjector::new(&mut solution)
        .insert_test_cases(&[sample_case()])
        .expect_err("injection without an ingested analysis must fail");
    assert_eq!(err, InjectionError::MissingEntryMethod);
}

#[test]
fn timing_preserves_the_prefix_and_advances_the_end_offset() {
    let mut solution = analyzed_solution();
    let original = solution.source().to_string();
    let before = solution.entry_span().expect("analysis was ingested");

    HarnessInjector::new(&mut solution)
        .insert_timing()
        .expect("timing should insert");

    let after = solution.entry_span().expect("analysis was ingested");
    let inserted = solution.source().len() - original.len();

    assert_eq!(&solution.source()[..before.begin], &original[..before.begin]);
    assert_eq!(after.begin, before.begin);
    assert_eq!(after.end, before.end + inserted);
}

#[test]
fn timing_lines_carry_the_time_marker() {
    let mut solution = analyzed_solution();
    HarnessInjector::new(&mut solution)
        .insert_timing()
        .expect("timing should insert");

    let marker = format!("ctr-{}-time: ", solution.signing_key());
    assert!(solution.source().contains(&marker));
    assert!(solution.source().contains("System.currentTimeMillis()"));
}

#[test]
fn test_cases_insert_arrange_act_and_assert_inside_the_entry_method() {
    let mut solution = analyzed_solution();
    let case = TestCase::builder()
        .id(Uuid::new_v4())
        .setup("int unused = 0;")
        .call("Main.solve")
        .args(vec!["21".to_string()])
        .expected("21")
        .build();

    let mut injector = HarnessInjector::new(&mut solution);
    injector.insert_timing().expect("timing should insert");
    injector
        .insert_test_cases(std::slice::from_ref(&case))
        .expect("test cases should insert");

    let span = solution.entry_span().expect("analysis was ingested");
    let source = solution.source();

    // The live span still points exactly at the entry method's braces.
    assert_eq!(&source[span.begin..span.begin + 1], "{");
    assert_eq!(&source[span.end - 1..span.end], "}");

    let body = &source[span.begin..span.end];
    assert!(body.contains("int unused = 0;"));
    assert!(body.contains("Main.solve(21)"));
    assert!(body.contains(&format!("tc_id:{}", case.id)));

    // The helper class and import land outside the entry method.
    assert!(source.starts_with("import com.google.gson.Gson;"));
    assert!(source.contains("class Normalizer"));
    assert!(!body.contains("class Normalizer"));
}

#[test]
fn assertion_compares_expected_and_actual_through_the_normalizer() {
    let mut solution = analyzed_solution();
    let case = sample_case();
    HarnessInjector::new(&mut solution)
        .insert_test_cases(std::slice::from_ref(&case))
        .expect("test cases should insert");

    let variable = format!("a{}", case.id.to_string().replace('-', "_"));
    let source = solution.source();
    assert!(source.contains(&format!("var {variable} = Main.solve(21);")));
    assert!(source.contains(&format!("ctr-{}-answ: ", solution.signing_key())));
    assert!(source.contains(&format!(".equals(Normalizer3f1c9d2ab8c44b7e9e01d7f5a6c2e4d9.normalize({variable}, true))")));
}

#[test]
fn arrange_code_substitutes_the_entry_class_name() {
    let mut solution = analyzed_solution();
    let case = TestCase::builder()
        .id(Uuid::new_v4())
        .setup("${ENTRYPOINT_CLASS_NAME} instance = new ${ENTRYPOINT_CLASS_NAME}();")
        .call("instance.hashCode")
        .expected("0")
        .build();

    HarnessInjector::new(&mut solution)
        .insert_test_cases(&[case])
        .expect("test cases should insert");

    assert!(solution.source().contains("Main instance = new Main();"));
    assert!(!solution.source().contains("${ENTRYPOINT_CLASS_NAME}"));
}

#[test]
fn repeated_insertions_stay_anchored() {
    let mut solution = analyzed_solution();
    let cases: Vec<TestCase> = (0..3)
        .map(|i| {
            TestCase::builder()
                .id(Uuid::new_v4())
                .call("Main.solve")
                .args(vec![i.to_string()])
                .expected(i.to_string())
                .build()
        })
        .collect();

    let mut injector = HarnessInjector::new(&mut solution);
    injector.insert_timing().expect("timing should insert");
    injector
        .insert_test_cases(&cases)
        .expect("test cases should insert");

    let span = solution.entry_span().expect("analysis was ingested");
    let body = &solution.source()[span.begin..span.end];
    for case in &cases {
        assert!(body.contains(&format!("tc_id:{}", case.id)));
    }
}

#[test]
fn into_job_names_the_file_after_the_entry_class() {
    let job = analyzed_solution()
        .into_job()
        .expect("job payload should build");
    assert_eq!(job.entrypoint, "Main");
    assert!(job.files.contains_key("Main.java"));
    assert!(job.files["Main.java"].contains("public class Main"));
}

#[test]
fn into_job_without_analysis_fails_fast() {
    let solution = UserSolutionData::new(SUBMISSION, ExecutionStyle::Submission);
    let err = solution
        .into_job()
        .expect_err("job payload requires an ingested analysis");
    assert_eq!(err, InjectionError::MissingEntryMethod);
}

#[test]
fn signing_keys_are_unique_per_job() {
    let first = UserSolutionData::new(SUBMISSION, ExecutionStyle::Submission);
    let second = UserSolutionData::new(SUBMISSION, ExecutionStyle::Submission);
    assert_ne!(first.signing_key(), second.signing_key());
    assert_ne!(first.job_id(), second.job_id());
}
