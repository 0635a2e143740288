use mallard::{
    JobStatus, OutputDecoder, SandboxResponse, TestCase, prepare_dry_run, prepare_submission,
};
use uuid::Uuid;

const TEMPLATE: &str = "public class Main {
    public static int solve(int x) { return x; }
}";

const SUBMISSION: &str = "public class Main {
    public static int solve(int x) { return x * 2 - x; }
    public static void main(String[] args) { System.out.println(\"ready\"); }
}";

#[test]
fn submission_pipeline_produces_a_decodable_job() {
    let case = TestCase::builder()
        .id(Uuid::new_v4())
        .call("Main.solve")
        .args(vec!["21".to_string()])
        .expected("21")
        .build();

    let (result, job, signing_key) =
        prepare_submission(SUBMISSION, Some(TEMPLATE), std::slice::from_ref(&case))
            .expect("pipeline should succeed");

    assert!(result.passed);
    assert_eq!(job.entrypoint, "Main");

    let instrumented = job
        .files
        .get("Main.java")
        .expect("job should carry the instrumented file");
    assert!(instrumented.contains(&format!("ctr-{signing_key}-time: ")));
    assert!(instrumented.contains(&format!("ctr-{signing_key}-answ: ")));
    assert!(instrumented.contains(&format!("tc_id:{}", case.id)));
    assert!(instrumented.starts_with("import com.google.gson.Gson;"));

    // Feed back what the instrumented program would print.
    let stdout = format!(
        "ready\nctr-{signing_key}-answ:  tc_id:{} true\nctr-{signing_key}-time: 7",
        case.id
    );
    let report = OutputDecoder::new(signing_key)
        .decode_submission(&SandboxResponse {
            job_id:    job.job_id,
            status:    JobStatus::Completed,
            stdout,
            stderr:    String::new(),
            exit_code: 0,
        })
        .expect("capture should decode");

    assert_eq!(report.stdout, "ready");
    assert_eq!(report.elapsed_ms, 7);
    assert_eq!(report.test_results.len(), 1);
    assert_eq!(report.test_results[0].test_id, case.id.to_string());
    assert!(report.test_results[0].passed);
}

#[test]
fn failed_containment_still_yields_a_dispatchable_job() {
    let template = "public class Main {
        public static int missing(int x) { return x; }
    }";

    let (result, job, _key) =
        prepare_submission(SUBMISSION, Some(template), &[]).expect("pipeline should succeed");

    assert!(!result.passed);
    assert!(result.mismatch.is_some());
    assert!(job.files.contains_key("Main.java"));
}

#[test]
fn dry_run_pipeline_injects_timing_only() {
    let (result, job, signing_key) =
        prepare_dry_run(SUBMISSION).expect("dry run pipeline should succeed");

    assert!(result.passed);
    let instrumented = job
        .files
        .get("Main.java")
        .expect("job should carry the instrumented file");
    assert!(instrumented.contains(&format!("ctr-{signing_key}-time: ")));
    assert!(!instrumented.contains("-answ: "));
    assert!(!instrumented.contains("Gson"));
}

#[test]
fn job_payload_round_trips_through_json() {
    let (_result, job, _key) = prepare_dry_run(SUBMISSION).expect("pipeline should succeed");

    let encoded = serde_json::to_string(&job).expect("job should serialize");
    let decoded: mallard::ExecutionJob =
        serde_json::from_str(&encoded).expect("job should deserialize");
    assert_eq!(job, decoded);
}
