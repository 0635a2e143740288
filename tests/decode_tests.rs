use mallard::decode::DecodeError;
use mallard::{JobStatus, OutputDecoder, SandboxResponse};
use uuid::Uuid;

fn response(stdout: String) -> SandboxResponse {
    SandboxResponse {
        job_id:    Uuid::new_v4(),
        status:    JobStatus::Completed,
        stdout,
        stderr:    String::new(),
        exit_code: 0,
    }
}

#[test]
fn decodes_user_output_test_results_and_timing() {
    let key = Uuid::new_v4();
    let case = Uuid::new_v4();
    let stdout = format!("hello\nctr-{key}-answ: tc_id:{case}true\nctr-{key}-time: 42");

    let report = OutputDecoder::new(key)
        .decode_submission(&response(stdout))
        .expect("capture should decode");

    assert_eq!(report.stdout, "hello");
    assert_eq!(report.elapsed_ms, 42);
    assert_eq!(report.test_results.len(), 1);
    assert_eq!(report.test_results[0].test_id, case.to_string());
    assert!(report.test_results[0].passed);
}

#[test]
fn decodes_padded_answer_payloads() {
    let key = Uuid::new_v4();
    let case = Uuid::new_v4();
    let stdout = format!("ctr-{key}-answ:  tc_id:{case} false");

    let report = OutputDecoder::new(key)
        .decode_submission(&response(stdout))
        .expect("capture should decode");

    assert_eq!(report.test_results.len(), 1);
    assert!(!report.test_results[0].passed);
}

#[test]
fn user_lines_are_preserved_verbatim_and_in_order() {
    let key = Uuid::new_v4();
    let stdout = format!("one\nctr-{key}-time: 5\ntwo\nthree");

    let report = OutputDecoder::new(key)
        .decode_dry_run(&response(stdout))
        .expect("capture should decode");

    assert_eq!(report.stdout, "one\ntwo\nthree");
    assert_eq!(report.elapsed_ms, 5);
}

#[test]
fn results_keep_emission_order() {
    let key = Uuid::new_v4();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let stdout = format!(
        "ctr-{key}-answ: tc_id:{first}true\nctr-{key}-answ: tc_id:{second}false"
    );

    let report = OutputDecoder::new(key)
        .decode_submission(&response(stdout))
        .expect("capture should decode");

    assert_eq!(report.test_results[0].test_id, first.to_string());
    assert!(report.test_results[0].passed);
    assert_eq!(report.test_results[1].test_id, second.to_string());
    assert!(!report.test_results[1].passed);
}

#[test]
fn marker_with_unrecognized_kind_is_protocol_corruption() {
    let key = Uuid::new_v4();
    let stdout = format!("ctr-{key}-zzzz: 1");

    let err = OutputDecoder::new(key)
        .decode_submission(&response(stdout))
        .expect_err("mangled kind must fail the job");
    assert!(matches!(err, DecodeError::MangledControlLine { .. }));
}

#[test]
fn unparseable_timing_payload_is_protocol_corruption() {
    let key = Uuid::new_v4();
    let stdout = format!("ctr-{key}-time: soon");

    let err = OutputDecoder::new(key)
        .decode_submission(&response(stdout))
        .expect_err("mangled payload must fail the job");
    assert!(matches!(err, DecodeError::MalformedPayload { .. }));
}

#[test]
fn lookalike_output_under_a_different_key_stays_user_output() {
    let key = Uuid::new_v4();
    let other = Uuid::new_v4();
    let stdout = format!("ctr-{other}-time: 99");

    let report = OutputDecoder::new(key)
        .decode_dry_run(&response(stdout))
        .expect("capture should decode");

    assert_eq!(report.elapsed_ms, 0);
    assert_eq!(report.stdout, format!("ctr-{other}-time: 99"));
}

#[test]
fn report_carries_the_terminal_status_through() {
    let key = Uuid::new_v4();
    let mut resp = response(String::new());
    resp.status = JobStatus::RuntimeError;

    let report = OutputDecoder::new(key)
        .decode_dry_run(&resp)
        .expect("capture should decode");
    assert_eq!(report.status, JobStatus::RuntimeError);
}

#[test]
fn job_status_progression_is_closed() {
    for status in [JobStatus::Queued, JobStatus::Compiling, JobStatus::Executing] {
        assert!(status.is_intermediate());
        assert!(!status.is_terminal());
    }
    for status in [
        JobStatus::Completed,
        JobStatus::CompilationFailure,
        JobStatus::RuntimeError,
        JobStatus::ServiceFailure,
        JobStatus::Timeout,
    ] {
        assert!(status.is_terminal());
        assert!(!status.is_intermediate());
    }
}

#[test]
fn windows_line_endings_are_handled() {
    let key = Uuid::new_v4();
    let stdout = format!("hello\r\nctr-{key}-time: 42\r\n");

    let report = OutputDecoder::new(key)
        .decode_dry_run(&response(stdout))
        .expect("capture should decode");

    assert_eq!(report.stdout, "hello");
    assert_eq!(report.elapsed_ms, 42);
}
