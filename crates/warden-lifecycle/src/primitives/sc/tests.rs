use std::io;

use camino::Utf8PathBuf;
use mockall::mock;
use mockall::predicate::eq;
use rstest::rstest;

use super::parse::{failure_code, state_code};
use super::*;
use crate::classifier::codes;

mock! {
    pub Runner {}

    impl CommandRunner for Runner {
        fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
    }
}

fn owned(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| (*part).to_owned()).collect()
}

fn success(stdout: &str) -> io::Result<CommandOutput> {
    Ok(CommandOutput {
        status: Some(0),
        stdout: stdout.to_owned(),
        stderr: String::new(),
    })
}

fn failed(code: i32, stdout: &str) -> io::Result<CommandOutput> {
    Ok(CommandOutput {
        status: Some(code),
        stdout: stdout.to_owned(),
        stderr: String::new(),
    })
}

const RUNNING_QUERY: &str = "\r\nSERVICE_NAME: Probe\r\n        TYPE               : 10  WIN32_OWN_PROCESS\r\n        STATE              : 4  RUNNING\r\n                                (STOPPABLE, NOT_PAUSABLE, IGNORES_SHUTDOWN)\r\n        WIN32_EXIT_CODE    : 0  (0x0)\r\n";

#[rstest]
#[case("[SC] OpenService FAILED 1060:\n\nThe specified service does not exist as an installed service.", Some(1060))]
#[case("[SC] CreateService FAILED 5:\n\nAccess is denied.", Some(5))]
#[case("[SC] StartService FAILED", None)]
#[case("[SC] CreateService SUCCESS", None)]
fn failure_codes_are_scraped(#[case] text: &str, #[case] expected: Option<i32>) {
    assert_eq!(failure_code(text), expected);
}

#[rstest]
#[case(RUNNING_QUERY, Some(4))]
#[case("STATE : 1  STOPPED", Some(1))]
#[case("SERVICE_NAME: Probe", None)]
fn state_codes_are_scraped(#[case] text: &str, #[case] expected: Option<u32>) {
    assert_eq!(state_code(text), expected);
}

#[test]
fn create_passes_registration_arguments() {
    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .with(
            eq("sc.exe"),
            eq(owned(&[
                "create",
                "Probe",
                "binPath=",
                "C:/probe.exe",
                "DisplayName=",
                "Probe Service",
                "start=",
                "demand",
            ])),
        )
        .times(1)
        .returning(|_, _| success("[SC] CreateService SUCCESS"));
    let manager = ScServiceManager::new("sc.exe", runner);
    let spec = ServiceSpec::new("Probe", "Probe Service").with_binary_path(Utf8PathBuf::from("C:/probe.exe"));

    assert!(manager.create(&spec).is_ok());
}

#[test]
fn create_without_binary_never_invokes_the_tool() {
    let mut runner = MockRunner::new();
    runner.expect_run().never();
    let manager = ScServiceManager::new("sc.exe", runner);

    let result = manager.create(&ServiceSpec::new("Probe", "Probe Service"));

    assert!(matches!(result, Err(ServiceError::MissingBinary { .. })));
}

#[test]
fn failures_carry_classified_platform_codes() {
    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .returning(|_, _| failed(5, "[SC] StartService FAILED 5:\n\nAccess is denied."));
    let manager = ScServiceManager::new("sc.exe", runner);

    let error = manager.start("Probe").expect_err("start should fail");

    assert!(error.has_code(codes::ACCESS_DENIED));
    assert!(error.to_string().contains("Access is denied."));
}

#[test]
fn exit_status_is_used_when_output_lacks_a_code() {
    let mut runner = MockRunner::new();
    runner.expect_run().returning(|_, _| failed(1062, ""));
    let manager = ScServiceManager::new("sc.exe", runner);

    let error = manager.stop("Probe").expect_err("stop should fail");

    assert!(error.has_code(codes::SERVICE_NOT_ACTIVE));
}

#[test]
fn signal_termination_without_output_is_rejected() {
    let mut runner = MockRunner::new();
    runner.expect_run().returning(|_, _| {
        Ok(CommandOutput {
            status: None,
            stdout: String::new(),
            stderr: String::new(),
        })
    });
    let manager = ScServiceManager::new("sc.exe", runner);

    let error = manager.mark_for_deletion("Probe").expect_err("delete should fail");

    assert!(matches!(error, ServiceError::Rejected { .. }));
}

#[test]
fn launch_failures_name_the_program() {
    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .returning(|_, _| Err(io::Error::new(io::ErrorKind::NotFound, "not found")));
    let manager = ScServiceManager::new("missing-sc.exe", runner);

    let error = manager.query_status("Probe").expect_err("query should fail");

    assert!(error.to_string().contains("missing-sc.exe"));
}

#[test]
fn query_reads_the_reported_state() {
    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .with(eq("sc.exe"), eq(owned(&["query", "Probe"])))
        .returning(|_, _| success(RUNNING_QUERY));
    let manager = ScServiceManager::new("sc.exe", runner);

    let status = manager.query_status("Probe").expect("query should succeed");

    assert_eq!(status, ServiceStatus::Running);
}
