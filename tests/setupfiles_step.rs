#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for the setup files step.

mod common;

use std::sync::Arc;

use common::IntegrationTestContext;
use pcm_cli::platform::Os;
use pcm_cli::prompt::{AssumeYes, ScriptedConfirm};
use pcm_cli::steps::setupfiles::WriteSetupFiles;
use pcm_cli::steps::{Step, StepResult};

fn valve_names(path: &std::path::Path) -> Vec<String> {
    let text = std::fs::read_to_string(path).unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    doc.as_sequence()
        .expect("valves.yaml is a list")
        .iter()
        .filter_map(|v| v.get("name").and_then(serde_yaml::Value::as_str))
        .map(str::to_string)
        .collect()
}

#[test]
fn standard_profile_has_no_ngx_files() {
    let t = IntegrationTestContext::new();
    let ctx = t.context(Os::Linux);
    assert_eq!(WriteSetupFiles.run(&ctx).unwrap(), StepResult::Ok);

    let setup = t.env_root().join("setupfiles");
    assert!(setup.join("canvas2D").is_dir());
    assert!(setup.join("startup_tests.yaml").is_file());
    assert!(!setup.join("devices").exists());
    let names = valve_names(&setup.join("extractionline/valves.yaml"));
    assert!(!names.iter().any(|n| n == "MS_Inlet"));
}

#[test]
fn ngx_profile_appends_inlet_valve() {
    let t = IntegrationTestContext::new();
    let ctx = t.context_with(Os::Linux, Arc::new(AssumeYes), |o| {
        o.ngx = true;
    });
    WriteSetupFiles.run(&ctx).unwrap();

    let setup = t.env_root().join("setupfiles");
    let names = valve_names(&setup.join("extractionline/valves.yaml"));
    assert_eq!(names.last().map(String::as_str), Some("MS_Inlet"));
    assert!(setup.join("devices").is_dir());
    assert!(setup.join("spectrometer/mftables/mftable.csv").is_file());
}

#[test]
fn second_run_asks_nothing() {
    let t = IntegrationTestContext::new();
    WriteSetupFiles.run(&t.context(Os::Linux)).unwrap();

    let script = Arc::new(ScriptedConfirm::new([]));
    let ctx = t.context_with(Os::Linux, Arc::clone(&script) as _, |_| {});
    assert_eq!(WriteSetupFiles.run(&ctx).unwrap(), StepResult::Ok);
    assert!(script.asked().is_empty());
}
