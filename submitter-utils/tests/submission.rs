use serde_json::{Value, json};
use std::fs;
use submitter_utils::{
    Client, Credentials, Environment, ErrorKind, PodStartingArgs, RecordingTransport,
    SubmitOutcome, SubmitterConfiguration, derive_identity, pod_starting, submit_with,
};
use url::Url;

fn client() -> Client<RecordingTransport> {
    let config = SubmitterConfiguration {
        base_url: Url::parse("http://submitter.grading.svc:3000/").unwrap(),
        timeout_secs: 5,
    };
    Client::new(&config, RecordingTransport::default(), "jupyter-abc123")
}

fn labconfig(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("labconfig.yaml");
    fs::write(&path, "Labs:\n  lab1:\n    x: {}\n    y: {}\n").unwrap();
    path
}

#[test]
fn end_to_end_submission() {
    let dir = tempfile::tempdir().unwrap();
    let path = labconfig(&dir);
    let client = client();
    let env: Environment = json!({"x": 5, "unrelated": "value"})
        .as_object()
        .unwrap()
        .clone();
    let outcome = submit_with(&client, &path, "lab1", &env);
    assert!(outcome.is_success());
    let answers: Value = serde_json::from_str(&outcome.to_json()).unwrap();
    assert_eq!(answers, json!({"x": 5, "y": null}));

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(
        request.url.as_str(),
        "http://submitter.grading.svc:3000/submit-answers"
    );
    assert_eq!(request.credentials, Credentials::student());
    assert_eq!(request.form["edx-anon-id"], json!(derive_identity("jupyter-abc123")));
    assert_eq!(request.form["labname"], json!("lab1"));
    let sent: Value = serde_json::from_str(request.form["lab-answers"].as_str().unwrap()).unwrap();
    assert_eq!(sent, answers);
}

#[test]
fn unknown_lab_is_reported_without_submitting() {
    let dir = tempfile::tempdir().unwrap();
    let path = labconfig(&dir);
    let client = client();
    let outcome = submit_with(&client, &path, "lab42", &Environment::new());
    assert!(matches!(
        outcome,
        SubmitOutcome::Failed {
            kind: ErrorKind::LabNotFound,
            ..
        }
    ));
    let report: Value = serde_json::from_str(&outcome.to_json()).unwrap();
    assert_eq!(report["ok"], json!(false));
    assert_eq!(report["kind"], json!("lab_not_found"));
    assert!(report["error"].as_str().unwrap().contains("lab42"));
    assert!(client.transport().requests().is_empty());
}

#[test]
fn malformed_labconfig_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labconfig.yaml");
    fs::write(&path, "Labs: [x, y").unwrap();
    let client = client();
    let report: Value =
        serde_json::from_str(&submit_with(&client, &path, "lab1", &Environment::new()).to_json())
            .unwrap();
    assert_eq!(report["ok"], json!(false));
    assert_eq!(report["kind"], json!("unhandled"));
    assert!(client.transport().requests().is_empty());
}

#[test]
fn pod_start_then_submission() {
    let dir = tempfile::tempdir().unwrap();
    let path = labconfig(&dir);
    let client = client();
    let args = PodStartingArgs {
        edx_anon_id: None,
        submit_passwd: Some("staff-secret".to_owned()),
    };
    let started = pod_starting(&client, &args, false).unwrap();
    let env: Environment = json!({"x": 1, "y": [2, 3]}).as_object().unwrap().clone();
    assert!(submit_with(&client, &path, "lab1", &env).is_success());

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.path(), "/pod-starting");
    assert_eq!(requests[0].credentials, Credentials::staff("staff-secret"));
    assert_eq!(requests[1].url.path(), "/submit-answers");
    assert_eq!(requests[0].form["edx-anon-id"], json!(started.identity));
    assert_eq!(requests[1].form["edx-anon-id"], json!(started.identity));
}
