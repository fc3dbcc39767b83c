use crate::client::Client;
use crate::errors::{ErrorKind, SubmitterError};
use crate::labconfig::{DEFAULT_LABCONFIG, LabConfig};
use crate::transport::Transport;
use crate::types::SubmitterConfiguration;
use serde_json::{Map, Value, json};
use std::path::Path;

/// Variables of the notebook, by name.
pub type Environment = Map<String, Value>;

/// Result of a submission as handed back to the notebook.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The JSON-encoded answers which have been accepted.
    Submitted(String),
    Failed { kind: ErrorKind, message: String },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }

    /// Submitted answers are returned as is, failures as
    /// `{"ok": false, "kind": ..., "error": ...}`.
    pub fn to_json(&self) -> String {
        match self {
            SubmitOutcome::Submitted(answers) => answers.clone(),
            SubmitOutcome::Failed { kind, message } => {
                json!({ "ok": false, "kind": kind, "error": message }).to_string()
            }
        }
    }
}

impl From<SubmitterError> for SubmitOutcome {
    fn from(error: SubmitterError) -> SubmitOutcome {
        SubmitOutcome::Failed {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Pick the expected variables from the environment. Missing ones are
/// null: the submitter decides what an incomplete answer is worth.
pub fn collect_answers<'a, I>(variables: I, env: &Environment) -> Environment
where
    I: IntoIterator<Item = &'a str>,
{
    variables
        .into_iter()
        .map(|v| {
            let value = env.get(v).cloned().unwrap_or_else(|| {
                debug!("variable {} not found in environment", v);
                Value::Null
            });
            (v.to_owned(), value)
        })
        .collect()
}

fn try_submit<T: Transport>(
    client: &Client<T>,
    labconfig: &Path,
    lab_name: &str,
    env: &Environment,
) -> Result<String, SubmitterError> {
    let config = LabConfig::load(labconfig)?;
    let variables = config.expected_variables(lab_name)?;
    let answers = collect_answers(variables.iter().map(String::as_str), env);
    let json_answers = serde_json::to_string(&answers)?;
    client.submit_answers(lab_name, &json_answers)?;
    Ok(json_answers)
}

/// Submit the answers of `lab_name` found in `env`. Every failure is
/// reported in the outcome.
pub fn submit_with<T: Transport>(
    client: &Client<T>,
    labconfig: &Path,
    lab_name: &str,
    env: &Environment,
) -> SubmitOutcome {
    match try_submit(client, labconfig, lab_name, env) {
        Ok(answers) => SubmitOutcome::Submitted(answers),
        Err(e) => {
            warn!("unable to submit answers for {}: {}", lab_name, e);
            e.into()
        }
    }
}

/// Entry point for notebooks: submit to the default submitter, reading
/// `labconfig.yaml` from the current directory, and return the outcome
/// as JSON.
pub fn submit(lab_name: &str, env: &Environment) -> String {
    let outcome = match Client::from_configuration(&SubmitterConfiguration::default()) {
        Ok(client) => submit_with(&client, Path::new(DEFAULT_LABCONFIG), lab_name, env),
        Err(e) => e.into(),
    };
    outcome.to_json()
}
