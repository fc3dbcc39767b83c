use crate::errors::SubmitterError;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use url::Url;

pub static DEFAULT_BASE_URL: &str = "http://submitter:3000/";
pub static POD_STARTING_PATH: &str = "pod-starting";
pub static SUBMIT_ANSWERS_PATH: &str = "submit-answers";
pub static STAFF_USERNAME: &str = "staff";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client-side configuration, read from an optional YAML file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfiguration {
    pub submitter: SubmitterConfiguration,
    /// Refuse to notify a pod start without `--edx-anon-id`.
    pub require_anon_id: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SubmitterConfiguration {
    pub base_url: Url,
    pub timeout_secs: u64,
}

impl Default for SubmitterConfiguration {
    fn default() -> SubmitterConfiguration {
        SubmitterConfiguration {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("invalid default submitter URL"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SubmitterConfiguration {
    /// URL of `fragment` below the base URL, whether or not the base URL
    /// ends with a slash.
    pub fn endpoint(&self, fragment: &str) -> Result<Url, SubmitterError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(fragment)?)
    }
}

pub fn load_configuration(file: &Path) -> Result<ClientConfiguration, SubmitterError> {
    let mut f = File::open(file).map_err(|e| SubmitterError::io(file, e))?;
    let mut content = Vec::new();
    f.read_to_end(&mut content)
        .map_err(|e| SubmitterError::io(file, e))?;
    Ok(serde_yaml::from_slice(&content)?)
}

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    pub fn staff(password: &str) -> Credentials {
        Credentials::new(STAFF_USERNAME, password)
    }

    /// Placeholder pair expected by the submitter on answer submission. It
    /// grants nothing: the submitter checks that the request comes from the
    /// IP address recorded when the pod started.
    pub fn student() -> Credentials {
        Credentials::new("student", "student")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PodStartRequest {
    #[serde(rename = "edx-anon-id")]
    pub edx_anon_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitAnswersRequest {
    #[serde(rename = "edx-anon-id")]
    pub edx_anon_id: String,
    pub labname: String,
    /// JSON-encoded answer set
    #[serde(rename = "lab-answers")]
    pub lab_answers: String,
}

/// Status and body of a submitter response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn error_for_status(self) -> Result<Reply, SubmitterError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SubmitterError::Rejected {
                status: self.status,
                body: self.body,
            })
        }
    }
}
