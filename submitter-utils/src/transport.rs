use crate::errors::SubmitterError;
use crate::types::{Credentials, Reply};
use serde::Serialize;
use std::cell::RefCell;
use std::time::Duration;
use url::Url;

/// Way of sending a form-encoded POST to the submitter.
pub trait Transport {
    fn post_form<F>(
        &self,
        url: &Url,
        credentials: &Credentials,
        form: &F,
    ) -> Result<Reply, SubmitterError>
    where
        F: Serialize + ?Sized;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<HttpTransport, SubmitterError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn post_form<F>(
        &self,
        url: &Url,
        credentials: &Credentials,
        form: &F,
    ) -> Result<Reply, SubmitterError>
    where
        F: Serialize + ?Sized,
    {
        trace!(
            "preparing to post request to {} as {}",
            url, credentials.username
        );
        let response = self
            .client
            .post(url.clone())
            .basic_auth(&credentials.username, Some(&credentials.password))
            .form(form)
            .send()
            .map_err(|e| {
                error!("could not post request to {}: {}", url, e);
                e
            })?;
        let status = response.status().as_u16();
        let body = response.text()?;
        trace!("request to {} returned {}", url, status);
        Ok(Reply { status, body })
    }
}

/// A request captured by a [`RecordingTransport`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub url: Url,
    pub credentials: Credentials,
    pub form: serde_json::Value,
}

/// Transport which records requests instead of sending them and answers
/// every one of them with the same reply. Used for dry runs.
pub struct RecordingTransport {
    reply: Reply,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn new(reply: Reply) -> RecordingTransport {
        RecordingTransport {
            reply,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }
}

impl Default for RecordingTransport {
    fn default() -> RecordingTransport {
        RecordingTransport::new(Reply {
            status: 200,
            body: "dry run, nothing sent".to_owned(),
        })
    }
}

impl Transport for RecordingTransport {
    fn post_form<F>(
        &self,
        url: &Url,
        credentials: &Credentials,
        form: &F,
    ) -> Result<Reply, SubmitterError>
    where
        F: Serialize + ?Sized,
    {
        let form = serde_json::to_value(form)?;
        info!("not posting to {} as {}: {}", url, credentials.username, form);
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.clone(),
            credentials: credentials.clone(),
            form,
        });
        Ok(self.reply.clone())
    }
}
