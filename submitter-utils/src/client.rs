use crate::errors::SubmitterError;
use crate::identity::{derive_identity, raw_student_id};
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    Credentials, PodStartRequest, Reply, SubmitAnswersRequest, SubmitterConfiguration,
    POD_STARTING_PATH, SUBMIT_ANSWERS_PATH,
};
use std::time::Duration;

/// Talks to the submitter on behalf of one pod.
pub struct Client<T> {
    config: SubmitterConfiguration,
    transport: T,
    raw_id: String,
}

impl Client<HttpTransport> {
    /// Client identified by the local hostname.
    pub fn from_configuration(
        config: &SubmitterConfiguration,
    ) -> Result<Client<HttpTransport>, SubmitterError> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Client::new(config, transport, raw_student_id()))
    }
}

impl<T: Transport> Client<T> {
    pub fn new(config: &SubmitterConfiguration, transport: T, raw_id: impl Into<String>) -> Client<T> {
        Client {
            config: config.clone(),
            transport,
            raw_id: raw_id.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn identity(&self) -> String {
        derive_identity(&self.raw_id)
    }

    /// Tell the submitter that this pod, with its IP address, belongs to
    /// this student. The reply is returned whatever its status.
    pub fn notify_pod_starting(&self, password: &str) -> Result<Reply, SubmitterError> {
        let url = self.config.endpoint(POD_STARTING_PATH)?;
        let request = PodStartRequest {
            edx_anon_id: self.identity(),
        };
        info!("notifying {} that {} is starting", url, request.edx_anon_id);
        self.transport
            .post_form(&url, &Credentials::staff(password), &request)
    }

    /// Send JSON-encoded answers for `labname`. The submitter only accepts
    /// them if they come from the IP recorded at pod start.
    pub fn submit_answers(&self, labname: &str, answers: &str) -> Result<Reply, SubmitterError> {
        let url = self.config.endpoint(SUBMIT_ANSWERS_PATH)?;
        let request = SubmitAnswersRequest {
            edx_anon_id: self.identity(),
            labname: labname.to_owned(),
            lab_answers: answers.to_owned(),
        };
        info!(
            "submitting answers of {} for {} to {}",
            labname, request.edx_anon_id, url
        );
        let reply = self
            .transport
            .post_form(&url, &Credentials::student(), &request)?;
        trace!("submission reply: {:?}", reply);
        reply.error_for_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RecordingTransport;
    use serde_json::json;

    fn client(reply: Reply) -> Client<RecordingTransport> {
        Client::new(
            &SubmitterConfiguration::default(),
            RecordingTransport::new(reply),
            "jupyter-abc123",
        )
    }

    fn ok() -> Reply {
        Reply {
            status: 200,
            body: "ok".to_owned(),
        }
    }

    #[test]
    fn pod_starting_request() {
        let client = client(ok());
        assert_eq!(client.notify_pod_starting("secret").unwrap(), ok());
        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.as_str(), "http://submitter:3000/pod-starting");
        assert_eq!(requests[0].credentials, Credentials::staff("secret"));
        assert_eq!(requests[0].form, json!({"edx-anon-id": "jupyter-abc123-0d8fc"}));
    }

    #[test]
    fn pod_starting_keeps_failed_reply() {
        let denied = Reply {
            status: 401,
            body: "bad password".to_owned(),
        };
        let client = client(denied.clone());
        assert_eq!(client.notify_pod_starting("wrong").unwrap(), denied);
    }

    #[test]
    fn submit_answers_request() {
        let client = client(ok());
        client.submit_answers("lab1", r#"{"x":5}"#).unwrap();
        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.as_str(), "http://submitter:3000/submit-answers");
        assert_eq!(requests[0].credentials, Credentials::student());
        assert_eq!(
            requests[0].form,
            json!({
                "edx-anon-id": "jupyter-abc123-0d8fc",
                "labname": "lab1",
                "lab-answers": "{\"x\":5}",
            })
        );
    }

    #[test]
    fn rejected_submission() {
        let client = client(Reply {
            status: 403,
            body: "unknown pod".to_owned(),
        });
        let err = client.submit_answers("lab1", "{}").unwrap_err();
        assert!(matches!(err, SubmitterError::Rejected { status: 403, .. }));
    }
}
