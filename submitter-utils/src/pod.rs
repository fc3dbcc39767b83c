use crate::client::Client;
use crate::errors::SubmitterError;
use crate::transport::Transport;
use crate::types::Reply;

/// Arguments of the pod starting mode, as given on the command line.
#[derive(Clone, Debug, Default)]
pub struct PodStartingArgs {
    /// Not used to derive the identity, JupyterHub already put it in the
    /// hostname.
    pub edx_anon_id: Option<String>,
    pub submit_passwd: Option<String>,
}

fn present(arg: &Option<String>) -> Option<&str> {
    arg.as_deref().filter(|s| !s.is_empty())
}

impl PodStartingArgs {
    /// Check that every flag needed in pod starting mode has been given
    /// and return the submitter password.
    pub fn check(&self, require_anon_id: bool) -> Result<&str, SubmitterError> {
        if require_anon_id && present(&self.edx_anon_id).is_none() {
            return Err(SubmitterError::Configuration {
                flag: "edx-anon-id",
                hint: "[the edx anonymous student id]",
            });
        }
        present(&self.submit_passwd).ok_or(SubmitterError::Configuration {
            flag: "submit-passwd",
            hint: "[an actual password]",
        })
    }
}

#[derive(Debug)]
pub struct PodStarted {
    pub identity: String,
    pub reply: Reply,
}

/// Check the arguments, then notify the submitter. Nothing is sent if the
/// arguments are incomplete.
pub fn pod_starting<T: Transport>(
    client: &Client<T>,
    args: &PodStartingArgs,
    require_anon_id: bool,
) -> Result<PodStarted, SubmitterError> {
    let password = args.check(require_anon_id).inspect_err(|e| {
        error!("refusing to notify pod start: {}", e);
    })?;
    if let Some(id) = present(&args.edx_anon_id) {
        debug!("pod started for edx anonymous id {}", id);
    }
    let reply = client.notify_pod_starting(password)?;
    if !reply.is_success() {
        warn!("submitter refused pod start notification: {}", reply.status);
    }
    Ok(PodStarted {
        identity: client.identity(),
        reply,
    })
}
