use sha2::{Digest, Sha256};

const PREFIX_CHARS: usize = 26;
const HASH_CHARS: usize = 5;

/// Compute the identity the submitter knows a student by.
///
/// JupyterHub truncates user names to 26 characters and appends the first
/// five hex digits of the SHA-256 of the full name. The submitter matches
/// records produced by that normalization, so this must stay bit-exact:
/// truncation counts characters, not bytes.
pub fn derive_identity(raw_id: &str) -> String {
    let digest = hex::encode(Sha256::digest(raw_id.as_bytes()));
    let prefix: String = raw_id.chars().take(PREFIX_CHARS).collect();
    format!("{}-{}", prefix, &digest[..HASH_CHARS])
}

/// JupyterHub names the pod after the anonymous id given by the LTI launcher.
pub fn raw_student_id() -> String {
    let hostname = gethostname::gethostname().to_string_lossy().into_owned();
    trace!("raw student id from hostname: {}", hostname);
    hostname
}
