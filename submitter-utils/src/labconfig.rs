use crate::errors::SubmitterError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub static DEFAULT_LABCONFIG: &str = "labconfig.yaml";

/// Content of `labconfig.yaml`, found in the notebook directory:
///
/// ```yaml
/// Labs:
///   lab1:
///     x: {}
///     y: {}
/// ```
///
/// Only the variable names matter, their metadata is ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LabConfig {
    #[serde(rename = "Labs", default)]
    labs: BTreeMap<String, serde_yaml::Value>,
    #[serde(skip)]
    path: PathBuf,
}

impl LabConfig {
    pub fn load(path: &Path) -> Result<LabConfig, SubmitterError> {
        trace!("loading lab configuration from {:?}", path);
        let content = fs::read(path).map_err(|e| SubmitterError::io(path, e))?;
        let mut config = LabConfig::from_slice(&content)?;
        config.path = path.to_owned();
        Ok(config)
    }

    pub fn from_slice(content: &[u8]) -> Result<LabConfig, SubmitterError> {
        let config: LabConfig = serde_yaml::from_slice(content)?;
        debug!("lab configuration declares labs {:?}", config.labs.keys());
        Ok(config)
    }

    pub fn contains(&self, lab: &str) -> bool {
        self.labs.contains_key(lab)
    }

    /// Names of the variables whose values make up the answers of `lab`.
    /// Entries of other labs are not looked at.
    pub fn expected_variables(&self, lab: &str) -> Result<Vec<String>, SubmitterError> {
        let entry = self.labs.get(lab).ok_or_else(|| SubmitterError::LabNotFound {
            lab: lab.to_owned(),
            path: self.source(),
        })?;
        let vars: Option<BTreeMap<String, serde_yaml::Value>> =
            serde_yaml::from_value(entry.clone()).map_err(|source| {
                SubmitterError::InvalidLab {
                    lab: lab.to_owned(),
                    source,
                }
            })?;
        Ok(vars.into_iter().flat_map(BTreeMap::into_keys).collect())
    }

    fn source(&self) -> PathBuf {
        if self.path.as_os_str().is_empty() {
            PathBuf::from(DEFAULT_LABCONFIG)
        } else {
            self.path.clone()
        }
    }
}
