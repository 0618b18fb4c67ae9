use serde::{Serialize, Deserialize};

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PodSecurityAdmissionConfigurationTemplateStatus {}
