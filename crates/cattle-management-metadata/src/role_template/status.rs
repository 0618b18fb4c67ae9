use serde::{Serialize, Deserialize};

/// role templates don't report status
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoleTemplateStatus {}
