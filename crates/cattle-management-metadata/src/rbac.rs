use serde::{Serialize, Deserialize};

/// Kubernetes RBAC policy rule carried by role definitions
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyRule {
    pub verbs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub api_groups: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resource_names: Vec<String>,
    #[serde(rename = "nonResourceURLs", skip_serializing_if = "Vec::is_empty")]
    pub non_resource_urls: Vec<String>,
}

impl PolicyRule {
    pub fn new<V, R>(verbs: V, resources: R) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            verbs: verbs.into_iter().map(Into::into).collect(),
            resources: resources.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_api_groups<G>(mut self, groups: G) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
    {
        self.api_groups = groups.into_iter().map(Into::into).collect();
        self
    }
}

/// Principal a role template binding grants permissions to
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Subject {
    User { name: String, principal: String },
    Group { name: String, principal: String },
    ServiceAccount(String),
}

impl Subject {
    /// collect the subjects named by the fields of a binding, empty fields are ignored
    pub fn from_binding_fields(
        user_name: &str,
        user_principal_name: &str,
        group_name: &str,
        group_principal_name: &str,
        service_account: &str,
    ) -> Vec<Subject> {
        let mut subjects = vec![];
        if !user_name.is_empty() || !user_principal_name.is_empty() {
            subjects.push(Subject::User {
                name: user_name.to_owned(),
                principal: user_principal_name.to_owned(),
            });
        }
        if !group_name.is_empty() || !group_principal_name.is_empty() {
            subjects.push(Subject::Group {
                name: group_name.to_owned(),
                principal: group_principal_name.to_owned(),
            });
        }
        if !service_account.is_empty() {
            subjects.push(Subject::ServiceAccount(service_account.to_owned()));
        }
        subjects
    }
}
