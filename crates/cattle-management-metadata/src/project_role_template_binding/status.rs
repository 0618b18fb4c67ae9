pub use crate::cluster_role_template_binding::BindingStatus;
