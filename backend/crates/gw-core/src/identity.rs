use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Verified caller identity as returned by the Identity Authority.
///
/// Immutable once produced; lives for a single request unless cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject_id: String,
    pub role: String,
    pub permissions: BTreeSet<String>,
}

impl Identity {
    pub fn new<I, S>(subject_id: impl Into<String>, role: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject_id: subject_id.into(),
            role: role.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_permission(&self, capability: &str) -> bool {
        self.permissions.contains(capability)
    }

    /// Capabilities from `required` the identity does not hold, in input order.
    pub fn missing_permissions<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|capability| !self.has_permission(capability))
            .collect()
    }
}
