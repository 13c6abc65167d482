use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a datapoint; unique within an organisation
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatapointId {
    pub project: String,
    pub subsystem: String,
    pub name: String,
}

impl DatapointId {
    pub fn new(
        project: impl Into<String>,
        subsystem: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            subsystem: subsystem.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for DatapointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.project, self.subsystem, self.name)
    }
}
