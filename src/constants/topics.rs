use crate::datapoint::DatapointId;

pub const CONFIG_PREFIX: &str = "config";
pub const READINGS_PREFIX: &str = "readings";

/// `config/{org}/{project}/{subsystem}/{name}`
pub fn config(org_id: i64, id: &DatapointId) -> String {
    format!("{CONFIG_PREFIX}/{org_id}/{id}")
}

/// `readings/{project}/{subsystem}/{name}`
pub fn readings(id: &DatapointId) -> String {
    format!("{READINGS_PREFIX}/{id}")
}
