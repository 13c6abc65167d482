use serde::{Deserialize, Serialize};

use crate::columns::{self, ColumnDecode, FieldSetter};
use crate::lenient;

/// A device point on The Things Network v3
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ttnv3Datasource {
    #[serde(deserialize_with = "lenient::or_default")]
    pub zone: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub application: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub device: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub point: String,
    #[serde(rename = "authorizationkey", deserialize_with = "lenient::or_default")]
    pub authorization_key: String,
}

impl ColumnDecode for Ttnv3Datasource {
    const FIELDS: &'static [(&'static str, FieldSetter<Self>)] = &[
        ("zone", |ds, d| ds.zone = columns::text(d)),
        ("application", |ds, d| ds.application = columns::text(d)),
        ("device", |ds, d| ds.device = columns::text(d)),
        ("point", |ds, d| ds.point = columns::text(d)),
        ("authorizationkey", |ds, d| ds.authorization_key = columns::text(d)),
    ];
}
