use serde::{Deserialize, Serialize};

use super::timestamp::{TimestampType, TIMESTAMP_TYPES};
use super::{OriginDocumentFormat, DOCUMENT_FORMATS};
use crate::columns::{self, ColumnDecode, FieldSetter};
use crate::lenient;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthenticationType {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "bearerToken")]
    BearerToken,
}

const AUTHENTICATION_TYPES: &[(&str, AuthenticationType)] = &[
    ("none", AuthenticationType::None),
    ("basic", AuthenticationType::Basic),
    ("bearerToken", AuthenticationType::BearerToken),
];

/// A document polled over HTTP(S)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebDatasource {
    #[serde(deserialize_with = "lenient::or_default")]
    pub url: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub authentication_type: AuthenticationType,
    /// `user=password` for basic auth, the bare token for bearer auth
    #[serde(deserialize_with = "lenient::or_default")]
    pub auth: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub format: OriginDocumentFormat,
    /// JSONPath or XPath, depending on `format`
    #[serde(deserialize_with = "lenient::or_default")]
    pub value_expression: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub timestamp_type: TimestampType,
    #[serde(deserialize_with = "lenient::or_default")]
    pub timestamp_expression: String,
}

impl ColumnDecode for WebDatasource {
    const FIELDS: &'static [(&'static str, FieldSetter<Self>)] = &[
        ("url", |ds, d| ds.url = columns::text(d)),
        ("authtype", |ds, d| {
            columns::lookup_or_retain(&mut ds.authentication_type, d, AUTHENTICATION_TYPES)
        }),
        ("auth", |ds, d| ds.auth = columns::text(d)),
        ("doctype", |ds, d| {
            columns::lookup_or_retain(&mut ds.format, d, DOCUMENT_FORMATS)
        }),
        ("dataexpr", |ds, d| ds.value_expression = columns::text(d)),
        ("tstype", |ds, d| {
            columns::lookup_or_retain(&mut ds.timestamp_type, d, TIMESTAMP_TYPES)
        }),
        ("tsexpr", |ds, d| ds.timestamp_expression = columns::text(d)),
    ];
}
