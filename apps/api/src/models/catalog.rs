use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A company listing. Only `id` is interpreted; every other field is passed through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A skill entry (`name`, `category`, `level`, ...), passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skill(pub Map<String, Value>);

/// One CSV row keyed by header column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopPayingRole(pub BTreeMap<String, String>);
