use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The subset of an n8n workflow record that validation reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workflow {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Vec<WorkflowTag>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Null or unrecognised tag entries are dropped rather than failing the batch.
fn lenient_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<WorkflowTag>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// n8n returns tags as objects; exports and fixtures often use bare names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkflowTag {
    Name(String),
    Object {
        #[serde(default)]
        id: Option<String>,
        name: String,
    },
}

impl WorkflowTag {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Object { name, .. } => name,
        }
    }
}

impl From<&str> for WorkflowTag {
    fn from(value: &str) -> Self {
        Self::Name(value.to_owned())
    }
}

impl Workflow {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<WorkflowTag>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Tag names joined with a single space.
    pub fn joined_tags(&self) -> String {
        self.tags
            .iter()
            .map(WorkflowTag::name)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WorkflowExport {
    List(Vec<Workflow>),
    Envelope { data: Vec<Workflow> },
}

/// Parses a workflow export: either a bare array or the n8n list envelope
/// `{ "data": [...] }`.
pub fn parse_workflows(raw: &str) -> Result<Vec<Workflow>> {
    let export = serde_json::from_str::<WorkflowExport>(raw).map_err(|err| {
        Error::Input(format!(
            "expected a workflow array or an object with a 'data' array: {err}"
        ))
    })?;

    Ok(match export {
        WorkflowExport::List(workflows) => workflows,
        WorkflowExport::Envelope { data } => data,
    })
}
