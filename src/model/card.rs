//! Saved questions (cards) and their queries

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parameter::Parameter;
use super::template_tag::TemplateTag;
use crate::query::StructuredQuery;

/// Query text plus the template tags parsed out of it, keyed by tag name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeQuery {
    #[serde(default)]
    pub query: String,
    #[serde(rename = "template-tags", default, skip_serializing_if = "IndexMap::is_empty")]
    pub template_tags: IndexMap<String, TemplateTag>,
}

/// The query a card runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatasetQuery {
    /// Hand-written query
    Native {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        database: Option<i64>,
        native: NativeQuery,
    },
    /// Query built with the notebook editor
    Query {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        database: Option<i64>,
        query: StructuredQuery,
    },
}

/// A saved question
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_display")]
    pub display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_query: Option<DatasetQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
}

fn default_display() -> String {
    "table".to_string()
}

impl Card {
    /// Native query body, if this card runs a hand-written query
    pub fn native_query(&self) -> Option<&NativeQuery> {
        match &self.dataset_query {
            Some(DatasetQuery::Native { native, .. }) => Some(native),
            _ => None,
        }
    }

    pub fn structured_query(&self) -> Option<&StructuredQuery> {
        match &self.dataset_query {
            Some(DatasetQuery::Query { query, .. }) => Some(query),
            _ => None,
        }
    }

    pub fn is_native(&self) -> bool {
        self.native_query().is_some()
    }

    /// Look up a template tag by the name used in the query text
    pub fn template_tag(&self, name: &str) -> Option<&TemplateTag> {
        self.native_query()?.template_tags.get(name)
    }
}
