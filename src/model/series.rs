//! A card paired with the rows it returned

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::card::Card;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultColumn {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub base_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub cols: Vec<ResultColumn>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub row_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleSeries {
    pub card: Card,
    pub data: Dataset,
}

/// Everything a visualization draws: one entry per card
pub type Series = Vec<SingleSeries>;
