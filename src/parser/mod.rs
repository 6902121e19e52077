//! Card and metadata parser (verb module)
//!
//! Transforms YAML or JSON documents into model types. JSON is valid YAML,
//! so one loader serves both.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::error::ParseError;
use crate::metadata::Metadata;
use crate::model::{Card, Parameter};

fn read_file<P: AsRef<Path>>(path: P) -> Result<String, ParseError> {
    let path_str = path.as_ref().display().to_string();
    std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str,
        source: e,
    })
}

fn parse<T: DeserializeOwned>(contents: &str) -> Result<T, ParseError> {
    serde_yaml::from_str(contents).map_err(ParseError::from)
}

/// Parse a card from a YAML or JSON file
pub fn parse_card_file<P: AsRef<Path>>(path: P) -> Result<Card, ParseError> {
    parse_card_str(&read_file(path)?)
}

pub fn parse_card_str(contents: &str) -> Result<Card, ParseError> {
    parse(contents)
}

/// Parse database metadata from a YAML or JSON file
pub fn parse_metadata_file<P: AsRef<Path>>(path: P) -> Result<Metadata, ParseError> {
    parse_metadata_str(&read_file(path)?)
}

pub fn parse_metadata_str(contents: &str) -> Result<Metadata, ParseError> {
    parse(contents)
}

/// Parse a list of (dashboard) parameters
pub fn parse_parameters_file<P: AsRef<Path>>(path: P) -> Result<Vec<Parameter>, ParseError> {
    parse_parameters_str(&read_file(path)?)
}

pub fn parse_parameters_str(contents: &str) -> Result<Vec<Parameter>, ParseError> {
    parse(contents)
}

/// Parse a `{parameter id: value}` map
pub fn parse_values_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, Value>, ParseError> {
    parse(&read_file(path)?)
}

/// Serialize a card back to pretty JSON
pub fn card_to_json(card: &Card) -> Result<String, ParseError> {
    serde_json::to_string_pretty(card).map_err(ParseError::from)
}
