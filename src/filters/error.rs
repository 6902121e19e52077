use std::fmt;

/// Errors that can occur when editing a question's filters
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    StageNotFound {
        stage_index: usize,
        stage_count: usize,
    },
    FilterNotFound {
        stage_index: usize,
        filter_index: usize,
    },
    /// The replacement filter has the wrong number of values for its operator
    WrongValueCount {
        operator: String,
        actual: usize,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StageNotFound { stage_index, stage_count } => {
                write!(f, "Stage {} not found, query has {} stage(s)", stage_index, stage_count)
            }
            Self::FilterNotFound { stage_index, filter_index } => {
                write!(f, "Filter {} not found in stage {}", filter_index, stage_index)
            }
            Self::WrongValueCount { operator, actual } => {
                write!(f, "Operator '{}' cannot take {} value(s)", operator, actual)
            }
        }
    }
}

impl std::error::Error for FilterError {}
