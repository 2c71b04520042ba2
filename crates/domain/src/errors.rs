//! Error types for the graph challenge domain.
//!
//! Every failure the pipeline can surface is a variant of one of the
//! component error enums below, aggregated by [`ChallengeError`]. Each leaf
//! carries a stable machine-readable code (see [`ChallengeError::error_code`])
//! so CI jobs can branch on the failure kind without parsing messages.

use crate::dataset::Dataset;
use crate::identifiers::GraphId;
use std::path::PathBuf;

/// Top-level error type for all pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum ChallengeError {
    /// Prediction table failed schema or ID checks
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Label join or metric computation failed
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    /// Submission policy violated
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Run metadata is incomplete or invalid
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Reading or writing a file failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An error annotated with the file, run, or dataset it concerns
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<ChallengeError>,
    },
}

impl ChallengeError {
    /// Wrap this error with a description of where it happened
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code from the challenge error taxonomy
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Scoring(e) => e.error_code(),
            Self::Policy(e) => e.error_code(),
            Self::Metadata(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Configuration(_) => "CONFIGURATION",
            Self::Context { source, .. } => source.error_code(),
        }
    }

    /// Process exit code for a command that failed with this error.
    /// Configuration problems count as usage errors.
    pub fn exit_code(&self) -> i32 {
        match self.root() {
            Self::Configuration(_) => 2,
            _ => 1,
        }
    }

    /// The innermost error, with any context layers removed
    pub fn root(&self) -> &ChallengeError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// True for violations of the one-attempt-per-team policy or of the
    /// metadata contract. These are never isolated per run.
    pub fn is_policy_violation(&self) -> bool {
        matches!(self.root(), Self::Policy(_) | Self::Metadata(_))
    }
}

/// Schema validator errors, in the order the checks run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Column set is not exactly `{graph_id, target}`
    #[error("Prediction file must contain exactly [\"graph_id\", \"target\"], found {found:?}")]
    SchemaMismatch { found: Vec<String> },

    /// A `graph_id` cell is not an integer
    #[error("Invalid {column} value {value:?} at row {row}")]
    InvalidCell {
        column: String,
        row: usize,
        value: String,
    },

    /// The same `graph_id` appears more than once
    #[error("Duplicate graph_id values found (first repeat: {graph_id} at row {row})")]
    DuplicateId { graph_id: GraphId, row: usize },

    /// A `target` cell is missing
    #[error("NaN values in target (first at row {row})")]
    MissingValue { row: usize },

    /// A `target` cell is not a class id
    #[error("target must be numeric class ids, found {value:?} at row {row}")]
    NonNumericTarget { row: usize, value: String },

    /// Row count differs from the expected-ID universe
    #[error("Wrong row count: expected {expected}, got {actual}")]
    RowCountMismatch { expected: usize, actual: usize },

    /// Submitted ids are not exactly the expected ids
    #[error(
        "graph_id set mismatch with expected ids: {missing} missing (e.g. {missing_sample:?}), \
         {unexpected} unexpected (e.g. {unexpected_sample:?})"
    )]
    IdSetMismatch {
        missing: usize,
        unexpected: usize,
        missing_sample: Vec<GraphId>,
        unexpected_sample: Vec<GraphId>,
    },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            Self::InvalidCell { .. } => "INVALID_CELL",
            Self::DuplicateId { .. } => "DUPLICATE_ID",
            Self::MissingValue { .. } => "MISSING_VALUE",
            Self::NonNumericTarget { .. } => "NON_NUMERIC_TARGET",
            Self::RowCountMismatch { .. } => "ROW_COUNT_MISMATCH",
            Self::IdSetMismatch { .. } => "ID_SET_MISMATCH",
        }
    }
}

/// Scorer errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    /// Label file does not have exactly the required columns
    #[error("labels file must contain exactly [\"graph_id\", \"target\"], found {found:?}")]
    LabelSchemaMismatch { found: Vec<String> },

    /// A label cell could not be read as an integer
    #[error("Invalid {column} value {value:?} at label row {row}")]
    InvalidLabelCell {
        column: String,
        row: usize,
        value: String,
    },

    /// Joining predictions to labels dropped rows
    #[error("Prediction IDs do not fully match hidden labels: {matched} of {expected} labels matched")]
    IncompleteMatch { matched: usize, expected: usize },

    /// A combined score was requested without every dataset scored
    #[error("No score recorded for dataset {0}")]
    MissingDatasetScore(Dataset),
}

impl ScoringError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::LabelSchemaMismatch { .. } => "LABEL_SCHEMA_MISMATCH",
            Self::InvalidLabelCell { .. } => "INVALID_CELL",
            Self::IncompleteMatch { .. } => "INCOMPLETE_MATCH",
            Self::MissingDatasetScore(_) => "MISSING_DATASET_SCORE",
        }
    }
}

/// Submission policy errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// metadata.team differs from the enclosing team folder
    #[error("Team folder and metadata.team mismatch in {run}: folder '{team_folder}', metadata '{declared}'")]
    TeamFolderMismatch {
        team_folder: String,
        declared: String,
        run: String,
    },

    /// More than one complete run under a single team folder
    #[error("Submission policy violation: team '{team}' has {attempts} attempts")]
    MultipleAttempts { team: String, attempts: usize },

    /// The same declared team owns more than one valid run
    #[error("Submission policy violation: only one attempt per participant is allowed. Duplicate teams: {teams:?}")]
    DuplicateTeamAttempt { teams: Vec<String> },
}

impl PolicyError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TeamFolderMismatch { .. } => "TEAM_FOLDER_MISMATCH",
            Self::MultipleAttempts { .. } => "MULTIPLE_ATTEMPTS",
            Self::DuplicateTeamAttempt { .. } => "DUPLICATE_TEAM_ATTEMPT",
        }
    }
}

/// Metadata errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    /// A required field is absent or blank
    #[error("metadata missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A field holds a value outside its allowed set
    #[error("metadata.{field} must be one of: {allowed}, found '{value}'")]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: String,
    },

    /// The metadata document is not a JSON object
    #[error("metadata must be a JSON object: {0}")]
    Malformed(String),
}

impl MetadataError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { .. } => "MISSING_REQUIRED_FIELD",
            Self::InvalidEnumValue { .. } => "INVALID_ENUM_VALUE",
            Self::Malformed(_) => "MALFORMED_METADATA",
        }
    }
}

/// File access errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required file or directory does not exist
    #[error("Missing file: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A table file could not be parsed
    #[error("Malformed table {}: {reason}", path.display())]
    MalformedTable { path: PathBuf, reason: String },

    /// Any other I/O failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "FILE_NOT_FOUND",
            Self::MalformedTable { .. } => "MALFORMED_TABLE",
            Self::Io { .. } => "IO_ERROR",
        }
    }

    /// Map an I/O error, turning `NotFound` into [`StoreError::FileNotFound`]
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

/// Result type used throughout the challenge crates
pub type ChallengeResult<T> = Result<T, ChallengeError>;
