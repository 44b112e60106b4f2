use std::path::PathBuf;
use thiserror::Error;

use crate::utils::quote;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input file {} does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("Output dir {} specifies a file", .0.display())]
    OutputIsFile(PathBuf),

    #[error("Invalid namespace {}", quote(.0))]
    InvalidNamespace(String),

    #[error("Unexpected whitespace at line {line}")]
    UnexpectedIndent { line: usize },

    #[error("Expected whitespace at line {line}")]
    MissingIndent { line: usize },

    #[error("Invalid identifier {} at line {line}", quote(.ident))]
    InvalidIdentifier { ident: String, line: usize },

    #[error("Syntax error at line {line}: {msg}")]
    SyntaxError { msg: String, line: usize },

    #[error("Record {} at line {line} has no fields", quote(.record))]
    EmptyRecord { record: String, line: usize },

    #[error("Orphaned comments at line {line}")]
    OrphanedComment { line: usize },

    #[error("Unknown type {} at line {line}", quote(.type_name))]
    UnknownType { type_name: String, line: usize },

    #[error("Type {} cannot be optional at line {line}", quote(.type_name))]
    InvalidOptionalWrap { type_name: String, line: usize },

    #[error("Array length {} must be a positive integer at line {line}", quote(.token))]
    InvalidArrayLength { token: String, line: usize },

    #[error("The record {} is defined twice at line {line}", quote(.name))]
    DuplicateRecord { name: String, line: usize },

    #[error("The field {} is defined twice in record {} at line {line}", quote(.field), quote(.record))]
    DuplicateField { record: String, field: String, line: usize },

    #[error("The name {} is reserved at line {line}", quote(.ident))]
    ReservedName { ident: String, line: usize },

    #[error("Record {} at line {line} is too large to lay out", quote(.record))]
    RecordTooLarge { record: String, line: usize },

    #[error("File error writing {}: {source}", .path.display())]
    FileWriteError {
        path:   PathBuf,
        source: std::io::Error,
    },
}

impl GenError {
    /// The 1-based schema line this error points at, for parse-time errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            GenError::UnexpectedIndent { line }
            | GenError::MissingIndent { line }
            | GenError::InvalidIdentifier { line, .. }
            | GenError::SyntaxError { line, .. }
            | GenError::EmptyRecord { line, .. }
            | GenError::OrphanedComment { line }
            | GenError::UnknownType { line, .. }
            | GenError::InvalidOptionalWrap { line, .. }
            | GenError::InvalidArrayLength { line, .. }
            | GenError::DuplicateRecord { line, .. }
            | GenError::DuplicateField { line, .. }
            | GenError::ReservedName { line, .. }
            | GenError::RecordTooLarge { line, .. } => Some(*line),
            _ => None,
        }
    }
}
