use crate::common::Emotion;
use std::path::PathBuf;
use thiserror::Error;

// Main application error type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store Error: {0}")]
    Store(#[from] StoreError),
    #[error("Intake Error: {0}")]
    Intake(#[from] IntakeError),
    #[error("Aggregation Error: {0}")]
    Aggregation(#[from] AggregationError),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to bind to port {1}: {0}")]
    Bind(std::io::Error, u16),
    #[error("Failed to accept connection: {0}")]
    Accept(std::io::Error),
}

// Record store error type
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read record file {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Failed to write record file {0}: {1}")]
    Write(PathBuf, std::io::Error),
    #[error("Record file {0} is not a valid submission array: {1}")]
    Corrupt(PathBuf, serde_json::Error),
    #[error("Failed to serialize submission records: {0}")]
    Serialize(serde_json::Error),
}

// Submission intake errors. Each of these maps to a rejected
// acknowledgement on the wire, never to a dropped connection.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Invalid submission payload: {0}")]
    MalformedPayload(serde_json::Error),
    #[error("Missing colors for: {}", join_emotions(.0))]
    MissingEmotions(Vec<Emotion>),
    #[error("Color for '{emotion}' is not a #RRGGBB value: {value}")]
    MalformedColor { emotion: Emotion, value: String },
}

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Malformed color sample: {0}")]
    MalformedSample(String),
}

fn join_emotions(emotions: &[Emotion]) -> String {
    emotions
        .iter()
        .map(|e| e.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
