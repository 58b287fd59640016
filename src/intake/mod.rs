mod payload;
mod server;
mod service;

pub use payload::{SubmissionAck, SubmissionPayload};
pub use server::SubmissionServer;
pub use service::IntakeService;
