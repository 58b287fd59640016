use crate::error::AppError;
use crate::intake::payload::{SubmissionAck, SubmissionPayload};
use crate::intake::service::IntakeService;
use std::io::{Error as IoError, ErrorKind};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tower::{Service, ServiceExt};
use tracing::{debug, error, info};

/// The submission boundary: newline-delimited JSON payloads in, one
/// JSON acknowledgement line per payload out. Every connection gets its
/// own task; a bad payload is answered, never dropped.
pub struct SubmissionServer {
    port: u16,
    service: IntakeService,
}

impl SubmissionServer {
    pub fn new(port: u16, service: IntakeService) -> Self {
        Self { port, service }
    }

    pub async fn start(&self) -> Result<(), AppError> {
        info!("Starting submission server on port {}", self.port);
        let listener = TcpListener::bind(format!("0.0.0.0:{}", self.port))
            .await
            .map_err(|e| AppError::Bind(e, self.port))?;
        self.serve(listener).await
    }

    async fn serve(&self, listener: TcpListener) -> Result<(), AppError> {
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    debug!("Client connected: {:?}", peer);
                    let service = self.service.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_client(stream, service).await {
                            debug!("Client connection closed: {}", e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {:?}", e);
                }
            }
        }
    }
}

async fn handle_client(stream: TcpStream, mut service: IntakeService) -> Result<(), IoError> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let ack = match SubmissionPayload::parse(&line) {
            Ok(payload) => match service.ready().await {
                Ok(ready) => ready.call(payload).await.unwrap_or_else(|e| {
                    error!("Failed to persist submission: {}", e);
                    SubmissionAck::rejected("Unable to save submission")
                }),
                Err(e) => {
                    error!("Intake service unavailable: {}", e);
                    SubmissionAck::rejected("Unable to save submission")
                }
            },
            Err(e) => SubmissionAck::rejected(e.to_string()),
        };

        let mut response = serde_json::to_string(&ack)
            .map_err(|e| IoError::new(ErrorKind::InvalidData, e))?;
        response.push('\n');
        write_half.write_all(response.as_bytes()).await?;
    }
    Ok(())
}
