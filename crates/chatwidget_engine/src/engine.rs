use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use widget_logging::{widget_error, widget_info, widget_warn};

use crate::transport::{ChatSettings, ChatTransport, ReqwestTransport};
use crate::{ChatError, EngineEvent, FailureKind, RequestId};

enum EngineCommand {
    Send { request_id: RequestId, message: String },
    PrimeSession,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("transport setup failed: {0}")]
    Transport(#[from] ChatError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
}

/// Runs chat requests on a background Tokio runtime.
///
/// Commands go in through `send`/`prime_session`; results come back as
/// `EngineEvent`s polled by the caller's event loop.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ChatSettings) -> Result<Self, EngineError> {
        let transport = ReqwestTransport::new(settings)?;
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(transport: Arc<dyn ChatTransport>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        let worker_tx = event_tx.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let transport = transport.clone();
                let event_tx = worker_tx.clone();
                runtime.spawn(async move {
                    handle_command(transport.as_ref(), command, event_tx).await;
                });
            }
            // Dropping the runtime here cancels in-flight requests; their
            // guards still report.
        });

        Ok(Self {
            cmd_tx,
            event_tx,
            event_rx,
        })
    }

    /// Queues a chat request. Every call yields exactly one `ReplyReady`,
    /// including when the worker thread is gone.
    pub fn send(&self, request_id: RequestId, message: impl Into<String>) {
        let command = EngineCommand::Send {
            request_id,
            message: message.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            widget_error!("Engine stopped; chat request {} not sent", request_id);
            let _ = self.event_tx.send(EngineEvent::ReplyReady {
                request_id,
                result: Err(ChatError::new(
                    FailureKind::Abandoned,
                    "engine is not running",
                )),
            });
        }
    }

    pub fn prime_session(&self) {
        if self.cmd_tx.send(EngineCommand::PrimeSession).is_err() {
            widget_error!("Engine stopped; session not primed");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    transport: &dyn ChatTransport,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Send {
            request_id,
            message,
        } => {
            let guard = ReplyGuard::new(request_id, event_tx);
            widget_info!("Sending chat request {} ({} chars)", request_id, message.len());
            let result = transport.send(&message).await;
            if let Err(err) = &result {
                widget_warn!("Chat request {} failed: {}", request_id, err);
            }
            guard.complete(result);
        }
        EngineCommand::PrimeSession => {
            let result = transport.prime_session().await;
            if let Err(err) = &result {
                widget_warn!("Session priming failed: {}", err);
            }
            let _ = event_tx.send(EngineEvent::SessionPrimed(result));
        }
    }
}

/// Ensures exactly one `ReplyReady` per request, even if the task never
/// reaches `complete` (panic or runtime shutdown).
struct ReplyGuard {
    request_id: RequestId,
    event_tx: Option<mpsc::Sender<EngineEvent>>,
}

impl ReplyGuard {
    fn new(request_id: RequestId, event_tx: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            request_id,
            event_tx: Some(event_tx),
        }
    }

    fn complete(mut self, result: Result<crate::ChatReply, ChatError>) {
        if let Some(tx) = self.event_tx.take() {
            let _ = tx.send(EngineEvent::ReplyReady {
                request_id: self.request_id,
                result,
            });
        }
    }
}

impl Drop for ReplyGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.event_tx.take() {
            widget_warn!("Chat request {} ended without a reply", self.request_id);
            let _ = tx.send(EngineEvent::ReplyReady {
                request_id: self.request_id,
                result: Err(ChatError::new(
                    FailureKind::Abandoned,
                    "request ended without a reply",
                )),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChatReply;

    struct EchoTransport;

    #[async_trait::async_trait]
    impl ChatTransport for EchoTransport {
        async fn send(&self, message: &str) -> Result<ChatReply, ChatError> {
            Ok(ChatReply {
                text: format!("echo: {message}"),
            })
        }
    }

    struct PanickingTransport;

    #[async_trait::async_trait]
    impl ChatTransport for PanickingTransport {
        async fn send(&self, _message: &str) -> Result<ChatReply, ChatError> {
            panic!("transport blew up");
        }
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn reply_is_reported_with_request_id() {
        let engine = EngineHandle::with_transport(Arc::new(EchoTransport)).unwrap();
        engine.send(7, "ping");

        let event = engine.recv_timeout(WAIT).expect("reply event");
        assert_eq!(
            event,
            EngineEvent::ReplyReady {
                request_id: 7,
                result: Ok(ChatReply {
                    text: "echo: ping".to_string(),
                }),
            }
        );
    }

    #[test]
    fn default_priming_succeeds() {
        let engine = EngineHandle::with_transport(Arc::new(EchoTransport)).unwrap();
        engine.prime_session();

        assert_eq!(
            engine.recv_timeout(WAIT),
            Some(EngineEvent::SessionPrimed(Ok(())))
        );
    }

    #[test]
    fn panicking_request_still_reports_abandoned() {
        let engine = EngineHandle::with_transport(Arc::new(PanickingTransport)).unwrap();
        engine.send(3, "boom");

        match engine.recv_timeout(WAIT).expect("guard event") {
            EngineEvent::ReplyReady { request_id, result } => {
                assert_eq!(request_id, 3);
                assert_eq!(result.unwrap_err().kind, FailureKind::Abandoned);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn send_after_worker_exit_reports_abandoned() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        drop(cmd_rx);
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle {
            cmd_tx,
            event_tx,
            event_rx,
        };

        engine.send(9, "anyone?");
        match engine.try_recv().expect("abandoned event") {
            EngineEvent::ReplyReady { request_id, result } => {
                assert_eq!(request_id, 9);
                assert_eq!(result.unwrap_err().kind, FailureKind::Abandoned);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(engine.try_recv(), None);
    }

    #[test]
    fn completed_guard_does_not_report_twice() {
        let (tx, rx) = mpsc::channel();
        ReplyGuard::new(1, tx).complete(Ok(ChatReply {
            text: "done".to_string(),
        }));

        assert!(matches!(
            rx.try_recv(),
            Ok(EngineEvent::ReplyReady { request_id: 1, result: Ok(_) })
        ));
        assert!(rx.try_recv().is_err());
    }
}
