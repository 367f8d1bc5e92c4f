use chatwidget_core::{Effect, Msg, ReplyOutcome};
use chatwidget_engine::{ChatError, ChatReply, ChatSettings, EngineError, EngineEvent, EngineHandle};
use widget_logging::{widget_info, widget_warn};

use super::ui::surface::UiCommand;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ChatSettings, prime_session: bool) -> Result<Self, EngineError> {
        widget_info!(
            "Chat endpoint {}{} (timeout {:?})",
            settings.base_url,
            settings.endpoint_path,
            settings.request_timeout
        );
        let engine = EngineHandle::new(settings)?;
        if prime_session {
            engine.prime_session();
        }
        Ok(Self { engine })
    }

    /// Starts IO effects and returns the presentational ones for the surface.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<UiCommand> {
        let mut ui = Vec::new();
        for effect in effects {
            match effect {
                Effect::SendChat {
                    request_id,
                    message,
                } => {
                    widget_info!(
                        "SendChat request_id={} message_len={}",
                        request_id,
                        message.len()
                    );
                    self.engine.send(request_id, message);
                }
                Effect::FocusInput => ui.push(UiCommand::FocusInput),
            }
        }
        ui
    }

    /// Next engine event translated into a controller message, if any.
    pub fn poll(&self) -> Option<Msg> {
        loop {
            match self.engine.try_recv()? {
                EngineEvent::ReplyReady { request_id, result } => {
                    return Some(Msg::ReplyReceived {
                        request_id,
                        outcome: map_result(result),
                    });
                }
                EngineEvent::SessionPrimed(Ok(())) => {
                    widget_info!("Session ready");
                }
                EngineEvent::SessionPrimed(Err(err)) => {
                    widget_warn!("Could not load session cookies: {}", err);
                }
            }
        }
    }
}

fn map_result(result: Result<ChatReply, ChatError>) -> ReplyOutcome {
    match result {
        Ok(reply) => ReplyOutcome::Reply(reply.text),
        Err(err) if err.kind.is_transport() => ReplyOutcome::TransportFailure,
        Err(err) => {
            widget_warn!("Chat server reported failure: {}", err.message);
            ReplyOutcome::ApplicationFailure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatwidget_engine::FailureKind;

    fn failure(kind: FailureKind) -> Result<ChatReply, ChatError> {
        Err(ChatError {
            kind,
            message: "test".to_string(),
        })
    }

    #[test]
    fn results_map_to_the_two_failure_kinds() {
        assert_eq!(
            map_result(Ok(ChatReply {
                text: "Hi there!".to_string(),
            })),
            ReplyOutcome::Reply("Hi there!".to_string())
        );
        assert_eq!(
            map_result(failure(FailureKind::Application { status: 500 })),
            ReplyOutcome::ApplicationFailure
        );
        for kind in [
            FailureKind::Network,
            FailureKind::Timeout,
            FailureKind::HttpStatus(403),
            FailureKind::MalformedResponse,
            FailureKind::Abandoned,
        ] {
            assert_eq!(map_result(failure(kind)), ReplyOutcome::TransportFailure);
        }
    }
}
