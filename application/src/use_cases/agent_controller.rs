//! Agent Controller
//!
//! The operations the presentation layer invokes (`submit`, `attach_image`,
//! `clear_attachment`, `set_mode`) and the state it reads (`snapshot`).
//!
//! The controller owns the [`Session`] behind a mutex that is never held
//! across an `.await`: the submit guard, the user append and the transition
//! to `Exchanging` happen under one lock, the adapter call runs unlocked, and
//! the completion or fallback happens under a second lock. Overlapping
//! submits are rejected by the session's loading guard, not queued.

use crate::config::ExchangeParams;
use crate::ports::client_adapter::ClientAdapter;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{ExchangeProgress, NoProgress};
use crate::use_cases::run_exchange::ExchangeRunner;
use mog_domain::core::string::preview;
use mog_domain::{
    ImageData, Message, MessageContent, Mode, RequestBuilder, Session, SessionError,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// What a call to [`AgentController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Precondition not met; nothing was appended.
    Rejected(SessionError),
    /// The user message and `appended` agent messages were added.
    Completed { appended: usize },
    /// The user message and one fallback message were added.
    Failed { reason: String },
}

/// Everything the presentation layer reads.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub loading: bool,
    pub mode: Mode,
    pub has_attachment: bool,
}

/// Transcript shape of one log entry. Image bytes are summarized, not copied.
#[derive(Serialize)]
struct MessageRecord<'a> {
    id: u64,
    role: &'static str,
    #[serde(flatten)]
    content: ContentRecord<'a>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ContentRecord<'a> {
    Text { text: &'a str },
    Image { media_type: &'a str, bytes: usize },
}

impl<'a> From<&'a Message> for MessageRecord<'a> {
    fn from(message: &'a Message) -> Self {
        let content = match message.content() {
            MessageContent::Text(text) => ContentRecord::Text { text },
            MessageContent::Image(image) => ContentRecord::Image {
                media_type: image.media_type(),
                bytes: image.len(),
            },
        };
        Self {
            id: message.id().value(),
            role: message.role().as_str(),
            content,
        }
    }
}

/// Controller wiring one session to its request builder and resilience wrapper.
pub struct AgentController {
    session: Mutex<Session>,
    builder: RequestBuilder,
    runner: ExchangeRunner,
    conversation_logger: Arc<dyn ConversationLogger>,
    progress: Arc<dyn ExchangeProgress>,
}

impl AgentController {
    /// Create a controller with a fresh session.
    ///
    /// Pass `None` as `adapter` when the credential is unavailable; every
    /// submit then ends with the fallback message without any network call.
    pub fn new(adapter: Option<Arc<dyn ClientAdapter>>, params: ExchangeParams) -> Self {
        if adapter.is_none() {
            warn!("No client adapter configured; submissions will receive the fallback reply");
        }
        Self {
            session: Mutex::new(Session::with_mode(params.initial_mode)),
            builder: RequestBuilder::new().with_history_window(params.history_window),
            runner: ExchangeRunner::new(adapter).with_timeout(params.timeout),
            conversation_logger: Arc::new(NoConversationLogger),
            progress: Arc::new(NoProgress),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Create with a progress notifier.
    pub fn with_progress(mut self, progress: Arc<dyn ExchangeProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn has_adapter(&self) -> bool {
        self.runner.has_adapter()
    }

    // ==================== Reads ====================

    pub fn snapshot(&self) -> SessionSnapshot {
        let session = self.lock();
        SessionSnapshot {
            messages: session.messages().to_vec(),
            loading: session.is_loading(),
            mode: session.mode(),
            has_attachment: session.has_attachment(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    pub fn mode(&self) -> Mode {
        self.lock().mode()
    }

    /// Diagnostic reason behind the most recent fallback reply.
    pub fn last_failure(&self) -> Option<String> {
        self.lock().last_failure().map(str::to_string)
    }

    // ==================== Operations ====================

    pub fn set_mode(&self, mode: Mode) {
        let mut session = self.lock();
        if session.mode() == mode {
            return;
        }
        session.set_mode(mode);
        drop(session);

        info!(mode = %mode, "Mode changed");
        self.conversation_logger.log(ConversationEvent::new(
            "mode_changed",
            serde_json::json!({ "mode": mode.as_str() }),
        ));
    }

    /// Stage an image for the next exchange (switches to image generation).
    pub fn attach_image(&self, image: ImageData) -> Result<(), SessionError> {
        let media_type = image.media_type().to_string();
        let bytes = image.len();
        self.lock().stage_attachment(image)?;
        info!(media_type = %media_type, bytes, "Attachment staged");
        Ok(())
    }

    /// Drop the staged image. Returns whether one was staged.
    pub fn clear_attachment(&self) -> Result<bool, SessionError> {
        let cleared = self.lock().clear_attachment()?;
        Ok(cleared.is_some())
    }

    /// Run one exchange for `text` (plus the staged attachment, if any).
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let (request, mode) = {
            let mut session = self.lock();
            if let Err(rejection) = session.check_submit(text) {
                debug!(%rejection, "Submit rejected");
                return SubmitOutcome::Rejected(rejection);
            }

            let request = self.builder.build_for(&session, text);
            let attachment = session.attachment().cloned();
            let user_message = match session.append_user_message(text, attachment.as_ref()) {
                Ok(message) => message.clone(),
                Err(rejection) => return SubmitOutcome::Rejected(rejection),
            };
            if let Err(rejection) = session.start_exchange() {
                return SubmitOutcome::Rejected(rejection);
            }

            self.log_message("user_message", &user_message);
            (request, session.mode())
        };

        info!(mode = %mode, "Exchange started");
        self.progress.on_exchange_start(mode);

        let result = self.runner.run(request).await;

        let mut session = self.lock();
        match result {
            Ok(replies) => self.complete(&mut session, replies),
            Err(e) => {
                let reason = e.to_string();
                if e.is_missing_credential() {
                    // Already warned once at construction
                    debug!("No adapter; replying with the fallback");
                } else if e.is_transient() {
                    warn!(error = %reason, "Exchange failed; a later resubmit may succeed");
                } else {
                    warn!(error = %reason, "Exchange failed");
                }
                if let Ok(fallback) = session.fail_exchange(reason.clone()) {
                    let fallback = fallback.clone();
                    drop(session);
                    self.log_message("agent_message", &fallback);
                }
                self.conversation_logger.log(ConversationEvent::new(
                    "exchange_failed",
                    serde_json::json!({ "reason": reason }),
                ));
                self.progress.on_exchange_failed(&reason);
                SubmitOutcome::Failed { reason }
            }
        }
    }

    fn complete(
        &self,
        session: &mut MutexGuard<'_, Session>,
        replies: Vec<MessageContent>,
    ) -> SubmitOutcome {
        let appended = match session.complete_exchange(replies) {
            Ok(appended) => appended.to_vec(),
            Err(e) => {
                // Only reachable if the session was reset underneath us
                warn!(error = %e, "Completion refused");
                return SubmitOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };
        for message in &appended {
            self.log_message("agent_message", message);
        }
        info!(appended = appended.len(), "Exchange completed");
        self.progress.on_exchange_complete(appended.len());
        SubmitOutcome::Completed {
            appended: appended.len(),
        }
    }

    fn log_message(&self, event_type: &'static str, message: &Message) {
        if let MessageContent::Text(text) = message.content() {
            debug!(id = %message.id(), text = %preview(text, 80), "{}", event_type);
        }
        let payload = serde_json::to_value(MessageRecord::from(message)).unwrap_or_default();
        self.conversation_logger
            .log(ConversationEvent::new(event_type, payload));
    }

    // Session state is consistent between lock acquisitions, so a panic in
    // another holder does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
