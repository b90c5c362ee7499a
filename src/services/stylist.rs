// src/services/stylist.rs
//! "Muse", the stylist chat. Each user message is relayed to the model once;
//! any failure is shown to the shopper as a single apology line.

use crate::catalog::catalog;
use crate::error::{StoreError, StoreResult};
use crate::gemini_client::RelayError;
use crate::models::chat::{ChatSessionResponse, ChatTurn, SendMessageResponse};
use crate::models::product::Product;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

pub const GREETING: &str = "Hello, I'm Muse. Tell me what you're dressing for and I'll pull \
together earth-toned pieces from our collection, or answer anything about how we make them.";

pub const FALLBACK_REPLY: &str =
    "I'm having a little trouble connecting to the earth right now. Please try again in a moment.";

const DEFAULT_BLURB: &str = "Sustainable bohemian fashion item.";

/// Something that can answer a shopper given the conversation so far.
#[async_trait]
pub trait ChatRelay: Send + Sync {
    async fn reply(&self, history: &[ChatTurn], message: &str) -> Result<String, RelayError>;
}

/// Used when no API key is configured; every exchange falls back.
pub struct DisabledRelay;

#[async_trait]
impl ChatRelay for DisabledRelay {
    async fn reply(&self, _history: &[ChatTurn], _message: &str) -> Result<String, RelayError> {
        Err(RelayError::NotConfigured)
    }
}

fn catalog_line(p: &Product) -> String {
    format!(
        "ID: {} | Name: {} | Category: {} | Price: ${} | Color: {} | Description: {}",
        p.id,
        p.title,
        p.category,
        p.price,
        p.color.as_deref().unwrap_or("N/A"),
        p.description.as_deref().unwrap_or(DEFAULT_BLURB),
    )
}

/// Persona prompt with the full catalog inlined, so the model can only
/// recommend what is actually on the shelves.
pub fn persona_prompt(products: &[Product]) -> String {
    let inventory = products.iter().map(catalog_line).collect::<Vec<_>>().join("\n");
    format!(
        r#"You are "Muse", the in-house stylist for TerraMuse, a bohemian and sustainable fashion label.
Speak warmly and plainly, like a friend who loves artisan craft and slow living.

Current inventory:
{inventory}

Guidelines:
1. Recommend only items from the inventory above, by name.
2. For occasion requests, pair Apparel with Accessories.
3. Stay under 100 words unless asked for more detail.
4. Shipping questions: we offer Sustainable Shipping. Returns: 30-Day Returns.
5. Never invent products or prices.
6. If asked about things we don't sell, steer back to fashion and slow living."#
    )
}

pub fn default_persona_prompt() -> String {
    persona_prompt(catalog())
}

/// One shopper's conversation. `transcript` is what the shopper sees; `history`
/// holds only exchanges the model actually answered.
#[derive(Debug, Clone)]
pub struct StylistSession {
    pub id: Uuid,
    transcript: Vec<ChatTurn>,
    history: Vec<ChatTurn>,
}

impl StylistSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            transcript: vec![ChatTurn::model(GREETING)],
            history: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Relays `text` once. Blank input is ignored and returns `None`.
    pub async fn send(&mut self, relay: &dyn ChatRelay, text: &str) -> Option<ChatTurn> {
        let message = self.begin(text)?;
        let outcome = relay.reply(&self.history, &message).await;
        Some(self.finish(&message, outcome))
    }

    /// Records the shopper's turn and returns the trimmed message to relay.
    pub fn begin(&mut self, text: &str) -> Option<String> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }
        self.transcript.push(ChatTurn::user(message));
        Some(message.to_string())
    }

    /// Records the relay outcome for `message`. Failures show the fallback line
    /// and stay out of the model history.
    pub fn finish(&mut self, message: &str, outcome: Result<String, RelayError>) -> ChatTurn {
        let reply = match outcome {
            Ok(answer) => {
                self.history.push(ChatTurn::user(message));
                self.history.push(ChatTurn::model(answer.clone()));
                ChatTurn::model(answer)
            }
            Err(e) => {
                tracing::error!(session_id = %self.id, error = %e, "stylist relay failed");
                ChatTurn::model(FALLBACK_REPLY)
            }
        };

        self.transcript.push(reply.clone());
        reply
    }
}

impl Default for StylistSession {
    fn default() -> Self {
        Self::new()
    }
}

/// A session plus the guard that marks a message in flight. The session lock
/// is only held for bookkeeping, never across the relay call, so transcript
/// reads stay fast while Muse is thinking.
struct SessionSlot {
    in_flight: Mutex<()>,
    session: RwLock<StylistSession>,
}

/// Open chat sessions, at most one message in flight per session.
pub struct StylistDesk {
    relay: Arc<dyn ChatRelay>,
    sessions: RwLock<HashMap<Uuid, Arc<SessionSlot>>>,
}

impl StylistDesk {
    pub fn new(relay: Arc<dyn ChatRelay>) -> Self {
        Self { relay, sessions: RwLock::new(HashMap::new()) }
    }

    pub async fn open(&self) -> ChatSessionResponse {
        let session = StylistSession::new();
        let response = ChatSessionResponse {
            session_id: session.id,
            messages: session.transcript().to_vec(),
        };
        let slot = SessionSlot {
            in_flight: Mutex::new(()),
            session: RwLock::new(session),
        };
        self.sessions
            .write()
            .await
            .insert(response.session_id, Arc::new(slot));
        tracing::info!(session_id = %response.session_id, "opened stylist session");
        response
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn slot(&self, session_id: Uuid) -> StoreResult<Arc<SessionSlot>> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Chat session {}", session_id)))
    }

    pub async fn transcript(&self, session_id: Uuid) -> StoreResult<ChatSessionResponse> {
        let slot = self.slot(session_id).await?;
        let session = slot.session.read().await;
        Ok(ChatSessionResponse {
            session_id,
            messages: session.transcript().to_vec(),
        })
    }

    pub async fn send(&self, session_id: Uuid, text: &str) -> StoreResult<SendMessageResponse> {
        let slot = self.slot(session_id).await?;
        let _in_flight = slot.in_flight.try_lock().map_err(|_| {
            StoreError::Conflict("Muse is still replying to your last message".to_string())
        })?;

        let pending = {
            let mut session = slot.session.write().await;
            session
                .begin(text)
                .map(|message| (message, session.history().to_vec()))
        };

        let reply = match pending {
            Some((message, history)) => {
                let outcome = self.relay.reply(&history, &message).await;
                Some(slot.session.write().await.finish(&message, outcome))
            }
            None => None,
        };

        let session = slot.session.read().await;
        Ok(SendMessageResponse {
            session_id,
            reply,
            messages: session.transcript().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct EchoRelay {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChatRelay for EchoRelay {
        async fn reply(&self, history: &[ChatTurn], message: &str) -> Result<String, RelayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{} prior turns; you said: {}", history.len(), message))
        }
    }

    struct GatedRelay {
        started: Notify,
        gate: Notify,
    }

    #[async_trait]
    impl ChatRelay for GatedRelay {
        async fn reply(&self, _history: &[ChatTurn], _message: &str) -> Result<String, RelayError> {
            self.started.notify_one();
            self.gate.notified().await;
            Ok("done".to_string())
        }
    }

    #[test]
    fn test_persona_prompt_inlines_catalog() {
        let prompt = default_persona_prompt();
        assert!(prompt.contains(
            "ID: 1 | Name: Sienna Linen Jumpsuit | Category: Apparel | Price: $148 | Color: Terracotta | Description: Sustainable bohemian fashion item."
        ));
        assert!(prompt.contains("ID: 8 | Name: Lunar Phase Pendant | Category: Accessories | Price: $85 | Color: N/A"));
        assert_eq!(prompt.matches("ID: ").count(), 17);
    }

    #[tokio::test]
    async fn test_blank_message_is_noop() {
        let relay = EchoRelay { calls: AtomicUsize::new(0) };
        let mut session = StylistSession::new();

        assert!(session.send(&relay, "").await.is_none());
        assert!(session.send(&relay, "  \n\t").await.is_none());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(relay.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_exchange_builds_history() {
        let relay = EchoRelay { calls: AtomicUsize::new(0) };
        let mut session = StylistSession::new();

        let first = session.send(&relay, "  linen?  ").await.unwrap();
        assert_eq!(first.text, "0 prior turns; you said: linen?");
        let second = session.send(&relay, "and shoes").await.unwrap();
        assert_eq!(second.text, "2 prior turns; you said: and shoes");

        assert_eq!(session.transcript().len(), 5);
        assert_eq!(session.history().len(), 4);
        assert_eq!(relay.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_shows_fallback_and_skips_history() {
        let mut session = StylistSession::new();
        let reply = session.send(&DisabledRelay, "hello").await.unwrap();

        assert_eq!(reply.text, FALLBACK_REPLY);
        assert_eq!(session.transcript().len(), 3);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_second_send_while_pending_is_rejected() {
        let relay = Arc::new(GatedRelay { started: Notify::new(), gate: Notify::new() });
        let desk = Arc::new(StylistDesk::new(relay.clone()));
        let session_id = desk.open().await.session_id;

        let pending = {
            let desk = desk.clone();
            tokio::spawn(async move { desk.send(session_id, "first").await })
        };

        relay.started.notified().await;
        assert!(matches!(
            desk.send(session_id, "second").await,
            Err(StoreError::Conflict(_))
        ));

        // Reading the transcript doesn't wait for the pending reply.
        let snapshot = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            desk.transcript(session_id),
        )
        .await
        .expect("transcript read blocked on the pending reply")
        .unwrap();
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[1], ChatTurn::user("first"));

        relay.gate.notify_one();
        let first = pending.await.unwrap().unwrap();
        assert_eq!(first.reply.unwrap().text, "done");
        assert_eq!(desk.transcript(session_id).await.unwrap().messages.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let desk = StylistDesk::new(Arc::new(DisabledRelay));
        assert!(matches!(
            desk.send(Uuid::new_v4(), "hi").await,
            Err(StoreError::NotFound(_))
        ));
    }
}
