//! In-memory port implementations shared by the use case tests.

use crate::config::GenerationParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::metadata_store::MetadataStore;
use crate::ports::session_store::{SessionStore, StoreError};
use async_trait::async_trait;
use diagchat_domain::{Message, MetadataLookup, SessionId, SessionMetadata};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct MemorySessionStore {
    histories: Mutex<BTreeMap<SessionId, Vec<Message>>>,
    corrupt: Mutex<HashSet<SessionId>>,
}

impl MemorySessionStore {
    pub(crate) fn mark_corrupt(&self, id: &SessionId) {
        self.corrupt.lock().unwrap().insert(id.clone());
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, id: &SessionId) -> Result<Vec<Message>, StoreError> {
        if self.corrupt.lock().unwrap().contains(id) {
            return Err(StoreError::Corrupt {
                path: PathBuf::from(format!("{}.json", id)),
                reason: "expected value at line 1 column 1".to_string(),
            });
        }
        Ok(self
            .histories
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    fn save(&self, id: &SessionId, history: &[Message]) -> Result<(), StoreError> {
        self.corrupt.lock().unwrap().remove(id);
        self.histories
            .lock()
            .unwrap()
            .insert(id.clone(), history.to_vec());
        Ok(())
    }

    fn clear(&self, id: &SessionId) -> Result<(), StoreError> {
        self.histories.lock().unwrap().remove(id);
        Ok(())
    }

    fn exists(&self, id: &SessionId) -> bool {
        self.histories.lock().unwrap().contains_key(id)
    }

    fn list(&self) -> Result<Vec<SessionId>, StoreError> {
        Ok(self.histories.lock().unwrap().keys().cloned().collect())
    }
}

#[derive(Default)]
pub(crate) struct MemoryMetadataStore {
    records: Mutex<HashMap<SessionId, MetadataLookup>>,
}

impl MemoryMetadataStore {
    pub(crate) fn insert(&self, id: &SessionId, lookup: MetadataLookup) {
        self.records.lock().unwrap().insert(id.clone(), lookup);
    }
}

impl MetadataStore for MemoryMetadataStore {
    fn lookup(&self, id: &SessionId) -> MetadataLookup {
        self.records
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or(MetadataLookup::Absent)
    }

    fn store(&self, id: &SessionId, metadata: &SessionMetadata) -> Result<(), StoreError> {
        self.insert(id, MetadataLookup::Present(metadata.clone()));
        Ok(())
    }
}

/// Gateway returning scripted results and recording every request.
pub(crate) struct StubGateway {
    results: Mutex<VecDeque<Result<String, GatewayError>>>,
    requests: Mutex<Vec<Vec<Message>>>,
    params: Mutex<Option<GenerationParams>>,
}

impl StubGateway {
    pub(crate) fn new(results: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(results)),
            requests: Mutex::new(Vec::new()),
            params: Mutex::new(None),
        }
    }

    pub(crate) fn replying<const N: usize>(replies: [&str; N]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub(crate) fn failing(error: GatewayError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub(crate) fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_params(&self) -> Option<GenerationParams> {
        *self.params.lock().unwrap()
    }
}

#[async_trait]
impl LlmGateway for StubGateway {
    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        *self.params.lock().unwrap() = Some(*params);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::RequestFailed("No more replies".to_string())))
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}

#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingLogger {
    pub(crate) fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}
