//! In-memory stand-ins for the external collaborators, shared by unit tests.

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::auth::{TokenError, TokenVerifier, VerifiedIdentity};
use crate::config::Config;
use crate::llm_client::{LlmError, ModelReply, TextGenerator};
use crate::state::AppState;
use crate::store::DocumentStore;

/// Returns a canned reply and records every prompt it was given.
pub struct StubGenerator {
    reply: Result<ModelReply, (u16, String)>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(reply: ModelReply) -> Self {
        Self {
            reply: Ok(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            reply: Err((status, message.to_string())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<ModelReply, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err((status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

/// Keeps added documents in memory, or refuses every write.
#[derive(Default)]
pub struct RecordingStore {
    documents: Mutex<Vec<(String, Value)>>,
    reject_writes: bool,
}

impl RecordingStore {
    pub fn failing() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            reject_writes: true,
        }
    }

    pub fn documents(&self) -> Vec<(String, Value)> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn add(&self, collection: &str, document: Value) -> Result<String> {
        if self.reject_writes {
            bail!("document store unavailable");
        }
        let mut documents = self.documents.lock().unwrap();
        documents.push((collection.to_string(), document));
        Ok(format!("doc-{}", documents.len()))
    }
}

/// Accepts exactly one token and maps it to a fixed subject.
pub struct StubVerifier {
    pub valid_token: &'static str,
    pub uid: &'static str,
}

#[async_trait]
impl TokenVerifier for StubVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, TokenError> {
        if token == self.valid_token {
            Ok(VerifiedIdentity {
                uid: self.uid.to_string(),
            })
        } else {
            Err(TokenError::UnknownKeyId("test-kid".to_string()))
        }
    }
}

pub fn test_config(vapi_secret: Option<&str>) -> Config {
    Config {
        database_url: "postgres://localhost/test".to_string(),
        llm_api_url: "http://localhost:0/v1/responses".to_string(),
        llm_api_key: "test-key".to_string(),
        llm_model: "test-model".to_string(),
        vapi_secret: vapi_secret.map(str::to_string),
        firebase_project_id: None,
        port: 0,
        rust_log: "debug".to_string(),
    }
}

pub fn test_state(
    vapi_secret: Option<&str>,
    llm: Arc<StubGenerator>,
    store: Arc<RecordingStore>,
) -> AppState {
    AppState {
        config: test_config(vapi_secret),
        llm,
        token_verifier: Arc::new(StubVerifier {
            valid_token: "valid-token",
            uid: "verified-uid",
        }),
        store,
    }
}
