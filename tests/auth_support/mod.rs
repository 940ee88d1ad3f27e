#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use caddey::auth::{AuthError, DeviceAuthorization, Token, TokenStore, VerificationPrompt};

#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: Mutex<HashMap<String, Token>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, profile: &str) -> Option<Token> {
        self.tokens
            .lock()
            .expect("store lock poisoned")
            .get(profile)
            .cloned()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self, profile: &str) -> Result<Option<Token>, AuthError> {
        Ok(self.get(profile))
    }

    fn save(&self, profile: &str, token: &Token) -> Result<(), AuthError> {
        self.tokens
            .lock()
            .expect("store lock poisoned")
            .insert(profile.to_string(), token.clone());
        Ok(())
    }

    fn clear(&self, profile: &str) -> Result<(), AuthError> {
        self.tokens
            .lock()
            .expect("store lock poisoned")
            .remove(profile);
        Ok(())
    }
}

/// Prompt that records every grant it is shown.
#[derive(Default)]
pub struct RecordingPrompt {
    shown: Mutex<Vec<(String, String)>>,
}

impl RecordingPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<(String, String)> {
        self.shown.lock().expect("prompt lock poisoned").clone()
    }
}

impl VerificationPrompt for RecordingPrompt {
    fn show(&self, grant: &DeviceAuthorization) {
        self.shown
            .lock()
            .expect("prompt lock poisoned")
            .push((grant.verification_uri.clone(), grant.user_code.clone()));
    }
}
