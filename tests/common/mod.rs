#![allow(dead_code)]

//! Shared fixtures for the integration tests: scripted code generators
//! and helpers over the in-memory repository.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use shortlink::domain::entities::{NewShortLink, ShortLink};
use shortlink::domain::repositories::UrlRepository;
use shortlink::error::CodeGenError;
use shortlink::infrastructure::persistence::MemoryUrlRepository;
use shortlink::utils::code_generator::CodeGenerator;

/// Generator that always returns the same code. Used to force collisions
/// until the allocation loop exhausts its attempts.
pub struct FixedGenerator {
    code: String,
    calls: AtomicU32,
}

impl FixedGenerator {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            calls: AtomicU32::new(0),
        }
    }

    /// Number of times `generate` was called.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CodeGenerator for FixedGenerator {
    fn generate(&self, _length: usize) -> Result<String, CodeGenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.code.clone())
    }
}

/// Generator that replays a fixed sequence of codes, then panics if asked
/// for more. Used to script one collision followed by a fresh code.
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self, _length: usize) -> Result<String, CodeGenError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted generator ran out of codes"))
    }
}

/// Inserts a link directly into the repository, bypassing the allocator.
pub async fn seed_link(
    repo: &MemoryUrlRepository,
    owner_id: i64,
    code: &str,
    target_url: &str,
) -> ShortLink {
    repo.insert_unique(NewShortLink {
        owner_id,
        target_url: target_url.to_string(),
        code: code.to_string(),
    })
    .await
    .expect("failed to seed link")
}
