//! Scripted transport for testing

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use mod_version_check::version::error::TransportError;
use mod_version_check::version::transport::Transport;

const RELEASE_PERMITS: usize = 1024;

/// Canned response for one URL
#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Status(String),
}

/// Transport answering from a URL -> reply table after an optional delay
pub struct ScriptedTransport {
    replies: HashMap<String, (Duration, Reply)>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
    gate: Option<Semaphore>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn with_reply(mut self, url: &str, delay: Duration, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), (delay, reply));
        self
    }

    /// Hold every request until [`ScriptedTransport::release`] is called
    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(RELEASE_PERMITS);
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested_urls(&self) -> Vec<String> {
        let mut urls = self.requested.lock().unwrap().clone();
        urls.sort();
        urls
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());

        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await;
        }

        let Some((delay, reply)) = self.replies.get(url).cloned() else {
            return Err(TransportError::Status("404 Not Found".to_string()));
        };
        tokio::time::sleep(delay).await;

        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Status(status) => Err(TransportError::Status(status)),
        }
    }
}

/// XML descriptor body for `version`
pub fn descriptor(version: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<VersionData>\n  <version>{}</version>\n  <date>2016-08-01</date>\n</VersionData>\n",
        version
    )
}
