//! Scripted transport used by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use relay_common::types::{AttemptOutcome, NotificationRequest};

use crate::transport::Transport;

/// Replays a fixed sequence of outcomes, then repeats the last one.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<AttemptOutcome>>,
    last: Mutex<Option<AttemptOutcome>>,
    calls: AtomicUsize,
    sent: Mutex<Vec<NotificationRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<AttemptOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn repeating(outcome: AttemptOutcome) -> Self {
        Self::new(vec![outcome])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<NotificationRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: &NotificationRequest) -> AttemptOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(request.clone());

        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(outcome) = next {
            *last = Some(outcome);
        }
        last.clone().expect("script must not be empty")
    }
}

pub fn connection_failed() -> AttemptOutcome {
    AttemptOutcome::ConnectionFailed {
        reason: "connection refused".to_string(),
    }
}

pub fn test_request() -> NotificationRequest {
    NotificationRequest::new(
        vec!["+15550100".to_string()],
        "Disk alarm",
        "disk /var is 95% full",
        "alarm-v1",
    )
    .unwrap()
}
