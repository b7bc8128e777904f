#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crawl_warden::{RobotsFetch, RobotsPayload, Warden, WardenConfig};

/// One scripted robots.txt fetch answer.
#[derive(Debug, Clone, Copy)]
pub enum Stub {
    Body(&'static str),
    Unavailable(u16),
    Fail(&'static str),
}

/// Scripted stand-in for the robots.txt fetcher.
///
/// Answers are consumed front to back; the last one repeats forever. Every
/// call bumps the shared fetch counter.
pub struct StubFetch {
    script: Mutex<VecDeque<Stub>>,
    fetches: Arc<AtomicUsize>,
}

impl StubFetch {
    pub fn sequence(script: Vec<Stub>) -> Self {
        assert!(!script.is_empty(), "stub script must not be empty");
        Self {
            script: Mutex::new(script.into()),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn body(txt: &'static str) -> Self {
        Self::sequence(vec![Stub::Body(txt)])
    }

    pub fn unavailable(status: u16) -> Self {
        Self::sequence(vec![Stub::Unavailable(status)])
    }

    pub fn failing(msg: &'static str) -> Self {
        Self::sequence(vec![Stub::Fail(msg)])
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.fetches.clone()
    }
}

#[async_trait]
impl RobotsFetch for StubFetch {
    async fn fetch(&self, _origin: &str, _agent: &str) -> anyhow::Result<RobotsPayload> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let stub = {
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                *script.front().unwrap()
            }
        };
        match stub {
            Stub::Body(txt) => Ok(RobotsPayload::Body(txt.to_string())),
            Stub::Unavailable(status) => Ok(RobotsPayload::Unavailable { status }),
            Stub::Fail(msg) => Err(anyhow::anyhow!(msg)),
        }
    }
}

/// Warden over a stub fetcher, returning the fetch counter alongside.
pub fn warden(fetcher: StubFetch) -> (Warden, Arc<AtomicUsize>) {
    warden_with_config(WardenConfig::default(), fetcher)
}

pub fn warden_with_config(config: WardenConfig, fetcher: StubFetch) -> (Warden, Arc<AtomicUsize>) {
    let fetches = fetcher.counter();
    (Warden::with_fetcher(config, Box::new(fetcher)), fetches)
}
