use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use lotwatch::domain::RawListing;
use lotwatch::error::SourceError;
use lotwatch::port::ListingSource;

/// Listing source that replays one scripted response per fetch.
///
/// Once the script runs out, every fetch returns an empty page.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<RawListing>, String>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(self, page: Vec<RawListing>) -> Self {
        self.responses
            .lock()
            .expect("lock scripted responses")
            .push_back(Ok(page));
        self
    }

    pub fn push_failure(self, reason: &str) -> Self {
        self.responses
            .lock()
            .expect("lock scripted responses")
            .push_back(Err(reason.to_string()));
        self
    }
}

#[async_trait]
impl ListingSource for ScriptedSource {
    async fn fetch(&self) -> Result<Vec<RawListing>, SourceError> {
        let next = self
            .responses
            .lock()
            .expect("lock scripted responses")
            .pop_front();
        match next {
            Some(Ok(page)) => Ok(page),
            Some(Err(reason)) => Err(SourceError::Parse(reason)),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &'static str {
        "Scripted"
    }
}
