//! Testing utilities for Edunova workspace
//!
//! Shared fixtures and fake capabilities.

#![allow(missing_docs)]

use async_trait::async_trait;
use edunova_core::{
    Difficulty, FetchError, NodeId, QuizFetcher, QuizPayload, QuizQuestion, QuizRequest, Roadmap,
    RoadmapNode, SessionReader,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn sample_node(id: i64) -> RoadmapNode {
    let difficulty = match id % 3 {
        1 => Difficulty::Beginner,
        2 => Difficulty::Intermediate,
        _ => Difficulty::Advanced,
    };
    RoadmapNode {
        node_id: NodeId(id),
        topic: format!("Topic {id}"),
        difficulty,
        summary: format!("Summary of topic {id}."),
        estimated_time: "1 hour".to_string(),
        related_chunks: vec![format!("0:{id}")],
        quiz: None,
    }
}

/// Roadmap with node ids `1..=count`
pub fn sample_roadmap(count: i64) -> Roadmap {
    Roadmap::new((1..=count).map(sample_node).collect())
}

/// Two-question quiz whose text depends on the node id
pub fn sample_payload(node_id: NodeId) -> QuizPayload {
    let id = node_id.get();
    QuizPayload::new(vec![
        QuizQuestion {
            question_id: 1,
            question: format!("What is covered by topic {id}?"),
            options: vec![
                format!("Topic {id}"),
                "Something else".to_string(),
                "Nothing".to_string(),
            ],
            correct_answer: format!("Topic {id}"),
            explanation: format!("Node {id} covers topic {id}."),
            related_chunks: vec![format!("0:{id}")],
        },
        QuizQuestion {
            question_id: 2,
            question: "Which answer is right?".to_string(),
            options: vec!["Left".to_string(), "Right".to_string()],
            correct_answer: "Right".to_string(),
            explanation: "It says so.".to_string(),
            related_chunks: Vec::new(),
        },
    ])
}

/// Quiz fetcher answering with [`sample_payload`]
///
/// Counts calls per node, fails for configured nodes and optionally sleeps
/// before answering.
#[derive(Debug, Default)]
pub struct FakeQuizFetcher {
    calls: AtomicUsize,
    per_node: Mutex<HashMap<NodeId, usize>>,
    failing: Mutex<HashSet<NodeId>>,
    delay: Option<Duration>,
}

impl FakeQuizFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.failing.lock().extend(ids);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Stop failing for a node
    pub fn recover(&self, node_id: NodeId) {
        self.failing.lock().remove(&node_id);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, node_id: NodeId) -> usize {
        self.per_node.lock().get(&node_id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl QuizFetcher for FakeQuizFetcher {
    async fn fetch_quiz(&self, request: &QuizRequest) -> Result<QuizPayload, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.per_node.lock().entry(request.node_id).or_default() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().contains(&request.node_id) {
            return Err(FetchError::status(500, format!("no quiz for {}", request.topic)));
        }
        Ok(sample_payload(request.node_id))
    }
}

/// Session reader holding a fixed roadmap
#[derive(Debug, Clone, Default)]
pub struct StaticSessionReader {
    roadmap: Option<Roadmap>,
}

impl StaticSessionReader {
    pub fn new(roadmap: Roadmap) -> Self {
        Self {
            roadmap: Some(roadmap),
        }
    }

    /// Nothing persisted
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionReader for StaticSessionReader {
    async fn read_persisted_roadmap(&self) -> Option<Roadmap> {
        self.roadmap.clone()
    }
}
