//! Core types for Edunova
//!
//! Defines the data exchanged with the roadmap backend:
//! - Roadmaps and their topic nodes
//! - Quiz payloads and questions
//! - The quiz fetch request built for a node

use serde::{Deserialize, Serialize};

/// Roadmap node identifier (unique within a roadmap)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl NodeId {
    /// Wrap a raw identifier
    #[inline]
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for NodeId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Topic difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Introductory material
    Beginner,
    /// Builds on the basics
    Intermediate,
    /// Expert-level material
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

/// Quiz metadata the ingestion backend may embed in a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedQuiz {
    /// Embedded questions
    pub questions: Vec<EmbeddedQuestion>,
}

/// Embedded question with an explicit correct index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedQuestion {
    /// Question text
    pub question: String,
    /// Answer options
    pub options: Vec<String>,
    /// Index of the correct option
    pub correct: usize,
}

/// One topic of a learning roadmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapNode {
    /// Node identifier
    pub node_id: NodeId,
    /// Topic title
    pub topic: String,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Short summary of the topic
    pub summary: String,
    /// Human readable time estimate (e.g. "1.5 hours")
    pub estimated_time: String,
    /// Source chunk references (e.g. "0:1")
    #[serde(default)]
    pub related_chunks: Vec<String>,
    /// Optional embedded quiz metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<EmbeddedQuiz>,
}

/// Ordered sequence of roadmap nodes
///
/// Serialized as `{"roadmap": [...]}`, the shape returned by the backend
/// and persisted in the session cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    /// Nodes in learning order
    #[serde(rename = "roadmap")]
    pub nodes: Vec<RoadmapNode>,
}

impl Roadmap {
    /// Create roadmap from nodes
    #[inline]
    #[must_use]
    pub fn new(nodes: Vec<RoadmapNode>) -> Self {
        Self { nodes }
    }

    /// Find node by identifier
    #[must_use]
    pub fn find(&self, node_id: NodeId) -> Option<&RoadmapNode> {
        self.nodes.iter().find(|node| node.node_id == node_id)
    }

    /// Iterate nodes in order
    pub fn iter(&self) -> std::slice::Iter<'_, RoadmapNode> {
        self.nodes.iter()
    }

    /// Number of nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the roadmap has no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a> IntoIterator for &'a Roadmap {
    type Item = &'a RoadmapNode;
    type IntoIter = std::slice::Iter<'a, RoadmapNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question identifier
    pub question_id: i64,
    /// Question text
    pub question: String,
    /// Answer options; order is significant
    pub options: Vec<String>,
    /// Correct answer, equal by value to one of `options`
    pub correct_answer: String,
    /// Explanation shown after submission
    pub explanation: String,
    /// Source chunk references
    #[serde(default)]
    pub related_chunks: Vec<String>,
}

impl QuizQuestion {
    /// Index of the correct option
    ///
    /// Resolved by value equality against `options`; the first matching
    /// option wins when option texts repeat.
    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        self.options
            .iter()
            .position(|option| *option == self.correct_answer)
    }
}

/// Quiz content for one roadmap node
///
/// Serialized as `{"quiz": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPayload {
    /// Questions in presentation order
    #[serde(rename = "quiz")]
    pub questions: Vec<QuizQuestion>,
}

impl QuizPayload {
    /// Create payload from questions
    #[inline]
    #[must_use]
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self { questions }
    }

    /// Number of questions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the payload has no questions
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Request handed to the quiz fetch capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    /// Node the quiz belongs to
    pub node_id: NodeId,
    /// Node topic
    pub topic: String,
    /// Full node record, used by the backend to gather source chunks
    pub node_data: RoadmapNode,
}

impl QuizRequest {
    /// Build the request for a roadmap node
    #[must_use]
    pub fn for_node(node: &RoadmapNode) -> Self {
        Self {
            node_id: node.node_id,
            topic: node.topic.clone(),
            node_data: node.clone(),
        }
    }
}
