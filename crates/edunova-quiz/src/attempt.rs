//! A user's pass through one quiz

use edunova_core::QuizPayload;
use std::sync::Arc;
use thiserror::Error;

/// Attempt errors
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AttemptError {
    /// Submit with questions left unanswered
    #[error("{unanswered} question(s) still unanswered")]
    Incomplete {
        /// Number of questions without a selection
        unanswered: usize,
    },

    /// Answers are frozen once submitted
    #[error("quiz already submitted")]
    AlreadySubmitted,
}

/// Number of correct answers out of the question count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Correctly answered questions
    pub correct: usize,
    /// Questions in the quiz
    pub total: usize,
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// Selections and submission state for one quiz
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    payload: Arc<QuizPayload>,
    selections: Vec<Option<usize>>,
    current: usize,
    submitted: bool,
}

impl QuizAttempt {
    /// Start an attempt with nothing selected
    #[must_use]
    pub fn new(payload: Arc<QuizPayload>) -> Self {
        let selections = vec![None; payload.len()];
        Self {
            payload,
            selections,
            current: 0,
            submitted: false,
        }
    }

    /// Quiz being attempted
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &QuizPayload {
        &self.payload
    }

    /// Index of the question in view
    #[inline]
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Move to the next question; false at the last one
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.payload.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous question; false at the first one
    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Select an option for a question
    ///
    /// Returns false, leaving the attempt unchanged, once submitted or when
    /// either index is out of range.
    pub fn select(&mut self, question: usize, option: usize) -> bool {
        if self.submitted {
            return false;
        }
        let Some(q) = self.payload.questions.get(question) else {
            return false;
        };
        if option >= q.options.len() {
            return false;
        }
        self.selections[question] = Some(option);
        true
    }

    /// Selected option for a question
    #[must_use]
    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(question).copied().flatten()
    }

    /// Questions with a selection
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }

    /// Whether answers have been submitted
    #[inline]
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Freeze answers and score them
    ///
    /// # Errors
    /// - `AttemptError::Incomplete` unless every question has a selection
    /// - `AttemptError::AlreadySubmitted` on a second submit
    pub fn submit(&mut self) -> Result<Score, AttemptError> {
        if self.submitted {
            return Err(AttemptError::AlreadySubmitted);
        }
        let unanswered = self.payload.len() - self.answered_count();
        if unanswered > 0 {
            return Err(AttemptError::Incomplete { unanswered });
        }
        self.submitted = true;
        Ok(self.score())
    }

    /// Clear selections and return to the first question
    pub fn reset(&mut self) {
        self.selections.fill(None);
        self.current = 0;
        self.submitted = false;
    }

    /// Whether the selection for a question is the correct option
    ///
    /// False when unanswered, out of range, or when the question's correct
    /// answer matches none of its options.
    #[must_use]
    pub fn is_correct(&self, question: usize) -> bool {
        match (self.selection(question), self.payload.questions.get(question)) {
            (Some(selected), Some(q)) => q.correct_index() == Some(selected),
            _ => false,
        }
    }

    /// Current score
    #[must_use]
    pub fn score(&self) -> Score {
        let total = self.payload.len();
        let correct = (0..total).filter(|&i| self.is_correct(i)).count();
        Score { correct, total }
    }
}
