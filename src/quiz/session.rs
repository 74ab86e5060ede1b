use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::keys::QuizCommand;
use super::model::Question;
use super::scorer;
use crate::error::QuizError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionStatus {
    Marked,
    Answered,
    NotAnswered,
    NotVisited,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub answered: usize,
    pub not_answered: usize,
    pub marked: usize,
    pub not_visited: usize,
}

/// What the session hands back to its host on submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub score: u32,
    pub selected: Vec<usize>,
}

/// In-memory state of one quiz-taking attempt.
///
/// `selected` always has one slot per question. Nothing here is persisted;
/// dropping the session discards the attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    selected: Vec<Option<usize>>,
    marked: BTreeSet<usize>,
    visited: BTreeSet<usize>,
    submitting: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }
        for (idx, q) in questions.iter().enumerate() {
            if q.options.is_empty() {
                return Err(QuizError::NoOptions { question: idx });
            }
            let correct = q.correct_count();
            if correct != 1 {
                warn!("Question {} has {} correct options", idx, correct);
            }
        }

        info!("Starting quiz session with {} questions", questions.len());
        let selected = vec![None; questions.len()];
        Ok(Self {
            questions,
            current: 0,
            selected,
            marked: BTreeSet::new(),
            visited: BTreeSet::from([0]),
            submitting: false,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn selected_at(&self, question_idx: usize) -> Option<usize> {
        self.selected.get(question_idx).copied().flatten()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn is_marked(&self, question_idx: usize) -> bool {
        self.marked.contains(&question_idx)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    // --- Answers ---

    /// Records `option_idx` as the answer to `question_idx`. Out-of-range
    /// indices are ignored. Returns whether anything was recorded.
    pub fn select_option(&mut self, question_idx: usize, option_idx: usize) -> bool {
        let valid = self
            .questions
            .get(question_idx)
            .map(|q| option_idx < q.options.len())
            .unwrap_or(false);
        if !valid {
            return false;
        }
        self.selected[question_idx] = Some(option_idx);
        true
    }

    pub fn clear_current_answer(&mut self) {
        self.selected[self.current] = None;
    }

    pub fn answered_count(&self) -> usize {
        self.selected.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.selected.iter().all(Option::is_some)
    }

    pub fn progress_percent(&self) -> u32 {
        (100 * self.answered_count() / self.questions.len()) as u32
    }

    // --- Navigation ---

    /// Moves to `index` if it is in bounds, otherwise does nothing.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.questions.len() {
            return false;
        }
        self.current = index;
        self.visited.insert(index);
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(prev) => self.go_to(prev),
            None => false,
        }
    }

    pub fn mark_for_review_and_next(&mut self) {
        self.marked.insert(self.current);
        if !self.is_last() {
            self.next();
        }
    }

    pub fn unmark(&mut self, question_idx: usize) {
        self.marked.remove(&question_idx);
    }

    /// Applies a keyboard-derived command. Fullscreen toggling is not a
    /// session concern and is reported back as unhandled.
    pub fn apply(&mut self, cmd: QuizCommand) -> bool {
        match cmd {
            QuizCommand::Previous => self.previous(),
            QuizCommand::Next => self.next(),
            QuizCommand::Select(option_idx) => self.select_option(self.current, option_idx),
            QuizCommand::ToggleFullscreen => false,
        }
    }

    // --- Status ---

    pub fn status(&self, question_idx: usize) -> QuestionStatus {
        if self.marked.contains(&question_idx) {
            QuestionStatus::Marked
        } else if self.selected_at(question_idx).is_some() {
            QuestionStatus::Answered
        } else if self.visited.contains(&question_idx) {
            QuestionStatus::NotAnswered
        } else {
            QuestionStatus::NotVisited
        }
    }

    pub fn status_summary(&self) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for idx in 0..self.questions.len() {
            match self.status(idx) {
                QuestionStatus::Marked => summary.marked += 1,
                QuestionStatus::Answered => summary.answered += 1,
                QuestionStatus::NotAnswered => summary.not_answered += 1,
                QuestionStatus::NotVisited => summary.not_visited += 1,
            }
        }
        summary
    }

    // --- Submission ---

    pub fn score(&self) -> u32 {
        scorer::score(&self.questions, &self.selected)
    }

    /// Scores the session and locks it against a second submit until the
    /// host reports a failure.
    pub fn begin_submit(&mut self) -> Result<Submission, QuizError> {
        if self.submitting {
            return Err(QuizError::SubmissionInFlight);
        }
        let selected: Vec<usize> = self.selected.iter().flatten().copied().collect();
        if selected.len() != self.selected.len() {
            return Err(QuizError::Incomplete {
                unanswered: self.selected.len() - selected.len(),
            });
        }

        self.submitting = true;
        let score = self.score();
        debug!("Submitting answers {:?}", selected);
        info!("Quiz submitted with score {}", score);
        Ok(Submission { score, selected })
    }

    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }
}
