use super::model::AttemptRecord;

pub const MAX_ATTEMPTS: u32 = 2;
pub const COMPLETION_THRESHOLD: u32 = 10;
pub const PASS_THRESHOLD: u32 = 70;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Available { remaining: u32 },
    Completed,
    Exhausted,
}

/// Decides whether another attempt may be started.
///
/// Completion (`score >= completion_threshold`) closes the gate; passing
/// (`score >= pass_threshold`) only affects messaging. A record counts as
/// completed when the server flagged it or its score reaches the completion
/// threshold, so records stored without the flag still close the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptGate {
    pub max_attempts: u32,
    pub completion_threshold: u32,
    pub pass_threshold: u32,
}

impl Default for AttemptGate {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            completion_threshold: COMPLETION_THRESHOLD,
            pass_threshold: PASS_THRESHOLD,
        }
    }
}

impl AttemptGate {
    pub fn decision(&self, history: &[AttemptRecord]) -> GateDecision {
        if history.iter().any(|a| a.is_completed || self.is_completed(a.score)) {
            return GateDecision::Completed;
        }
        let used = history.len() as u32;
        if used >= self.max_attempts {
            GateDecision::Exhausted
        } else {
            GateDecision::Available { remaining: self.max_attempts - used }
        }
    }

    pub fn can_attempt(&self, history: &[AttemptRecord]) -> bool {
        matches!(self.decision(history), GateDecision::Available { .. })
    }

    pub fn next_attempt_number(&self, history: &[AttemptRecord]) -> u32 {
        history.len() as u32 + 1
    }

    pub fn is_completed(&self, score: u32) -> bool {
        score >= self.completion_threshold
    }

    pub fn is_passed(&self, score: u32) -> bool {
        score >= self.pass_threshold
    }

    pub fn best_score(&self, history: &[AttemptRecord]) -> Option<u32> {
        history.iter().map(|a| a.score).max()
    }

    /// Newest attempt goes first.
    pub fn record(&self, history: &mut Vec<AttemptRecord>, attempt: AttemptRecord) {
        history.insert(0, attempt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn attempt(n: u32, score: u32, is_completed: bool) -> AttemptRecord {
        AttemptRecord {
            day_number: 1,
            score,
            completed_at: Utc::now(),
            total_questions: 10,
            attempt_number: n,
            is_completed,
        }
    }

    #[test]
    fn test_fresh_history_allows_attempt() {
        let gate = AttemptGate::default();
        assert_eq!(gate.decision(&[]), GateDecision::Available { remaining: 2 });
        assert_eq!(gate.next_attempt_number(&[]), 1);
    }

    #[test]
    fn test_max_attempts_blocks_regardless_of_completion() {
        let gate = AttemptGate::default();
        let history = vec![attempt(2, 0, false), attempt(1, 5, false)];
        assert_eq!(gate.decision(&history), GateDecision::Exhausted);
        assert!(!gate.can_attempt(&history));
    }

    #[test]
    fn test_completed_attempt_closes_gate() {
        let gate = AttemptGate::default();
        let history = vec![attempt(1, 40, true)];
        assert_eq!(gate.decision(&history), GateDecision::Completed);
        assert!(!gate.can_attempt(&history));
    }

    #[test]
    fn test_one_failed_attempt_leaves_one() {
        let gate = AttemptGate::default();
        let history = vec![attempt(1, 0, false)];
        assert_eq!(gate.decision(&history), GateDecision::Available { remaining: 1 });
        assert_eq!(gate.next_attempt_number(&history), 2);
    }

    #[test]
    fn test_unflagged_record_above_threshold_completes() {
        let gate = AttemptGate::default();
        let history = vec![attempt(1, 40, false)];
        assert_eq!(gate.decision(&history), GateDecision::Completed);
        assert!(gate.can_attempt(&[attempt(1, 9, false)]));
    }

    #[test]
    fn test_completion_and_pass_thresholds_differ() {
        let gate = AttemptGate::default();
        assert!(gate.is_completed(10));
        assert!(!gate.is_completed(9));
        assert!(!gate.is_passed(69));
        assert!(gate.is_passed(70));
    }

    #[test]
    fn test_record_prepends() {
        let gate = AttemptGate::default();
        let mut history = vec![attempt(1, 20, true)];
        gate.record(&mut history, attempt(2, 90, true));
        assert_eq!(history[0].attempt_number, 2);
        assert_eq!(gate.best_score(&history), Some(90));
        assert_eq!(gate.best_score(&[]), None);
    }
}
