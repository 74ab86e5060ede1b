use super::model::Question;

/// Number of questions whose selected option is flagged correct.
///
/// Any selected option with `is_correct` counts, however many correct
/// options the question carries. Missing or out-of-range selections count
/// as wrong.
pub fn correct_count(questions: &[Question], selected: &[Option<usize>]) -> usize {
    questions
        .iter()
        .zip(selected)
        .filter(|(q, sel)| sel.map(|idx| q.is_correct_choice(idx)).unwrap_or(false))
        .count()
}

/// Whole-number percentage of correct answers. No partial credit and no
/// negative marking. An empty question set scores 0.
pub fn score(questions: &[Question], selected: &[Option<usize>]) -> u32 {
    if questions.is_empty() {
        return 0;
    }
    let correct = correct_count(questions, selected);
    (100.0 * correct as f64 / questions.len() as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::model::QuizOption;

    fn question(correct: usize, options: usize) -> Question {
        Question {
            text: format!("Q with answer {correct}"),
            options: (0..options)
                .map(|i| QuizOption { text: format!("opt {i}"), is_correct: i == correct })
                .collect(),
        }
    }

    #[test]
    fn test_three_of_four_is_75() {
        let qs = vec![question(0, 4), question(1, 4), question(2, 4), question(3, 4)];
        let selected = vec![Some(0), Some(1), Some(2), None];
        assert_eq!(score(&qs, &selected), 75);
    }

    #[test]
    fn test_nothing_right_is_zero() {
        let qs = vec![question(0, 4), question(1, 4), question(2, 4), question(3, 4)];
        assert_eq!(score(&qs, &[Some(1), Some(0), None, Some(2)]), 0);
        assert_eq!(score(&qs, &[None, None, None, None]), 0);
    }

    #[test]
    fn test_all_right_is_100() {
        let qs = vec![question(0, 4), question(1, 4), question(2, 4), question(3, 4)];
        assert_eq!(score(&qs, &[Some(0), Some(1), Some(2), Some(3)]), 100);
    }

    #[test]
    fn test_rounds_to_nearest() {
        let qs = vec![question(0, 2), question(0, 2), question(0, 2)];
        // 2/3 = 66.67
        assert_eq!(score(&qs, &[Some(0), Some(0), Some(1)]), 67);
        // 1/3 = 33.33
        assert_eq!(score(&qs, &[Some(0), Some(1), Some(1)]), 33);
    }

    #[test]
    fn test_empty_set_scores_zero() {
        assert_eq!(score(&[], &[]), 0);
    }

    #[test]
    fn test_out_of_range_selection_is_wrong() {
        let qs = vec![question(0, 2)];
        assert_eq!(correct_count(&qs, &[Some(9)]), 0);
    }

    #[test]
    fn test_multiple_correct_options_credit_any() {
        let mut q = question(0, 3);
        q.options[2].is_correct = true;
        assert_eq!(score(&[q.clone()], &[Some(2)]), 100);
        assert_eq!(score(&[q], &[Some(1)]), 0);
    }
}
