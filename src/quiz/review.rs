use super::model::Question;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionReview {
    pub number: usize,
    pub question: String,
    pub selected_text: Option<String>,
    pub correct_text: Option<String>,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewSheet {
    pub rows: Vec<QuestionReview>,
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
}

pub fn build_review(questions: &[Question], selected: &[Option<usize>]) -> ReviewSheet {
    let rows: Vec<QuestionReview> = questions
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let choice = selected.get(idx).copied().flatten();
            let outcome = match choice {
                None => Outcome::Unanswered,
                Some(opt) if q.is_correct_choice(opt) => Outcome::Correct,
                Some(_) => Outcome::Incorrect,
            };
            QuestionReview {
                number: idx + 1,
                question: q.text.clone(),
                selected_text: choice.and_then(|opt| q.options.get(opt)).map(|o| o.text.clone()),
                correct_text: q.correct_index().map(|opt| q.options[opt].text.clone()),
                outcome,
            }
        })
        .collect();

    let count = |outcome: Outcome| rows.iter().filter(|r| r.outcome == outcome).count();
    let correct = count(Outcome::Correct);
    let incorrect = count(Outcome::Incorrect);
    let unanswered = count(Outcome::Unanswered);

    ReviewSheet { rows, correct, incorrect, unanswered }
}
