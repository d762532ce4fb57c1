//! Security-quiz state machine.
//!
//! Flow: answer the current question (recording correctness and banking
//! points), advance to the next, and grade once every question is done.
//! The answer/advance split mirrors the explanation screen shown between
//! questions.

use tutorhub_types::constants::QUIZ_POINTS_PER_CORRECT;
use tutorhub_types::quiz::max_score;
use tutorhub_types::{AnswerRecord, Grade, QuizQuestion};

use crate::error::EngineError;

/// A quiz in progress.
#[derive(Clone, Debug)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    /// Index of the question currently shown.
    pub current: usize,
    pub score: u32,
    pub answers: Vec<AnswerRecord>,
    pub complete: bool,
}

impl Quiz {
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, EngineError> {
        if questions.is_empty() {
            return Err(EngineError::EmptyQuiz);
        }
        Ok(Self {
            questions,
            current: 0,
            score: 0,
            answers: Vec::new(),
            complete: false,
        })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// The question currently shown, if the quiz is still running.
    pub fn question(&self) -> Option<&QuizQuestion> {
        if self.complete {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    /// Whether the current question has been answered but not advanced past.
    pub fn awaiting_advance(&self) -> bool {
        self.answers.len() > self.current
    }

    /// Answer the current question.
    pub fn answer(&mut self, choice: usize) -> Result<AnswerRecord, EngineError> {
        if self.complete {
            return Err(EngineError::QuizFinished);
        }
        if self.awaiting_advance() {
            return Err(EngineError::AlreadyAnswered);
        }
        let question = &self.questions[self.current];
        if choice >= question.choices.len() {
            return Err(EngineError::ChoiceOutOfRange {
                got: choice,
                max: question.choices.len() - 1,
            });
        }

        let correct = choice == question.correct;
        if correct {
            self.score += QUIZ_POINTS_PER_CORRECT;
        }
        let record = AnswerRecord {
            question_index: self.current,
            selected: choice,
            correct,
        };
        self.answers.push(record.clone());
        Ok(record)
    }

    /// Move past an answered question; completes the quiz after the last
    /// one. No-op until the current question has been answered.
    pub fn next(&mut self) {
        if !self.awaiting_advance() {
            return;
        }
        if self.current + 1 >= self.questions.len() {
            self.complete = true;
        } else {
            self.current += 1;
        }
    }

    /// Score as a percentage of the maximum.
    pub fn score_pct(&self) -> f64 {
        let max = max_score(self.questions.len());
        if max == 0 {
            0.0
        } else {
            self.score as f64 / max as f64 * 100.0
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::for_score_pct(self.score_pct())
    }

    /// Restart from the first question with a clean slate.
    pub fn reset(&mut self) {
        self.current = 0;
        self.score = 0;
        self.answers.clear();
        self.complete = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion {
            prompt: "Which option keeps a seed phrase safe?".into(),
            choices: vec![
                "Store it in a screenshot".into(),
                "Write it down offline".into(),
                "Email it to yourself".into(),
            ],
            correct,
            explanation: "Offline storage keeps the phrase away from malware.".into(),
            category: "Wallet Security".into(),
        }
    }

    fn three_question_quiz() -> Quiz {
        Quiz::new(vec![question(1), question(0), question(2)]).unwrap()
    }

    #[test]
    fn test_empty_quiz_rejected() {
        assert_eq!(Quiz::new(vec![]).unwrap_err(), EngineError::EmptyQuiz);
    }

    #[test]
    fn test_correct_answer_banks_points() {
        let mut quiz = three_question_quiz();
        let record = quiz.answer(1).unwrap();
        assert!(record.correct);
        assert_eq!(quiz.score, 10);
    }

    #[test]
    fn test_wrong_answer_banks_nothing() {
        let mut quiz = three_question_quiz();
        let record = quiz.answer(0).unwrap();
        assert!(!record.correct);
        assert_eq!(quiz.score, 0);
    }

    #[test]
    fn test_double_answer_rejected() {
        let mut quiz = three_question_quiz();
        quiz.answer(1).unwrap();
        assert_eq!(quiz.answer(1).unwrap_err(), EngineError::AlreadyAnswered);
    }

    #[test]
    fn test_choice_out_of_range() {
        let mut quiz = three_question_quiz();
        assert_eq!(
            quiz.answer(3).unwrap_err(),
            EngineError::ChoiceOutOfRange { got: 3, max: 2 }
        );
    }

    #[test]
    fn test_next_requires_an_answer() {
        let mut quiz = three_question_quiz();
        quiz.next();
        assert_eq!(quiz.current, 0);
        quiz.answer(1).unwrap();
        quiz.next();
        assert_eq!(quiz.current, 1);
    }

    #[test]
    fn test_full_run_grades() {
        let mut quiz = three_question_quiz();
        for correct in [1, 0, 2] {
            quiz.answer(correct).unwrap();
            quiz.next();
        }
        assert!(quiz.complete);
        assert_eq!(quiz.score, 30);
        assert_eq!(quiz.score_pct(), 100.0);
        assert_eq!(quiz.grade(), Grade::APlus);
        assert_eq!(quiz.answer(0).unwrap_err(), EngineError::QuizFinished);
    }

    #[test]
    fn test_partial_score_grades_down() {
        let mut quiz = three_question_quiz();
        quiz.answer(1).unwrap(); // correct
        quiz.next();
        quiz.answer(1).unwrap(); // wrong
        quiz.next();
        quiz.answer(0).unwrap(); // wrong
        quiz.next();
        assert!(quiz.complete);
        assert_eq!(quiz.score, 10);
        assert_eq!(quiz.grade(), Grade::F);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut quiz = three_question_quiz();
        quiz.answer(1).unwrap();
        quiz.next();
        quiz.reset();
        assert_eq!(quiz.current, 0);
        assert_eq!(quiz.score, 0);
        assert!(quiz.answers.is_empty());
        assert!(!quiz.complete);
        assert!(quiz.question().is_some());
    }
}
