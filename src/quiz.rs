use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

pub const STARTING_LIVES: u32 = 3;

/// Violations of the question-file data contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizDataError {
    #[error("Question file contains no questions")]
    NoQuestions,

    #[error("Unknown difficulty \"{0}\" (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("Question {index} (\"{prompt}\") has no options")]
    NoOptions { index: usize, prompt: String },

    #[error("Question {index} (\"{prompt}\"): answer \"{answer}\" matches none of the options")]
    AnswerNotAnOption {
        index: usize,
        prompt: String,
        answer: String,
    },

    #[error("Question {index} (\"{prompt}\"): answer \"{answer}\" matches more than one option")]
    AnswerAmbiguous {
        index: usize,
        prompt: String,
        answer: String,
    },
}

/// Presentation order is the derived `Ord`: easy before medium before hard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl TryFrom<String> for Difficulty {
    type Error = QuizDataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(QuizDataError::UnknownDifficulty(value)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub difficulty: Difficulty,
}

impl Question {
    /// The answer must case-insensitively match exactly one option.
    fn validate(&self, index: usize) -> Result<(), QuizDataError> {
        if self.options.is_empty() {
            return Err(QuizDataError::NoOptions {
                index,
                prompt: self.question.clone(),
            });
        }

        let answer = self.answer.to_lowercase();
        let matches = self
            .options
            .iter()
            .filter(|option| option.to_lowercase() == answer)
            .count();

        match matches {
            1 => Ok(()),
            0 => Err(QuizDataError::AnswerNotAnOption {
                index,
                prompt: self.question.clone(),
                answer: self.answer.clone(),
            }),
            _ => Err(QuizDataError::AnswerAmbiguous {
                index,
                prompt: self.question.clone(),
                answer: self.answer.clone(),
            }),
        }
    }
}

/// Loads and validates the question file. Questions keep their file
/// order here; grouping by difficulty happens in [`QuizSession::new`].
pub fn load_questions(path: &Path) -> Result<Vec<Question>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open question file {}", path.display()))?;
    let questions: Vec<Question> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse question file {}", path.display()))?;

    if questions.is_empty() {
        return Err(QuizDataError::NoQuestions.into());
    }
    for (index, question) in questions.iter().enumerate() {
        question.validate(index + 1)?;
    }

    Ok(questions)
}

/// Outcome of scoring one raw answer line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Not a number within `[1, options]`. The question is re-asked and
    /// no life is consumed.
    Invalid,
    Correct,
    Incorrect { correct: String, lives_left: u32 },
}

/// One quiz run: the grouped question sequence, a lives countdown and a
/// cursor. Performs no I/O; a driver feeds it raw input lines.
#[derive(Debug)]
pub struct QuizSession {
    questions: Vec<Question>,
    starting_lives: u32,
    lives: u32,
    index: usize,
}

impl QuizSession {
    /// Groups the questions easy, then medium, then hard, preserving
    /// file order within each bucket (stable sort).
    pub fn new(mut questions: Vec<Question>, lives: u32) -> Self {
        questions.sort_by_key(|question| question.difficulty);
        Self {
            questions,
            starting_lives: lives,
            lives,
            index: 0,
        }
    }

    /// The current question and its 1-indexed number, if any remain.
    pub fn current(&self) -> Option<(usize, &Question)> {
        self.questions
            .get(self.index)
            .map(|question| (self.index + 1, question))
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn out_of_lives(&self) -> bool {
        self.lives == 0
    }

    pub fn finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    /// Scores one raw input line against the current question.
    ///
    /// Input is trimmed and lowercased, then interpreted as a 1-based
    /// option number. Anything outside `[1, options]` is `Invalid` and
    /// changes nothing. A wrong choice announces the correct answer,
    /// costs a life and advances; a right choice just advances.
    pub fn answer(&mut self, raw: &str) -> Verdict {
        let Some(question) = self.questions.get(self.index) else {
            return Verdict::Invalid;
        };

        let normalized = raw.trim().to_lowercase();
        // Digits only; a signed number is not a valid choice.
        if !normalized.chars().all(|c| c.is_ascii_digit()) {
            return Verdict::Invalid;
        }
        let choice = match normalized.parse::<usize>() {
            Ok(n) if n >= 1 && n <= question.options.len() => n,
            _ => return Verdict::Invalid,
        };

        let chosen = &question.options[choice - 1];
        if chosen.to_lowercase() == question.answer.to_lowercase() {
            self.index += 1;
            Verdict::Correct
        } else {
            self.lives = self.lives.saturating_sub(1);
            self.index += 1;
            Verdict::Incorrect {
                correct: question.answer.clone(),
                lives_left: self.lives,
            }
        }
    }

    /// Resets lives and the cursor. The sequence is kept as-is, never
    /// reshuffled.
    pub fn restart(&mut self) {
        self.lives = self.starting_lives;
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn question(prompt: &str, options: &[&str], answer: &str, difficulty: Difficulty) -> Question {
        Question {
            question: prompt.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer: answer.to_string(),
            difficulty,
        }
    }

    fn capitals() -> Vec<Question> {
        vec![question(
            "What is the capital of France?",
            &["Paris", "London", "Berlin"],
            "Paris",
            Difficulty::Easy,
        )]
    }

    #[test]
    fn test_correct_answer_keeps_lives() {
        let mut session = QuizSession::new(capitals(), STARTING_LIVES);
        assert_eq!(session.answer("1"), Verdict::Correct);
        assert_eq!(session.lives(), STARTING_LIVES);
        assert!(session.finished());
    }

    #[test]
    fn test_out_of_range_choice_is_invalid() {
        let mut session = QuizSession::new(capitals(), STARTING_LIVES);
        assert_eq!(session.answer("5"), Verdict::Invalid);
        assert_eq!(session.lives(), STARTING_LIVES);
        assert!(!session.finished(), "Invalid input must not advance");
    }

    #[test]
    fn test_wrong_answer_costs_a_life() {
        let mut session = QuizSession::new(capitals(), STARTING_LIVES);
        assert_eq!(
            session.answer("2"),
            Verdict::Incorrect {
                correct: "Paris".to_string(),
                lives_left: STARTING_LIVES - 1,
            }
        );
        assert_eq!(session.lives(), STARTING_LIVES - 1);
    }

    #[test]
    fn test_non_numeric_input_is_invalid() {
        let mut session = QuizSession::new(capitals(), STARTING_LIVES);
        for raw in ["paris", "", "  ", "0", "-1", "+1", "1.5"] {
            assert_eq!(
                session.answer(raw),
                Verdict::Invalid,
                "Input \"{}\" should be invalid",
                raw
            );
        }
        assert_eq!(session.lives(), STARTING_LIVES);
    }

    #[test]
    fn test_answer_comparison_is_case_insensitive() {
        let mut session = QuizSession::new(
            vec![question(
                "Pick it",
                &["PARIS", "London"],
                "paris",
                Difficulty::Easy,
            )],
            STARTING_LIVES,
        );
        assert_eq!(session.answer("1"), Verdict::Correct);
    }

    #[test]
    fn test_three_wrong_answers_exhaust_three_lives() {
        let questions = vec![
            question("Q1", &["a", "b"], "a", Difficulty::Easy),
            question("Q2", &["a", "b"], "a", Difficulty::Easy),
            question("Q3", &["a", "b"], "a", Difficulty::Easy),
        ];
        let mut session = QuizSession::new(questions, 3);

        for _ in 0..3 {
            session.answer("2");
        }
        assert!(session.out_of_lives());
    }

    #[test]
    fn test_difficulty_grouping_ignores_file_order() {
        let questions = vec![
            question("C", &["x"], "x", Difficulty::Hard),
            question("B", &["x"], "x", Difficulty::Medium),
            question("A", &["x"], "x", Difficulty::Easy),
        ];
        let session = QuizSession::new(questions, STARTING_LIVES);

        let (number, first) = session.current().unwrap();
        assert_eq!(number, 1);
        assert_eq!(first.question, "A");
    }

    #[test]
    fn test_grouping_is_stable_within_buckets() {
        let questions = vec![
            question("M1", &["x"], "x", Difficulty::Medium),
            question("E1", &["x"], "x", Difficulty::Easy),
            question("M2", &["x"], "x", Difficulty::Medium),
            question("E2", &["x"], "x", Difficulty::Easy),
        ];
        let mut session = QuizSession::new(questions, STARTING_LIVES);

        let mut order = Vec::new();
        while let Some((_, q)) = session.current() {
            order.push(q.question.clone());
            session.answer("1");
        }
        assert_eq!(order, ["E1", "E2", "M1", "M2"]);
    }

    #[test]
    fn test_restart_resets_lives_and_cursor() {
        let mut session = QuizSession::new(capitals(), 1);
        session.answer("2");
        assert!(session.out_of_lives());

        session.restart();
        assert_eq!(session.lives(), 1);
        let (number, first) = session.current().unwrap();
        assert_eq!(number, 1);
        assert_eq!(first.question, "What is the capital of France?");
    }

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        for raw in ["easy", "Easy", "EASY"] {
            assert_eq!(
                Difficulty::try_from(raw.to_string()).unwrap(),
                Difficulty::Easy
            );
        }
        assert_eq!(
            Difficulty::try_from("brutal".to_string()).unwrap_err(),
            QuizDataError::UnknownDifficulty("brutal".to_string())
        );
    }

    #[test]
    fn test_validate_rejects_answer_not_in_options() {
        let bad = question("Q", &["a", "b"], "c", Difficulty::Easy);
        assert_eq!(
            bad.validate(1).unwrap_err(),
            QuizDataError::AnswerNotAnOption {
                index: 1,
                prompt: "Q".to_string(),
                answer: "c".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_rejects_ambiguous_answer() {
        let bad = question("Q", &["a", "A"], "a", Difficulty::Easy);
        assert!(matches!(
            bad.validate(1).unwrap_err(),
            QuizDataError::AnswerAmbiguous { .. }
        ));
    }

    #[test]
    fn test_validate_rejects_empty_options() {
        let bad = question("Q", &[], "a", Difficulty::Easy);
        assert!(matches!(
            bad.validate(1).unwrap_err(),
            QuizDataError::NoOptions { .. }
        ));
    }

    #[test]
    fn test_load_questions_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{
                    "question": "What is the capital of France?",
                    "options": ["Paris", "London", "Berlin"],
                    "answer": "Paris",
                    "difficulty": "Easy"
                }}
            ]"#
        )
        .unwrap();

        let questions = load_questions(file.path()).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_load_questions_rejects_empty_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let err = load_questions(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<QuizDataError>(),
            Some(&QuizDataError::NoQuestions)
        );
    }

    #[test]
    fn test_load_questions_missing_file() {
        let err = load_questions(Path::new("/nonexistent/questions.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open question file"));
    }
}
