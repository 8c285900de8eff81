pub mod charset;
pub mod composer;
pub mod quiz;
pub mod ui;

pub use charset::{CharacterClass, Selection};
pub use composer::{ComposeError, PasswordRequest, compose, minimum_length};
pub use quiz::{Question, QuizDataError, QuizSession, Verdict, load_questions};
