mod charset;
mod composer;
mod quiz;
mod ui;

use anyhow::{Context, Result};
use charset::Selection;
use clap::{Parser, Subcommand};
use composer::PasswordRequest;
use quiz::QuizSession;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "parlor",
    version,
    author,
    about = "Terminal password composer and trivia quiz"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose one random password from the selected character classes
    Password {
        /// Desired password length
        length: String,

        /// Include digits (0-9)
        #[arg(long)]
        digits: bool,

        /// Include ASCII punctuation
        #[arg(long)]
        symbols: bool,

        /// Include uppercase letters
        #[arg(long)]
        uppercase: bool,

        /// Include lowercase letters
        #[arg(long)]
        lowercase: bool,

        /// Copy the password to the system clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Run a trivia session over a question file
    Quiz {
        /// JSON file with the questions
        #[arg(short, long, default_value = "questions.json")]
        file: PathBuf,

        /// Allowed mistakes before the game ends
        #[arg(short, long, default_value_t = quiz::STARTING_LIVES)]
        lives: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = ui::DisplayOptions::detect();

    match cli.command {
        Command::Password {
            length,
            digits,
            symbols,
            uppercase,
            lowercase,
            copy,
        } => {
            // No flag at all means the default trio.
            let selection = if digits || symbols || uppercase || lowercase {
                Selection {
                    digits,
                    symbols,
                    uppercase,
                    lowercase,
                }
            } else {
                Selection::default()
            };

            let request = PasswordRequest::parse(&length, selection)?;
            let password = composer::compose(&request, &mut rand::thread_rng());

            if copy {
                arboard::Clipboard::new()
                    .and_then(|mut clipboard| clipboard.set_text(password.to_string()))
                    .context("Failed to copy password to clipboard")?;
            }

            ui::display_password(&password, &request, copy, &options);
        }

        Command::Quiz { file, lives } => {
            if lives == 0 {
                anyhow::bail!("At least one life is required");
            }

            let questions = quiz::load_questions(&file)?;
            let mut session = QuizSession::new(questions, lives);
            ui::run_quiz(&mut session, &options)?;
        }
    }

    Ok(())
}
