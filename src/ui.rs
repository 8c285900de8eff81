use crate::composer::PasswordRequest;
use crate::quiz::{QuizSession, Verdict};
use anyhow::Result;
use console::Style;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use zeroize::Zeroizing;

pub const MIN_SAFE_ENTROPY: f64 = 80.0;

/// Pause between scoring feedback and the next prompt.
const FEEDBACK_DELAY: Duration = Duration::from_secs(1);

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
}

impl DisplayOptions {
    pub fn detect() -> Self {
        Self {
            unicode_support: supports_unicode::on(supports_unicode::Stream::Stdout),
            color_support: supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }

    fn style(&self, style: Style) -> Style {
        if self.color_support { style } else { Style::new() }
    }
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str, &'static str) {
    if unicode_support { ("✓", "✗", "!") } else { ("+", "x", "!") }
}

fn prompt_line(prompt: &str) -> Result<String> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

fn read_line_from<R: BufRead>(reader: &mut R, prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        anyhow::bail!("Input stream closed");
    }
    Ok(input)
}

/// Bits of entropy for a uniformly drawn password: length times the
/// log2 of the pool size.
pub fn entropy_bits(length: usize, pool_size: usize) -> f64 {
    length as f64 * (pool_size as f64).log2()
}

/// Drives a quiz session over the console until the questions run out
/// or the player runs out of lives and declines a restart.
pub fn run_quiz(session: &mut QuizSession, options: &DisplayOptions) -> Result<()> {
    let (check_ok, check_wrong, _) = get_status_symbols(options.unicode_support);
    let ok_style = options.style(Style::new().green());
    let wrong_style = options.style(Style::new().red());
    let warn_style = options.style(Style::new().yellow());

    loop {
        let Some((number, question)) = session.current() else {
            break;
        };

        println!("\nQuestion {}: {}", number, question.question);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }
        let option_count = question.options.len();

        let raw = prompt_line("Enter your answer: ")?;
        match session.answer(&raw) {
            Verdict::Invalid => {
                println!(
                    "{}",
                    warn_style.apply_to(format!("Enter a valid answer (1-{}).", option_count))
                );
                thread::sleep(FEEDBACK_DELAY);
            }
            Verdict::Correct => {
                println!("{}", ok_style.apply_to(format!("{} Correct!", check_ok)));
                thread::sleep(FEEDBACK_DELAY);
            }
            Verdict::Incorrect {
                correct,
                lives_left,
            } => {
                println!(
                    "{}",
                    wrong_style.apply_to(format!(
                        "{} Wrong! The correct answer is {}.",
                        check_wrong, correct
                    ))
                );
                thread::sleep(FEEDBACK_DELAY);

                if lives_left == 0 {
                    println!("{}", wrong_style.apply_to("You lost!"));
                    if prompt_restart()? {
                        session.restart();
                        continue;
                    }
                    println!("Thanks for playing!");
                    return Ok(());
                }

                println!(
                    "{}",
                    warn_style.apply_to(format!(
                        "You have {} {} left.",
                        lives_left,
                        if lives_left == 1 { "life" } else { "lives" }
                    ))
                );
            }
        }
    }

    let lives = session.lives();
    println!(
        "\nThat's every question. You finished with {} {} left. Thanks for playing!",
        lives,
        if lives == 1 { "life" } else { "lives" }
    );
    Ok(())
}

/// Asks the y/n restart question until a recognized response arrives.
fn prompt_restart() -> Result<bool> {
    loop {
        let response = prompt_line("Do you want to play again? (y/n): ")?;
        match response.trim().to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => {
                println!("Invalid input, try again:");
                thread::sleep(FEEDBACK_DELAY);
            }
        }
    }
}

/// Prints the composed password along with a short settings report.
pub fn display_password(
    password: &Zeroizing<String>,
    request: &PasswordRequest,
    copied: bool,
    options: &DisplayOptions,
) {
    let (check_ok, _, check_warn) = get_status_symbols(options.unicode_support);

    println!("{}\n", &**password);

    let selection = request.selection();
    let pool_size = selection.pool().len();
    let entropy = entropy_bits(request.length(), pool_size);
    let strong = entropy >= MIN_SAFE_ENTROPY;

    let entropy_style = options.style(if strong {
        Style::new().green()
    } else {
        Style::new().yellow()
    });
    let entropy_status = if strong { check_ok } else { check_warn };

    let classes = selection
        .classes()
        .map(|class| class.label())
        .collect::<Vec<_>>()
        .join(", ");

    println!("Settings:");
    println!("  ├─ Classes    {}", classes);
    println!("  ├─ Pool       {} chars", pool_size);
    println!(
        "  ├─ Length     {} {}",
        request.length(),
        if request.length() == 1 { "char" } else { "chars" }
    );
    println!(
        "  └─ Entropy    {} {} bits ({})",
        entropy_style.apply_to(format!("[{}]", entropy_status)),
        entropy_style.apply_to(format!("{:.1}", entropy)),
        entropy_style.apply_to(if strong { "Strong" } else { "Weak" })
    );

    if copied {
        println!("\n{} Password copied to clipboard.", check_ok);
    }
}
