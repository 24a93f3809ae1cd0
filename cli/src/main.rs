//! Herbwise CLI - interactive wizard runner and token checker.
//!
//! ```text
//! herbwise [wizard] [--config <path>]   run the questionnaire interactively
//! herbwise check-token <token>          decode a session token and report validity
//! ```
//!
//! The wizard walks category -> sub-goal -> personal questions -> report,
//! printing the final report as pretty JSON. Logging goes to stderr and is
//! controlled by `RUST_LOG` (default `warn`), so the interactive surface
//! stays clean.

use std::io::{BufRead, Write, stdin, stdout};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use herbwise_config::{QuestionConfig, QuestionKind};
use herbwise_engine::{Wizard, WizardStep};
use herbwise_session::{decode_claims, is_valid};

const USAGE: &str = "usage: herbwise [wizard] [--config <path>] | herbwise check-token <token>";

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

enum Command {
    Wizard { config: Option<PathBuf> },
    CheckToken { token: String },
}

fn parse_args() -> Result<Command> {
    let mut args = std::env::args().skip(1);
    let mut config = None;
    let mut check_token = None;
    let mut saw_wizard = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                config = Some(PathBuf::from(path));
            }
            "wizard" => saw_wizard = true,
            "check-token" => {
                let token = args.next().context("check-token requires a token")?;
                check_token = Some(token);
            }
            unknown => bail!("unknown argument {unknown:?}\n{USAGE}"),
        }
    }

    match check_token {
        Some(_) if saw_wizard || config.is_some() => {
            bail!("check-token takes no other arguments\n{USAGE}")
        }
        Some(token) => Ok(Command::CheckToken { token }),
        None => Ok(Command::Wizard { config }),
    }
}

fn main() -> Result<()> {
    init_tracing();
    match parse_args()? {
        Command::CheckToken { token } => {
            run_check_token(&token);
            Ok(())
        }
        Command::Wizard { config } => {
            let config = match config {
                Some(path) => QuestionConfig::load_from(&path)?,
                None => QuestionConfig::load()?,
            };
            tracing::debug!(
                categories = config.categories().len(),
                questions = config.questions().len(),
                "question tables loaded"
            );
            run_wizard(config)
        }
    }
}

fn run_check_token(token: &str) {
    match decode_claims(token) {
        Ok(claims) => {
            let valid = is_valid(Some(token));
            println!("token is {}", if valid { "valid" } else { "expired" });
            match chrono::DateTime::from_timestamp(claims.exp, 0) {
                Some(expires) => println!("  expires: {expires}"),
                None => println!("  exp: {} (out of range)", claims.exp),
            }
            let user = claims.user();
            if let Some(id) = user.id {
                println!("  id: {id}");
            }
            if let Some(email) = user.email {
                println!("  email: {email}");
            }
            if let Some(name) = user.name {
                println!("  name: {name}");
            }
        }
        Err(error) => println!("token is invalid: {error}"),
    }
}

/// Owned snapshot of the current step, so the prompt loop can mutate the
/// wizard after rendering.
enum Screen {
    Category { options: Vec<(String, String)> },
    SubGoal { label: String, goals: Vec<String> },
    Question {
        label: String,
        kind: QuestionKind,
        options: Vec<String>,
    },
    Confirm,
    Done { pretty: String },
}

fn snapshot(wizard: &Wizard) -> Result<Screen> {
    Ok(match wizard.current_step() {
        WizardStep::Category { options } => Screen::Category {
            options: options
                .iter()
                .map(|c| (c.id.clone(), c.label.clone()))
                .collect(),
        },
        WizardStep::SubGoal { category } => Screen::SubGoal {
            label: category.label.clone(),
            goals: category.sub_goals.clone(),
        },
        WizardStep::Question { question, .. } => Screen::Question {
            label: question.label.clone(),
            kind: question.kind,
            options: question.options.clone(),
        },
        WizardStep::Confirm => Screen::Confirm,
        WizardStep::Done { report } => Screen::Done {
            pretty: serde_json::to_string_pretty(report)?,
        },
    })
}

/// Read one trimmed line, or `None` at end of input.
fn read_line() -> Option<String> {
    let mut line = String::new();
    let read = stdin().lock().read_line(&mut line).ok()?;
    if read == 0 {
        return None;
    }
    Some(line.trim().to_owned())
}

fn prompt(text: &str) -> Option<String> {
    print!("{text} ");
    let _ = stdout().flush();
    read_line()
}

/// Resolve a menu reply to an entry: a 1-based number or an exact label.
fn pick<'a>(reply: &str, entries: &'a [String]) -> Option<&'a str> {
    if let Ok(n) = reply.parse::<usize>() {
        return entries.get(n.checked_sub(1)?).map(String::as_str);
    }
    entries
        .iter()
        .map(String::as_str)
        .find(|entry| entry.eq_ignore_ascii_case(reply))
}

fn run_wizard(config: QuestionConfig) -> Result<()> {
    let mut wizard = Wizard::new(Arc::new(config));
    println!("Herbwise questionnaire ('b' steps back, Ctrl-D quits)\n");

    loop {
        let (current, total) = wizard.position();
        match snapshot(&wizard)? {
            Screen::Category { options } => {
                println!("What do you want to improve?");
                for (i, (_, label)) in options.iter().enumerate() {
                    println!("  {}. {label}", i + 1);
                }
                let Some(reply) = prompt(">") else { break };
                let choice = reply
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .filter(|&i| i < options.len())
                    .or_else(|| {
                        options.iter().position(|(id, label)| {
                            id.eq_ignore_ascii_case(&reply) || label.eq_ignore_ascii_case(&reply)
                        })
                    });
                if let Some(index) = choice {
                    wizard.select_category(&options[index].0)?;
                } else {
                    println!("pick a listed category\n");
                }
            }
            Screen::SubGoal { label, goals } => {
                println!("\n{label} - what is your goal? ({current}/{total})");
                for (i, goal) in goals.iter().enumerate() {
                    println!("  {}. {goal}", i + 1);
                }
                let Some(reply) = prompt(">") else { break };
                if reply == "b" {
                    wizard.back();
                } else if let Some(goal) = pick(&reply, &goals) {
                    wizard.select_sub_goal(goal)?;
                } else {
                    println!("pick a listed goal");
                }
            }
            Screen::Question {
                label,
                kind,
                options,
            } => {
                println!("\n{label} ({current}/{total})");
                match kind {
                    QuestionKind::Options => {
                        for (i, option) in options.iter().enumerate() {
                            println!("  {}. {option}", i + 1);
                        }
                        println!("  (or type your own answer)");
                        let Some(reply) = prompt(">") else { break };
                        if reply == "b" {
                            wizard.back();
                        } else if let Some(option) = pick(&reply, &options) {
                            wizard.select_option(option)?;
                        } else if !wizard.submit_custom(&reply)? {
                            println!("type an answer or pick an option");
                        }
                    }
                    QuestionKind::Input => {
                        let Some(reply) = prompt(">") else { break };
                        if reply == "b" {
                            wizard.back();
                        } else {
                            wizard.set_answer(&reply)?;
                            wizard.next();
                        }
                    }
                }
            }
            Screen::Confirm => {
                let Some(reply) = prompt("\nGenerate report? [y/b]") else {
                    break;
                };
                if reply == "b" {
                    wizard.back();
                } else if reply.eq_ignore_ascii_case("y") {
                    wizard.generate_report()?;
                }
            }
            Screen::Done { pretty } => {
                println!("\nYour report:");
                println!("{pretty}");
                let Some(reply) = prompt("\nStart over? [y/N]") else {
                    break;
                };
                if reply.eq_ignore_ascii_case("y") {
                    wizard.restart();
                    println!();
                } else {
                    break;
                }
            }
        }
    }
    Ok(())
}
