//! Command parsing and handlers
//!
//! One-shot subcommand groups: `database` for bootstrap and teardown,
//! `verb` for the fetch pipeline, `sentence` for generation, validation and
//! correction. Results print as human-readable summaries with conjugation
//! tables.

use crate::config::Settings;
use crate::db::{store, Database};
use crate::error::{Result, VerbForgeError};
use crate::grammar::{Person, Tense};
use crate::llm::{ChatProvider, OpenAiProvider};
use crate::sentences::{SentenceGenerator, SentenceSpec};
use crate::verbs::{BatchReport, FetchedVerb, VerbFetcher};
use comfy_table::Table;
use std::sync::Arc;

/// Parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Remove all user data and history
    DatabaseClean,
    /// Fetch and store the default verb set
    DatabaseInit { auxiliaries_only: bool },
    /// Fetch a verb from the model and store it
    VerbDownload { infinitive: String },
    /// Read a verb from the database, fetching on a miss
    VerbGet { infinitive: String },
    /// Show a random stored verb
    VerbRandom,
    /// Generate and store an example sentence
    SentenceNew {
        infinitive: String,
        tense: Tense,
        incorrect: bool,
    },
    /// Ask whether a sentence is grammatically correct
    SentenceCheck { content: String },
    /// Ask for a corrected version of a sentence
    SentenceCorrect { content: String },
    /// Show usage
    Help,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Raise the log filter to debug
    pub debug: bool,
    /// The command to run
    pub command: Command,
}

impl CliArgs {
    /// Parse a command line (without the program name).
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut debug = false;
        let mut rest: Vec<String> = Vec::new();

        for arg in args {
            match arg.as_str() {
                "--debug" => debug = true,
                "--no-debug" => debug = false,
                _ => rest.push(arg),
            }
        }

        let command = Command::parse(&rest)?;
        Ok(Self { debug, command })
    }
}

fn syntax_error(command: &str, expected: &str) -> VerbForgeError {
    VerbForgeError::InvalidCommandSyntax {
        command: command.to_string(),
        expected: expected.to_string(),
    }
}

impl Command {
    /// Parse a command from its arguments.
    pub fn parse(args: &[String]) -> Result<Self> {
        let Some(group) = args.first() else {
            return Ok(Command::Help);
        };

        match group.as_str() {
            "help" | "--help" | "-h" => Ok(Command::Help),
            "database" => match args.get(1).map(String::as_str) {
                Some("clean") => Ok(Command::DatabaseClean),
                Some("init") => Ok(Command::DatabaseInit {
                    auxiliaries_only: args[2..].iter().any(|a| a == "--auxiliaries-only"),
                }),
                _ => Err(syntax_error("database", "database <clean|init>")),
            },
            "verb" => match args.get(1).map(String::as_str) {
                Some("download") => match args.get(2) {
                    Some(infinitive) => Ok(Command::VerbDownload {
                        infinitive: infinitive.clone(),
                    }),
                    None => Err(syntax_error("verb download", "verb download <infinitive>")),
                },
                Some("get") => match args.get(2) {
                    Some(infinitive) => Ok(Command::VerbGet {
                        infinitive: infinitive.clone(),
                    }),
                    None => Err(syntax_error("verb get", "verb get <infinitive>")),
                },
                Some("random") => Ok(Command::VerbRandom),
                _ => Err(syntax_error("verb", "verb <download|get|random>")),
            },
            "sentence" => match args.get(1).map(String::as_str) {
                Some("new") => Self::parse_sentence_new(&args[2..]),
                Some("check") => Self::parse_sentence_text(&args[2..], "check"),
                Some("correct") => Self::parse_sentence_text(&args[2..], "correct"),
                _ => Err(syntax_error("sentence", "sentence <new|check|correct>")),
            },
            other => Err(VerbForgeError::UnknownCommand(other.to_string())),
        }
    }

    fn parse_sentence_new(args: &[String]) -> Result<Self> {
        let expected = "sentence new <infinitive> [--tense <tense>] [--incorrect]";

        let Some(infinitive) = args.first().filter(|a| !a.starts_with("--")) else {
            return Err(syntax_error("sentence new", expected));
        };

        let mut tense = Tense::Present;
        let mut incorrect = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--incorrect" => {
                    incorrect = true;
                    i += 1;
                }
                "--tense" => {
                    let Some(value) = args.get(i + 1) else {
                        return Err(syntax_error("sentence new", expected));
                    };
                    tense = value.parse()?;
                    i += 2;
                }
                _ => return Err(syntax_error("sentence new", expected)),
            }
        }

        Ok(Command::SentenceNew {
            infinitive: infinitive.clone(),
            tense,
            incorrect,
        })
    }

    fn parse_sentence_text(args: &[String], subcommand: &str) -> Result<Self> {
        if args.is_empty() {
            return Err(syntax_error(
                &format!("sentence {}", subcommand),
                &format!("sentence {} <sentence text>", subcommand),
            ));
        }

        let content = args.join(" ");
        Ok(match subcommand {
            "check" => Command::SentenceCheck { content },
            _ => Command::SentenceCorrect { content },
        })
    }
}

/// Run a parsed command against the configured database and provider.
pub async fn run(args: CliArgs, settings: Settings) -> Result<()> {
    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }

    let db = Database::connect(&settings.database_url).await?;
    db.ensure_schema().await?;

    let provider: Arc<dyn ChatProvider> = Arc::new(OpenAiProvider::new(
        settings.api_key.clone(),
        Some(settings.model.clone()),
    )?);

    match args.command {
        Command::DatabaseClean => {
            println!("Cleaning the database of any user data and history.");
            db.clear().await?;
            println!("Done.");
        }
        Command::DatabaseInit { auxiliaries_only } => {
            println!("Initializing the database to default settings and content.");
            let fetcher = VerbFetcher::new(provider, db, settings.fetch_concurrency);
            let report = fetcher.init_defaults(!auxiliaries_only).await;
            print_batch_report(&report);
        }
        Command::VerbDownload { infinitive } => {
            println!("Downloading verb {}.", infinitive);
            let fetcher = VerbFetcher::new(provider, db, settings.fetch_concurrency);
            let fetched = fetcher.fetch_verb(&infinitive).await?;
            print_verb(&fetched);
        }
        Command::VerbGet { infinitive } => {
            println!("Fetching verb {}.", infinitive);
            let fetcher = VerbFetcher::new(provider, db, settings.fetch_concurrency);
            let fetched = fetcher.get_verb(&infinitive).await?;
            print_verb(&fetched);
        }
        Command::VerbRandom => {
            let fetcher = VerbFetcher::new(provider, db, settings.fetch_concurrency);
            let fetched = fetcher.random_verb().await?;
            println!("Selected verb {}", fetched.verb.infinitive);
            print_verb(&fetched);
        }
        Command::SentenceNew {
            infinitive,
            tense,
            incorrect,
        } => {
            let verb = store::find_verb(db.pool(), &infinitive).await?.ok_or_else(|| {
                VerbForgeError::NotFound(format!(
                    "verb {} is not in the database; run `verb download {}` first",
                    infinitive, infinitive
                ))
            })?;

            let mut spec = SentenceSpec::new(&verb.infinitive, &verb.auxiliary);
            spec.tense = tense;
            spec.is_correct = !incorrect;

            let generator = SentenceGenerator::new(provider, db);
            let sentence = generator.generate(&spec).await?;

            println!("{}", sentence.content);
            if !sentence.translation.is_empty() {
                println!("{}", sentence.translation);
            }
            println!(
                "negation: {}, direct object: {}, indirect pronoun: {}, correct: {}",
                sentence.negation, sentence.direct_object, sentence.indirect_pronoun,
                sentence.is_correct
            );
        }
        Command::SentenceCheck { content } => {
            let generator = SentenceGenerator::new(provider, db);
            let correct = generator.check(&content).await?;
            println!(
                "\"{}\" is {}.",
                content,
                if correct { "correct" } else { "incorrect" }
            );
        }
        Command::SentenceCorrect { content } => {
            let generator = SentenceGenerator::new(provider, db);
            let correction = generator.correct(&content).await?;
            println!("{}", correction.sentence);
            if !correction.translation.is_empty() {
                println!("{}", correction.translation);
            }
        }
        Command::Help => unreachable!("handled above"),
    }

    Ok(())
}

/// Print a verb summary and its conjugation table.
fn print_verb(fetched: &FetchedVerb) {
    println!(
        "{} (auxiliary: {}, reflexivity: {})",
        fetched.verb.infinitive, fetched.verb.auxiliary, fetched.verb.reflexivity
    );

    if fetched.conjugations.is_empty() {
        println!("No conjugations stored.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "tense",
        "je",
        "tu",
        "il/elle/on",
        "nous",
        "vous",
        "ils/elles",
    ]);

    for conjugation in &fetched.conjugations {
        let mut row = vec![conjugation.tense.clone()];
        for person in Person::ALL {
            row.push(conjugation.form(person).unwrap_or("-").to_string());
        }
        table.add_row(row);
    }

    println!("{table}");
}

fn print_batch_report(report: &BatchReport) {
    println!(
        "Fetched {} verb(s): {}",
        report.succeeded.len(),
        report.succeeded.join(", ")
    );

    if !report.failed.is_empty() {
        println!("{} verb(s) failed:", report.failed.len());
        for (verb, error) in &report.failed {
            println!("  {}: {}", verb, error);
        }
    }
}

fn print_usage() {
    println!("verb-forge v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: verb-forge [--debug] <command>");
    println!();
    println!("Commands:");
    println!("  database clean                   remove all stored data");
    println!("  database init [--auxiliaries-only]");
    println!("                                   fetch the default verb set");
    println!("  verb download <infinitive>       fetch a verb from the model");
    println!("  verb get <infinitive>            read a verb, fetching on a miss");
    println!("  verb random                      show a random stored verb");
    println!("  sentence new <infinitive> [--tense <tense>] [--incorrect]");
    println!("                                   generate an example sentence");
    println!("  sentence check <text>            grammaticality check");
    println!("  sentence correct <text>          correct a sentence");
    println!("  help                             show this message");
}
