use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use log::error;

use db::{convert, ConvertError, Mode, Report};

/// Converts MySword Bibles into e-Sword HD modules.
///
/// Study Bibles are split in two: the scripture goes to a `.bbli` Bible and
/// the study notes go to a `.cmti` commentary.
#[derive(Parser)]
#[command(name = "mysword2esword", version, author)]
struct Args {
    /// Path to the MySword Bible (`.bbl.mybible`)
    input: PathBuf,

    /// Directory for the converted modules. A numeric suffix is added when it
    /// already exists.
    #[arg(short, long, env = "OUTPUT_DIR", default_value = "./output")]
    output_dir: PathBuf,

    /// Print a JSON summary instead of a sentence
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    dotenv().ok();

    // Set up logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match convert(&args.input, &args.output_dir) {
        Ok(report) => {
            if args.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Could not serialize the report: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_summary(&report);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            // Shown even when RUST_LOG silences the logger
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn print_summary(report: &Report) {
    match report.mode {
        Mode::Plain => println!(
            "Not a study Bible: converted {} verses.",
            report.verses
        ),
        Mode::Study => println!(
            "Study Bible: converted {} verses and {} verse commentaries.",
            report.verses, report.commentaries
        ),
    }
    println!(
        "The converted files are in {}",
        report.output_directory.display()
    );
}

fn failure_message(e: &ConvertError) -> String {
    format!("Conversion failed: {}", e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages_name_the_condition() {
        vec![
            (
                ConvertError::InputNotFound {
                    path: "kjv.bbl.mybible".to_string(),
                },
                "Conversion failed: The file 'kjv.bbl.mybible' was not found.",
            ),
            (
                ConvertError::UnknownBookId {
                    book_id: "99".to_string(),
                },
                "Conversion failed: Book number '99' has no known abbreviation.",
            ),
        ]
        .iter()
        .for_each(|(e, expected)| assert_eq!(failure_message(e), *expected));
    }
}
