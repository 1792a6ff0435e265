//! End-to-end conversion of one MySword Bible file.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_derive::Serialize;

use crate::extractor::{extract, Extraction, Mode};
use crate::models::{BibleDetails, CommentaryDetails, SourceDetails};
use crate::source::{MySwordBible, VerseSource};
use crate::{establish_connection, target, ConvertError};

/// Extension of e-Sword HD Bible modules.
pub const BIBLE_EXTENSION: &str = "bbli";

/// Extension of e-Sword HD commentary modules.
pub const COMMENTARY_EXTENSION: &str = "cmti";

/// Where the modules of one run are written.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputPlan {
    pub bible: PathBuf,
    pub commentary: PathBuf,
}

/// Summary of a finished conversion.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub mode: Mode,
    pub output_directory: PathBuf,
    pub bible: PathBuf,
    pub commentary: Option<PathBuf>,
    pub verses: usize,
    pub commentaries: usize,
}

/// Name of the module: the file name up to its first period, so that
/// `kjv.bbl.mybible` becomes `kjv`.
pub fn module_stem(input: &Path) -> Result<String, ConvertError> {
    let invalid = || ConvertError::InvalidFileName {
        path: input.display().to_string(),
    };

    let file_name = input.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
    match file_name.split('.').next() {
        Some(stem) if !stem.is_empty() => Ok(stem.to_owned()),
        _ => Err(invalid()),
    }
}

/// Creates a fresh output directory and returns it.
///
/// When `root` already exists, the siblings `root2`, `root3`, ... are tried
/// in turn so a previous run is never overwritten.
pub fn reserve_output_directory(root: &Path) -> Result<PathBuf, ConvertError> {
    let mut directory = root.to_path_buf();

    if directory.exists() {
        // `file_name` and `parent` ignore a trailing separator.
        let name = root.file_name().ok_or_else(|| ConvertError::InvalidFileName {
            path: root.display().to_string(),
        })?;
        let parent = root.parent().unwrap_or_else(|| Path::new(""));
        let mut suffix = 2;

        while directory.exists() {
            let mut numbered = name.to_owned();
            numbered.push(suffix.to_string());
            directory = parent.join(numbered);
            suffix += 1;
        }
    }

    fs::create_dir_all(&directory)?;
    Ok(directory)
}

/// File names of both modules of `stem` inside `directory`.
pub fn plan_outputs(directory: &Path, stem: &str) -> OutputPlan {
    OutputPlan {
        bible: directory.join(format!("{}.{}", stem, BIBLE_EXTENSION)),
        commentary: directory.join(format!("{}.{}", stem, COMMENTARY_EXTENSION)),
    }
}

/// Converts the MySword Bible at `input` into e-Sword modules under a new
/// directory derived from `output_root`.
///
/// The whole source is converted in memory before anything is written. If
/// writing fails, the new output directory is removed again.
pub fn convert(input: &Path, output_root: &Path) -> Result<Report, ConvertError> {
    if !input.is_file() {
        return Err(ConvertError::InputNotFound {
            path: input.display().to_string(),
        });
    }
    let stem = module_stem(input)?;

    info!("Reading {}", input.display());
    let mut source = MySwordBible::open(&path_str(input)?)?;
    let (mode, extraction) = extract(&mut source)?;
    let details = source.details()?;

    let directory = reserve_output_directory(output_root)?;
    let plan = plan_outputs(&directory, &stem);

    let written = write_modules(&plan, mode, &details, &extraction);
    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_dir_all(&directory) {
            warn!("Could not remove {}: {}", directory.display(), cleanup);
        }
        return Err(e);
    }

    info!("Converted files are in {}", directory.display());
    Ok(Report {
        mode,
        output_directory: directory,
        bible: plan.bible,
        commentary: match mode {
            Mode::Study => Some(plan.commentary),
            Mode::Plain => None,
        },
        verses: extraction.scripture.len(),
        commentaries: extraction.commentaries.len(),
    })
}

fn write_modules(
    plan: &OutputPlan,
    mode: Mode,
    details: &SourceDetails,
    extraction: &Extraction,
) -> Result<(), ConvertError> {
    info!("Writing {}", plan.bible.display());
    let mut conn = establish_connection(&path_str(&plan.bible)?)?;
    target::write_bible(&mut conn, &BibleDetails::from(details), &extraction.scripture)?;

    if mode == Mode::Study {
        info!("Writing {}", plan.commentary.display());
        let mut conn = establish_connection(&path_str(&plan.commentary)?)?;
        target::write_commentary(
            &mut conn,
            &CommentaryDetails::from(details),
            &extraction.commentaries,
        )?;
    }

    Ok(())
}

fn path_str(path: &Path) -> Result<String, ConvertError> {
    path.to_str()
        .map(str::to_owned)
        .ok_or_else(|| ConvertError::InvalidFileName {
            path: path.display().to_string(),
        })
}
