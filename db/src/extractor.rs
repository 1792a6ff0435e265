//! Splits every verse of a module into a scripture stream and, for study
//! Bibles, a commentary stream.

use log::{debug, info};
use serde_derive::Serialize;

use crate::markup::{convert_strong_references, normalize};
use crate::models::{CommentaryRecord, ScriptureRecord, VerseRecord};
use crate::references::{convert_bible_references, get_commentaries, get_pure_text};
use crate::source::VerseSource;
use crate::ConvertError;

/// How the verses of a module are processed. Decided once per module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// No verse carries study notes; only scripture is produced.
    Plain,
    /// Study notes are split off into a commentary.
    Study,
}

impl Mode {
    /// Probes the whole source once for footnote markup.
    pub fn detect<S: VerseSource>(source: &mut S) -> Result<Mode, ConvertError> {
        Ok(if source.is_study_bible()? {
            Mode::Study
        } else {
            Mode::Plain
        })
    }
}

/// The converted streams of one module, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    pub scripture: Vec<ScriptureRecord>,
    pub commentaries: Vec<CommentaryRecord>,
}

/// Detects the mode of `source` and converts all of its verses.
pub fn extract<S: VerseSource>(source: &mut S) -> Result<(Mode, Extraction), ConvertError> {
    let mode = Mode::detect(source)?;
    info!("Detected a {:?} Bible", mode);

    let extraction = extract_verses(mode, source.verses()?)?;
    Ok((mode, extraction))
}

/// Converts `verses` with the pipeline chosen by `mode`.
///
/// Every verse yields exactly one scripture record. In study mode a verse
/// also yields a commentary record when, and only when, its raw text opens a
/// footnote.
pub fn extract_verses<I>(mode: Mode, verses: I) -> Result<Extraction, ConvertError>
where
    I: IntoIterator<Item = VerseRecord>,
{
    let mut extraction = Extraction::default();

    for verse in verses {
        match mode {
            Mode::Plain => {
                let text = plain_scripture(&verse.text);
                extraction
                    .scripture
                    .push(ScriptureRecord::from_verse(&verse, text));
            }
            Mode::Study => {
                let text = study_scripture(&verse.text);
                extraction
                    .scripture
                    .push(ScriptureRecord::from_verse(&verse, text));

                if verse.has_footnote() {
                    let text = study_commentary(&verse.text)?;
                    extraction
                        .commentaries
                        .push(CommentaryRecord::for_verse(&verse, text));
                }
            }
        }
    }

    debug!(
        "Extracted {} verses and {} commentaries",
        extraction.scripture.len(),
        extraction.commentaries.len()
    );
    Ok(extraction)
}

/// Scripture of a plain Bible. Footnotes are still stripped in case a stray
/// one slipped through.
pub fn plain_scripture(raw: &str) -> String {
    normalize(&get_pure_text(raw))
}

/// Scripture of a study Bible, with its notes removed.
///
/// The notes go first so that [normalize] ends with centering removal and
/// empty-tag pruning over what is left.
pub fn study_scripture(raw: &str) -> String {
    normalize(&get_pure_text(raw))
}

/// The notes of a study Bible verse, with their links rewritten.
pub fn study_commentary(raw: &str) -> Result<String, ConvertError> {
    let text = get_commentaries(raw);
    let text = convert_strong_references(&text);
    convert_bible_references(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceDetails;

    /// In-memory stand-in for a MySword database.
    struct TestSource {
        verses: Vec<VerseRecord>,
        probes: usize,
    }

    impl TestSource {
        fn new(verses: Vec<VerseRecord>) -> Self {
            TestSource { verses, probes: 0 }
        }
    }

    impl VerseSource for TestSource {
        fn is_study_bible(&mut self) -> Result<bool, ConvertError> {
            self.probes += 1;
            Ok(self.verses.iter().any(VerseRecord::has_footnote))
        }

        fn verses(&mut self) -> Result<Vec<VerseRecord>, ConvertError> {
            Ok(self.verses.clone())
        }

        fn details(&mut self) -> Result<SourceDetails, ConvertError> {
            Ok(SourceDetails::default())
        }
    }

    #[test]
    fn plain_bible() {
        let raw = "<TS>Genesis<Ts><CM>No princípio <FI>criou<Fi> Deus os <W H8064>céus<Rf>.";
        let mut source = TestSource::new(vec![
            VerseRecord::new(1, 1, 1, raw),
            VerseRecord::new(1, 1, 2, "E a terra<CL>"),
            VerseRecord::new(1, 1, 3, "Haja luz"),
        ]);

        let (mode, extraction) = extract(&mut source).unwrap();

        assert_eq!(mode, Mode::Plain);
        assert_eq!(source.probes, 1);
        assert!(extraction.commentaries.is_empty());
        assert_eq!(
            extraction.scripture,
            vec![
                ScriptureRecord {
                    book: 1,
                    chapter: 1,
                    verse: 1,
                    text: r##"<h1>Genesis</h1><p>No princípio <font color="#gray"><i>criou</i></font> Deus os <num>H8064</num>céus<Rf>."##.to_string(),
                },
                ScriptureRecord {
                    book: 1,
                    chapter: 1,
                    verse: 2,
                    text: "E a terra<br>".to_string(),
                },
                ScriptureRecord {
                    book: 1,
                    chapter: 1,
                    verse: 3,
                    text: "Haja luz".to_string(),
                },
            ]
        );
    }

    #[test]
    fn study_bible() {
        let mut source = TestSource::new(vec![
            VerseRecord::new(1, 1, 1, "In the beginning<RF 1>See note<Rf> God created"),
            VerseRecord::new(1, 1, 2, "And the earth"),
            VerseRecord::new(
                1,
                2,
                4,
                "These<RF>first<Rf> are<RF q=b>second<Rf> the generations<RF>third<Rf>",
            ),
        ]);

        let (mode, extraction) = extract(&mut source).unwrap();

        assert_eq!(mode, Mode::Study);
        assert_eq!(
            extraction
                .scripture
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>(),
            vec![
                "In the beginning God created",
                "And the earth",
                "These are the generations"
            ]
        );
        assert_eq!(
            extraction.commentaries,
            vec![
                CommentaryRecord {
                    book: 1,
                    chapter_begin: 1,
                    verse_begin: 1,
                    chapter_end: 1,
                    verse_end: 1,
                    text: "See note".to_string(),
                },
                CommentaryRecord {
                    book: 1,
                    chapter_begin: 2,
                    verse_begin: 4,
                    chapter_end: 2,
                    verse_end: 4,
                    text: "first<p><hr><p>second<p><hr><p>third".to_string(),
                },
            ]
        );
    }

    #[test]
    fn commentary_iff_footnote() {
        let verses = vec![
            VerseRecord::new(1, 1, 1, "a<RF>x<Rf>"),
            VerseRecord::new(1, 1, 2, "b"),
            VerseRecord::new(1, 1, 3, "c<Rf>"),
            VerseRecord::new(1, 1, 4, "d<RF>unclosed"),
            VerseRecord::new(1, 1, 5, "e<rf>lower<Rf>"),
        ];

        let extraction = extract_verses(Mode::Study, verses.clone()).unwrap();

        assert_eq!(extraction.scripture.len(), verses.len());
        let with_notes: Vec<_> = extraction
            .commentaries
            .iter()
            .map(|c| c.verse_begin)
            .collect();
        assert_eq!(with_notes, vec![1, 4]);
        // An unclosed note still counts, with nothing to extract.
        assert_eq!(extraction.commentaries[1].text, "");
    }

    #[test]
    fn plain_mode_preserves_count_and_order() {
        let verses: Vec<_> = (1..=50)
            .map(|v| VerseRecord::new(19, 119, v, &format!("<CM>verse {}", v)))
            .collect();

        let extraction = extract_verses(Mode::Plain, verses.clone()).unwrap();

        assert_eq!(extraction.scripture.len(), verses.len());
        extraction
            .scripture
            .iter()
            .zip(verses.iter())
            .for_each(|(converted, raw)| {
                assert_eq!(
                    (converted.book, converted.chapter, converted.verse),
                    (raw.book, raw.chapter, raw.verse)
                );
                assert_eq!(converted.text, format!("<p>verse {}", raw.verse));
            });
    }

    #[test]
    fn plain_mode_strips_stray_notes() {
        let extraction =
            extract_verses(Mode::Plain, vec![VerseRecord::new(1, 1, 1, "a<RF>b<Rf>c")]).unwrap();

        assert_eq!(extraction.scripture[0].text, "ac");
        assert!(extraction.commentaries.is_empty());
    }

    #[test]
    fn study_commentary_links() {
        assert_eq!(
            study_commentary(
                r##"text<RF>Cf. <a class="bible" href="#b43.3.16">Jo 3:16</a> e G26<Rf>"##
            )
            .unwrap(),
            "Cf. <ref>Jo 3.16</ref> e <num>G26</num>"
        );
    }

    #[test]
    fn unknown_book_aborts() {
        let result = extract_verses(
            Mode::Study,
            vec![
                VerseRecord::new(1, 1, 1, "ok"),
                VerseRecord::new(1, 1, 2, r#"x<RF><a href="b99.1.1">?</a><Rf>"#),
            ],
        );

        assert_eq!(
            result,
            Err(ConvertError::UnknownBookId {
                book_id: "99".to_string()
            })
        );
    }

    #[test]
    fn study_scripture_centered() {
        assert_eq!(
            study_scripture("<p align=center><TS2>Salmo<Ts></p>Bendize<RF>nota<Rf>"),
            "<h2>Salmo</h2></p>Bendize"
        );
        assert_eq!(
            study_scripture("<p align='center'><TS><RF>nota<Rf><Ts>Bendize"),
            "Bendize"
        );
    }
}
