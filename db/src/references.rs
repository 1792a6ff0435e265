//! Footnote splitting and cross-reference rewriting.
//!
//! MySword embeds study notes inside a verse between `<RF …>` and `<Rf>`.
//! The scripture stream keeps the text around those spans
//! ([get_pure_text]) and the commentary stream keeps only their bodies
//! ([get_commentaries]). Links to other verses inside the notes are then
//! rewritten into e-Sword `<ref>` tags by [convert_bible_references].

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::abbreviations;
use crate::ConvertError;

/// Marker opening a footnote in MySword text.
pub const FOOTNOTE_OPEN: &str = "<RF";

/// Separator placed between the notes of a single verse.
pub const COMMENTARY_SEPARATOR: &str = "<p><hr><p>";

lazy_static! {
    static ref FOOTNOTE: Regex = Regex::new(r"<RF.*?<Rf>").unwrap();
    static ref FOOTNOTE_BODY: Regex = Regex::new(r"<RF.*?>(.*?)<Rf>").unwrap();
    static ref BIBLE_CLASS: Regex = Regex::new(r"class=.bible. ").unwrap();
    static ref LOCAL_ANCHOR: Regex = Regex::new(r"(href=.)#(b)").unwrap();
    static ref NUMERIC_LINK: Regex =
        Regex::new(r"<a href=.b(\d+)\.(\d+)\.(\d+)(?:-(\d+))?.>.*?</a>").unwrap();
    static ref NAMED_LINK: Regex = Regex::new(
        r"<a href=.b([A-Z]\w+|[123][A-ZÀ-Ü]\w+) [\d:-]*.>([A-Z]\w+|[123][A-ZÀ-Ü]\w+)( [\d:\-]*)</a>"
    )
    .unwrap();
    static ref TITLED_LINK: Regex =
        Regex::new(r"<a href=.b[\d.-]*.>([A-ZÀ-Ü]\w+|[123][A-ZÀ-Ü]\w+)( [\d:\-]*)</a>").unwrap();
    static ref ABBREVIATED_LINK: Regex = Regex::new(
        r"<a href=.b[\d.-]*.>([A-ZÀ-Ü]\w+\.|[123][A-ZÀ-Ü]\w+\.)( [\d:\-]*)</a>"
    )
    .unwrap();
    static ref BARE_REFERENCE: Regex =
        Regex::new(r" ([A-ZÀ-Ü]\w+ [\d:-]+| [123][A-ZÀ-Ü]\w+ [\d:-]+)").unwrap();
}

/// Removes every footnote span, markers included.
///
/// Text without an opening marker is returned unchanged, even if it carries a
/// stray closing `<Rf>`.
pub fn get_pure_text(text: &str) -> String {
    FOOTNOTE.replace_all(text, "").into_owned()
}

/// Keeps only the bodies of the footnotes, joined by [COMMENTARY_SEPARATOR].
///
/// The `class="bible"` attribute MySword puts on links is dropped and
/// same-page anchors (`href="#b1.1.1"`) are turned into plain verse links so
/// [convert_bible_references] can pick them up.
pub fn get_commentaries(text: &str) -> String {
    let joined = FOOTNOTE_BODY
        .captures_iter(text)
        .map(|caps| caps.get(1).map_or("", |body| body.as_str()))
        .collect::<Vec<_>>()
        .join(COMMENTARY_SEPARATOR);

    let joined = BIBLE_CLASS.replace_all(&joined, "");
    LOCAL_ANCHOR.replace_all(&joined, "${1}${2}").into_owned()
}

/// Rewrites verse links into e-Sword `<ref>` tags.
///
/// Numeric links (`<a href="b43.3.16">…</a>`) are resolved through the
/// abbreviation table and fail on an unknown book number. The remaining rules
/// reuse the visible book name and cannot fail: links whose target is already
/// a book name, links whose text is a book name or an abbreviation ending in
/// a period, and finally unlinked `Name 3:16` tokens preceded by a space.
pub fn convert_bible_references(text: &str) -> Result<String, ConvertError> {
    let text = try_replace_all(&NUMERIC_LINK, text, |caps| {
        let abbreviation = abbreviations::lookup(&caps[1])?;
        Ok(match caps.get(4) {
            Some(verse_end) => format!(
                "<ref>{} {}.{}-{}</ref>",
                abbreviation,
                &caps[2],
                &caps[3],
                verse_end.as_str()
            ),
            None => format!("<ref>{} {}.{}</ref>", abbreviation, &caps[2], &caps[3]),
        })
    })?;

    let text = NAMED_LINK.replace_all(&text, "<ref>${2}${3}</ref>");
    let text = TITLED_LINK.replace_all(&text, "<ref>${1}${2}</ref>");
    let text = ABBREVIATED_LINK.replace_all(&text, "<ref>${1}${2}</ref>");
    Ok(BARE_REFERENCE
        .replace_all(&text, " <ref>${1}</ref>")
        .into_owned())
}

/// Like `Regex::replace_all`, but stops at the first replacement that fails.
fn try_replace_all<F>(re: &Regex, text: &str, mut replace: F) -> Result<String, ConvertError>
where
    F: FnMut(&Captures) -> Result<String, ConvertError>,
{
    let mut replaced = String::with_capacity(text.len());
    let mut last = 0;

    for caps in re.captures_iter(text) {
        let whole = caps.get_match();
        replaced.push_str(&text[last..whole.start()]);
        replaced.push_str(&replace(&caps)?);
        last = whole.end();
    }
    replaced.push_str(&text[last..]);

    Ok(replaced)
}
