//! Rewrite rules from MySword inline markup to the HTML flavor e-Sword reads.
//!
//! Each rule is a plain string-to-string function. The rules are meant to run
//! once, in the order [normalize] applies them: later rules rely on the
//! output of earlier ones and a second pass is not guaranteed to be a no-op.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Paragraph markers and their replacements.
const PARAGRAPHS: [(&str, &str); 3] = [("<CM>", "<p>"), ("<CI>", "<br>"), ("<CL>", "<br>")];

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"<TS>(.*?)<Ts>").unwrap();
    static ref NUMBERED_HEADING: Regex = Regex::new(r"<TS(\d+)>(.*?)<Ts>").unwrap();
    static ref EMPHASIS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"<FI>(.*?)<Fi>").unwrap(),
            r##"<font color="#gray"><i>${1}</i></font>"##,
        ),
        (
            Regex::new(r"<FO>(.*?)<Fo>").unwrap(),
            r##"<font color="#gray"><i>${1}</i></font>"##,
        ),
        (
            Regex::new(r"<FR>(.*?)<Fr>").unwrap(),
            r##"<font color="#red">${1}</font>"##,
        ),
        (Regex::new(r"<FU>(.*?)<Fu>").unwrap(), "<u>${1}</u>"),
    ];
    static ref STRONG_TAG: Regex = Regex::new(r"<W ?([HG]\d+)>").unwrap();
    // The first alternative consumes numbers already wrapped by STRONG_TAG so
    // the bare-token pass leaves them alone.
    static ref STRONG_TOKEN: Regex = Regex::new(r"<num>[HG]\d+</num>|\b([HG]\d+)\b").unwrap();
    static ref MORPHOLOGY: Regex = Regex::new(r"<WT([^>]*)>").unwrap();
    static ref CENTERED: Regex = Regex::new(r"<p align=.?center.?>").unwrap();
    static ref EMPTY_HEADING: Regex = Regex::new(r"<h(\d+)>\s*</h(\d+)>").unwrap();
    static ref EMPTY_SUPERSCRIPT: Regex = Regex::new(r"<sup>\s*</sup>").unwrap();
}

/// Converts `<TS>` and `<TSn>` titles into `<h1>` and `<hn>` headings.
///
/// The first `<Ts>` closes the nearest open title, so nested titles are not
/// supported.
pub fn convert_headings(text: &str) -> String {
    let text = HEADING.replace_all(text, "<h1>${1}</h1>");
    NUMBERED_HEADING
        .replace_all(&text, "<h${1}>${2}</h${1}>")
        .into_owned()
}

/// Replaces the paragraph and line break markers.
pub fn convert_paragraphs(text: &str) -> String {
    PARAGRAPHS
        .iter()
        .fold(text.to_owned(), |text, (marker, replacement)| {
            text.replace(marker, replacement)
        })
}

/// Converts added words, red letters and underlines into styled HTML.
pub fn convert_emphasis(text: &str) -> String {
    EMPHASIS
        .iter()
        .fold(text.to_owned(), |text, (re, replacement)| {
            re.replace_all(&text, *replacement).into_owned()
        })
}

/// Converts the structural and emphasis tags: headings, then paragraphs, then
/// emphasis.
pub fn convert_tags(text: &str) -> String {
    convert_emphasis(&convert_paragraphs(&convert_headings(text)))
}

/// Wraps Strong's numbers and morphology codes in e-Sword's tags.
///
/// Explicit `<WH123>` tags are converted first. Any remaining bare `H123` or
/// `G123` token is then wrapped too, which also catches numbers quoted in
/// footnotes. Morphology tags come out unterminated (`<tvm>code<tvm>`), which
/// is what e-Sword expects.
pub fn convert_strong_references(text: &str) -> String {
    let text = STRONG_TAG.replace_all(text, "<num>${1}</num>");
    let text = STRONG_TOKEN.replace_all(&text, |caps: &Captures| match caps.get(1) {
        Some(number) => format!("<num>{}</num>", number.as_str()),
        None => caps[0].to_owned(),
    });
    MORPHOLOGY.replace_all(&text, "<tvm>${1}<tvm>").into_owned()
}

/// Strips the opening centered-paragraph marker. The closing `</p>` stays.
pub fn remove_centralization(text: &str) -> String {
    CENTERED.replace_all(text, "").into_owned()
}

/// Drops headings and superscripts that are empty or hold only whitespace.
/// A heading only counts when its closing tag has the same level.
pub fn remove_empty_tags(text: &str) -> String {
    let text = EMPTY_HEADING.replace_all(text, |caps: &Captures| {
        if caps[1] == caps[2] {
            String::new()
        } else {
            caps[0].to_owned()
        }
    });
    EMPTY_SUPERSCRIPT.replace_all(&text, "").into_owned()
}

/// Runs every rewrite rule in order.
pub fn normalize(text: &str) -> String {
    let text = convert_tags(text);
    let text = convert_strong_references(&text);
    let text = remove_centralization(&text);
    remove_empty_tags(&text)
}
