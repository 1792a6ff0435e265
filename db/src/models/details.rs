use diesel::prelude::*;
use diesel::sql_types::{Bool, Nullable, Text};
use serde_derive::Serialize;

use crate::schema::{bible_details, commentary_details};

/// Module format version written into every e-Sword `Details` row.
pub const MODULE_VERSION: i32 = 4;

/// Separator between the description and the comments of a commentary.
const INFORMATION_SEPARATOR: &str = "\n<hr />\n";

/// Metadata read from a MySword `Details` table.
///
/// MySword modules disagree on which columns they ship, so every field is
/// optional. A column that is missing and a column that is `NULL` look the
/// same here.
#[derive(Clone, Debug, Default, PartialEq, QueryableByName)]
pub struct SourceDetails {
    #[diesel(sql_type = Nullable<Text>)]
    pub title: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub description: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub comments: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub abbreviation: Option<String>,
    #[diesel(sql_type = Nullable<Bool>)]
    pub ot: Option<bool>,
    #[diesel(sql_type = Nullable<Bool>)]
    pub nt: Option<bool>,
    #[diesel(sql_type = Nullable<Bool>)]
    pub strong: Option<bool>,
    #[diesel(sql_type = Nullable<Bool>)]
    pub righttoleft: Option<bool>,
}

/// Returns the first value that is present, or an empty string.
fn first_present(candidates: &[&Option<String>]) -> String {
    candidates
        .iter()
        .find_map(|candidate| candidate.as_deref())
        .map(str::to_owned)
        .unwrap_or_default()
}

impl SourceDetails {
    /// Title of a Bible: the description, then the comments.
    pub fn bible_title(&self) -> String {
        first_present(&[&self.description, &self.comments])
    }

    /// Information of a Bible: the comments, then the description.
    pub fn bible_information(&self) -> String {
        first_present(&[&self.comments, &self.description])
    }

    /// Title of a commentary: the title, then the abbreviation.
    pub fn commentary_title(&self) -> String {
        first_present(&[&self.title, &self.abbreviation])
    }

    /// Information of a commentary: the description and the comments, both
    /// when both are non-empty.
    pub fn commentary_information(&self) -> String {
        [&self.description, &self.comments]
            .iter()
            .filter_map(|field| field.as_deref())
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join(INFORMATION_SEPARATOR)
    }

    pub fn abbreviation(&self) -> String {
        first_present(&[&self.abbreviation])
    }

    pub fn old_testament(&self) -> bool {
        self.ot.unwrap_or(false)
    }

    pub fn new_testament(&self) -> bool {
        self.nt.unwrap_or(false)
    }

    pub fn strongs(&self) -> bool {
        self.strong.unwrap_or(false)
    }

    pub fn right_to_left(&self) -> bool {
        self.righttoleft.unwrap_or(false)
    }
}

/// The `Details` row of an e-Sword Bible.
#[derive(Clone, Debug, PartialEq, Serialize, Insertable)]
#[diesel(table_name = bible_details)]
pub struct BibleDetails {
    pub title: String,
    pub abbreviation: String,
    pub information: String,
    pub version: i32,
    pub old_testament: bool,
    pub new_testament: bool,
    pub apocrypha: bool,
    pub strongs: bool,
    pub right_to_left: bool,
}

impl From<&SourceDetails> for BibleDetails {
    fn from(source: &SourceDetails) -> Self {
        BibleDetails {
            title: source.bible_title(),
            abbreviation: source.abbreviation(),
            information: source.bible_information(),
            version: MODULE_VERSION,
            old_testament: source.old_testament(),
            new_testament: source.new_testament(),
            apocrypha: false,
            strongs: source.strongs(),
            right_to_left: source.right_to_left(),
        }
    }
}

/// The `Details` row of an e-Sword commentary.
#[derive(Clone, Debug, PartialEq, Serialize, Insertable)]
#[diesel(table_name = commentary_details)]
pub struct CommentaryDetails {
    pub title: String,
    pub abbreviation: String,
    pub information: String,
    pub version: i32,
    pub custom_css: String,
}

impl From<&SourceDetails> for CommentaryDetails {
    fn from(source: &SourceDetails) -> Self {
        CommentaryDetails {
            title: source.commentary_title(),
            abbreviation: source.abbreviation(),
            information: source.commentary_information(),
            version: MODULE_VERSION,
            custom_css: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn bible_fallbacks() {
        vec![
            (None, None, ""),
            (text("Desc"), None, "Desc"),
            (None, text("Comm"), "Comm"),
            (text("Desc"), text("Comm"), "Desc"),
            (text(""), text("Comm"), ""),
        ]
        .into_iter()
        .for_each(|(description, comments, title)| {
            let details = SourceDetails {
                description,
                comments,
                ..Default::default()
            };
            assert_eq!(details.bible_title(), title);
        });

        let details = SourceDetails {
            description: text("Desc"),
            comments: text("Comm"),
            ..Default::default()
        };
        assert_eq!(details.bible_information(), "Comm");

        let details = SourceDetails {
            description: text("Desc"),
            ..Default::default()
        };
        assert_eq!(details.bible_information(), "Desc");
    }

    #[test]
    fn commentary_fallbacks() {
        let details = SourceDetails {
            abbreviation: text("ACF"),
            ..Default::default()
        };
        assert_eq!(details.commentary_title(), "ACF");

        let details = SourceDetails {
            title: text("Almeida"),
            abbreviation: text("ACF"),
            ..Default::default()
        };
        assert_eq!(details.commentary_title(), "Almeida");

        vec![
            (None, None, ""),
            (text("Desc"), None, "Desc"),
            (text(""), text("Comm"), "Comm"),
            (text("Desc"), text("Comm"), "Desc\n<hr />\nComm"),
        ]
        .into_iter()
        .for_each(|(description, comments, information)| {
            let details = SourceDetails {
                description,
                comments,
                ..Default::default()
            };
            assert_eq!(details.commentary_information(), information);
        });
    }

    #[test]
    fn bible_details_from_source() {
        let source = SourceDetails {
            title: text("ignored"),
            description: text("Almeida Corrigida Fiel"),
            comments: text("Domínio público"),
            abbreviation: text("ACF"),
            ot: Some(true),
            nt: Some(true),
            strong: None,
            righttoleft: Some(false),
        };

        assert_eq!(
            BibleDetails::from(&source),
            BibleDetails {
                title: "Almeida Corrigida Fiel".to_string(),
                abbreviation: "ACF".to_string(),
                information: "Domínio público".to_string(),
                version: 4,
                old_testament: true,
                new_testament: true,
                apocrypha: false,
                strongs: false,
                right_to_left: false,
            }
        );
    }

    #[test]
    fn commentary_details_default() {
        assert_eq!(
            CommentaryDetails::from(&SourceDetails::default()),
            CommentaryDetails {
                title: String::new(),
                abbreviation: String::new(),
                information: String::new(),
                version: 4,
                custom_css: String::new(),
            }
        );
    }
}
