use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ConvertError;

/// Book numbers as MySword stores them, paired with the abbreviation e-Sword
/// expects inside a `<ref>` tag.
static BOOKS: [(&str, &str); 66] = [
    ("1", "Gn"),
    ("2", "Ex"),
    ("3", "Lv"),
    ("4", "Nm"),
    ("5", "Dt"),
    ("6", "Js"),
    ("7", "Jz"),
    ("8", "Rt"),
    ("9", "1Sm"),
    ("10", "2Sm"),
    ("11", "1Rs"),
    ("12", "2Rs"),
    ("13", "1Cr"),
    ("14", "2Cr"),
    ("15", "Ed"),
    ("16", "Ne"),
    ("17", "Et"),
    ("18", "Jó"),
    ("19", "Sl"),
    ("20", "Pv"),
    ("21", "Ec"),
    ("22", "Ct"),
    ("23", "Is"),
    ("24", "Jr"),
    ("25", "Lm"),
    ("26", "Ez"),
    ("27", "Dn"),
    ("28", "Os"),
    ("29", "Jl"),
    ("30", "Am"),
    ("31", "Ob"),
    ("32", "Jn"),
    ("33", "Mq"),
    ("34", "Na"),
    ("35", "Hc"),
    ("36", "Sf"),
    ("37", "Ag"),
    ("38", "Zc"),
    ("39", "Ml"),
    ("40", "Mt"),
    ("41", "Mc"),
    ("42", "Lc"),
    ("43", "Jo"),
    ("44", "At"),
    ("45", "Rm"),
    ("46", "1Co"),
    ("47", "2Co"),
    ("48", "Gl"),
    ("49", "Ef"),
    ("50", "Fp"),
    ("51", "Cl"),
    ("52", "1Ts"),
    ("53", "2Ts"),
    ("54", "1Tm"),
    ("55", "2Tm"),
    ("56", "Tt"),
    ("57", "Fm"),
    ("58", "Hb"),
    ("59", "Tg"),
    ("60", "1Pe"),
    ("61", "2Pe"),
    ("62", "1Jo"),
    ("63", "2Jo"),
    ("64", "3Jo"),
    ("65", "Jd"),
    ("66", "Ap"),
];

lazy_static! {
    static ref ABBREVIATIONS: HashMap<&'static str, &'static str> = BOOKS.iter().cloned().collect();
}

/// Looks up the abbreviation for a book number in its decimal form.
pub fn lookup(book_id: &str) -> Result<&'static str, ConvertError> {
    ABBREVIATIONS
        .get(book_id)
        .copied()
        .ok_or_else(|| ConvertError::UnknownBookId {
            book_id: book_id.to_owned(),
        })
}

/// Every `(book number, abbreviation)` pair, in canonical book order.
pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    BOOKS.iter().cloned()
}
