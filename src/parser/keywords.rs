//! Keyword table
//!
//! Canonical surface spelling for every [`TokenKind`], in token order. The
//! lexer consults the reverse map for longest-match recognition of
//! multi-word keywords, and diagnostics use the forward table so that
//! "expected X" messages read the way users wrote them.
//!
//! Literal and structural kinds (integers, identifiers, newlines, end of
//! stream) have no fixed text and map to the empty string.

use super::lexer::TokenKind;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Every token kind paired with its canonical text, in declaration order.
pub const KEYWORDS: &[(TokenKind, &str)] = &[
    (TokenKind::Integer, ""),
    (TokenKind::Float, ""),
    (TokenKind::String, ""),
    (TokenKind::Identifier, ""),
    (TokenKind::Boolean, ""),
    (TokenKind::It, "IT"),
    (TokenKind::ItzLiekA, "ITZ LIEK A"),
    (TokenKind::Noob, "NOOB"),
    (TokenKind::Numbr, "NUMBR"),
    (TokenKind::Numbar, "NUMBAR"),
    (TokenKind::Troof, "TROOF"),
    (TokenKind::Yarn, "YARN"),
    (TokenKind::Bukkit, "BUKKIT"),
    (TokenKind::Eof, ""),
    (TokenKind::Newline, ""),
    (TokenKind::Hai, "HAI"),
    (TokenKind::Kthxbye, "KTHXBYE"),
    (TokenKind::HasA, "HAS A"),
    (TokenKind::ItzA, "ITZ A"),
    (TokenKind::Itz, "ITZ"),
    (TokenKind::RNoob, "R NOOB"),
    (TokenKind::R, "R"),
    (TokenKind::AnYr, "AN YR"),
    (TokenKind::An, "AN"),
    (TokenKind::SumOf, "SUM OF"),
    (TokenKind::DiffOf, "DIFF OF"),
    (TokenKind::ProduktOf, "PRODUKT OF"),
    (TokenKind::QuoshuntOf, "QUOSHUNT OF"),
    (TokenKind::ModOf, "MOD OF"),
    (TokenKind::BiggrOf, "BIGGR OF"),
    (TokenKind::SmallrOf, "SMALLR OF"),
    (TokenKind::BothOf, "BOTH OF"),
    (TokenKind::EitherOf, "EITHER OF"),
    (TokenKind::WonOf, "WON OF"),
    (TokenKind::Not, "NOT"),
    (TokenKind::Mkay, "MKAY"),
    (TokenKind::AllOf, "ALL OF"),
    (TokenKind::AnyOf, "ANY OF"),
    (TokenKind::BothSaem, "BOTH SAEM"),
    (TokenKind::Diffrint, "DIFFRINT"),
    (TokenKind::Maek, "MAEK"),
    (TokenKind::A, "A"),
    (TokenKind::IsNowA, "IS NOW A"),
    (TokenKind::Visible, "VISIBLE"),
    (TokenKind::Smoosh, "SMOOSH"),
    (TokenKind::Bang, "!"),
    (TokenKind::Gimmeh, "GIMMEH"),
    (TokenKind::ORly, "O RLY?"),
    (TokenKind::YaRly, "YA RLY"),
    (TokenKind::Mebbe, "MEBBE"),
    (TokenKind::NoWai, "NO WAI"),
    (TokenKind::Oic, "OIC"),
    (TokenKind::Wtf, "WTF?"),
    (TokenKind::Omg, "OMG"),
    (TokenKind::OmgWtf, "OMGWTF"),
    (TokenKind::Gtfo, "GTFO"),
    (TokenKind::ImInYr, "IM IN YR"),
    (TokenKind::Uppin, "UPPIN"),
    (TokenKind::Nerfin, "NERFIN"),
    (TokenKind::Yr, "YR"),
    (TokenKind::Til, "TIL"),
    (TokenKind::Wile, "WILE"),
    (TokenKind::ImOuttaYr, "IM OUTTA YR"),
    (TokenKind::HowIz, "HOW IZ"),
    (TokenKind::Iz, "IZ"),
    (TokenKind::IfUSaySo, "IF U SAY SO"),
    (TokenKind::FoundYr, "FOUND YR"),
    (TokenKind::Srs, "SRS"),
    (TokenKind::ApostropheZ, "'Z"),
    (TokenKind::OHaiIm, "O HAI IM"),
    (TokenKind::ImLiek, "IM LIEK"),
    (TokenKind::Kthx, "KTHX"),
];

/// Canonical text for `kind`, or `""` for literal and structural kinds.
pub fn keyword_text(kind: TokenKind) -> &'static str {
    KEYWORDS[kind as usize].1
}

/// Reverse lookup from canonical phrase (words joined by single spaces) to
/// token kind. Built once on first use.
pub fn lookup(phrase: &str) -> Option<TokenKind> {
    static TABLE: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            KEYWORDS
                .iter()
                .filter(|(_, text)| !text.is_empty())
                .map(|(kind, text)| (*text, *kind))
                .collect()
        })
        .get(phrase)
        .copied()
}

/// Largest number of words in any keyword phrase.
pub fn max_keyword_words() -> usize {
    static MAX: OnceLock<usize> = OnceLock::new();
    *MAX.get_or_init(|| {
        KEYWORDS
            .iter()
            .map(|(_, text)| text.split(' ').count())
            .max()
            .unwrap_or(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_kind() {
        for (i, (kind, _)) in KEYWORDS.iter().enumerate() {
            assert_eq!(*kind as usize, i, "table out of order at {:?}", kind);
        }
    }

    #[test]
    fn test_lookup_multi_word() {
        assert_eq!(lookup("IM OUTTA YR"), Some(TokenKind::ImOuttaYr));
        assert_eq!(lookup("IF U SAY SO"), Some(TokenKind::IfUSaySo));
        assert_eq!(lookup("R"), Some(TokenKind::R));
        assert_eq!(lookup("IM"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn test_structural_kinds_have_no_text() {
        assert_eq!(keyword_text(TokenKind::Eof), "");
        assert_eq!(keyword_text(TokenKind::Newline), "");
        assert_eq!(keyword_text(TokenKind::Oic), "OIC");
        assert_eq!(max_keyword_words(), 4);
    }
}
