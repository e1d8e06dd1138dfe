//! Lexer (tokenizer) for LOLCODE source
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Source is first split into lexemes (words, string literals, `!`,
//! `'Z` and line breaks), then runs of words are matched against the
//! [keyword table](super::keywords) longest-match first, so that `IM OUTTA YR`
//! becomes a single token rather than three identifiers.
//!
//! Logical line breaks (`\n` and `,`) become [`TokenKind::Newline`]; runs of
//! them collapse into one and the stream always ends `Newline, Eof`.

use super::ast::SourceLocation;
use super::keywords;
use log::trace;
use std::fmt;
use std::sync::Arc;

/// Token categories, one per keyword-table entry.
///
/// Declaration order matches [`keywords::KEYWORDS`] so a kind doubles as an
/// index into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literal classes
    Integer,
    Float,
    String,
    Identifier,
    Boolean,

    // Values and types
    It,
    ItzLiekA,
    Noob,
    Numbr,
    Numbar,
    Troof,
    Yarn,
    Bukkit,

    // Structure
    Eof,
    Newline,
    Hai,
    Kthxbye,

    // Declarations and assignment
    HasA,
    ItzA,
    Itz,
    RNoob,
    R,
    AnYr,
    An,

    // Operators
    SumOf,
    DiffOf,
    ProduktOf,
    QuoshuntOf,
    ModOf,
    BiggrOf,
    SmallrOf,
    BothOf,
    EitherOf,
    WonOf,
    Not,
    Mkay,
    AllOf,
    AnyOf,
    BothSaem,
    Diffrint,
    Maek,
    A,
    IsNowA,

    // I/O
    Visible,
    Smoosh,
    Bang,
    Gimmeh,

    // Control flow
    ORly,
    YaRly,
    Mebbe,
    NoWai,
    Oic,
    Wtf,
    Omg,
    OmgWtf,
    Gtfo,
    ImInYr,
    Uppin,
    Nerfin,
    Yr,
    Til,
    Wile,
    ImOuttaYr,

    // Functions, identifiers and arrays
    HowIz,
    Iz,
    IfUSaySo,
    FoundYr,
    Srs,
    ApostropheZ,
    OHaiIm,
    ImLiek,
    Kthx,
}

impl TokenKind {
    /// Canonical surface text from the keyword table (empty for literals).
    pub fn keyword(self) -> &'static str {
        keywords::keyword_text(self)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Integer => write!(f, "integer literal"),
            TokenKind::Float => write!(f, "float literal"),
            TokenKind::String => write!(f, "string literal"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Boolean => write!(f, "boolean literal"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Eof => write!(f, "end of file"),
            other => write!(f, "'{}'", other.keyword()),
        }
    }
}

/// Literal payload carried by literal and identifier tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Integer(i64),
    Float(f32),
    Boolean(bool),
    /// String literal contents (raw, escapes untouched) or identifier name.
    Text(String),
}

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<TokenValue>,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self {
            kind,
            value: None,
            location,
        }
    }

    pub fn with_value(mut self, value: TokenValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Literal text of the token if it carries any, for diagnostics.
    pub fn text(&self) -> Option<String> {
        match &self.value {
            Some(TokenValue::Integer(n)) => Some(n.to_string()),
            Some(TokenValue::Float(x)) => Some(x.to_string()),
            Some(TokenValue::Boolean(b)) => Some(if *b { "WIN" } else { "FAIL" }.to_string()),
            Some(TokenValue::Text(s)) => Some(s.clone()),
            None => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::String, Some(TokenValue::Text(s))) => write!(f, "string literal \"{}\"", s),
            (TokenKind::Identifier, Some(TokenValue::Text(s))) => write!(f, "identifier '{}'", s),
            (kind, Some(_)) => write!(f, "{} {}", kind, self.text().unwrap_or_default()),
            (kind, None) => write!(f, "{}", kind),
        }
    }
}

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexer error at {}: {}", self.location, self.message)
    }
}

impl std::error::Error for LexError {}

/// Raw lexeme before keyword matching.
#[derive(Debug, Clone, PartialEq)]
enum Lexeme {
    Word(String),
    Quoted(String),
    Newline,
}

/// Lexer for LOLCODE source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    file: Arc<str>,
}

impl Lexer {
    /// Create a new lexer; `file` is recorded on every token for diagnostics.
    pub fn new(input: &str, file: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            file: Arc::from(file),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let lexemes = self.scan()?;
        let mut tokens: Vec<Token> = Vec::new();
        let max_words = keywords::max_keyword_words();

        let mut i = 0;
        while i < lexemes.len() {
            let (lexeme, line) = &lexemes[i];
            let loc = self.location_at(*line);

            match lexeme {
                Lexeme::Newline => {
                    let after_newline = tokens
                        .last()
                        .map(|t| t.kind == TokenKind::Newline)
                        .unwrap_or(true);
                    if !after_newline {
                        tokens.push(Token::new(TokenKind::Newline, loc));
                    }
                    i += 1;
                }
                Lexeme::Quoted(s) => {
                    tokens.push(Token::new(TokenKind::String, loc).with_value(TokenValue::Text(s.clone())));
                    i += 1;
                }
                Lexeme::Word(word) => {
                    if let Some((kind, consumed)) = Self::match_keyword(&lexemes[i..], max_words) {
                        tokens.push(Token::new(kind, loc));
                        i += consumed;
                    } else {
                        tokens.push(self.classify(word, loc)?);
                        i += 1;
                    }
                }
            }
        }

        let loc = self.location_at(self.line);
        if tokens.last().map(|t| t.kind != TokenKind::Newline).unwrap_or(false) {
            tokens.push(Token::new(TokenKind::Newline, loc.clone()));
        }
        tokens.push(Token::new(TokenKind::Eof, loc));

        trace!("lexed {} tokens from {}", tokens.len(), self.file);
        Ok(tokens)
    }

    /// Longest run of words (up to `max_words`) that spells a keyword.
    fn match_keyword(lexemes: &[(Lexeme, usize)], max_words: usize) -> Option<(TokenKind, usize)> {
        let mut words = Vec::new();
        for (lexeme, _) in lexemes.iter().take(max_words) {
            match lexeme {
                Lexeme::Word(w) => words.push(w.as_str()),
                _ => break,
            }
        }

        (1..=words.len())
            .rev()
            .find_map(|n| keywords::lookup(&words[..n].join(" ")).map(|kind| (kind, n)))
    }

    /// Classify a single non-keyword word as a literal or identifier.
    fn classify(&self, word: &str, loc: SourceLocation) -> Result<Token, LexError> {
        if word == "WIN" || word == "FAIL" {
            return Ok(Token::new(TokenKind::Boolean, loc).with_value(TokenValue::Boolean(word == "WIN")));
        }

        if is_integer(word) {
            let value = word.parse::<i64>().map_err(|_| LexError {
                message: format!("Invalid integer literal: {}", word),
                location: loc.clone(),
            })?;
            return Ok(Token::new(TokenKind::Integer, loc).with_value(TokenValue::Integer(value)));
        }

        if is_float(word) {
            let value = word.parse::<f32>().map_err(|_| LexError {
                message: format!("Invalid float literal: {}", word),
                location: loc.clone(),
            })?;
            if !value.is_finite() {
                return Err(LexError {
                    message: format!("Float literal out of range: {}", word),
                    location: loc,
                });
            }
            return Ok(Token::new(TokenKind::Float, loc).with_value(TokenValue::Float(value)));
        }

        if is_identifier(word) {
            return Ok(Token::new(TokenKind::Identifier, loc).with_value(TokenValue::Text(word.to_string())));
        }

        Err(LexError {
            message: format!("Unrecognized lexeme: '{}'", word),
            location: loc,
        })
    }

    /// Split the input into lexemes tagged with their starting line.
    fn scan(&mut self) -> Result<Vec<(Lexeme, usize)>, LexError> {
        let mut lexemes = Vec::new();

        while let Some(ch) = self.peek() {
            let line = self.line;
            match ch {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' | ',' => {
                    self.advance();
                    lexemes.push((Lexeme::Newline, line));
                }
                '"' => {
                    self.advance();
                    let s = self.string_literal(line)?;
                    lexemes.push((Lexeme::Quoted(s), line));
                }
                '!' => {
                    self.advance();
                    lexemes.push((Lexeme::Word("!".to_string()), line));
                }
                '.' | '…' if self.at_line_continuation() => {
                    self.skip_line_continuation();
                }
                _ => {
                    let word = self.word();
                    match word.as_str() {
                        "BTW" => self.skip_line_comment(),
                        "OBTW" => self.skip_block_comment(line)?,
                        _ => {
                            let base = word
                                .strip_suffix("'Z")
                                .filter(|b| !b.is_empty())
                                .map(str::to_string);
                            match base {
                                Some(base) => {
                                    lexemes.push((Lexeme::Word(base), line));
                                    lexemes.push((Lexeme::Word("'Z".to_string()), line));
                                }
                                None => lexemes.push((Lexeme::Word(word), line)),
                            }
                        }
                    }
                }
            }
        }

        Ok(lexemes)
    }

    /// Parse string literal body; the opening quote is already consumed.
    /// `:` escapes the following character, so `:"` does not terminate.
    fn string_literal(&mut self, line: usize) -> Result<String, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(string);
                }
                '\n' => break,
                ':' => {
                    self.advance();
                    string.push(':');
                    if let Some(escaped) = self.peek().filter(|c| *c != '\n') {
                        self.advance();
                        string.push(escaped);
                    }
                }
                _ => {
                    self.advance();
                    string.push(ch);
                }
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: self.location_at(line),
        })
    }

    /// Read a bare word up to the next delimiter.
    fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || matches!(ch, ',' | '"' | '!') {
                break;
            }
            // A continuation marker glued to the word still ends the line.
            if matches!(ch, '.' | '…') && self.at_line_continuation() {
                break;
            }
            word.push(ch);
            self.advance();
        }
        word
    }

    /// `...` or `…` followed only by blanks up to the end of the line.
    fn at_line_continuation(&self) -> bool {
        let marker = if self.peek() == Some('…') {
            1
        } else if self.peek_ahead(1) == Some('.') && self.peek_ahead(2) == Some('.') {
            3
        } else {
            return false;
        };

        let mut n = marker;
        while let Some(ch) = self.peek_ahead(n) {
            match ch {
                ' ' | '\t' | '\r' => n += 1,
                '\n' => return true,
                _ => return false,
            }
        }
        false
    }

    /// Consume a continuation marker together with the line break after it.
    fn skip_line_continuation(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip single-line comment (BTW ...), leaving the line break in place.
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip block comment (OBTW ... TLDR)
    fn skip_block_comment(&mut self, start_line: usize) -> Result<(), LexError> {
        loop {
            while self.peek().map(|c| c.is_whitespace()).unwrap_or(false) {
                self.advance();
            }
            if self.is_at_end() {
                return Err(LexError {
                    message: "Unterminated block comment".to_string(),
                    location: self.location_at(start_line),
                });
            }
            if self.word() == "TLDR" {
                return Ok(());
            }
            // Delimiters never start a word; step over them.
            if self.peek().map(|c| matches!(c, ',' | '"' | '!')).unwrap_or(false) {
                self.advance();
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn location_at(&self, line: usize) -> SourceLocation {
        SourceLocation::new(self.file.clone(), line)
    }
}

fn is_integer(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_float(word: &str) -> bool {
    let body = word.strip_prefix('-').unwrap_or(word);
    match body.split_once('.') {
        Some((whole, frac)) => {
            whole.chars().all(|c| c.is_ascii_digit())
                && !frac.is_empty()
                && frac.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source, "test.lol");
        lexer.tokenize().unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("HAI 1.2\nVISIBLE \"HI\"\nKTHXBYE"),
            vec![
                TokenKind::Hai,
                TokenKind::Float,
                TokenKind::Newline,
                TokenKind::Visible,
                TokenKind::String,
                TokenKind::Newline,
                TokenKind::Kthxbye,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_longest_match_keywords() {
        assert_eq!(
            kinds("I HAS A x ITZ LIEK A y"),
            vec![
                TokenKind::Identifier,
                TokenKind::HasA,
                TokenKind::Identifier,
                TokenKind::ItzLiekA,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("x R NOOB")[1], TokenKind::RNoob);
        assert_eq!(kinds("IF U SAY SO")[0], TokenKind::IfUSaySo);
    }

    #[test]
    fn test_slot_and_bang_split() {
        assert_eq!(
            kinds("VISIBLE a'Z b!"),
            vec![
                TokenKind::Visible,
                TokenKind::Identifier,
                TokenKind::ApostropheZ,
                TokenKind::Identifier,
                TokenKind::Bang,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_newlines_collapse() {
        assert_eq!(
            kinds("\n\nGTFO\n\n, \nGTFO"),
            vec![
                TokenKind::Gtfo,
                TokenKind::Newline,
                TokenKind::Gtfo,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("GTFO BTW leaving\nOBTW many\nwords TLDR\nGTFO"),
            vec![
                TokenKind::Gtfo,
                TokenKind::Newline,
                TokenKind::Gtfo,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(
            kinds("SUM OF 1 ...\n AN 2"),
            vec![
                TokenKind::SumOf,
                TokenKind::Integer,
                TokenKind::An,
                TokenKind::Integer,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_continuation_glued_to_word() {
        assert_eq!(
            kinds("VISIBLE SUM OF 1 AN x...\n2"),
            vec![
                TokenKind::Visible,
                TokenKind::SumOf,
                TokenKind::Integer,
                TokenKind::An,
                TokenKind::Identifier,
                TokenKind::Integer,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("VISIBLE x…  \ny"),
            vec![
                TokenKind::Visible,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
        // Dots that do not end the line stay part of the word.
        assert!(Lexer::new("VISIBLE x...y", "t").tokenize().is_err());
    }

    #[test]
    fn test_literal_payloads() {
        let mut lexer = Lexer::new("-7 .5 WIN \"a:\"b\" name", "test.lol");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].value, Some(TokenValue::Integer(-7)));
        assert_eq!(tokens[1].value, Some(TokenValue::Float(0.5)));
        assert_eq!(tokens[2].value, Some(TokenValue::Boolean(true)));
        assert_eq!(tokens[3].value, Some(TokenValue::Text("a:\"b".to_string())));
        assert_eq!(tokens[4].value, Some(TokenValue::Text("name".to_string())));
    }

    #[test]
    fn test_lines_are_recorded() {
        let mut lexer = Lexer::new("HAI\n\nGTFO", "prog.lol");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].location.line, 1);
        assert_eq!(tokens[2].location.line, 3);
        assert_eq!(&*tokens[2].location.file, "prog.lol");
    }

    #[test]
    fn test_errors() {
        assert!(Lexer::new("VISIBLE \"open", "t").tokenize().is_err());
        assert!(Lexer::new("OBTW never closed", "t").tokenize().is_err());
        assert!(Lexer::new("VISIBLE @@", "t").tokenize().is_err());

        let huge = format!("VISIBLE {}.0", "9".repeat(50));
        let err = Lexer::new(&huge, "t").tokenize().unwrap_err();
        assert!(err.message.starts_with("Float literal out of range"), "{}", err.message);
    }
}
