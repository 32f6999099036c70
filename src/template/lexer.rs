//! Lexer for the structural tokens of template transclusions using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // Template delimiters (longer patterns win over the lone braces below)
    #[token("{{")]
    OpeningBraces,
    #[token("}}")]
    ClosingBraces,

    // Parameter separators
    #[token("|")]
    Bar,
    #[token("=")]
    Equals,

    // No-parse escape region
    #[token("<nowiki>")]
    OpeningNowiki,
    #[token("</nowiki>")]
    ClosingNowiki,

    // A single brace or angle bracket that starts no structural token
    #[token("{")]
    #[token("}")]
    #[token("<")]
    Stray,

    #[regex(r"[^{}|=<]+")]
    Text,
}

/// Lex wikitext into structural tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}
