//! Tokenizer for detailed-system formula bodies
//!
//! The body of `der(7)(7pter->7q22::12q13->12qter)` splits into three kinds
//! of token: the `::` fusion join, the `->` segment arrow and band text. A
//! lone `:` (a break without reunion) carries no information for the
//! loss/gain/fusion model and is dropped.

/// A lexical token of a formula body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `::`
    Join,
    /// `->`
    Arrow,
    /// Band, telomere, `hsr` or other text between delimiters
    Text(&'a str),
}

/// Split a formula body into tokens.
///
/// Text tokens are trimmed; empty text is never emitted.
pub fn tokenize(body: &str) -> Vec<Token<'_>> {
    let bytes = body.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let delimiter = match bytes[i] {
            b':' if bytes.get(i + 1) == Some(&b':') => Some((Some(Token::Join), 2)),
            b':' => Some((None, 1)),
            b'-' if bytes.get(i + 1) == Some(&b'>') => Some((Some(Token::Arrow), 2)),
            _ => None,
        };
        match delimiter {
            Some((token, width)) => {
                push_text(&mut tokens, &body[text_start..i]);
                if let Some(token) = token {
                    tokens.push(token);
                }
                i += width;
                text_start = i;
            }
            None => i += 1,
        }
    }
    push_text(&mut tokens, &body[text_start..]);
    tokens
}

fn push_text<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str) {
    let text = text.trim();
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
}
