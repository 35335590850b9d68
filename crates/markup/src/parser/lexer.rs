//! Lexer for chat markup.
//!
//! Splits input into runs of text and bracket tags. A tag is
//!
//! ```text
//! "[" "/"? ws* name ws* content ("/]" | "]")
//! ```
//!
//! where `name` is `[A-Za-z0-9_-]+` and `content` is the shortest run of
//! characters up to the first end marker. Content never crosses a line
//! terminator; a `[` that does not start a complete tag is ordinary text.

use std::ops::Range;

use crate::tag::is_name_char;

/// A bracket tag as it appeared in the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagToken<'a> {
    /// Tag name, without surrounding whitespace.
    pub name: &'a str,
    /// Everything between the name and the end marker (attributes).
    pub content: &'a str,
    /// Byte range of the whole tag in the input.
    pub span: Range<usize>,
}

/// A token produced by the lexer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Plain text between tags.
    Text(&'a str),
    /// `[name ...]`
    Open(TagToken<'a>),
    /// `[/name ...]`
    Close(TagToken<'a>),
    /// `[name .../]`
    SelfClose(TagToken<'a>),
    /// `[/name .../]`, both a close and a self-closing marker.
    Malformed(TagToken<'a>),
}

/// Whitespace allowed around tag names and attribute `=` signs.
///
/// Unicode White_Space except U+0085 (NEL), plus U+FEFF.
pub(crate) fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Characters that end a line; tag content and attribute values never span one.
pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Advance `pos` past any whitespace in `input`.
pub(crate) fn skip_space(input: &str, pos: usize) -> usize {
    input[pos..]
        .char_indices()
        .find(|(_, c)| !is_space(*c))
        .map_or(input.len(), |(i, _)| pos + i)
}

/// Advance `pos` past any name characters in `input`.
pub(crate) fn skip_name(input: &str, pos: usize) -> usize {
    input[pos..]
        .find(|c: char| !is_name_char(c))
        .map_or(input.len(), |i| pos + i)
}

/// A tag match before it is classified.
#[derive(Clone, Debug)]
struct RawTag {
    closing: bool,
    self_closing: bool,
    name: Range<usize>,
    content: Range<usize>,
    span: Range<usize>,
}

/// Lexer for chat markup text.
///
/// Yields text and tag tokens in input order. Concatenating the text tokens
/// with the raw text of every tag token reproduces the input.
///
/// # Examples
///
/// ```
/// use markup::parser::{Lexer, Token};
///
/// let tokens: Vec<_> = Lexer::new("[b]Hello[/b]").collect();
/// assert_eq!(tokens.len(), 3);
/// assert!(matches!(tokens[1], Token::Text("Hello")));
/// ```
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    /// A tag already found past `pos`, waiting for the text before it.
    pending: Option<RawTag>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending: None,
        }
    }

    /// Find the leftmost tag starting at or after `from`.
    fn find_tag(&self, from: usize) -> Option<RawTag> {
        let mut search = from;
        while let Some(offset) = self.input[search..].find('[') {
            let start = search + offset;
            if let Some(tag) = self.match_tag_at(start) {
                return Some(tag);
            }
            search = start + 1;
        }
        None
    }

    /// Try to match a complete tag whose `[` is at `start`.
    fn match_tag_at(&self, start: usize) -> Option<RawTag> {
        let input = self.input;
        let mut pos = start + 1;

        let closing = input[pos..].starts_with('/');
        if closing {
            pos += 1;
        }

        pos = skip_space(input, pos);
        let name_start = pos;
        pos = skip_name(input, pos);
        if pos == name_start {
            return None;
        }
        let name = name_start..pos;

        pos = skip_space(input, pos);
        let content_start = pos;

        for (offset, c) in input[content_start..].char_indices() {
            let at = content_start + offset;
            if input[at..].starts_with("/]") {
                return Some(RawTag {
                    closing,
                    self_closing: true,
                    name,
                    content: content_start..at,
                    span: start..at + 2,
                });
            }
            if c == ']' {
                return Some(RawTag {
                    closing,
                    self_closing: false,
                    name,
                    content: content_start..at,
                    span: start..at + 1,
                });
            }
            if is_line_terminator(c) {
                return None;
            }
        }
        None
    }

    fn token_for(&self, raw: RawTag) -> Token<'a> {
        let tag = TagToken {
            name: &self.input[raw.name],
            content: &self.input[raw.content],
            span: raw.span,
        };
        match (raw.closing, raw.self_closing) {
            (false, false) => Token::Open(tag),
            (true, false) => Token::Close(tag),
            (false, true) => Token::SelfClose(tag),
            (true, true) => Token::Malformed(tag),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let tag = match self.pending.take() {
            Some(tag) => Some(tag),
            None => self.find_tag(self.pos),
        };

        match tag {
            Some(tag) if tag.span.start > self.pos => {
                let text = &self.input[self.pos..tag.span.start];
                self.pos = tag.span.start;
                self.pending = Some(tag);
                Some(Token::Text(text))
            }
            Some(tag) => {
                self.pos = tag.span.end;
                Some(self.token_for(tag))
            }
            None => {
                let text = &self.input[self.pos..];
                self.pos = self.input.len();
                Some(Token::Text(text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token<'_>> {
        Lexer::new(input).collect()
    }

    fn tag<'a>(name: &'a str, content: &'a str, span: Range<usize>) -> TagToken<'a> {
        TagToken {
            name,
            content,
            span,
        }
    }

    #[test]
    fn lex_plain_text() {
        assert_eq!(lex("Hello World"), vec![Token::Text("Hello World")]);
    }

    #[test]
    fn lex_empty() {
        assert!(lex("").is_empty());
    }

    #[test]
    fn lex_open_and_close() {
        assert_eq!(
            lex("[b]Hello[/b]"),
            vec![
                Token::Open(tag("b", "", 0..3)),
                Token::Text("Hello"),
                Token::Close(tag("b", "", 8..12)),
            ]
        );
    }

    #[test]
    fn lex_self_closing() {
        assert_eq!(lex("[br/]"), vec![Token::SelfClose(tag("br", "", 0..5))]);
        assert_eq!(lex("[br /]"), vec![Token::SelfClose(tag("br", "", 0..6))]);
    }

    #[test]
    fn next_line_is_not_space() {
        assert!(!is_space('\u{85}'));
        assert!(is_space('\u{a0}'));
        assert!(is_space('\u{feff}'));
        assert_eq!(lex("[\u{85}b]"), vec![Token::Text("[\u{85}b]")]);
    }

    #[test]
    fn lex_close_self_closing_is_malformed() {
        assert_eq!(lex("[/br/]"), vec![Token::Malformed(tag("br", "", 0..6))]);
    }

    #[test]
    fn lex_whitespace_around_name() {
        assert_eq!(
            lex("[  b  ]"),
            vec![Token::Open(tag("b", "", 0..7))]
        );
        assert_eq!(
            lex("[/ b ]"),
            vec![Token::Close(tag("b", "", 0..6))]
        );
    }

    #[test]
    fn lex_attribute_content() {
        assert_eq!(
            lex(r#"[line color="red"]x"#),
            vec![
                Token::Open(tag("line", r#"color="red""#, 0..18)),
                Token::Text("x"),
            ]
        );
    }

    #[test]
    fn lex_content_stops_at_nearest_end() {
        // The inner `[` belongs to the content, the first `]` ends the tag.
        assert_eq!(
            lex("[b x[i]y]"),
            vec![Token::Open(tag("b", "x[i", 0..7)), Token::Text("y]")]
        );
    }

    #[test]
    fn lex_slash_before_bracket_is_self_closing() {
        assert_eq!(
            lex("[a href=x/]"),
            vec![Token::SelfClose(tag("a", "href=x", 0..11))]
        );
    }

    #[test]
    fn lex_bracket_without_name_is_text() {
        assert_eq!(lex("[] [ ] [/]"), vec![Token::Text("[] [ ] [/]")]);
    }

    #[test]
    fn lex_unterminated_tag_is_text() {
        assert_eq!(lex("[bold"), vec![Token::Text("[bold")]);
    }

    #[test]
    fn lex_content_does_not_cross_lines() {
        assert_eq!(
            lex("[b x\n]y"),
            vec![Token::Text("[b x\n]y")]
        );
    }

    #[test]
    fn lex_newline_allowed_around_name() {
        assert_eq!(
            lex("[\nb\n]"),
            vec![Token::Open(tag("b", "", 0..5))]
        );
    }

    #[test]
    fn lex_failed_bracket_then_tag() {
        assert_eq!(
            lex("a [[b]c"),
            vec![
                Token::Text("a ["),
                Token::Open(tag("b", "", 3..6)),
                Token::Text("c"),
            ]
        );
    }

    #[test]
    fn lex_unicode_text() {
        assert_eq!(
            lex("[b]日本語[/b]"),
            vec![
                Token::Open(tag("b", "", 0..3)),
                Token::Text("日本語"),
                Token::Close(tag("b", "", 12..16)),
            ]
        );
    }

    #[test]
    fn lex_is_lossless() {
        let input = "x [b]y[/b] [ z ] [br/] [/q/] tail";
        let rebuilt: String = Lexer::new(input)
            .map(|token| match token {
                Token::Text(t) => t.to_string(),
                Token::Open(t) | Token::Close(t) | Token::SelfClose(t) | Token::Malformed(t) => {
                    input[t.span].to_string()
                }
            })
            .collect();
        assert_eq!(rebuilt, input);
    }
}
