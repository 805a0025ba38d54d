use serde::Serialize;

use crate::site::html::{NAME_NOT_FOUND, NOT_AVAILABLE};

const QUOTE_GLYPHS: [char; 3] = ['"', '\u{201C}', '\u{201D}'];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedName {
    pub name: String,
    pub nickname: String,
}

/// Splits a profile heading into the display name and the quoted nickname.
///
/// `Rodtang "The Iron Man" Jitmuangnon` becomes name `Rodtang Jitmuangnon`
/// and nickname `The Iron Man`. Straight and curly double quotes close each
/// other interchangeably and only the first pair is taken as the nickname.
pub fn parse_name(raw: &str) -> ParsedName {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NAME_NOT_FOUND || trimmed == NOT_AVAILABLE {
        return ParsedName::default();
    }

    let Some((open, close)) = first_quoted_span(trimmed) else {
        return ParsedName {
            name: collapse_whitespace(trimmed),
            nickname: String::new(),
        };
    };

    let nickname = &trimmed[open + quote_len(trimmed, open)..close];
    let after = close + quote_len(trimmed, close);
    let remainder = format!("{} {}", &trimmed[..open], &trimmed[after..]);

    ParsedName {
        name: collapse_whitespace(&remainder),
        nickname: collapse_whitespace(nickname),
    }
}

fn first_quoted_span(text: &str) -> Option<(usize, usize)> {
    let mut quotes = text
        .char_indices()
        .filter(|(_, ch)| QUOTE_GLYPHS.contains(ch))
        .map(|(index, _)| index);
    let open = quotes.next()?;
    let close = quotes.next()?;
    Some((open, close))
}

fn quote_len(text: &str, index: usize) -> usize {
    text[index..].chars().next().map_or(0, char::len_utf8)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
