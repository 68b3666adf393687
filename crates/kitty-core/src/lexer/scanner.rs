//! Line scanner
//!
//! Turns one line of source into tokens. Comment and multiline-string state
//! crosses line boundaries, so it lives in an explicit [`LexerState`] that the
//! caller threads through consecutive calls to [`analyse`].

use std::sync::LazyLock;

use regex::Regex;

use super::{
    comments::{after_multiline_comment_end, after_multiline_comment_start, is_single_line_comment},
    strings::{after_multiline_string_end, multiline_string_opener, strip_string_literals},
    token::{Keyword, SingleCharacter, Token},
};

/// Lexer state carried from one line to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerState {
    pub inside_multiline_comment: bool,
    pub inside_multiline_string: bool,
    /// Unclosed `(` since the last brace; signatures may span lines
    pub paren_depth: usize,
}

impl LexerState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What the scanner should do after a word
enum Flow {
    Continue,
    /// A `//` comment starts: nothing else on the line is code
    SingleLineComment,
}

type TokenGenerator = fn(&str) -> Option<Token>;

static TOKEN_PATTERNS: LazyLock<Vec<(Regex, TokenGenerator)>> = LazyLock::new(|| {
    let patterns: [(&str, TokenGenerator); 4] = [
        (r"^[^A-Za-z0-9_]", single_character),
        (r"^@[A-Za-z0-9_]*", attribute),
        (r"^[A-Za-z0-9_]+", keyword_or_identifier),
        (r"^\.init\b", init_reference),
    ];
    patterns
        .into_iter()
        .map(|(pattern, generator)| {
            (Regex::new(pattern).expect("token pattern is valid"), generator)
        })
        .collect()
});

fn single_character(text: &str) -> Option<Token> {
    text.chars()
        .next()
        .and_then(SingleCharacter::from_char)
        .map(Token::SingleCharacter)
}

fn attribute(text: &str) -> Option<Token> {
    Some(Token::Attribute(text.to_string()))
}

fn keyword_or_identifier(text: &str) -> Option<Token> {
    Some(
        Keyword::from_word(text)
            .map(Token::Keyword)
            .unwrap_or_else(|| Token::Identifier(text.to_string())),
    )
}

fn init_reference(text: &str) -> Option<Token> {
    Some(Token::Identifier(text.to_string()))
}

/// Tokenises a single line, updating `state` for the next one
pub fn analyse(line: &str, state: &mut LexerState) -> Vec<Token> {
    let mut line = line;

    if state.inside_multiline_comment {
        match after_multiline_comment_end(line) {
            Some(rest) => {
                line = rest;
                state.inside_multiline_comment = false;
            }
            None => return Vec::new(),
        }
    }

    if state.inside_multiline_string {
        match after_multiline_string_end(line) {
            Some(rest) => {
                line = rest;
                state.inside_multiline_string = false;
            }
            None => return Vec::new(),
        }
    } else if let Some(opener) = multiline_string_opener(line) {
        line = &line[..opener];
        state.inside_multiline_string = true;
    }

    let line = strip_string_literals(line);

    let mut tokens = Vec::new();
    for word in line.split_whitespace() {
        if let Flow::SingleLineComment = tokenise(word, state, &mut tokens) {
            break;
        }
    }
    demote_contextual_open(&mut tokens);
    tokens
}

/// Lexes every line of a buffer from a fresh state
pub fn analyse_lines<I, S>(lines: I) -> Vec<Vec<Token>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = LexerState::new();
    lines
        .into_iter()
        .map(|line| analyse(line.as_ref(), &mut state))
        .collect()
}

fn tokenise(word: &str, state: &mut LexerState, tokens: &mut Vec<Token>) -> Flow {
    if !state.inside_multiline_comment {
        if let Some(character) = SingleCharacter::from_word(word) {
            push_token(Token::SingleCharacter(character), state, tokens);
            return Flow::Continue;
        }
        if let Some(keyword) = Keyword::from_word(word) {
            push_token(Token::Keyword(keyword), state, tokens);
            return Flow::Continue;
        }
    }
    read_by_characters(word, state, tokens)
}

/// Recovers tokens glued together inside one word, e.g. `foo{` or
/// `override/*`
fn read_by_characters(word: &str, state: &mut LexerState, tokens: &mut Vec<Token>) -> Flow {
    let mut rest = word;

    while !rest.is_empty() {
        if let Some(after) = after_multiline_comment_start(rest) {
            state.inside_multiline_comment = true;
            rest = after;
            continue;
        }

        if state.inside_multiline_comment {
            match after_multiline_comment_end(rest) {
                Some(after) => {
                    state.inside_multiline_comment = false;
                    rest = after;
                    continue;
                }
                None => return Flow::Continue,
            }
        }

        if is_single_line_comment(rest) {
            return Flow::SingleLineComment;
        }

        if let Some((token, length)) = read_token(rest) {
            push_token(token, state, tokens);
            rest = &rest[length..];
            continue;
        }

        // Unknown leading character; parentheses are only counted
        match rest.chars().next() {
            Some('(') => state.paren_depth += 1,
            Some(')') => state.paren_depth = state.paren_depth.saturating_sub(1),
            _ => {}
        }
        let skip = rest.chars().next().map_or(rest.len(), char::len_utf8);
        rest = &rest[skip..];
    }

    Flow::Continue
}

/// Keywords inside parentheses are labels or names, as in
/// `height(for row: Int)`. A brace starts a closure body, where keywords
/// count again.
fn push_token(token: Token, state: &mut LexerState, tokens: &mut Vec<Token>) {
    let token = match token {
        Token::Keyword(keyword) if state.paren_depth > 0 => {
            Token::Identifier(keyword.as_str().to_string())
        }
        token => token,
    };
    if token.is_character(SingleCharacter::BracketOpen)
        || token.is_character(SingleCharacter::BracketClose)
    {
        state.paren_depth = 0;
    }
    tokens.push(token);
}

/// `open` modifies a declaration only when a keyword or attribute follows it;
/// in `func open()` or `var open = false` it is the member's name.
fn demote_contextual_open(tokens: &mut [Token]) {
    for index in 0..tokens.len() {
        if !tokens[index].is_keyword(Keyword::Open) {
            continue;
        }
        let names_member = index > 0
            && matches!(
                tokens[index - 1].keyword(),
                Some(Keyword::Func | Keyword::Var | Keyword::Let | Keyword::Case)
            );
        let modifies = matches!(
            tokens.get(index + 1),
            Some(Token::Keyword(_) | Token::Attribute(_))
        );
        if names_member || !modifies {
            tokens[index] = Token::Identifier(Keyword::Open.as_str().to_string());
        }
    }
}

fn read_token(slice: &str) -> Option<(Token, usize)> {
    TOKEN_PATTERNS.iter().find_map(|(pattern, generator)| {
        let found = pattern.find(slice)?;
        if found.is_empty() {
            return None;
        }
        generator(found.as_str()).map(|token| (token, found.end()))
    })
}
