//! Nested scope tracking
//!
//! [`Structure`] is a stack of [`Declaration`] frames folded forward one line
//! at a time. It answers two questions for the line that follows: may an
//! access modifier be written here, and what access would a new member get
//! by default.

use std::fmt;

use tracing::trace;

use crate::{
    access::Access,
    lexer::{token::LOCAL_SCOPE_KEYWORDS, Keyword, SingleCharacter, Token},
};

/// One frame of the scope stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    /// Explicit access written on the line that opened the frame
    pub access: Option<Access>,
    /// `None` for a bare `{` block such as an `if` body or closure
    pub keyword: Option<Keyword>,
    pub open_brace: bool,
    /// Extension frame whose header declares a protocol conformance
    pub conformance: bool,
}

impl Declaration {
    pub fn new(keyword: Keyword, access: Option<Access>) -> Self {
        Self {
            access,
            keyword: Some(keyword),
            open_brace: false,
            conformance: false,
        }
    }

    fn anonymous_block(access: Option<Access>) -> Self {
        Self {
            access,
            keyword: None,
            open_brace: true,
            conformance: false,
        }
    }

    fn is_property(&self) -> bool {
        matches!(self.keyword, Some(Keyword::Var | Keyword::Let))
    }

    /// `var x = 1`: not a real scope, replaced by whatever comes next
    pub fn is_variable_without_closure(&self) -> bool {
        self.is_property() && !self.open_brace
    }

    /// `var x: Int {`: everything inside is local to the accessor
    pub fn is_variable_with_closure(&self) -> bool {
        self.is_property() && self.open_brace
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(access) = self.access {
            write!(f, "{access} ")?;
        }
        match self.keyword {
            Some(keyword) => write!(f, "{keyword}")?,
            None => f.write_str("block")?,
        }
        if self.conformance {
            f.write_str(":")?;
        }
        if self.open_brace {
            f.write_str(" {")?;
        }
        Ok(())
    }
}

/// The scope stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structure {
    declarations: Vec<Declaration>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Folds one line of tokens into the stack
    pub fn build(&mut self, tokens: &[Token]) {
        let mut line_access = None;

        for (index, token) in tokens.iter().enumerate() {
            match token {
                Token::Keyword(keyword) if keyword.is_access() => {
                    line_access = Access::from_keyword(*keyword);
                }
                Token::Keyword(keyword)
                    if keyword.is_structural() && !self.contains(Keyword::Protocol) =>
                {
                    // `bool(for: flag)` is an argument label, not a loop
                    if is_argument_label(&tokens[index + 1..]) {
                        continue;
                    }
                    // `} while done` closes a repeat loop
                    if *keyword == Keyword::While
                        && index > 0
                        && tokens[index - 1].is_character(SingleCharacter::BracketClose)
                    {
                        continue;
                    }
                    let mut declaration = Declaration::new(*keyword, line_access);
                    if *keyword == Keyword::Extension {
                        declaration.conformance = declares_conformance(&tokens[index + 1..]);
                    }
                    self.push(declaration);
                }
                Token::SingleCharacter(SingleCharacter::BracketOpen) => {
                    self.open_brace(line_access);
                }
                Token::SingleCharacter(SingleCharacter::BracketClose) => {
                    self.close_brace();
                }
                _ => {}
            }
        }

        trace!(structure = %self, "folded line");
    }

    fn push(&mut self, declaration: Declaration) {
        if self
            .declarations
            .last()
            .is_some_and(Declaration::is_variable_without_closure)
        {
            self.declarations.pop();
        }
        self.declarations.push(declaration);
    }

    fn open_brace(&mut self, access: Option<Access>) {
        match self.declarations.last_mut() {
            Some(last) if !last.open_brace => last.open_brace = true,
            _ => self.declarations.push(Declaration::anonymous_block(access)),
        }
    }

    /// Pops frames until one that owns an open brace has been removed
    fn close_brace(&mut self) {
        while let Some(last) = self.declarations.pop() {
            if last.open_brace {
                break;
            }
        }
    }

    pub fn open_structures(&self) -> usize {
        self.declarations.iter().filter(|d| d.open_brace).count()
    }

    pub fn contains(&self, keyword: Keyword) -> bool {
        self.declarations.iter().any(|d| d.keyword == Some(keyword))
    }

    pub fn contains_any(&self, keywords: &[Keyword]) -> bool {
        keywords.iter().any(|keyword| self.contains(*keyword))
    }

    pub fn contains_declaration(&self, declaration: &Declaration) -> bool {
        self.declarations.contains(declaration)
    }

    pub fn starts_with(&self, keyword: Keyword) -> bool {
        self.declarations
            .first()
            .is_some_and(|d| d.keyword == Some(keyword))
    }

    pub fn starts_with_declaration(&self, declaration: &Declaration) -> bool {
        self.declarations.first() == Some(declaration)
    }

    /// Effective access of the innermost frame
    pub fn current_level(&self) -> Access {
        if let Some(explicit) = self.declarations.last().and_then(|d| d.access) {
            return explicit;
        }
        self.declarations
            .iter()
            .rev()
            .find_map(|d| d.access)
            .map_or(Access::Internal, Access::clamped_to_internal)
    }

    /// Access a new member declared on the next line gets without a modifier.
    ///
    /// A trailing closure-less property is about to be replaced by that member,
    /// so its access does not count.
    pub fn member_level(&self) -> Access {
        let mut frames = self.declarations.as_slice();
        while let Some((last, rest)) = frames.split_last() {
            if !last.is_variable_without_closure() {
                break;
            }
            frames = rest;
        }
        frames
            .iter()
            .rev()
            .find_map(|d| d.access)
            .map_or(Access::Internal, Access::clamped_to_internal)
    }

    pub fn in_conformance_extension(&self) -> bool {
        self.declarations.iter().any(|d| d.conformance)
    }

    /// False inside any local scope or a property's accessor body
    pub fn allows_internal_access_control_modifiers(&self) -> bool {
        if self.contains_any(&LOCAL_SCOPE_KEYWORDS) {
            return false;
        }
        !self
            .declarations
            .iter()
            .any(Declaration::is_variable_with_closure)
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{declaration}")?;
        }
        f.write_str("]")
    }
}

fn is_argument_label(following: &[Token]) -> bool {
    following
        .first()
        .is_some_and(|token| token.is_character(SingleCharacter::Colon))
}

/// Whether the tokens after `extension` declare a conformance.
///
/// A `:` before the opening brace or a `where` clause marks one; the names
/// around it are not inspected, so `extension A.B: C, D` and generic
/// extensions are recognised too.
pub fn declares_conformance(after_extension: &[Token]) -> bool {
    for token in after_extension {
        match token {
            Token::SingleCharacter(SingleCharacter::Colon) => return true,
            Token::SingleCharacter(SingleCharacter::BracketOpen) => return false,
            Token::Identifier(word) if word == "where" => return false,
            _ => {}
        }
    }
    false
}

/// Whether a line opens an extension that declares a conformance
pub fn is_extension_with_conformance(tokens: &[Token]) -> bool {
    tokens
        .iter()
        .position(|token| token.is_keyword(Keyword::Extension))
        .is_some_and(|index| declares_conformance(&tokens[index + 1..]))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::analyse_lines;

    fn fold(lines: &[&str]) -> Structure {
        let mut structure = Structure::new();
        for tokens in analyse_lines(lines) {
            structure.build(&tokens);
        }
        structure
    }

    fn open(keyword: Keyword, access: Option<Access>) -> Declaration {
        Declaration {
            open_brace: true,
            ..Declaration::new(keyword, access)
        }
    }

    #[test]
    fn test_protocol_members_are_not_pushed() {
        let structure = fold(&[
            "protocol HighlightedCode {",
            "static func highlight(text: String) -> Self",
            "var whatever { get }",
            "var another { get set }",
        ]);
        assert_eq!(structure.declarations(), &[open(Keyword::Protocol, None)]);
        assert!(!structure.allows_internal_access_control_modifiers());
    }

    #[test]
    fn test_protocol_closes_cleanly() {
        let structure = fold(&[
            "protocol HighlightedCode {",
            "var whatever { get }",
            "var whatever { get }",
            "}",
        ]);
        assert!(structure.is_empty());
    }

    #[test]
    fn test_property_without_closure_collapses() {
        let structure = fold(&["public struct S {", "let a = 1", "private var b = 2"]);
        assert_eq!(
            structure.declarations(),
            &[
                open(Keyword::Struct, Some(Access::Public)),
                Declaration::new(Keyword::Var, Some(Access::Private)),
            ]
        );
        assert!(structure.allows_internal_access_control_modifiers());
    }

    #[test]
    fn test_close_brace_pops_through_stale_frames() {
        let structure = fold(&["class A {", "func f() {", "let x = 1", "}"]);
        assert_eq!(structure.declarations(), &[open(Keyword::Class, None)]);
    }

    #[test]
    fn test_close_brace_on_empty_stack() {
        let structure = fold(&["}", "}"]);
        assert!(structure.is_empty());
    }

    #[test]
    fn test_bare_block_gets_anonymous_frame() {
        let structure = fold(&["func f() {", "if ready {"]);
        assert_eq!(structure.open_structures(), 2);
        assert_eq!(structure.declarations()[1].keyword, None);
    }

    #[test]
    fn test_computed_property_is_local() {
        let structure = fold(&["var total: Int {"]);
        assert!(!structure.allows_internal_access_control_modifiers());
        assert!(structure.starts_with(Keyword::Var));
        assert!(structure.starts_with_declaration(&open(Keyword::Var, None)));
    }

    #[test]
    fn test_local_scope_keywords() {
        for header in ["func f() {", "init() {", "for x in xs {", "do {", "subscript(i: Int) -> Int {"] {
            let structure = fold(&[header]);
            assert!(
                !structure.allows_internal_access_control_modifiers(),
                "{header} should be local"
            );
        }
        assert!(fold(&["enum E {"]).allows_internal_access_control_modifiers());
    }

    #[test]
    fn test_argument_label_is_not_a_scope() {
        let structure = fold(&["class A {", "let flag = Preference.bool(for: .always)"]);
        assert!(!structure.contains(Keyword::For));
        assert!(structure.contains_any(&[Keyword::For, Keyword::Let]));
    }

    #[test]
    fn test_repeat_while_tail_is_not_a_loop() {
        let structure = fold(&["repeat {", "step()", "} while running"]);
        assert!(structure.is_empty());
        assert!(structure.allows_internal_access_control_modifiers());
    }

    #[test]
    fn test_current_level() {
        assert_eq!(Structure::new().current_level(), Access::Internal);
        assert_eq!(fold(&["private struct S {"]).current_level(), Access::Private);
        assert_eq!(
            fold(&["public struct S {", "var x: Int {"]).current_level(),
            Access::Internal
        );
        assert_eq!(
            fold(&["public struct S {", "fileprivate var x: Int {"]).current_level(),
            Access::Fileprivate
        );
    }

    #[test]
    fn test_member_level_ignores_trailing_property() {
        let structure = fold(&["struct S {", "private let a = 1"]);
        assert_eq!(structure.current_level(), Access::Private);
        assert_eq!(structure.member_level(), Access::Internal);
        assert_eq!(fold(&["public class C {"]).member_level(), Access::Internal);
        assert_eq!(fold(&["private class C {"]).member_level(), Access::Private);
    }

    #[test]
    fn test_conformance_detection() {
        let lex = |line: &str| analyse_lines([line]).remove(0);
        assert!(is_extension_with_conformance(&lex("extension Foo: Bar {")));
        assert!(is_extension_with_conformance(&lex("extension Foo: A, B {")));
        assert!(is_extension_with_conformance(&lex("extension Foo.Bar: Baz {")));
        assert!(is_extension_with_conformance(&lex("extension Array: Foo where Element: Bar {")));
        assert!(!is_extension_with_conformance(&lex("extension Foo {")));
        assert!(!is_extension_with_conformance(&lex("extension Foo where T: Equatable {")));
        assert!(!is_extension_with_conformance(&lex("struct Foo: Bar {")));
    }

    #[test]
    fn test_conformance_frame() {
        let structure = fold(&["extension Foo: Bar {", "func g() {}"]);
        assert!(structure.in_conformance_extension());
        assert!(structure.contains_declaration(&Declaration {
            conformance: true,
            ..open(Keyword::Extension, None)
        }));
        assert!(!fold(&["extension Foo {"]).in_conformance_extension());
    }

    #[test]
    fn test_display() {
        let structure = fold(&["public class A {", "var x = 1"]);
        assert_eq!(structure.to_string(), "[public class {, var]");
    }
}
