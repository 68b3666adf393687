//! Token model for the line lexer
//!
//! The lexer only needs to recognise the handful of words and characters that
//! decide where a declaration starts and which access modifier it carries, so
//! every category here is a closed set resolved through literal lookup.

use std::fmt;

/// A single lexical unit produced for one line of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `@IBOutlet`, `@objc`, `@available` ...
    Attribute(String),
    Keyword(Keyword),
    SingleCharacter(SingleCharacter),
    /// Any other alphanumeric run, including numbers and `.init`
    Identifier(String),
}

impl Token {
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Token::Keyword(keyword) => Some(*keyword),
            _ => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    pub fn is_character(&self, character: SingleCharacter) -> bool {
        matches!(self, Token::SingleCharacter(c) if *c == character)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Attribute(attribute) => write!(f, "{attribute}"),
            Token::Keyword(keyword) => write!(f, "{keyword}"),
            Token::SingleCharacter(character) => write!(f, "{character}"),
            Token::Identifier(identifier) => write!(f, "{identifier}"),
        }
    }
}

/// Punctuation the scope tracker and classifier care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SingleCharacter {
    BracketOpen,
    BracketClose,
    Colon,
    Equals,
}

impl SingleCharacter {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '{' => Some(SingleCharacter::BracketOpen),
            '}' => Some(SingleCharacter::BracketClose),
            ':' => Some(SingleCharacter::Colon),
            '=' => Some(SingleCharacter::Equals),
            _ => None,
        }
    }

    /// Matches a whole word that consists of exactly one known character
    pub fn from_word(word: &str) -> Option<Self> {
        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            SingleCharacter::BracketOpen => '{',
            SingleCharacter::BracketClose => '}',
            SingleCharacter::Colon => ':',
            SingleCharacter::Equals => '=',
        }
    }
}

impl fmt::Display for SingleCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Swift words recognised by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Protocol,
    Extension,
    Struct,
    Class,
    Let,
    Var,
    Public,
    Private,
    Open,
    Fileprivate,
    Internal,
    Override,
    Func,
    Final,
    Enum,
    Case,
    Init,
    Static,
    Typealias,
    Required,
    Mutating,
    Nonmutating,
    For,
    While,
    Repeat,
    Unowned,
    UnownedSafe,
    UnownedUnsafe,
    Convenience,
    Do,
    Catch,
    Defer,
    Subscript,
    Prefix,
    Postfix,
    Infix,
    Lazy,
    Weak,
    PrivateSet,
    FileprivateSet,
    InternalSet,
}

impl Keyword {
    pub const ALL: [Keyword; 41] = [
        Keyword::Protocol,
        Keyword::Extension,
        Keyword::Struct,
        Keyword::Class,
        Keyword::Let,
        Keyword::Var,
        Keyword::Public,
        Keyword::Private,
        Keyword::Open,
        Keyword::Fileprivate,
        Keyword::Internal,
        Keyword::Override,
        Keyword::Func,
        Keyword::Final,
        Keyword::Enum,
        Keyword::Case,
        Keyword::Init,
        Keyword::Static,
        Keyword::Typealias,
        Keyword::Required,
        Keyword::Mutating,
        Keyword::Nonmutating,
        Keyword::For,
        Keyword::While,
        Keyword::Repeat,
        Keyword::Unowned,
        Keyword::UnownedSafe,
        Keyword::UnownedUnsafe,
        Keyword::Convenience,
        Keyword::Do,
        Keyword::Catch,
        Keyword::Defer,
        Keyword::Subscript,
        Keyword::Prefix,
        Keyword::Postfix,
        Keyword::Infix,
        Keyword::Lazy,
        Keyword::Weak,
        Keyword::PrivateSet,
        Keyword::FileprivateSet,
        Keyword::InternalSet,
    ];

    /// Literal spelling of the keyword in Swift source
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Protocol => "protocol",
            Keyword::Extension => "extension",
            Keyword::Struct => "struct",
            Keyword::Class => "class",
            Keyword::Let => "let",
            Keyword::Var => "var",
            Keyword::Public => "public",
            Keyword::Private => "private",
            Keyword::Open => "open",
            Keyword::Fileprivate => "fileprivate",
            Keyword::Internal => "internal",
            Keyword::Override => "override",
            Keyword::Func => "func",
            Keyword::Final => "final",
            Keyword::Enum => "enum",
            Keyword::Case => "case",
            Keyword::Init => "init",
            Keyword::Static => "static",
            Keyword::Typealias => "typealias",
            Keyword::Required => "required",
            Keyword::Mutating => "mutating",
            Keyword::Nonmutating => "nonmutating",
            Keyword::For => "for",
            Keyword::While => "while",
            Keyword::Repeat => "repeat",
            Keyword::Unowned => "unowned",
            Keyword::UnownedSafe => "unowned(safe)",
            Keyword::UnownedUnsafe => "unowned(unsafe)",
            Keyword::Convenience => "convenience",
            Keyword::Do => "do",
            Keyword::Catch => "catch",
            Keyword::Defer => "defer",
            Keyword::Subscript => "subscript",
            Keyword::Prefix => "prefix",
            Keyword::Postfix => "postfix",
            Keyword::Infix => "infix",
            Keyword::Lazy => "lazy",
            Keyword::Weak => "weak",
            Keyword::PrivateSet => "private(set)",
            Keyword::FileprivateSet => "fileprivate(set)",
            Keyword::InternalSet => "internal(set)",
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.as_str() == word)
    }

    /// Keywords that open a nested declaration scope
    pub fn is_structural(self) -> bool {
        STRUCTURE_KEYWORDS.contains(&self)
    }

    /// Keywords whose scope makes every nested declaration local
    pub fn is_local_scope(self) -> bool {
        LOCAL_SCOPE_KEYWORDS.contains(&self)
    }

    pub fn is_access(self) -> bool {
        ACCESS_KEYWORDS.contains(&self)
    }

    pub fn is_setter_access(self) -> bool {
        SETTER_ACCESS_KEYWORDS.contains(&self)
    }

    /// Modifiers after which a new access keyword is inserted, never before
    pub fn is_postfixable(self) -> bool {
        POSTFIXABLE_KEYWORDS.contains(&self)
    }

    /// Keywords that can never start a line carrying an access modifier
    pub fn is_non_access_modifiable(self) -> bool {
        NON_ACCESS_MODIFIABLE_KEYWORDS.contains(&self)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const NON_ACCESS_MODIFIABLE_KEYWORDS: [Keyword; 7] = [
    Keyword::Case,
    Keyword::For,
    Keyword::While,
    Keyword::Repeat,
    Keyword::Do,
    Keyword::Catch,
    Keyword::Defer,
];

pub const LOCAL_SCOPE_KEYWORDS: [Keyword; 10] = [
    Keyword::Func,
    Keyword::Init,
    Keyword::For,
    Keyword::While,
    Keyword::Repeat,
    Keyword::Protocol,
    Keyword::Do,
    Keyword::Catch,
    Keyword::Defer,
    Keyword::Subscript,
];

pub const STRUCTURE_KEYWORDS: [Keyword; 16] = [
    Keyword::Protocol,
    Keyword::Class,
    Keyword::Struct,
    Keyword::Enum,
    Keyword::Extension,
    Keyword::Func,
    Keyword::Init,
    Keyword::Var,
    Keyword::Let,
    Keyword::For,
    Keyword::While,
    Keyword::Repeat,
    Keyword::Do,
    Keyword::Catch,
    Keyword::Defer,
    Keyword::Subscript,
];

pub const ACCESS_KEYWORDS: [Keyword; 5] = [
    Keyword::Public,
    Keyword::Private,
    Keyword::Fileprivate,
    Keyword::Internal,
    Keyword::Open,
];

pub const SETTER_ACCESS_KEYWORDS: [Keyword; 3] = [
    Keyword::PrivateSet,
    Keyword::FileprivateSet,
    Keyword::InternalSet,
];

pub const POSTFIXABLE_KEYWORDS: [Keyword; 6] = [
    Keyword::Static,
    Keyword::Unowned,
    Keyword::UnownedSafe,
    Keyword::UnownedUnsafe,
    Keyword::Required,
    Keyword::Convenience,
];
