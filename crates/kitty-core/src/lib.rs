//! # Kitty Core
//!
//! Rewrites Swift access-control modifiers line by line, without a Swift
//! parser:
//! - a line lexer that only recognises declaration and access keywords
//! - a scope tracker that folds braces and declarations into a stack
//! - a classifier, resolver and text editor that turn a requested change into
//!   replacement lines
//!
//! The engine never fails on odd input; anything it cannot place is left
//! untouched. Hosts (editor extensions, the `kitty` command line) supply the
//! buffer, the selected line numbers and an [`AccessChange`].

#![warn(clippy::all)]

pub mod access;
pub mod classifier;
pub mod editor;
pub mod lexer;
pub mod resolver;
pub mod rewriter;
pub mod structure;

pub use access::{Access, AccessChange, ParseAccessError};
pub use classifier::{classify, Classification, LineChange};
pub use lexer::{analyse, analyse_lines, Keyword, LexerState, SingleCharacter, Token};
pub use resolver::{resolve, resolve_setter, Resolution, SetterEdit};
pub use rewriter::{rewrite, Rewriter};
pub use structure::{Declaration, Structure};

use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Kitty version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for kitty components at `info`
pub fn init_tracing() {
    init_tracing_with_level(LevelFilter::INFO);
}

/// Initialize tracing with `kitty` targets at `level`; other targets follow
/// `RUST_LOG`
pub fn init_tracing_with_level(level: LevelFilter) {
    let mut filter = EnvFilter::from_default_env();
    for target in ["kitty_core", "kitty_cli", "kitty"] {
        if let Ok(directive) = format!("{target}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
