//! Line classification
//!
//! Decides, for one line and the scope it sits in, whether an access modifier
//! may be written there and where the edit would go.

use tracing::trace;

use crate::{
    access::Access,
    lexer::Token,
    structure::{is_extension_with_conformance, Structure},
};

/// Where and how a line's access modifier is edited. The string is the anchor:
/// the literal text in the line the edit is positioned against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChange {
    None,
    /// Insert before the anchor: `func` → `public func`
    Prefix(String),
    /// Insert after the anchor: `static` → `static public`
    Postfix(String),
    /// Replace the anchor, an existing access keyword
    Substitute(String),
    /// Replace the declared access keyword; the line also carries a setter
    /// annotation of the given level
    SetterSubstitute(Access, String),
    /// Insert after the setter annotation, which is the anchor
    SetterPostfix(Access, String),
}

impl LineChange {
    pub fn anchor(&self) -> Option<&str> {
        match self {
            LineChange::None => None,
            LineChange::Prefix(anchor)
            | LineChange::Postfix(anchor)
            | LineChange::Substitute(anchor)
            | LineChange::SetterSubstitute(_, anchor)
            | LineChange::SetterPostfix(_, anchor) => Some(anchor),
        }
    }

    /// Access of the line's `private(set)` style annotation
    pub fn setter_access(&self) -> Option<Access> {
        match self {
            LineChange::SetterSubstitute(setter, _) | LineChange::SetterPostfix(setter, _) => {
                Some(*setter)
            }
            _ => None,
        }
    }
}

/// Result of classifying one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub change: LineChange,
    pub eligible: bool,
    /// Access the line has before any edit
    pub current: Access,
}

/// Classifies `tokens` against the incoming scope, then folds them into it
pub fn classify(tokens: &[Token], structure: &mut Structure) -> Classification {
    let mut eligible = structure.allows_internal_access_control_modifiers();

    if tokens.first().is_some_and(|first| !modifiable_in_first_position(first)) {
        eligible = false;
    }
    if structure.in_conformance_extension() {
        eligible = false;
    }

    let change = line_change(tokens);
    let current = first_access(tokens).unwrap_or_else(|| structure.member_level());

    structure.build(tokens);

    if is_extension_with_conformance(tokens) {
        eligible = false;
    }

    trace!(?change, eligible, %current, "classified line");

    Classification {
        change,
        eligible,
        current,
    }
}

/// Single characters, identifiers and control-flow keywords never start a
/// declaration
fn modifiable_in_first_position(token: &Token) -> bool {
    match token {
        Token::SingleCharacter(_) | Token::Identifier(_) => false,
        Token::Keyword(keyword) => !keyword.is_non_access_modifiable(),
        Token::Attribute(_) => true,
    }
}

fn first_access(tokens: &[Token]) -> Option<Access> {
    tokens
        .iter()
        .filter_map(Token::keyword)
        .find_map(Access::from_keyword)
}

fn line_change(tokens: &[Token]) -> LineChange {
    let Some(first) = tokens.first() else {
        return LineChange::None;
    };

    let plain_access = tokens
        .iter()
        .filter_map(Token::keyword)
        .find(|keyword| keyword.is_access());

    let setter = tokens
        .iter()
        .filter_map(Token::keyword)
        .find(|keyword| keyword.is_setter_access());

    if let Some(setter) = setter {
        let setter_access = Access::from_setter_keyword(setter).unwrap_or(Access::Internal);
        return match plain_access {
            Some(access) => LineChange::SetterSubstitute(setter_access, access.to_string()),
            None => LineChange::SetterPostfix(setter_access, setter.to_string()),
        };
    }

    if let Some(access) = plain_access {
        return LineChange::Substitute(access.to_string());
    }

    match first {
        Token::Keyword(keyword) if keyword.is_postfixable() => {
            LineChange::Postfix(keyword.to_string())
        }
        Token::Attribute(attribute) => {
            if tokens[1..].iter().any(|token| token.keyword().is_some()) {
                LineChange::Postfix(attribute.clone())
            } else {
                // `@available(...)` or `@objc` alone on its line
                LineChange::None
            }
        }
        Token::Keyword(keyword) if !keyword.is_non_access_modifiable() => {
            LineChange::Prefix(keyword.to_string())
        }
        _ => LineChange::None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexer::analyse_lines;

    fn classify_all(lines: &[&str]) -> Vec<Classification> {
        let mut structure = Structure::new();
        analyse_lines(lines)
            .iter()
            .map(|tokens| classify(tokens, &mut structure))
            .collect()
    }

    fn eligibility(lines: &[&str]) -> Vec<bool> {
        classify_all(lines).iter().map(|c| c.eligible).collect()
    }

    fn change_of(line: &str) -> LineChange {
        classify_all(&[line]).remove(0).change
    }

    #[test]
    fn test_class_with_method_body() {
        let lines = [
            "final class ViewController: NSViewController {",
            " @IBOutlet var textView: NSTextView!",
            "override func viewDidLoad() {",
            "super.viewDidLoad()",
            "let strings: [Highlight<NSAttributedString>] = markdown()",
            "let result = strings.map { $0.rendered }.join(separator: \"/\")",
            "textView.textStorage!.setAttributedString(result)",
            "}",
            "}",
        ];
        assert_eq!(
            eligibility(&lines),
            vec![true, true, true, false, false, false, false, false, false]
        );
    }

    #[test]
    fn test_enum_with_failable_init() {
        let lines = [
            "enum Kind: Int {",
            " case keyword",
            "case string",
            "case other",
            " init?(sourceKitType type: String) {",
            " switch type {",
            "case \"source.lang.swift.syntaxtype.keyword\": self = .keyword",
            " case \"source.lang.swift.syntaxtype.string\": self = .string",
            " default: self = .other",
            " }",
            " }",
            " }",
        ];
        assert_eq!(
            eligibility(&lines),
            vec![true, false, false, false, true, false, false, false, false, false, false, false]
        );
    }

    #[test]
    fn test_function_body_is_local() {
        let lines = [
            "func highlightSyntax(code: String) throws -> [(Range<String.Index>, Kind)] {",
            "let tempDir = NSURL(fileURLWithPath: NSTemporaryDirectory())",
            "try! code.write(to: tmpFile, atomically: true, encoding: .utf8)]",
        ];
        assert_eq!(eligibility(&lines), vec![true, false, false]);
    }

    #[test]
    fn test_protocol_requirements_are_ineligible() {
        let lines = [
            "protocol HighlightedCode {",
            "static func highlight(text: String, tokens: [(Range<String.Index>, Kind)]) -> Self",
            "var whatever { get }",
            "var another { get set }",
            "}",
        ];
        assert_eq!(eligibility(&lines), vec![true, false, false, false, false]);
    }

    #[test]
    fn test_conformance_extension_blocks_members() {
        let lines = [
            "extension NSAttributedString: Block {",
            "static func paragraph(text: String) -> Self {",
            "return .init(string: text)",
            "}",
            "}",
            "extension NSAttributedString {",
            "static func plain(text: String) -> Self {",
        ];
        assert_eq!(
            eligibility(&lines),
            vec![false, false, false, false, false, true, true]
        );
    }

    #[test]
    fn test_empty_line_is_eligible_without_change() {
        let classified = classify_all(&["", "   "]);
        assert!(classified.iter().all(|c| c.eligible && c.change == LineChange::None));
    }

    #[test]
    fn test_change_kinds() {
        assert_eq!(change_of("final class Foo {"), LineChange::Prefix("final".into()));
        assert_eq!(change_of("static var x = 1"), LineChange::Postfix("static".into()));
        assert_eq!(change_of("static private func f()"), LineChange::Substitute("private".into()));
        assert_eq!(
            change_of("@IBOutlet private var thing: UISwitch"),
            LineChange::Substitute("private".into())
        );
        assert_eq!(
            change_of("@IBOutlet var thing: UISwitch"),
            LineChange::Postfix("@IBOutlet".into())
        );
        assert_eq!(change_of("@available(*, unavailable)"), LineChange::None);
        assert_eq!(change_of("unowned(safe) let owner"), LineChange::Postfix("unowned(safe)".into()));
        assert_eq!(change_of("let x = y"), LineChange::Prefix("let".into()));
        assert_eq!(change_of("case a"), LineChange::None);
        assert_eq!(change_of("x = 1"), LineChange::None);
    }

    #[test]
    fn test_setter_changes() {
        assert_eq!(
            change_of("private(set) var count: Int"),
            LineChange::SetterPostfix(Access::Private, "private(set)".into())
        );
        assert_eq!(
            change_of("public fileprivate(set) var count: Int"),
            LineChange::SetterSubstitute(Access::Fileprivate, "public".into())
        );
    }

    #[test]
    fn test_current_access() {
        let classified = classify_all(&["public struct S {", "let a = 1", "private let b = 2", "let c = 3"]);
        let current: Vec<Access> = classified.iter().map(|c| c.current).collect();
        assert_eq!(
            current,
            vec![Access::Public, Access::Internal, Access::Private, Access::Internal]
        );
    }
}
