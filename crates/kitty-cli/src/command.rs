//! Command identifiers
//!
//! Editors invoke the extension with identifiers of the form
//! `<bundle identifier>.<command name>`. Only the command name matters here.

use kitty_core::{Access, AccessChange};

/// Every command the extension exposes, by name
pub const COMMANDS: [(&str, AccessChange); 9] = [
    ("DecreaseAccess", AccessChange::DecreaseAccess),
    ("IncreaseAccess", AccessChange::IncreaseAccess),
    ("MakeAPI", AccessChange::MakeAPI),
    ("RemoveAPI", AccessChange::RemoveAPI),
    ("MakePublic", AccessChange::SetLevel(Access::Public)),
    ("MakeInternal", AccessChange::SetLevel(Access::Internal)),
    ("MakePrivate", AccessChange::SetLevel(Access::Private)),
    ("MakeFileprivate", AccessChange::SetLevel(Access::Fileprivate)),
    ("Remove", AccessChange::SetLevel(Access::Remove)),
];

/// Resolves a command identifier to the change it requests.
///
/// The identifier may be fully qualified with `bundle_prefix` or a bare
/// command name. Anything else resolves to `None`.
pub fn access_change(identifier: &str, bundle_prefix: &str) -> Option<AccessChange> {
    let name = identifier
        .strip_prefix(bundle_prefix)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(identifier);

    COMMANDS
        .iter()
        .find(|(command, _)| *command == name)
        .map(|(_, change)| *change)
}

/// The fully qualified identifier for `name`
pub fn identifier(bundle_prefix: &str, name: &str) -> String {
    format!("{bundle_prefix}.{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "com.accesskitty.Extension";

    #[test]
    fn test_qualified_identifiers() {
        assert_eq!(
            access_change("com.accesskitty.Extension.MakeAPI", PREFIX),
            Some(AccessChange::MakeAPI)
        );
        assert_eq!(
            access_change("com.accesskitty.Extension.Remove", PREFIX),
            Some(AccessChange::SetLevel(Access::Remove))
        );
        for (name, change) in COMMANDS {
            assert_eq!(access_change(&identifier(PREFIX, name), PREFIX), Some(change));
        }
    }

    #[test]
    fn test_bare_names() {
        assert_eq!(access_change("MakePrivate", PREFIX), Some(AccessChange::SetLevel(Access::Private)));
        assert_eq!(access_change("IncreaseAccess", PREFIX), Some(AccessChange::IncreaseAccess));
    }

    #[test]
    fn test_unknown_identifiers_fail_closed() {
        assert_eq!(access_change("com.accesskitty.Extension.MakeOpen", PREFIX), None);
        assert_eq!(access_change("com.other.Extension.Lowercase", PREFIX), None);
        assert_eq!(access_change("makepublic", PREFIX), None);
        assert_eq!(access_change("", PREFIX), None);
    }
}
