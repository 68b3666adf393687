//! Access levels and the operations that move between them

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::lexer::Keyword;

/// A Swift access level, or the request to drop the modifier entirely.
///
/// `Internal` and `Remove` share a rank: writing `internal` and writing
/// nothing mean the same thing to the compiler. The ordering is exposed
/// through [`Access::rank`] rather than `Ord` so the two stay distinct values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Private,
    Fileprivate,
    Internal,
    Remove,
    Public,
    Open,
}

impl Access {
    pub fn rank(self) -> i8 {
        match self {
            Access::Private => -2,
            Access::Fileprivate => -1,
            Access::Internal | Access::Remove => 0,
            Access::Public => 1,
            Access::Open => 2,
        }
    }

    /// Keyword spelling of the level
    pub fn keyword_spelling(self) -> &'static str {
        match self {
            Access::Private => "private",
            Access::Fileprivate => "fileprivate",
            Access::Internal => "internal",
            Access::Remove => "",
            Access::Public => "public",
            Access::Open => "open",
        }
    }

    /// Text written into the source for this level; implicit internal is
    /// spelled as nothing at all
    pub fn substitution(self) -> &'static str {
        match self {
            Access::Internal | Access::Remove => "",
            other => other.keyword_spelling(),
        }
    }

    /// `private(set)` style spelling, for levels a setter can carry
    pub fn setter_spelling(self) -> Option<&'static str> {
        match self {
            Access::Private => Some(Keyword::PrivateSet.as_str()),
            Access::Fileprivate => Some(Keyword::FileprivateSet.as_str()),
            Access::Internal | Access::Remove => Some(Keyword::InternalSet.as_str()),
            Access::Public | Access::Open => None,
        }
    }

    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Private => Some(Access::Private),
            Keyword::Fileprivate => Some(Access::Fileprivate),
            Keyword::Internal => Some(Access::Internal),
            Keyword::Public => Some(Access::Public),
            Keyword::Open => Some(Access::Open),
            _ => None,
        }
    }

    /// Level carried by a `private(set)` style keyword
    pub fn from_setter_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::PrivateSet => Some(Access::Private),
            Keyword::FileprivateSet => Some(Access::Fileprivate),
            Keyword::InternalSet => Some(Access::Internal),
            _ => None,
        }
    }

    pub fn is_at_least(self, other: Access) -> bool {
        self.rank() >= other.rank()
    }

    pub fn min_by_rank(self, other: Access) -> Access {
        if other.rank() < self.rank() {
            other
        } else {
            self
        }
    }

    /// Members never inherit more than internal from their enclosing type
    pub fn clamped_to_internal(self) -> Access {
        self.min_by_rank(Access::Internal)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Remove => f.write_str("(none)"),
            other => f.write_str(other.keyword_spelling()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown access level: {0:?}")]
pub struct ParseAccessError(pub String);

impl FromStr for Access {
    type Err = ParseAccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(Access::Private),
            "fileprivate" => Ok(Access::Fileprivate),
            "internal" => Ok(Access::Internal),
            "" | "remove" | "none" => Ok(Access::Remove),
            "public" => Ok(Access::Public),
            "open" => Ok(Access::Open),
            _ => Err(ParseAccessError(s.to_string())),
        }
    }
}

/// Operation requested for a batch of lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessChange {
    SetLevel(Access),
    IncreaseAccess,
    DecreaseAccess,
    /// Promote implicit or explicit internal members to public
    #[serde(rename = "make_api")]
    MakeAPI,
    /// Demote public members to implicit internal
    #[serde(rename = "remove_api")]
    RemoveAPI,
}

impl fmt::Display for AccessChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessChange::SetLevel(level) => write!(f, "set level {level}"),
            AccessChange::IncreaseAccess => f.write_str("increase access"),
            AccessChange::DecreaseAccess => f.write_str("decrease access"),
            AccessChange::MakeAPI => f.write_str("make API"),
            AccessChange::RemoveAPI => f.write_str("remove API"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        assert!(Access::Private.rank() < Access::Fileprivate.rank());
        assert!(Access::Fileprivate.rank() < Access::Internal.rank());
        assert_eq!(Access::Internal.rank(), Access::Remove.rank());
        assert!(Access::Public.rank() < Access::Open.rank());
    }

    #[test]
    fn test_clamp_to_internal() {
        assert_eq!(Access::Public.clamped_to_internal(), Access::Internal);
        assert_eq!(Access::Open.clamped_to_internal(), Access::Internal);
        assert_eq!(Access::Private.clamped_to_internal(), Access::Private);
    }

    #[test]
    fn test_parse() {
        assert_eq!("public".parse::<Access>(), Ok(Access::Public));
        assert_eq!("Fileprivate".parse::<Access>(), Ok(Access::Fileprivate));
        assert_eq!("".parse::<Access>(), Ok(Access::Remove));
        assert_eq!(
            "protected".parse::<Access>(),
            Err(ParseAccessError("protected".to_string()))
        );
    }

    #[test]
    fn test_spellings() {
        assert_eq!(Access::Internal.substitution(), "");
        assert_eq!(Access::Open.substitution(), "open");
        assert_eq!(Access::Fileprivate.setter_spelling(), Some("fileprivate(set)"));
        assert_eq!(Access::Public.setter_spelling(), None);
        assert_eq!(Access::from_setter_keyword(Keyword::PrivateSet), Some(Access::Private));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&AccessChange::SetLevel(Access::Public)).unwrap();
        assert_eq!(json, r#"{"set_level":"public"}"#);
        let back: AccessChange = serde_json::from_str(r#""make_api""#).unwrap();
        assert_eq!(back, AccessChange::MakeAPI);
    }
}
