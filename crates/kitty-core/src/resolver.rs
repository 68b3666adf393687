//! Rewrite resolution: what access a line moves to under a requested change

use crate::access::{Access, AccessChange};

/// A resolved primary edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Access the declaration ends up with
    pub target: Access,
    /// Text written in place of, or next to, the anchor
    pub replacement: &'static str,
}

/// Resolves the primary edit for a line whose current access is `current`.
///
/// `None` means the change does not apply to this line.
pub fn resolve(change: AccessChange, current: Access) -> Option<Resolution> {
    let target = match change {
        AccessChange::SetLevel(level) => Some(level),
        relative => step(relative, current),
    }?;
    Some(Resolution {
        target,
        replacement: target.substitution(),
    })
}

/// One step of a relative change from `current`.
///
/// Every level is matched explicitly; `SetLevel` has no relative meaning and
/// never steps.
pub fn step(change: AccessChange, current: Access) -> Option<Access> {
    use Access::*;

    match change {
        AccessChange::SetLevel(_) => None,
        AccessChange::MakeAPI => match current {
            Internal | Remove => Some(Public),
            Private | Fileprivate | Public | Open => None,
        },
        AccessChange::RemoveAPI => match current {
            Public => Some(Internal),
            Private | Fileprivate | Internal | Remove | Open => None,
        },
        AccessChange::IncreaseAccess => match current {
            Private | Fileprivate => Some(Internal),
            Internal | Remove => Some(Public),
            Public | Open => None,
        },
        AccessChange::DecreaseAccess => match current {
            Open => Some(Public),
            Public => Some(Internal),
            Internal | Remove | Fileprivate => Some(Private),
            Private => None,
        },
    }
}

/// What happens to a `private(set)` style annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterEdit {
    Keep,
    Remove,
    Replace(Access),
}

/// Resolves the setter annotation after the declaration moved to
/// `declared`.
///
/// Setting an explicit level always drops the annotation. Under a relative
/// change the setter steps the same way, never above internal, and is dropped
/// once it reaches the declaration's own level.
pub fn resolve_setter(change: AccessChange, setter: Access, declared: Access) -> SetterEdit {
    if let AccessChange::SetLevel(_) = change {
        return SetterEdit::Remove;
    }

    let stepped = step(change, setter)
        .unwrap_or(setter)
        .clamped_to_internal();

    if stepped.is_at_least(declared.clamped_to_internal()) {
        SetterEdit::Remove
    } else if stepped.rank() != setter.rank() {
        SetterEdit::Replace(stepped)
    } else {
        SetterEdit::Keep
    }
}
