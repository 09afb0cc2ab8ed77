//! Operations and the capability flags that permit them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation an actor can attempt against a page.
///
/// This is a closed enum on purpose. The alternative — dispatching on
/// action name strings — turns every typo into a silent deny; here an
/// unrecognized operation cannot be constructed at all, and the mapping
/// to capability flags is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// List or read content on the page.
    View,
    /// Attach new content to the page.
    Create,
    /// Modify existing content on the page.
    Edit,
    /// Remove content from the page.
    Delete,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Operation; 4] = [
        Operation::View,
        Operation::Create,
        Operation::Edit,
        Operation::Delete,
    ];

    /// Returns `true` if the operation mutates existing content.
    ///
    /// Only mutations of existing content are subject to audit capture.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Operation::Edit | Operation::Delete)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View => write!(f, "view"),
            Self::Create => write!(f, "create"),
            Self::Edit => write!(f, "edit"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// The four independent capability flags one actor holds on one page.
///
/// There is no hierarchy and no implication between flags: `can_delete`
/// does not imply `can_view`. Absence of a grant means all four are off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    /// May list and read content.
    pub can_view: bool,
    /// May attach new content.
    pub can_create: bool,
    /// May modify existing content.
    pub can_edit: bool,
    /// May remove content.
    pub can_delete: bool,
}

impl CapabilitySet {
    /// All flags off. Equivalent to holding no grant at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// All flags on.
    pub fn all() -> Self {
        Self {
            can_view: true,
            can_create: true,
            can_edit: true,
            can_delete: true,
        }
    }

    /// Read-only: `can_view` only.
    pub fn read_only() -> Self {
        Self::none().with(Operation::View)
    }

    /// Returns a copy with the flag for `op` switched on.
    #[must_use]
    pub fn with(mut self, op: Operation) -> Self {
        match op {
            Operation::View => self.can_view = true,
            Operation::Create => self.can_create = true,
            Operation::Edit => self.can_edit = true,
            Operation::Delete => self.can_delete = true,
        }
        self
    }

    /// The exhaustive operation-to-flag mapping.
    pub fn allows(&self, op: Operation) -> bool {
        match op {
            Operation::View => self.can_view,
            Operation::Create => self.can_create,
            Operation::Edit => self.can_edit,
            Operation::Delete => self.can_delete,
        }
    }

    /// Returns `true` if every flag is off.
    pub fn is_none(&self) -> bool {
        !self.can_view && !self.can_create && !self.can_edit && !self.can_delete
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut granted = Operation::ALL.iter().filter(|op| self.allows(**op));
        match granted.next() {
            None => write!(f, "(none)"),
            Some(first) => {
                write!(f, "{first}")?;
                for op in granted {
                    write!(f, "+{op}")?;
                }
                Ok(())
            }
        }
    }
}
