//! Per-field access policy resolution.

use std::fmt;

use clap::ValueEnum;

/// One generated accessor routine kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    /// Read accessor.
    Getter,
    /// Write accessor.
    Setter,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Getter => "getter",
            Self::Setter => "setter",
        })
    }
}

/// The set of operations one field is eligible for.
///
/// An annotated field carries the full policy and defers the actual
/// selection to the generation request. An un-annotated field is inferred
/// from its identifier casing: an upper-case-led name is offered both
/// operations, a lower-case-led name is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    getter: bool,
    setter: bool,
}

impl AccessPolicy {
    /// Both operations eligible.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            getter: true,
            setter: true,
        }
    }

    /// Read access only.
    #[must_use]
    pub const fn getter_only() -> Self {
        Self {
            getter: true,
            setter: false,
        }
    }

    /// Infers the policy for an un-annotated field from its identifier.
    ///
    /// Field names are guaranteed non-empty by named-field parsing.
    #[must_use]
    pub fn infer(field_name: &str) -> Self {
        if field_name.chars().next().is_some_and(char::is_uppercase) {
            Self::full()
        } else {
            Self::getter_only()
        }
    }

    /// Whether `operation` is eligible under this policy.
    #[must_use]
    pub const fn allows(self, operation: Operation) -> bool {
        match operation {
            Operation::Getter => self.getter,
            Operation::Setter => self.setter,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Tests for casing-based policy inference.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Name", true, true)]
    #[case("Logo", true, true)]
    #[case("master", true, false)]
    #[case("provinceId", true, false)]
    #[case("_hidden", true, false)]
    #[case("Äpfel", true, true)]
    fn infers_from_identifier_casing(
        #[case] name: &str,
        #[case] getter: bool,
        #[case] setter: bool,
    ) {
        let policy = AccessPolicy::infer(name);
        assert_eq!(policy.allows(Operation::Getter), getter, "getter for {name}");
        assert_eq!(policy.allows(Operation::Setter), setter, "setter for {name}");
    }

    #[rstest]
    fn full_policy_allows_everything() {
        let policy = AccessPolicy::full();
        assert!(policy.allows(Operation::Getter));
        assert!(policy.allows(Operation::Setter));
    }
}
