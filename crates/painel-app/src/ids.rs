// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }

            pub fn parse(raw: &str) -> Option<Self> {
                raw.trim().parse::<i64>().ok().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(TeamId);
entity_id!(CompetitionId);
entity_id!(RefereeId);
entity_id!(MatchNumber);

#[cfg(test)]
mod tests {
    use super::TeamId;

    #[test]
    fn parse_accepts_backend_string_ids() {
        assert_eq!(TeamId::parse("12"), Some(TeamId::new(12)));
        assert_eq!(TeamId::parse(" 7 "), Some(TeamId::new(7)));
        assert_eq!(TeamId::parse("abc"), None);
        assert_eq!(TeamId::new(3).to_string(), "3");
    }
}
