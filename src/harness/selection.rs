//! Phase selection
//!
//! Maps free-form invocation tokens onto the optional phases.

use std::fmt;

/// Token enabling the point-lookup phase
pub const FIND_TOKEN: &str = "f";

/// Token enabling the full-scan phase
pub const COUNT_TOKEN: &str = "c";

/// Token enabling the bulk-load phase
pub const ADD_TOKEN: &str = "a";

/// Steps of a harness run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Open,
    EnsureBucket,
    Find,
    Count,
    Add,
    Report,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Open => "open store",
            Phase::EnsureBucket => "ensure bucket",
            Phase::Find => "find keys",
            Phase::Count => "count keys",
            Phase::Add => "add keys",
            Phase::Report => "write report",
        };
        f.write_str(name)
    }
}

/// Which optional phases a run executes
///
/// Execution order is fixed (find, count, add) no matter how the tokens
/// were ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseSelection {
    pub find: bool,
    pub count: bool,
    pub add: bool,
}

impl PhaseSelection {
    /// Scan tokens for the phase literals; anything else is ignored
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::default();
        for token in tokens {
            match token.as_ref() {
                FIND_TOKEN => selection.find = true,
                COUNT_TOKEN => selection.count = true,
                ADD_TOKEN => selection.add = true,
                _ => {}
            }
        }
        selection
    }

    /// Select every optional phase
    pub fn all() -> Self {
        Self {
            find: true,
            count: true,
            add: true,
        }
    }

    /// True when no optional phase is selected
    pub fn is_empty(&self) -> bool {
        !(self.find || self.count || self.add)
    }

    /// Selected optional phases in execution order
    pub fn phases(&self) -> Vec<Phase> {
        [
            (self.find, Phase::Find),
            (self.count, Phase::Count),
            (self.add, Phase::Add),
        ]
        .into_iter()
        .filter_map(|(on, phase)| on.then_some(phase))
        .collect()
    }
}
