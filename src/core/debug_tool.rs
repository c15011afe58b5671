//! Debugging capabilities that can be present in a developer's environment.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A debugging capability. Declaration order is the canonical order used
/// whenever tools are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DebugTool {
    Serial,
    LogicAnalyzer,
    JtagProbe,
    Oscilloscope,
}

impl DebugTool {
    /// All tools, in canonical order.
    pub const ALL: [DebugTool; 4] = [
        DebugTool::Serial,
        DebugTool::LogicAnalyzer,
        DebugTool::JtagProbe,
        DebugTool::Oscilloscope,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DebugTool::Serial => "serial",
            DebugTool::LogicAnalyzer => "logic-analyzer",
            DebugTool::JtagProbe => "jtag-probe",
            DebugTool::Oscilloscope => "oscilloscope",
        }
    }
}

impl fmt::Display for DebugTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DebugTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DebugTool::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown debug tool: {}", s))
    }
}

/// A set of debugging capabilities, iterated in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugToolSet(BTreeSet<DebugTool>);

impl DebugToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tool: DebugTool) -> bool {
        self.0.insert(tool)
    }

    pub fn with(mut self, tool: DebugTool) -> Self {
        self.0.insert(tool);
        self
    }

    pub fn contains(&self, tool: DebugTool) -> bool {
        self.0.contains(&tool)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = DebugTool> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<DebugTool> for DebugToolSet {
    fn from_iter<I: IntoIterator<Item = DebugTool>>(iter: I) -> Self {
        DebugToolSet(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let set: DebugToolSet = [
            DebugTool::Oscilloscope,
            DebugTool::Serial,
            DebugTool::JtagProbe,
            DebugTool::LogicAnalyzer,
        ]
        .into_iter()
        .collect();
        let order: Vec<_> = set.iter().collect();
        assert_eq!(order, DebugTool::ALL.to_vec());
    }

    #[test]
    fn test_parse_round_trip_names() {
        assert_eq!("jtag-probe".parse::<DebugTool>().unwrap(), DebugTool::JtagProbe);
        assert_eq!(DebugTool::LogicAnalyzer.to_string(), "logic-analyzer");
        assert!("multimeter".parse::<DebugTool>().is_err());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = DebugToolSet::new();
        assert!(set.is_empty());
        assert!(set.insert(DebugTool::JtagProbe));
        assert!(!set.insert(DebugTool::JtagProbe));
        assert_eq!(set.len(), 1);
        assert!(set.contains(DebugTool::JtagProbe));
    }
}
