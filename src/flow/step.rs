use std::fmt;

use serde::{Deserialize, Serialize};

/// Widget screens, in order. Movement is one step forward or back at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    AddressEntry,
    PropertyConfirmation,
    Estimate,
    ContactCapture,
    Complete,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::AddressEntry,
        Step::PropertyConfirmation,
        Step::Estimate,
        Step::ContactCapture,
        Step::Complete,
    ];

    #[inline]
    pub fn index(&self) -> usize { *self as usize }

    pub fn next(&self) -> Option<Step> { Self::ALL.get(self.index() + 1).copied() }

    pub fn previous(&self) -> Option<Step> { self.index().checked_sub(1).map(|i| Self::ALL[i]) }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::AddressEntry => "address_entry",
            Step::PropertyConfirmation => "property_confirmation",
            Step::Estimate => "estimate",
            Step::ContactCapture => "contact_capture",
            Step::Complete => "complete",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_order() {
        assert_eq!(Step::AddressEntry.previous(), None);
        assert_eq!(Step::Complete.next(), None);
        for pair in Step::ALL.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].previous(), Some(pair[0]));
        }
    }
}
