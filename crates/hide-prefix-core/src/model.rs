use std::ops::AddAssign;

/// Result of applying the stripper to one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripOutcome {
    /// The name carries no prefix; the element was left unmarked
    NoPrefix,
    /// Label did not start with the prefix or was already short; marked only
    Unchanged,
    /// Label was shortened and marked
    Rewritten { from: String, to: String },
}

/// Counters for one scan pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Candidates found by the pass' selectors
    pub examined: usize,
    pub rewritten: usize,
    pub unchanged: usize,
    /// Already processed, aliased, disabled or unnamed
    pub skipped: usize,
}

impl ScanReport {
    pub fn record(&mut self, outcome: &StripOutcome) {
        match outcome {
            StripOutcome::Rewritten { .. } => self.rewritten += 1,
            StripOutcome::Unchanged => self.unchanged += 1,
            StripOutcome::NoPrefix => self.skipped += 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.examined == 0
    }
}

impl AddAssign for ScanReport {
    fn add_assign(&mut self, rhs: Self) {
        self.examined += rhs.examined;
        self.rewritten += rhs.rewritten;
        self.unchanged += rhs.unchanged;
        self.skipped += rhs.skipped;
    }
}
