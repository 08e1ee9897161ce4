use std::fmt;

/// Number of decimal digits kept in the efficiency ratio.
pub const EFFICIENCY_SCALE: u32 = 4;

const DENOMINATOR: u32 = 10u32.pow(EFFICIENCY_SCALE);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// Matching lines, duplicates included.
    pub total: usize,
    /// Distinct line values among the matching lines.
    pub unique: usize,
}

impl Metrics {
    /// `None` when nothing matched, the ratio is undefined then.
    pub fn efficiency(&self) -> Option<Efficiency> {
        Efficiency::new(self.unique, self.total)
    }
}

/// Ratio `unique / total` truncated to four decimal digits.
///
/// Stored as ten-thousandths, so `1.0000` is `Efficiency(10000)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Efficiency(u32);

impl Efficiency {
    pub const ONE: Self = Efficiency(DENOMINATOR);

    pub fn new(unique: usize, total: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }
        // unique <= total, the quotient never exceeds the denominator
        let scaled = (unique as u128) * u128::from(DENOMINATOR) / (total as u128);
        u32::try_from(scaled).ok().map(Efficiency)
    }

    pub fn ten_thousandths(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Efficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.0 / DENOMINATOR,
            self.0 % DENOMINATOR,
            width = EFFICIENCY_SCALE as usize,
        )
    }
}
