/// Per-batch tallies. Summed across rayon workers with `+=`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchCounters {
    pub total: u64,
    pub counted: u64,
    pub too_short: u64,
    pub invalid_symbol: u64,
    pub windows: u64,
}

impl BatchCounters {
    pub fn failed(&self) -> u64 {
        self.too_short + self.invalid_symbol
    }
}

impl std::ops::AddAssign for BatchCounters {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.counted += other.counted;
        self.too_short += other.too_short;
        self.invalid_symbol += other.invalid_symbol;
        self.windows += other.windows;
    }
}
