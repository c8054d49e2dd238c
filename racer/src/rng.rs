// ── xorshift32 PRNG ─────────────────────────────────────────────────────────

/// Small xorshift32 generator. Not cryptographic; good enough for spawns.
#[derive(Clone, Debug)]
pub struct Rng(u32);

impl Rng {
    /// xorshift never leaves zero, so a zero seed is bumped to one.
    pub const fn new(seed: u32) -> Self {
        Self(if seed == 0 { 1 } else { seed })
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }

    /// Uniform in `0..max`. `max` of zero yields zero.
    pub fn range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Uniform in `lo..=hi`. Returns `lo` when the range is empty.
    pub fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo) as u32 + 1;
        lo + self.range(span) as i32
    }

    /// Uniform in `lo..hi`.
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        let unit = (self.next_u32() >> 9) as f32 / (1u32 << 23) as f32;
        lo + (hi - lo) * unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_still_produces_values() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = Rng::new(0xDEAD_BEEF);
        for _ in 0..10_000 {
            assert!(rng.range(7) < 7);
            let n = rng.range_inclusive(1, 2);
            assert!(n == 1 || n == 2);
            let f = rng.uniform(3.0, 7.0);
            assert!((3.0..7.0).contains(&f));
            let jitter = rng.uniform(-0.1, 0.1);
            assert!((-0.1..0.1).contains(&jitter));
        }
    }

    #[test]
    fn inclusive_range_hits_both_ends() {
        let mut rng = Rng::new(42);
        let mut seen = [false; 3];
        for _ in 0..1_000 {
            seen[rng.range_inclusive(0, 2) as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn degenerate_ranges() {
        let mut rng = Rng::new(7);
        assert_eq!(rng.range(0), 0);
        assert_eq!(rng.range_inclusive(5, 5), 5);
        assert_eq!(rng.range_inclusive(5, -3), 5);
    }
}
