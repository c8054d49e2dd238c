//! Monotonic time as seen by the game: microsecond ticks from the caller's clock.

/// A point on the monotonic clock, in microseconds.
pub type Instant = fugit::TimerInstantU64<1_000_000>;

/// A span of monotonic time, in microseconds.
pub type Duration = fugit::TimerDurationU64<1_000_000>;

/// Time elapsed from `since` to `now`; zero if the clock reads earlier.
pub(crate) fn elapsed(now: Instant, since: Instant) -> Duration {
    now.checked_duration_since(since)
        .unwrap_or(Duration::from_ticks(0))
}
