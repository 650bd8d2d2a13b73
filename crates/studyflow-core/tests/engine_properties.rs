//! Property tests for the timer state machines and the level ladder.

use proptest::prelude::*;
use studyflow_core::stats::{level_progress, LADDER_TOTAL_MIN};
use studyflow_core::{Phase, PomodoroEngine, StopwatchEngine};

const T0: u64 = 1_700_000_000_000;

proptest! {
    /// Elapsed time equals the wall-clock time spent running, no matter how
    /// the pause/resume/lap sequence interleaves.
    #[test]
    fn stopwatch_elapsed_matches_running_wall_clock(
        steps in prop::collection::vec((0u8..3, 1u64..600), 1..40)
    ) {
        let mut sw = StopwatchEngine::new();
        let mut now = T0;
        sw.start(now);
        let mut running = true;
        let mut expected_secs = 0u64;

        for (op, delta_secs) in steps {
            now += delta_secs * 1000;
            if running {
                expected_secs += delta_secs;
            }
            match op {
                0 => {
                    if sw.pause(now).is_some() {
                        running = false;
                    }
                }
                1 => {
                    if sw.resume(now).is_some() {
                        running = true;
                    }
                }
                _ => {
                    sw.lap(now);
                }
            }
        }
        prop_assert_eq!(sw.elapsed_secs(now), expected_secs);
    }

    /// Lap splits always sum to the final lap's total.
    #[test]
    fn stopwatch_lap_splits_sum_to_final_total(
        deltas in prop::collection::vec(1u64..300, 1..20)
    ) {
        let mut sw = StopwatchEngine::new();
        let mut now = T0;
        sw.start(now);
        for delta_secs in deltas {
            now += delta_secs * 1000;
            sw.lap(now);
        }
        let laps = sw.laps();
        let split_sum: u64 = laps.iter().map(|l| l.split_secs).sum();
        prop_assert_eq!(split_sum, laps[0].total_secs);
        prop_assert_eq!(laps.last().unwrap().split_secs, laps.last().unwrap().total_secs);
    }

    /// A saved run never reports less than one minute, and paused time never
    /// leaks into elapsed time.
    #[test]
    fn stopwatch_save_is_at_least_one_minute(
        run_secs in 0u64..7200,
        pause_secs in 0u64..3600,
    ) {
        let mut sw = StopwatchEngine::new();
        let mut now = T0;
        sw.start(now);
        now += run_secs * 1000;
        sw.pause(now);
        now += pause_secs * 1000;
        sw.resume(now);
        let draft = sw.stop_and_save(now).unwrap();
        prop_assert!(draft.minutes >= 1);
        prop_assert_eq!(u64::from(draft.minutes).max(1), ((run_secs + 30) / 60).max(1));
        prop_assert_eq!(u64::from(draft.paused_minutes), (pause_secs + 30) / 60);
    }

    /// Completions 1-3 select the short break, every 4th the long one,
    /// whatever the configured durations.
    #[test]
    fn pomodoro_fourth_completion_is_long(
        focus in 1u32..120,
        short in 1u32..30,
        long in 1u32..60,
        cycles in 1usize..10,
    ) {
        let mut p = PomodoroEngine::with_durations(focus, short, long);
        let mut now = T0;
        for n in 1..=cycles as u32 {
            p.start(now);
            now += u64::from(focus) * 60_000;
            p.tick(now).unwrap();
            let expect_long = n % 4 == 0;
            prop_assert_eq!(p.phase() == Phase::Long, expect_long, "completion {}", n);
            // Finish the break to get back to focus.
            p.start(now);
            now += u64::from(long.max(short)) * 60_000;
            p.tick(now).unwrap();
            prop_assert_eq!(p.phase(), Phase::Focus);
        }
        prop_assert_eq!(p.completed_count(), cycles as u32);
    }

    /// Within every rank, percent stays in range and the to-next distance
    /// plus progress accounts for the whole rank span.
    #[test]
    fn ladder_is_consistent_at_any_total(total in 0u64..6000) {
        let p = level_progress(total);
        prop_assert!(p.percent <= 100);
        if total >= LADDER_TOTAL_MIN {
            prop_assert!(p.max_reached);
            prop_assert_eq!(p.percent, 100);
            prop_assert_eq!(p.to_next_min, None);
        } else {
            prop_assert!(!p.max_reached);
            let to_next = p.to_next_min.unwrap();
            prop_assert!(to_next >= 1);
            // Spending `to_next` more minutes always moves the ladder on,
            // either to the next rank or to the maxed-out final one.
            let bumped = level_progress(total + to_next);
            prop_assert!(bumped.max_reached || bumped.label != p.label);
        }
    }
}
