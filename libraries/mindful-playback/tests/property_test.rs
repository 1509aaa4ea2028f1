//! Property-based tests for volume handling
//!
//! Uses proptest to verify invariants across many random inputs.

mod common;

use common::Harness;
use mindful_playback::clamp_volume;
use proptest::prelude::*;

proptest! {
    /// Property: Clamped volume is always within [0, 1]
    #[test]
    fn clamped_volume_is_in_range(level in any::<f32>()) {
        let clamped = clamp_volume(level);
        prop_assert!((0.0..=1.0).contains(&clamped));
    }

    /// Property: Values already in range are untouched
    #[test]
    fn in_range_volume_is_identity(level in 0.0f32..=1.0) {
        prop_assert_eq!(clamp_volume(level), level);
    }

    /// Property: Clamping is idempotent
    #[test]
    fn clamping_is_idempotent(level in any::<f32>()) {
        let once = clamp_volume(level);
        prop_assert_eq!(clamp_volume(once), once);
    }

    /// Property: Manager state and output gain always agree after set_volume
    #[test]
    fn manager_volume_matches_forwarded_gain(levels in prop::collection::vec(-10.0f32..10.0, 1..20)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let mut h = Harness::in_memory();
            for level in &levels {
                h.manager.set_volume(*level).await.unwrap();
            }

            let gains = h.output.gains();
            prop_assert_eq!(gains.len(), levels.len());
            prop_assert_eq!(h.manager.state().volume, *gains.last().unwrap());
            prop_assert!(gains.iter().all(|g| (0.0..=1.0).contains(g)));
            Ok(())
        })?;
    }
}
