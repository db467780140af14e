//! Fuzz target: `SignalLookahead` lookups
//!
//! Builds a track object list from arbitrary bytes, then replays an
//! arbitrary sequence of signal/post lookups.  The cache must never panic,
//! never hold more than `MAX_LOOKAHEAD` entries per kind, and must give the
//! same answer for a repeated query within one tick.
//!
//! cargo fuzz run fuzz_lookahead

#![no_main]

use libfuzzer_sys::fuzz_target;
use traincontrol::lookahead::{
    Aspect, Direction, MAX_LOOKAHEAD, SignalLookahead, TrackObject, TrainInfo, TrainInfoSource,
};

struct Track(TrainInfo);

impl TrainInfoSource for Track {
    fn train_info(&self) -> TrainInfo {
        self.0.clone()
    }

    fn direction(&self) -> Direction {
        Direction::Forward
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = (split as usize).min(rest.len()) / 3 * 3;
    let (objects, queries) = rest.split_at(split);

    let mut distance = 0.0f32;
    let forward = objects
        .chunks_exact(3)
        .map(|c| {
            distance += f32::from(c[2]) + 1.0;
            match c[0] % 3 {
                0 => TrackObject::signal(f32::from(c[1]) - 1.0, Aspect::from_code(c[1] % 10), distance),
                1 => TrackObject::speed_post(f32::from(c[1]), distance),
                _ => TrackObject::authority(distance),
            }
        })
        .collect();
    let track = Track(TrainInfo {
        allowed_speed_mps: 40.0,
        forward,
        backward: Vec::new(),
    });

    let mut cache = SignalLookahead::new();
    cache.begin_tick();
    for &q in queries {
        let index = i32::from(q as i8);
        if q & 1 == 0 {
            let first = cache.signal(index, &track);
            assert_eq!(first, cache.signal(index, &track));
        } else {
            let first = cache.post(index, &track);
            assert_eq!(first, cache.post(index, &track));
        }
        assert!(cache.cached_signals().len() <= MAX_LOOKAHEAD);
        assert!(cache.cached_posts().len() <= MAX_LOOKAHEAD);
    }
});
