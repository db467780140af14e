//! Forward signal lookahead cache.
//!
//! The host supplies an ordered list of the track objects ahead of the
//! train (signals, speed posts, end of authority).  The supervisor asks for
//! "the n-th signal ahead" or "the n-th speed post ahead" many times per
//! tick, so the list is walked lazily and the results are kept in a
//! tick-scoped, fixed-capacity buffer:
//!
//! ```text
//!   request(n) ──▶ cached?  ── yes ──▶ entry[n]
//!                     │
//!                     no
//!                     ▼
//!        TrainInfo snapshot (once per tick) ──▶ walk objects in the
//!        direction of travel, append until n is covered or list ends
//!                     ▼
//!        entry[min(n, len − 1)]   (sentinel if nothing of that kind)
//! ```
//!
//! [`SignalLookahead::begin_tick`] must run before the first lookup of
//! every tick; the control unit does this at the top of each update.

use heapless::Vec;

/// Entries kept per object kind.  Deeper requests saturate to the last entry.
pub const MAX_LOOKAHEAD: usize = 32;

// ---------------------------------------------------------------------------
// Track objects (host side)
// ---------------------------------------------------------------------------

/// Cab signal aspect, most permissive first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Aspect {
    #[default]
    None = 0,
    Clear2 = 1,
    Clear1 = 2,
    Approach3 = 3,
    Approach2 = 4,
    Approach1 = 5,
    Restricted = 6,
    StopAndProceed = 7,
    Stop = 8,
    Permission = 9,
}

impl Aspect {
    /// Map a host signal-state code.  Unknown codes read as `None`.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Clear2,
            2 => Self::Clear1,
            3 => Self::Approach3,
            4 => Self::Approach2,
            5 => Self::Approach1,
            6 => Self::Restricted,
            7 => Self::StopAndProceed,
            8 => Self::Stop,
            9 => Self::Permission,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackObjectKind {
    Signal,
    SpeedPost,
    /// End of movement authority, read as a stop signal.
    Authority,
}

/// One object ahead of the train.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackObject {
    pub kind: TrackObjectKind,
    pub allowed_speed_mps: f32,
    /// Only meaningful for signals.
    pub aspect: Aspect,
    pub distance_m: f32,
}

impl TrackObject {
    pub fn signal(allowed_speed_mps: f32, aspect: Aspect, distance_m: f32) -> Self {
        Self {
            kind: TrackObjectKind::Signal,
            allowed_speed_mps,
            aspect,
            distance_m,
        }
    }

    pub fn speed_post(allowed_speed_mps: f32, distance_m: f32) -> Self {
        Self {
            kind: TrackObjectKind::SpeedPost,
            allowed_speed_mps,
            aspect: Aspect::None,
            distance_m,
        }
    }

    pub fn authority(distance_m: f32) -> Self {
        Self {
            kind: TrackObjectKind::Authority,
            allowed_speed_mps: 0.0,
            aspect: Aspect::Stop,
            distance_m,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// Train-level snapshot the host computes on request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainInfo {
    /// Static speed limit of the train (m/s).
    pub allowed_speed_mps: f32,
    /// Objects ahead in forward direction, nearest first.
    pub forward: std::vec::Vec<TrackObject>,
    /// Objects ahead when running in reverse, nearest first.
    pub backward: std::vec::Vec<TrackObject>,
}

impl TrainInfo {
    pub fn objects(&self, direction: Direction) -> &[TrackObject] {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Reverse => &self.backward,
        }
    }
}

/// Where the cache pulls its snapshot from.
pub trait TrainInfoSource {
    fn train_info(&self) -> TrainInfo;
    fn direction(&self) -> Direction;
}

// ---------------------------------------------------------------------------
// Cached entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalEntry {
    pub speed_limit_mps: f32,
    pub aspect: Aspect,
    pub distance_m: f32,
}

impl SignalEntry {
    /// Stand-in when there is no signal ahead at all.
    pub const NONE: Self = Self {
        speed_limit_mps: -1.0,
        aspect: Aspect::None,
        distance_m: f32::INFINITY,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostEntry {
    pub speed_limit_mps: f32,
    pub distance_m: f32,
}

impl PostEntry {
    /// Stand-in when there is no speed post ahead at all.
    pub const NONE: Self = Self {
        speed_limit_mps: -1.0,
        distance_m: f32::INFINITY,
    };
}

/// Which field of which object kind a lookup asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookaheadKind {
    SignalSpeedLimit,
    SignalAspect,
    SignalDistance,
    PostSpeedLimit,
    PostDistance,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookaheadValue {
    SpeedMpS(f32),
    Aspect(Aspect),
    DistanceM(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Signal,
    Post,
}

// ---------------------------------------------------------------------------
// SignalLookahead
// ---------------------------------------------------------------------------

/// Tick-scoped read-through cache of upcoming signals and speed posts.
#[derive(Debug, Default)]
pub struct SignalLookahead {
    signals: Vec<SignalEntry, MAX_LOOKAHEAD>,
    posts: Vec<PostEntry, MAX_LOOKAHEAD>,
    /// Host snapshot taken on the first miss of the tick.
    info: Option<TrainInfo>,
    signals_exhausted: bool,
    posts_exhausted: bool,
}

impl SignalLookahead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything cached during the previous tick.
    pub fn begin_tick(&mut self) {
        self.signals.clear();
        self.posts.clear();
        self.info = None;
        self.signals_exhausted = false;
        self.posts_exhausted = false;
    }

    pub fn cached_signals(&self) -> &[SignalEntry] {
        &self.signals
    }

    pub fn cached_posts(&self) -> &[PostEntry] {
        &self.posts
    }

    /// The train's static speed limit from this tick's snapshot.
    pub fn train_speed_limit_mps(&mut self, source: &(impl TrainInfoSource + ?Sized)) -> f32 {
        self.info
            .get_or_insert_with(|| source.train_info())
            .allowed_speed_mps
    }

    /// The `index`-th signal (or end of authority) ahead.
    pub fn signal(&mut self, index: i32, source: &(impl TrainInfoSource + ?Sized)) -> SignalEntry {
        let wanted = clamp_index(index);
        if wanted >= self.signals.len() && !self.signals_exhausted {
            self.scan(wanted, Category::Signal, source);
        }
        self.signals
            .get(wanted)
            .or(self.signals.last())
            .copied()
            .unwrap_or(SignalEntry::NONE)
    }

    /// The `index`-th speed post ahead.
    pub fn post(&mut self, index: i32, source: &(impl TrainInfoSource + ?Sized)) -> PostEntry {
        let wanted = clamp_index(index);
        if wanted >= self.posts.len() && !self.posts_exhausted {
            self.scan(wanted, Category::Post, source);
        }
        self.posts
            .get(wanted)
            .or(self.posts.last())
            .copied()
            .unwrap_or(PostEntry::NONE)
    }

    /// Generic lookup by kind.
    pub fn next_signal_item(
        &mut self,
        index: i32,
        kind: LookaheadKind,
        source: &(impl TrainInfoSource + ?Sized),
    ) -> LookaheadValue {
        match kind {
            LookaheadKind::SignalSpeedLimit => {
                LookaheadValue::SpeedMpS(self.signal(index, source).speed_limit_mps)
            }
            LookaheadKind::SignalAspect => LookaheadValue::Aspect(self.signal(index, source).aspect),
            LookaheadKind::SignalDistance => {
                LookaheadValue::DistanceM(self.signal(index, source).distance_m)
            }
            LookaheadKind::PostSpeedLimit => {
                LookaheadValue::SpeedMpS(self.post(index, source).speed_limit_mps)
            }
            LookaheadKind::PostDistance => LookaheadValue::DistanceM(self.post(index, source).distance_m),
        }
    }

    // ── Internal ──────────────────────────────────────────────────

    /// Walk the objects ahead from the nearest one, appending every object
    /// beyond what is already cached, until `wanted` of `category` is covered.
    fn scan(&mut self, wanted: usize, category: Category, source: &(impl TrainInfoSource + ?Sized)) {
        let direction = source.direction();
        let info = self.info.get_or_insert_with(|| source.train_info());

        let mut signals_found = 0usize;
        let mut posts_found = 0usize;
        let mut covered = false;

        for object in info.objects(direction) {
            match object.kind {
                TrackObjectKind::Signal | TrackObjectKind::Authority => {
                    signals_found += 1;
                    if signals_found > self.signals.len() {
                        let entry = if object.kind == TrackObjectKind::Authority {
                            SignalEntry {
                                speed_limit_mps: 0.0,
                                aspect: Aspect::Stop,
                                distance_m: object.distance_m,
                            }
                        } else {
                            SignalEntry {
                                speed_limit_mps: object.allowed_speed_mps,
                                aspect: object.aspect,
                                distance_m: object.distance_m,
                            }
                        };
                        // Full buffer: deeper entries are unreachable anyway.
                        let _ = self.signals.push(entry);
                    }
                }
                TrackObjectKind::SpeedPost => {
                    posts_found += 1;
                    if posts_found > self.posts.len() {
                        let _ = self.posts.push(PostEntry {
                            speed_limit_mps: object.allowed_speed_mps,
                            distance_m: object.distance_m,
                        });
                    }
                }
            }

            covered = match category {
                Category::Signal => signals_found > wanted,
                Category::Post => posts_found > wanted,
            };
            if covered {
                break;
            }
        }

        if covered {
            return;
        }
        match category {
            Category::Signal => {
                self.signals_exhausted = true;
                if self.signals.is_empty() {
                    let _ = self.signals.push(SignalEntry::NONE);
                }
            }
            Category::Post => {
                self.posts_exhausted = true;
                if self.posts.is_empty() {
                    let _ = self.posts.push(PostEntry::NONE);
                }
            }
        }
    }
}

fn clamp_index(index: i32) -> usize {
    (index.max(0) as usize).min(MAX_LOOKAHEAD - 1)
}
