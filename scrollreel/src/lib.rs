//! Scrollreel is the engine behind a scroll-driven storytelling page.
//!
//! It has three parts:
//!
//! - An [`AssetStore`] that keeps user-uploaded media per content slot across sessions
//! - A scroll [`Timeline`] that maps scroll progress to named animation parameters
//! - Procedural effects, chiefly lightning bolts ([`generate_bolt`]) behind a [`CooldownGate`]
//!   and the hero's layered [`DustField`]
//!
//! Everything visual is a pure function of its inputs (progress, time, seed); the UI shell
//! owns rendering and feeds viewport changes through a [`ViewportSignal`] and frames through a
//! [`FrameClock`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod assets;
/// Runtime configuration.
pub mod config;
pub(crate) mod effects;
pub(crate) mod scroll;
pub(crate) mod signal;

pub use crate::foundation::core::{Line, Point, Rect, Size, Vec2, Viewport};
pub use crate::foundation::error::{ReelError, ReelResult, StoreError};
pub use crate::foundation::rng::Rng64;

pub use crate::animation::ease::Ease;
pub use crate::animation::ignition::{
    BlockState, Ignition, IgnitionFrame, LIGHT_THEME_THRESHOLD,
};
pub use crate::animation::timeline::{Phase, PhaseValues, Timeline, evaluate};

pub use crate::assets::backend::{BlobBackend, FailureMode, MemoryBackend};
pub use crate::assets::dir::{DirBackend, RECORD_SCHEMA};
pub use crate::assets::handles::{DisplayHandle, HandleRegistry};
pub use crate::assets::record::{AssetKey, FileBlob, MediaKind, sniff_content_type};
pub use crate::assets::store::{AssetStore, SlotState};

pub use crate::effects::countdown::{Countdown, CountdownFrame, Sweep};
pub use crate::effects::dust::{DustField, DustLayer, DustParticle};
pub use crate::effects::hero::{BootSequence, BootStep, HeroLayers, MAGNETIC_PULL, magnetic_offset};
pub use crate::effects::hold::{HoldMeter, UNLOCK_LEVEL};
pub use crate::effects::starfield::{Star, Starfield, Tint};
pub use crate::effects::thunder::{
    BoltParams, CooldownGate, MAX_BOLT_DEPTH, Strike, ThunderStorm, bolt_depth, generate_bolt,
};

pub use crate::scroll::progress::{ScrollProgress, focused_index};
pub use crate::scroll::visibility::{
    RootMargin, VisibilityEvent, VisibilityTracker, intersection_ratio,
};

pub use crate::signal::clock::{EffectHandle, Flow, FrameClock, FrameTick};
pub use crate::signal::hub::{SignalHub, Subscription, ViewportSignal};
