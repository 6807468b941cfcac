//! fulcrum: deterministic 2D rigid-body core (circles and oriented rectangles,
//! impulse resolution with positional correction, scripted actuator).

pub mod api;
pub mod body;
pub mod debug_draw;
pub mod error;
pub mod narrowphase;
pub mod pacing;
pub mod rng;
pub mod scene;
pub mod simulator;
pub mod solver;
pub mod types;
pub mod vec2;
pub mod world;

pub use crate::api::*;
pub use crate::body::Body;
pub use crate::debug_draw::{DebugSink, DrawCmd, DrawList};
pub use crate::error::{SceneError, SceneResult};
pub use crate::narrowphase::Narrowphase;
pub use crate::pacing::FixedStepper;
pub use crate::scene::{Scene, scene_load};
pub use crate::simulator::{ActuatorState, FulcrumPose, Observation, Simulator, apply_actuator_pose};
pub use crate::types::*;
pub use crate::vec2::{Vec2, Vec2Ext};
pub use crate::world::PhysicsWorld;
