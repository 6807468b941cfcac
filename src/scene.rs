//! JSON scene documents: parse, validate, and populate a world.
//!
//! ```json
//! {
//!   "gravity": [0, 981],
//!   "bounds": { "xmin": 0, "ymin": 0, "xmax": 1920, "ymax": 1080 },
//!   "actuator": { "body": "beam", "pivot": [960, 870] },
//!   "bodies": [
//!     { "tag": "base", "shape": "rect", "width": 200, "height": 40, "position": [960, 900] },
//!     { "tag": "beam", "shape": "rect", "width": 400, "height": 20, "position": [960, 870], "mass": 1 },
//!     { "shape": "circle", "radius": 20, "position": [960, 800], "mass": 1, "restitution": 0.6 }
//!   ]
//! }
//! ```

use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::api::PhysicsWorldApi;
use crate::body::{Body, DEFAULT_RESTITUTION, STATIC_RESTITUTION};
use crate::error::{SceneError, SceneResult};
use crate::types::{Bounds, Color, WorldConfig};
use crate::world::PhysicsWorld;

// --- Wire format -------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct SceneDoc {
    #[serde(default = "default_gravity")]
    gravity: [f32; 2],
    #[serde(default)]
    bounds: Option<BoundsDoc>,
    #[serde(default)]
    actuator: Option<ActuatorDoc>,
    #[serde(default)]
    bodies: Vec<BodyDoc>,
}

fn default_gravity() -> [f32; 2] {
    [0.0, 981.0]
}

#[derive(Debug, Clone, Deserialize)]
struct BoundsDoc {
    xmin: f32,
    ymin: f32,
    xmax: f32,
    ymax: f32,
}

#[derive(Debug, Clone, Deserialize)]
struct ActuatorDoc {
    body: BodyRef,
    #[serde(default)]
    pivot: Option<[f32; 2]>,
}

/// A body named by index or by its `tag`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BodyRef {
    Index(usize),
    Tag(String),
}

#[derive(Debug, Clone, Deserialize)]
struct BodyDoc {
    #[serde(default)]
    tag: Option<String>,
    #[serde(flatten)]
    shape: ShapeDoc,
    position: [f32; 2],
    #[serde(default)]
    velocity: Option<[f32; 2]>,
    #[serde(default)]
    angular_velocity: f32,
    /// 0 or omitted means static.
    #[serde(default)]
    mass: f32,
    #[serde(default)]
    restitution: Option<f32>,
    #[serde(default)]
    color: Option<ColorDoc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
enum ShapeDoc {
    Circle {
        radius: f32,
    },
    Rect {
        width: f32,
        height: f32,
        #[serde(default)]
        angle: f32,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ColorDoc {
    Rgba([u8; 4]),
    Rgb([u8; 3]),
}

impl From<ColorDoc> for Color {
    fn from(c: ColorDoc) -> Self {
        match c {
            ColorDoc::Rgba([r, g, b, a]) => Color::rgba(r, g, b, a),
            ColorDoc::Rgb([r, g, b]) => Color::rgb(r, g, b),
        }
    }
}

// --- Validated scene ---------------------------------------------------------

/// Actuator binding declared by a scene.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActuatorBinding {
    pub body: usize,
    pub pivot: Vec2,
}

/// A parsed and validated scene, ready to populate worlds.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub gravity: Vec2,
    pub bounds: Option<Bounds>,
    pub actuator: Option<ActuatorBinding>,
    pub bodies: Vec<Body>,
    /// Per-body tag, parallel to `bodies`.
    pub tags: Vec<Option<String>>,
}

impl Scene {
    /// Read and validate a scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SceneError::io(path, e))?;
        let scene = Self::from_json_str(&text)?;
        log::info!(
            "Loaded scene {}: {} bodies, actuator {:?}",
            path.display(),
            scene.bodies.len(),
            scene.actuator.map(|a| a.body)
        );
        Ok(scene)
    }

    /// Parse and validate a scene document.
    pub fn from_json_str(text: &str) -> SceneResult<Self> {
        let doc: SceneDoc = serde_json::from_str(text)?;
        Self::try_from(doc)
    }

    /// Index of the first body carrying `tag`.
    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.as_deref() == Some(tag))
    }

    /// Replace everything in `world` except its `dt` with this scene.
    ///
    /// Equivalent to re-initializing the world (bodies, bounds, debug flags,
    /// contacts, actuator binding and RNG all reset) and adding the bodies in
    /// document order.
    pub fn populate(&self, world: &mut PhysicsWorld) {
        let dt = world.cfg.dt;
        *world = PhysicsWorld::new(WorldConfig {
            gravity: self.gravity,
            dt,
        });
        if let Some(bounds) = self.bounds {
            world.set_bounds(bounds);
        }
        for body in &self.bodies {
            world.add_body(*body);
        }
        if let Some(binding) = self.actuator {
            world.set_actuator(Some(binding.body), binding.pivot);
        }
    }
}

impl TryFrom<SceneDoc> for Scene {
    type Error = SceneError;

    fn try_from(doc: SceneDoc) -> SceneResult<Self> {
        let gravity = Vec2::from(doc.gravity);
        if !gravity.is_finite() {
            return Err(SceneError::invalid("gravity must be finite"));
        }

        let bounds = match doc.bounds {
            Some(b) if b.xmin < b.xmax && b.ymin < b.ymax => {
                Some(Bounds::new(b.xmin, b.ymin, b.xmax, b.ymax))
            }
            Some(b) => {
                return Err(SceneError::invalid(format!(
                    "bounds are inverted: ({}, {}) .. ({}, {})",
                    b.xmin, b.ymin, b.xmax, b.ymax
                )));
            }
            None => None,
        };

        let mut bodies = Vec::with_capacity(doc.bodies.len());
        let mut tags: Vec<Option<String>> = Vec::with_capacity(doc.bodies.len());
        for (i, body_doc) in doc.bodies.into_iter().enumerate() {
            if let Some(tag) = &body_doc.tag {
                if tags.iter().any(|t| t.as_ref() == Some(tag)) {
                    return Err(SceneError::invalid(format!("body {i}: duplicate tag {tag:?}")));
                }
            }
            bodies.push(build_body(i, &body_doc)?);
            tags.push(body_doc.tag);
        }

        let actuator = match doc.actuator {
            None => None,
            Some(act) => {
                let body = match &act.body {
                    BodyRef::Index(i) if *i < bodies.len() => *i,
                    BodyRef::Index(i) => {
                        return Err(SceneError::invalid(format!(
                            "actuator body {i} out of range ({} bodies)",
                            bodies.len()
                        )));
                    }
                    BodyRef::Tag(tag) => tags
                        .iter()
                        .position(|t| t.as_ref() == Some(tag))
                        .ok_or_else(|| SceneError::invalid(format!("actuator tag {tag:?} names no body")))?,
                };
                let pivot = act.pivot.map(Vec2::from).unwrap_or(bodies[body].position);
                Some(ActuatorBinding { body, pivot })
            }
        };

        Ok(Self {
            gravity,
            bounds,
            actuator,
            bodies,
            tags,
        })
    }
}

fn build_body(i: usize, doc: &BodyDoc) -> SceneResult<Body> {
    let position = Vec2::from(doc.position);
    if !position.is_finite() {
        return Err(SceneError::invalid(format!("body {i}: position must be finite")));
    }
    if !(doc.mass >= 0.0 && doc.mass.is_finite()) {
        return Err(SceneError::invalid(format!("body {i}: mass must be >= 0, got {}", doc.mass)));
    }
    if let Some(e) = doc.restitution {
        if !(0.0..=1.0).contains(&e) {
            return Err(SceneError::invalid(format!("body {i}: restitution {e} outside [0, 1]")));
        }
    }

    let dynamic = doc.mass > 0.0;
    let restitution = doc
        .restitution
        .unwrap_or(if dynamic { DEFAULT_RESTITUTION } else { STATIC_RESTITUTION });

    let mut body = match doc.shape {
        ShapeDoc::Circle { radius } => {
            if !(radius > 0.0) {
                return Err(SceneError::invalid(format!("body {i}: radius must be positive")));
            }
            if dynamic {
                Body::circle(position, radius, doc.mass, restitution)
            } else {
                Body::circle_static(position, radius)
            }
        }
        ShapeDoc::Rect {
            width,
            height,
            angle,
        } => {
            if !(width > 0.0 && height > 0.0) {
                return Err(SceneError::invalid(format!(
                    "body {i}: width and height must be positive"
                )));
            }
            let body = if dynamic {
                Body::rect(position, width, height, doc.mass, restitution)
            } else {
                Body::rect_static(position, width, height)
            };
            body.with_angle(angle)
        }
    };

    body.restitution = restitution;
    body.velocity = doc.velocity.map(Vec2::from).unwrap_or(Vec2::ZERO);
    body.angular_velocity = doc.angular_velocity;
    if let Some(color) = doc.color.clone() {
        body.color = color.into();
    }
    Ok(body)
}

/// Replace `world`'s contents with the scene at `path` (its `dt` is kept).
/// On failure the world is left untouched.
pub fn scene_load(path: impl AsRef<Path>, world: &mut PhysicsWorld) -> SceneResult<()> {
    let scene = Scene::load(path)?;
    scene.populate(world);
    Ok(())
}
