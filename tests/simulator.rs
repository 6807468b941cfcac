use std::io::Write;
use std::path::Path;

use approx::assert_abs_diff_eq;
use fulcrum::{
    ActuatorPolicy, PhysicsWorld, PhysicsWorldApi, SceneError, Simulator, Vec2, scene_load,
};
use tempfile::NamedTempFile;

const FULCRUM_SCENE: &str = r#"{
    "gravity": [0, 981],
    "bounds": { "xmin": 0, "ymin": 0, "xmax": 1920, "ymax": 1080 },
    "actuator": { "body": "beam" },
    "bodies": [
        { "tag": "base", "shape": "rect", "width": 200, "height": 40, "position": [960, 900] },
        { "tag": "beam", "shape": "rect", "width": 400, "height": 20, "position": [960, 870], "mass": 1 },
        { "tag": "ball", "shape": "circle", "radius": 20, "position": [1000, 780], "mass": 1, "restitution": 0.3 }
    ]
}"#;

fn write_scene(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn assert_same_world(a: &PhysicsWorld, b: &PhysicsWorld) {
    assert_eq!(a.bodies(), b.bodies());
    assert_eq!(a.bounds(), b.bounds());
    assert_eq!(a.gravity(), b.gravity());
    assert_eq!(a.dt(), b.dt());
    assert_eq!(a.actuator(), b.actuator());
    assert_eq!(a.actuator_pivot(), b.actuator_pivot());
    assert_eq!(a.rng_state(), b.rng_state());
    assert_eq!(a.debug, b.debug);
}

#[test]
fn test_create_loads_scene() {
    let file = write_scene(FULCRUM_SCENE);
    let sim = Simulator::create(file.path(), 12345, 1.0 / 240.0).unwrap();
    let world = sim.world();
    assert_eq!(world.body_count(), 3);
    assert_eq!(world.dt(), 1.0 / 240.0);
    assert_eq!(world.actuator(), Some(1));
    assert_eq!(sim.scene_path(), Some(file.path()));
    assert_eq!(sim.seed(), 12345);
    assert_eq!(sim.steps(), 0);
}

#[test]
fn test_step_pins_beam_on_fulcrum() {
    let file = write_scene(FULCRUM_SCENE);
    let mut sim = Simulator::create(file.path(), 1, 1.0 / 120.0).unwrap();
    sim.step(0.3);

    let beam = sim.world().body(1).unwrap();
    assert_eq!(beam.angle, 0.3);
    assert_eq!(beam.velocity, Vec2::ZERO);
    assert_eq!(beam.angular_velocity, 0.0);
    assert_eq!(beam.position, Vec2::new(960.0, 870.0));

    let state = sim.actuator();
    assert_eq!(state.angle, 0.3);
    assert_abs_diff_eq!(state.angular_velocity, 0.3 * 120.0, epsilon = 1e-2);
}

#[test]
fn test_action_is_not_clamped() {
    let file = write_scene(FULCRUM_SCENE);
    let mut sim = Simulator::create(file.path(), 1, 1.0 / 120.0).unwrap();
    sim.step(2.5);
    assert_eq!(sim.world().body(1).unwrap().angle, 2.5);
}

#[test]
fn test_reset_matches_fresh_create() {
    let file = write_scene(FULCRUM_SCENE);
    let dt = 1.0 / 120.0;
    let mut sim = Simulator::create(file.path(), 99, dt).unwrap();
    for i in 0..200 {
        sim.step((i as f32 * 0.01).sin() * 0.4);
    }
    sim.world_mut().debug.show_contacts = true;
    sim.world_mut().spawn_random(5, Vec2::ZERO, Vec2::splat(100.0), (1.0, 2.0), (0.1, 0.2));

    sim.reset().unwrap();
    let fresh = Simulator::create(file.path(), 99, dt).unwrap();
    assert_same_world(sim.world(), fresh.world());
    assert_eq!(sim.steps(), 0);
    assert_eq!(sim.actuator(), fresh.actuator());
}

#[test]
fn test_reset_then_replay_is_deterministic() {
    let file = write_scene(FULCRUM_SCENE);
    let mut sim = Simulator::create(file.path(), 7, 1.0 / 240.0).unwrap();
    let actions: Vec<f32> = (0..480).map(|i| 0.2 * (i as f32 / 60.0).sin()).collect();

    for &a in &actions {
        sim.step(a);
    }
    let first = sim.world().bodies().to_vec();

    sim.reset().unwrap();
    for &a in &actions {
        sim.step(a);
    }
    assert_eq!(sim.world().bodies(), &first[..]);
}

#[test]
fn test_reset_rereads_scene_file() {
    let file = write_scene(FULCRUM_SCENE);
    let mut sim = Simulator::create(file.path(), 1, 1.0 / 120.0).unwrap();

    let edited = FULCRUM_SCENE.replace("[1000, 780]", "[900, 700]");
    std::fs::write(file.path(), edited).unwrap();

    sim.reset().unwrap();
    assert_eq!(sim.world().body(2).unwrap().position, Vec2::new(900.0, 700.0));
}

#[test]
fn test_reset_rechecks_actuator_binding() {
    let file = write_scene(FULCRUM_SCENE);
    let mut sim = Simulator::create(file.path(), 1, 1.0 / 120.0).unwrap();
    assert!(sim.pose_enabled());

    let rebound = FULCRUM_SCENE.replace(r#""body": "beam""#, r#""body": "ball""#);
    std::fs::write(file.path(), rebound).unwrap();
    sim.reset().unwrap();
    assert_eq!(sim.world().actuator(), Some(2));
    assert!(!sim.pose_enabled());

    std::fs::write(file.path(), FULCRUM_SCENE).unwrap();
    sim.reset().unwrap();
    assert!(sim.pose_enabled());
}

#[test]
fn test_create_rejects_bad_dt() {
    let file = write_scene(FULCRUM_SCENE);
    for dt in [0.0, -1.0 / 60.0, f32::NAN, f32::INFINITY] {
        let err = Simulator::create(file.path(), 1, dt).err().unwrap();
        assert!(matches!(err, SceneError::Invalid(_)), "dt {dt}: {err}");
    }
}

#[test]
fn test_reset_failure_keeps_world() {
    let file = write_scene(FULCRUM_SCENE);
    let mut sim = Simulator::create(file.path(), 1, 1.0 / 120.0).unwrap();
    for _ in 0..10 {
        sim.step(0.1);
    }
    let before = sim.world().bodies().to_vec();

    std::fs::write(file.path(), "{ not json").unwrap();
    let err = sim.reset().unwrap_err();
    assert!(matches!(err, SceneError::Parse(_)), "{err}");
    assert_eq!(sim.world().bodies(), &before[..]);
    assert_eq!(sim.steps(), 10);
}

#[test]
fn test_create_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let err = Simulator::create(&missing, 1, 1.0 / 60.0).err().unwrap();
    match err {
        SceneError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_scene_rejected() {
    let file = write_scene(r#"{ "bodies": [ { "shape": "circle", "radius": -3, "position": [0, 0] } ] }"#);
    let err = Simulator::create(file.path(), 1, 1.0 / 60.0).err().unwrap();
    assert!(matches!(err, SceneError::Invalid(_)), "{err}");
}

#[test]
fn test_observation_tracks_ball_on_beam() {
    let file = write_scene(FULCRUM_SCENE);
    let mut sim = Simulator::create(file.path(), 1, 1.0 / 120.0).unwrap();
    sim.step(0.0);
    let obs = sim.observe().unwrap();
    assert_eq!(obs.beam_angle, 0.0);
    assert_abs_diff_eq!(obs.ball_offset, 40.0, epsilon = 1e-3);

    // Let the ball settle, then tilt right-side down: it slides toward +x.
    for _ in 0..120 {
        sim.step(0.0);
    }
    for _ in 0..60 {
        sim.step(0.2);
    }
    let obs = sim.observe().unwrap();
    assert_eq!(obs.beam_angle, 0.2);
    assert!(obs.ball_velocity > 0.0, "{obs:?}");
}

#[test]
fn test_scene_load_keeps_dt_and_replaces_bodies() {
    let file = write_scene(FULCRUM_SCENE);
    let mut world = PhysicsWorld::new(fulcrum::WorldConfig {
        gravity: Vec2::ZERO,
        dt: 1.0 / 240.0,
    });
    world.add_body(fulcrum::Body::circle_default(Vec2::ZERO, 1.0));
    scene_load(file.path(), &mut world).unwrap();
    assert_eq!(world.body_count(), 3);
    assert_eq!(world.dt(), 1.0 / 240.0);
    assert_eq!(world.gravity(), Vec2::new(0.0, 981.0));
}

struct Freeze;

impl ActuatorPolicy for Freeze {
    fn apply(&self, world: &mut PhysicsWorld, _action: f32) {
        if let Some(i) = world.actuator() {
            if let Some(beam) = world.body_mut(i) {
                beam.velocity = Vec2::ZERO;
                beam.angular_velocity = 0.0;
            }
        }
    }
}

#[test]
fn test_custom_policy_replaces_pose_hook() {
    let scene = fulcrum::Scene::load(write_scene(FULCRUM_SCENE).path()).unwrap();
    let mut sim = Simulator::with_policy(scene, 1, 1.0 / 120.0, Freeze);
    sim.step(0.4);
    // The policy never touches the angle, so the command is ignored.
    assert_eq!(sim.world().body(1).unwrap().angle, 0.0);
    assert_eq!(sim.actuator().angle, 0.4);
}

#[test]
fn test_bundled_scenes_load() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes");
    for name in ["fulcrum.json", "drop.json"] {
        let mut sim = Simulator::create(root.join(name), 3, 1.0 / 120.0).unwrap();
        for _ in 0..120 {
            sim.step(0.0);
        }
        assert!(sim.world().bodies().iter().all(|b| b.position.is_finite()), "{name}");
    }
}
