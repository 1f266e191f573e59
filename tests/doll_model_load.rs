#![cfg_attr(
    feature = "render",
    doc = "Behavioural test for a doll model that fails to load."
)]
#![cfg_attr(not(feature = "render"), doc = "Tests require the `render` feature.")]
#![cfg(feature = "render")]
//! A missing doll model is reported once and the match carries on.
//!
//! This file contains a single test because it ticks an app with the asset
//! server running background loads.

use bevy::asset::AssetPlugin;
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use redlight::presentation::DollModelTracking;
use redlight::{DollModelError, DollModelPlugin, GameSettings, GameState, Match};
use rstest::rstest;

const MISSING_MODEL: &str = "models/does-not-exist/scene.gltf";
const MAX_LOAD_FRAMES: usize = 200;

#[derive(Resource, Default, Debug)]
struct CapturedModelErrors(pub Vec<DollModelError>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_model_error(event: On<DollModelError>, mut captured: ResMut<CapturedModelErrors>) {
    captured.0.push(event.event().clone());
}

fn captured_count(app: &App) -> usize {
    app.world().resource::<CapturedModelErrors>().0.len()
}

#[rstest]
fn missing_doll_model_is_reported_once_and_the_match_runs() {
    let settings = GameSettings {
        doll_model: MISSING_MODEL.to_owned(),
        ..test_utils::fixed_dwell_settings(1_000, 750)
    };
    let mut app = test_utils::headless_app(settings);
    app.add_plugins(AssetPlugin::default());
    app.init_asset::<Scene>();
    app.add_plugins(DollModelPlugin);
    app.insert_resource(CapturedModelErrors::default());
    app.add_observer(record_model_error);
    app.finish();
    app.cleanup();

    let mut reported = false;
    for _ in 0..MAX_LOAD_FRAMES {
        app.update();
        std::thread::sleep(std::time::Duration::from_millis(1));
        if captured_count(&app) > 0 {
            reported = true;
            break;
        }
    }
    assert!(
        reported,
        "expected the doll model failure within {MAX_LOAD_FRAMES} frames"
    );

    let first = app
        .world()
        .resource::<CapturedModelErrors>()
        .0
        .first()
        .map(|error| error.path.clone());
    assert_eq!(first.as_deref(), Some(MISSING_MODEL));
    assert!(app.world().resource::<DollModelTracking>().has_finalised);

    let started = test_utils::run_until(&mut app, 400, |app| {
        app.world().resource::<Match>().state() != GameState::Loading
    });
    assert!(started, "the match should start without its model");
    assert!(app.world().resource::<Match>().is_doll_cycling());

    test_utils::run_frames(&mut app, 20);
    assert_eq!(captured_count(&app), 1, "the failure is reported once");
}
