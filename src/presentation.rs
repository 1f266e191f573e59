//! Presentation layer: camera, lighting, meshes, the doll model and the
//! status line.
//!
//! `PresentationPlugin` is a passive observer of the match. It dresses the
//! entities spawned by `RedLightPlugin` with meshes and a model, and copies
//! the status text onto the screen. It never writes simulation state.

use bevy::asset::LoadState;
use bevy::prelude::*;
use log::debug;

use crate::config::GameSettings;
use crate::doll::{Doll, DollModelError};
use crate::game::Match;
use crate::player::Player;
use crate::track::{
    progress_bar, track_layout, CubeSpec, ProgressBar, TrackPiece, PLAYER_COLOR, PLAYER_RADIUS,
    SKY_COLOR,
};

/// Vertical field of view of the camera, in degrees.
const FIELD_OF_VIEW_DEGREES: f32 = 75.0;
/// Distance of the camera from the track.
const CAMERA_DISTANCE: f32 = 5.0;
/// Brightness of the white ambient light, the scene's only light.
const AMBIENT_BRIGHTNESS: f32 = 1_000.0;
/// Font size of the status line.
const STATUS_FONT_SIZE: f32 = 42.0;

/// Marker for the status line text.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct StatusText;

/// Loading state of the doll model.
///
/// Holds the handle so the load can still be reported if the doll entity is
/// despawned first.
#[derive(Resource, Debug, Default)]
pub struct DollModelTracking {
    /// Asset-server path requested.
    pub asset_path: Option<String>,
    /// Strong handle to the scene, kept alive during loading.
    pub handle: Option<Handle<Scene>>,
    /// Whether loading has completed, successfully or not.
    pub has_finalised: bool,
}

fn srgb([r, g, b]: [u8; 3]) -> Color {
    Color::srgb_u8(r, g, b)
}

fn cube_bundle(
    spec: &CubeSpec,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> (Mesh3d, MeshMaterial3d<StandardMaterial>) {
    (
        Mesh3d(meshes.add(Cuboid::new(spec.size.x, spec.size.y, spec.size.z))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: srgb(spec.color),
            unlit: true,
            ..default()
        })),
    )
}

/// Spawns the perspective camera and the status line.
fn scene_setup(mut commands: Commands, cameras: Query<(), With<Camera3d>>) {
    if cameras.is_empty() {
        commands.spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: FIELD_OF_VIEW_DEGREES.to_radians(),
                near: 0.1,
                far: 1000.0,
                ..default()
            }),
            Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
            Name::new("PresentationCamera"),
        ));
    }

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: STATUS_FONT_SIZE,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(24.0),
            left: Val::Px(24.0),
            ..default()
        },
        StatusText,
        Name::new("StatusText"),
    ));
}

/// Spawns the ground lane and the start and end markers.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn spawn_track(
    mut commands: Commands,
    settings: Res<GameSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for spec in track_layout(&settings) {
        commands.spawn((
            cube_bundle(&spec, &mut meshes, &mut materials),
            spec.transform(),
            TrackPiece,
            Name::new("TrackPiece"),
        ));
    }
}

/// Gives newly spawned players a sphere and progress bars a box.
fn dress_actors(
    mut commands: Commands,
    players: Query<Entity, Added<Player>>,
    bars: Query<Entity, Added<ProgressBar>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for entity in &players {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Sphere::new(PLAYER_RADIUS).mesh().uv(32, 16))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: srgb(PLAYER_COLOR),
                unlit: true,
                ..default()
            })),
        ));
    }
    for entity in &bars {
        commands
            .entity(entity)
            .insert(cube_bundle(&progress_bar(), &mut meshes, &mut materials));
    }
}

/// Starts loading the doll model onto newly spawned doll entities.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn load_doll_model(
    mut commands: Commands,
    dolls: Query<Entity, Added<Doll>>,
    asset_server: Res<AssetServer>,
    settings: Res<GameSettings>,
    mut tracking: ResMut<DollModelTracking>,
) {
    for entity in &dolls {
        let path = settings.doll_model.clone();
        let handle: Handle<Scene> =
            asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()));
        debug!("loading doll model {path}");
        tracking.asset_path = Some(path);
        tracking.handle = Some(handle.clone());
        tracking.has_finalised = false;
        commands.entity(entity).insert(SceneRoot(handle));
    }
}

/// Reports a failed doll model load once.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
fn monitor_doll_model_load_state(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut tracking: ResMut<DollModelTracking>,
) {
    if tracking.has_finalised {
        return;
    }

    let Some(handle) = tracking.handle.clone() else {
        return;
    };

    match asset_server.load_state(handle.id()) {
        LoadState::Loaded => {
            tracking.has_finalised = true;
            debug!("doll model loaded");
        }
        LoadState::Failed(error) => {
            commands.trigger(DollModelError {
                path: tracking.asset_path.clone().unwrap_or_default(),
                detail: error.to_string(),
            });
            tracking.has_finalised = true;
        }
        LoadState::NotLoaded | LoadState::Loading => {}
    }
}

/// Copies the match's status onto the status line when it changes.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
fn update_status_text(game: Res<Match>, mut texts: Query<&mut Text, With<StatusText>>) {
    if !game.is_changed() {
        return;
    }
    for mut text in &mut texts {
        if text.0 != game.status() {
            game.status().clone_into(&mut text.0);
        }
    }
}

/// Loads the doll model onto the doll and reports a failed load once.
///
/// Needs only the asset server and the `Scene` asset type, so it can run
/// without a renderer.
#[derive(Debug)]
pub struct DollModelPlugin;

impl Plugin for DollModelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DollModelTracking>();
        app.add_systems(
            Update,
            (load_doll_model, monitor_doll_model_load_state).chain(),
        );
    }
}

/// Plugin owning the camera, meshes, doll model and status line.
///
/// Add it after `RedLightPlugin`, alongside `DefaultPlugins`.
#[derive(Debug)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<StatusText>();
        app.insert_resource(ClearColor(srgb(SKY_COLOR)));
        app.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        });
        app.add_plugins(DollModelPlugin);
        app.add_systems(Startup, (scene_setup, spawn_track));
        app.add_systems(Update, (dress_actors, update_status_text));
    }
}
