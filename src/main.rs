use std::time::Duration;

use surface_mesh::{
    generation::radial_wave,
    meshing::{GridConfig, MeshState, NormalMode},
};

use bevy::prelude::*;
use bevy_atmosphere::prelude::*;
use bevy_fly_camera::{FlyCamera, FlyCameraPlugin};

#[derive(Resource)]
struct WaveSettings {
    mesh_size: f32,
    num_points: usize,
    normal_mode: NormalMode,
    shift_step: f32,
    update_interval: Duration,
    rotation_speed: f32,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            mesh_size: 100.,
            num_points: 101,
            normal_mode: NormalMode::Analytic,
            shift_step: 0.2,
            update_interval: Duration::from_millis(100),
            rotation_speed: -std::f32::consts::PI / (4. * 180.),
        }
    }
}

/// Surface being animated. `None` only while a system is advancing it.
#[derive(Resource)]
struct Wave {
    state: Option<MeshState>,
    mesh: Handle<Mesh>,
    timer: Timer,
}

#[derive(Component)]
struct WaveSurface;

fn main() {
    App::new()
        .init_resource::<WaveSettings>()
        .add_plugins(DefaultPlugins)
        .add_plugin(AtmospherePlugin)
        .add_plugin(FlyCameraPlugin)
        .add_startup_system(setup_wave)
        .add_system(toggle_normals)
        .add_system(update_wave.after(toggle_normals))
        .add_system(rotate_model)
        .run();
}

fn setup_wave(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<WaveSettings>,
) {
    let config = GridConfig::centered(settings.mesh_size, settings.num_points);
    let state = MeshState::new(config, settings.normal_mode).advance(radial_wave, settings.shift_step);

    let mesh = meshes.add(state.mesh.to_render_mesh(false));

    commands.insert_resource(Wave {
        state: Some(state),
        mesh: mesh.clone(),
        timer: Timer::new(settings.update_interval, TimerMode::Repeating),
    });

    add_camera(&mut commands, settings.mesh_size);
    add_lights(&mut commands, settings.mesh_size);

    commands
        .spawn(PbrBundle {
            mesh,
            material: materials.add(StandardMaterial {
                base_color: Color::rgb(0.2, 0.4, 0.9),
                perceptual_roughness: 0.5,
                double_sided: true,
                cull_mode: None,
                ..default()
            }),
            ..default()
        })
        .insert(WaveSurface);
}

fn update_wave(
    time: Res<Time>,
    settings: Res<WaveSettings>,
    mut wave: ResMut<Wave>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !wave.timer.tick(time.delta()).just_finished() {
        return;
    }

    let Some(state) = wave.state.take() else {
        return;
    };
    let state = state
        .with_normal_mode(settings.normal_mode)
        .advance(radial_wave, settings.shift_step);

    if let Err(err) = state.mesh.validate() {
        error!("generated wave mesh is invalid: {err}");
    } else if let Some(mesh) = meshes.get_mut(&wave.mesh) {
        *mesh = state.mesh.to_render_mesh(false);
    }

    wave.state = Some(state);
}

fn toggle_normals(keys: Res<Input<KeyCode>>, mut settings: ResMut<WaveSettings>) {
    if keys.just_pressed(KeyCode::N) {
        settings.normal_mode = settings.normal_mode.toggled();
        info!("using {:?} normals", settings.normal_mode);
    }
}

fn rotate_model(settings: Res<WaveSettings>, mut query: Query<&mut Transform, With<WaveSurface>>) {
    for mut transform in &mut query {
        transform.rotate_y(settings.rotation_speed);
    }
}

fn add_camera(commands: &mut Commands, mesh_size: f32) {
    commands
        .spawn(Camera3dBundle {
            transform: Transform::from_translation(Vec3 {
                x: 0.0,
                y: mesh_size * 0.5,
                z: mesh_size,
            }),
            ..default()
        })
        .insert(FlyCamera::default())
        .insert(AtmosphereCamera::default());
}

fn add_lights(commands: &mut Commands, mesh_size: f32) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.05,
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 4.0e6,
            range: mesh_size * 4.,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::from_xyz(0.0, mesh_size, 0.0),
        ..default()
    });
}
