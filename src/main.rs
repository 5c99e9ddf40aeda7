//! Load map viewer.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use hex_load_map::config::GridConfig;
use hex_load_map::hexmap::HexMapPlugin;
use hex_load_map::view::{HexMapViewPlugin, ViewConfig};

/// Whether the world inspector is showing.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
enum ViewState {
    /// Map only.
    #[default]
    Running,
    /// World inspector overlay (Tab to toggle).
    Debugging,
}

#[cfg(feature = "native")]
fn startup_config() -> GridConfig {
    use clap::Parser;
    hex_load_map::cli::Cli::parse().into_config()
}

#[cfg(not(feature = "native"))]
fn startup_config() -> GridConfig {
    GridConfig::default()
}

fn main() -> AppExit {
    let config = startup_config();
    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {err}");
        return AppExit::error();
    }

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Load Map".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<ViewState>()
    .init_state::<ViewState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(HexMapPlugin(config))
    .add_plugins(HexMapViewPlugin(ViewConfig::default()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(ViewState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins(bevy::remote::RemotePlugin::default())
        .add_plugins(bevy::remote::http::RemoteHttpPlugin::default());

    app.run()
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<ViewState>>,
    mut next: ResMut<NextState<ViewState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            ViewState::Running => ViewState::Debugging,
            ViewState::Debugging => ViewState::Running,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
