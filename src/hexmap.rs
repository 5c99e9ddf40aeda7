//! Load map plugin: owns the [`GridModel`] resource and feeds frame time to
//! its simulation scheduler.
//!
//! Needs nothing beyond [`Time`], so it runs headless under `MinimalPlugins`.

use bevy::prelude::*;

use crate::config::GridConfig;
use crate::model::GridModel;

/// Pipeline ordering for load map update systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HexMapSet {
    /// Runs every simulation tick that came due this frame.
    Simulate,
}

/// Inserts [`GridConfig`] and a running [`GridModel`], then advances the
/// simulation every frame.
pub struct HexMapPlugin(pub GridConfig);

impl Plugin for HexMapPlugin {
    fn build(&self, app: &mut App) {
        let mut model = match GridModel::new(self.0.clone()) {
            Ok(model) => model,
            Err(err) => {
                error!("load map disabled, invalid configuration: {err}");
                return;
            }
        };
        model.start();

        app.register_type::<GridConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(model)
            .configure_sets(Update, HexMapSet::Simulate)
            .add_systems(Update, advance_simulation.in_set(HexMapSet::Simulate));
    }
}

/// Feeds the frame delta to the model's scheduler.
fn advance_simulation(time: Res<Time>, mut model: ResMut<GridModel>) {
    let ticks = model.advance(time.delta());
    if ticks > 1 {
        debug!("frame stalled, caught up {ticks} simulation ticks");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    fn headless(config: GridConfig) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(200)))
            .add_plugins(HexMapPlugin(config));
        app
    }

    fn seeded_config() -> GridConfig {
        let mut config = GridConfig::default();
        config.simulation.seed = Some(11);
        config
    }

    #[test]
    fn plugin_inserts_running_model() {
        let app = headless(seeded_config());
        let model = app.world().resource::<GridModel>();
        assert!(model.is_running());
        assert_eq!(model.len(), 37);
    }

    #[test]
    fn frame_clock_drives_ticks() {
        let mut app = headless(seeded_config());
        for _ in 0..30 {
            app.update();
        }
        // ~5.8s of virtual time at a 2s interval.
        let model = app.world().resource::<GridModel>();
        assert!(model.generation() >= 2, "generation {}", model.generation());
        assert!(model.tiles().iter().all(|t| t.load() <= 100));
    }

    #[test]
    fn stopped_model_ignores_frames() {
        let mut app = headless(seeded_config());
        app.world_mut().resource_mut::<GridModel>().stop();
        for _ in 0..30 {
            app.update();
        }
        assert_eq!(app.world().resource::<GridModel>().generation(), 0);
    }

    #[test]
    fn invalid_config_inserts_nothing() {
        let mut config = GridConfig::default();
        config.simulation.tick_interval = Duration::ZERO;
        let app = headless(config);
        assert!(app.world().get_resource::<GridModel>().is_none());
    }
}
