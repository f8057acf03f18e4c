//! Host-side wiring: spawn events, the job scheduler and shared outputs.
//!
//! [`install_model_renderer`] subscribes once to [`PlayerSpawned`]. The first
//! spawn loads the configured model and schedules a [`RenderJob`] that draws
//! into the host's [`SharedLineSink`] and reports to its [`ChatLog`]. Later
//! spawns do nothing.

use std::borrow::Cow;

use nalgebra::Point3;

use crate::assets;
use crate::error::HostError;
use crate::events::{EventBus, SubscriptionId};
use crate::obj::{self, LoadOptions};
use crate::render::{RenderJob, RenderParams};
use crate::scheduler::{JobId, Scheduler};
use crate::sink::{ChatLog, SharedLineSink, StatusChannel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpawned {
    pub player: String,
}

/// What event handlers may touch.
pub struct HostContext {
    pub scheduler: Scheduler<'static>,
    pub drawer: SharedLineSink,
    pub chat: ChatLog,
}

pub struct Host {
    pub spawns: EventBus<PlayerSpawned, HostContext>,
    pub context: HostContext,
}

impl Host {
    pub fn new() -> Self {
        Self::with_steps_per_tick(1)
    }

    /// A host whose scheduler resumes each job `steps` times per tick.
    pub fn with_steps_per_tick(steps: usize) -> Self {
        Self {
            spawns: EventBus::new(),
            context: HostContext {
                scheduler: Scheduler::with_steps_per_tick(steps),
                drawer: SharedLineSink::new(),
                chat: ChatLog::new(),
            },
        }
    }

    /// Fire the spawn event. Returns the number of handlers run.
    pub fn spawn_player(&mut self, player: impl Into<String>) -> usize {
        let event = PlayerSpawned {
            player: player.into(),
        };
        self.spawns.emit(&event, &mut self.context)
    }

    /// Advance scheduled jobs by one tick.
    pub fn tick(&mut self) -> usize {
        self.context.scheduler.tick()
    }

    pub fn drawer(&self) -> &SharedLineSink {
        &self.context.drawer
    }

    pub fn chat(&self) -> &ChatLog {
        &self.context.chat
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

/// Which model to render and where.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub obj_text: Cow<'static, str>,
    pub load: LoadOptions,
    pub params: RenderParams,
}

impl ModelConfig {
    pub fn new(obj_text: impl Into<Cow<'static, str>>, params: RenderParams) -> Self {
        Self {
            obj_text: obj_text.into(),
            load: LoadOptions::default(),
            params,
        }
    }
}

impl Default for ModelConfig {
    /// The embedded cat, a tenth of its size, high above the origin and lit
    /// from far off to the side.
    fn default() -> Self {
        let params = RenderParams::new(Point3::new(0.0, 200.0, 0.0), 0.1)
            .with_fill(1)
            .with_light(Point3::new(400.0, 400.0, 0.0));
        Self::new(assets::MODEL_OBJ, params)
    }
}

/// Render `config` on the first player spawn.
pub fn install_model_renderer(host: &mut Host, config: ModelConfig) -> SubscriptionId {
    host.spawns.subscribe_once(move |event, ctx| {
        log::info!("{} spawned, rendering model", event.player);
        if let Err(err) = schedule_render(&config, ctx) {
            log::error!("model render not started: {}", err);
            ctx.chat.send_message(&format!("Failed to render model: {err}"));
        }
    })
}

/// Load the model and queue its render job.
pub fn schedule_render(config: &ModelConfig, ctx: &mut HostContext) -> Result<JobId, HostError> {
    let mesh = obj::load_mesh_with(&config.obj_text, &config.load)?;
    let job = RenderJob::new(mesh, config.params, ctx.drawer.clone(), ctx.chat.clone())?;
    Ok(ctx.scheduler.run_job(job))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::ParseMode;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    #[test]
    fn test_render_starts_on_first_spawn_only() {
        let mut host = Host::new();
        install_model_renderer(&mut host, ModelConfig::new(TRIANGLE, RenderParams::default()));
        assert_eq!(host.spawns.len(), 1);

        assert_eq!(host.spawn_player("alex"), 1);
        assert_eq!(host.spawn_player("sam"), 0);
        assert_eq!(host.context.scheduler.pending(), 1);

        host.context.scheduler.run_until_idle();
        assert_eq!(host.drawer().len(), 3);
        assert_eq!(host.chat().messages(), vec!["Loaded model with 3 lines".to_string()]);
    }

    #[test]
    fn test_nothing_before_spawn() {
        let mut host = Host::new();
        install_model_renderer(&mut host, ModelConfig::default());
        host.tick();
        assert!(host.drawer().is_empty());
        assert!(host.context.scheduler.is_idle());
    }

    #[test]
    fn test_strict_load_failure_reported() {
        let mut host = Host::new();
        let mut config = ModelConfig::new("v 0 0 0\nf 1 2 3\n", RenderParams::default());
        config.load.mode = ParseMode::Strict;
        install_model_renderer(&mut host, config);
        host.spawn_player("alex");

        assert!(host.context.scheduler.is_idle());
        let message = host.chat().last().unwrap();
        assert!(message.starts_with("Failed to render model"), "{message}");
    }

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert_eq!(config.params.placement.start, Point3::new(0.0, 200.0, 0.0));
        assert_eq!(config.params.fill, 1);
        assert!(config.params.validate().is_ok());
    }
}
