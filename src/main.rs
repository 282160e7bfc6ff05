use miniquad::*;

mod camera;
mod error;
mod hud;
mod physics;
mod render;
mod resources;
mod settings;
mod sound_handler;
mod state;

use crate::error::LoadError;
use crate::hud::Hud;
use crate::render::Renderer;
use crate::resources::Resources;
use crate::settings::{SETTINGS_FILE, Settings};
use crate::sound_handler::SoundHandler;
use crate::state::{Frame, Game, GameState, InputState, LevelTemplate, TileWorld};

/// Ticks run per displayed frame before the backlog is dropped.
const MAX_TICKS_PER_FRAME: u32 = 8;
/// Longest wall-clock gap fed into the accumulator at once.
const MAX_FRAME_SECONDS: f64 = 0.25;

struct Stage {
    state: Box<dyn GameState>,
    renderer: Renderer,
    hud: Hud,
    sounds: SoundHandler,
    input: InputState,
    frame: Frame,
    tick_seconds: f64,
    accumulator: f64,
    last_time: f64,
}

impl Stage {
    fn new(settings: Settings, world: TileWorld, resources: Resources) -> Stage {
        let mut renderer = Renderer::new(&resources);
        let hud = Hud::new(&mut *renderer.ctx);
        let sounds = SoundHandler::new(&resources);

        let mut state = Game::new(world, resources.player_size(), &settings);
        let (w, h) = window::screen_size();
        state.on_resize(w, h);
        renderer.resize(w, h);
        let frame = state.snapshot();

        Stage {
            state: Box::new(state),
            renderer,
            hud,
            sounds,
            input: InputState::default(),
            frame,
            tick_seconds: settings.tick_seconds(),
            accumulator: 0.0,
            last_time: date::now(),
        }
    }
}

impl EventHandler for Stage {
    fn update(&mut self) {
        let now = date::now();
        let dt = (now - self.last_time).clamp(0.0, MAX_FRAME_SECONDS);
        self.last_time = now;
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= self.tick_seconds && ticks < MAX_TICKS_PER_FRAME {
            let frame = self.state.tick(&self.input);
            for event in &frame.events {
                if let Some(sound) = event.sound() {
                    self.sounds.play(sound);
                }
            }
            self.frame = frame;
            self.accumulator -= self.tick_seconds;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            log::debug!("dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
    }

    fn draw(&mut self) {
        self.renderer.draw(&self.frame);
        self.hud.draw(&mut *self.renderer.ctx, &self.frame.hud);
        self.renderer.ctx.commit_frame();
    }

    fn resize_event(&mut self, width: f32, height: f32) {
        self.state.on_resize(width, height);
        self.renderer.resize(width, height);
        self.frame = self.state.snapshot();
    }

    fn key_down_event(&mut self, keycode: KeyCode, _mods: KeyMods, _repeat: bool) {
        match keycode {
            KeyCode::A | KeyCode::Left => self.input.left = true,
            KeyCode::D | KeyCode::Right => self.input.right = true,
            KeyCode::W | KeyCode::Up => self.input.up = true,
            KeyCode::Space => self.input.space = true,
            KeyCode::R => self.input.reset = true,
            _ => {}
        }
    }

    fn key_up_event(&mut self, keycode: KeyCode, _mods: KeyMods) {
        match keycode {
            KeyCode::A | KeyCode::Left => self.input.left = false,
            KeyCode::D | KeyCode::Right => self.input.right = false,
            KeyCode::W | KeyCode::Up => self.input.up = false,
            KeyCode::Space => self.input.space = false,
            KeyCode::R => self.input.reset = false,
            _ => {}
        }
    }
}

fn load() -> Result<(Settings, TileWorld, Resources), LoadError> {
    let settings = Settings::load(SETTINGS_FILE)?;
    let template = match &settings.level_path {
        Some(path) => LevelTemplate::load_json(path)?,
        None => LevelTemplate::default_level().map_err(|source| LoadError::Level {
            path: "<built-in>".into(),
            source,
        })?,
    };
    let resources = Resources::load(&settings.asset_dir)?;
    Ok((settings, TileWorld::new(template), resources))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (settings, world, resources) = match load() {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    miniquad::start(
        conf::Conf {
            window_title: String::from("Tilehop"),
            high_dpi: false,
            window_width: settings.window_width,
            window_height: settings.window_height,
            ..Default::default()
        },
        move || Box::new(Stage::new(settings, world, resources)),
    );
}
