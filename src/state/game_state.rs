use super::common::Vec2;
use super::game_map::{TileKind, TileWorld};
use super::player::{Player, PlayerUpdateResult};
use crate::camera::Camera;
use crate::resources::Sprite;
use crate::settings::{HazardPolicy, Settings};
use crate::sound_handler::Sound;

/// Held keys. Key-down sets a flag, key-up clears it.
#[derive(Default, Clone, Copy, Debug)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub space: bool,
    pub reset: bool,
}

impl InputState {
    pub fn wants_jump(&self) -> bool {
        self.up || self.space
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum GameEvent {
    Jumped,
    CoinCollected,
    HazardTouched,
    RoundReset,
    Won,
}

impl GameEvent {
    pub fn sound(self) -> Option<Sound> {
        match self {
            GameEvent::Jumped => Some(Sound::Jump),
            GameEvent::CoinCollected => Some(Sound::Coin),
            _ => None,
        }
    }
}

/// Positions are world pixels; the renderer applies the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Tile {
        kind: TileKind,
        x: f32,
        y: f32,
        size: f32,
    },
    /// `feet` is the bottom-center of the image.
    Sprite { sprite: Sprite, feet: Vec2, flip: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudInfo {
    pub coins_collected: u32,
    pub total_coins: u32,
    pub elapsed_secs: u64,
    pub won: bool,
}

impl HudInfo {
    pub fn coin_text(&self) -> String {
        format!("Coins:{}/{}", self.coins_collected, self.total_coins)
    }

    pub fn timer_text(&self) -> String {
        format!("{}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }
}

/// Everything the host needs after one tick.
pub struct Frame {
    pub events: Vec<GameEvent>,
    pub commands: Vec<DrawCommand>,
    pub camera_x: f32,
    pub hud: HudInfo,
}

pub trait GameState {
    fn tick(&mut self, input: &InputState) -> Frame;
    /// The current picture without advancing the simulation.
    fn snapshot(&self) -> Frame;
    fn on_resize(&mut self, w: f32, h: f32);
}

pub struct Game {
    pub player: Player,
    pub world: TileWorld,
    pub camera: Camera,
    hazard_policy: HazardPolicy,
    tick_rate_hz: u32,
    elapsed_ticks: u64,
    won_reported: bool,
}

impl Game {
    pub fn new(world: TileWorld, player_size: (u32, u32), settings: &Settings) -> Game {
        let player = Player::new(
            world.player_start(),
            player_size.0,
            player_size.1,
            settings.physics,
        );
        let camera = Camera::new(
            settings.window_width as f32,
            settings.window_height as f32,
        );

        let mut game = Game {
            player,
            world,
            camera,
            hazard_policy: settings.hazard_policy,
            tick_rate_hz: settings.tick_rate_hz.max(1),
            elapsed_ticks: 0,
            won_reported: false,
        };
        log::info!(
            "level is {}x{} tiles",
            game.world.width_tiles(),
            game.world.height_tiles()
        );
        if game.world.pixel_height() > game.camera.screen_h {
            log::warn!(
                "level is {}px tall but the window is only {}px",
                game.world.pixel_height(),
                game.camera.screen_h
            );
        }
        game.reset_round();
        game
    }

    pub fn game_won(&self) -> bool {
        self.player.coins_collected == self.world.total_coins()
    }

    pub fn reset_round(&mut self) {
        self.player.reset();
        let start = self.world.reload();
        self.player.respawn(start);
        self.elapsed_ticks = 0;
        self.won_reported = false;
        self.camera.update(start.x, self.world.pixel_width());
        log::info!(
            "round started, {} coins to collect",
            self.world.total_coins()
        );
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ticks / self.tick_rate_hz as u64
    }

    pub fn hud(&self) -> HudInfo {
        HudInfo {
            coins_collected: self.player.coins_collected,
            total_coins: self.world.total_coins(),
            elapsed_secs: self.elapsed_secs(),
            won: self.game_won(),
        }
    }

    /// Non-empty tiles inside the camera view, then the player.
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let size = self.world.unit_size();
        let view_left = self.camera.offset_x;
        let view_right = view_left + self.camera.screen_w;

        let mut commands: Vec<DrawCommand> = self
            .world
            .cells()
            .filter(|(_, _, kind)| *kind != TileKind::Empty)
            .map(|(col, row, kind)| DrawCommand::Tile {
                kind,
                x: col as f32 * size,
                y: row as f32 * size,
                size,
            })
            .filter(|cmd| match cmd {
                DrawCommand::Tile { x, size, .. } => x + size > view_left && *x < view_right,
                DrawCommand::Sprite { .. } => true,
            })
            .collect();

        commands.push(DrawCommand::Sprite {
            sprite: self.player.sprite(),
            feet: self.player.position,
            flip: !self.player.facing_right(),
        });
        commands
    }
}

impl GameState for Game {
    fn tick(&mut self, input: &InputState) -> Frame {
        let mut events = vec![];

        if input.reset && self.game_won() {
            self.reset_round();
            events.push(GameEvent::RoundReset);
        }

        for result in self.player.update(input, &mut self.world) {
            events.push(match result {
                PlayerUpdateResult::Jumped => GameEvent::Jumped,
                PlayerUpdateResult::CollectedCoin => GameEvent::CoinCollected,
                PlayerUpdateResult::TouchedHazard => GameEvent::HazardTouched,
            });
        }

        if events.contains(&GameEvent::HazardTouched)
            && self.hazard_policy == HazardPolicy::ResetRound
        {
            log::info!(
                "hazard touched with {} coins left, restarting round",
                self.world.coins_remaining()
            );
            self.reset_round();
            events.push(GameEvent::RoundReset);
        }

        log::trace!(
            "player at ({:.1}, {:.1}) {:?}, on ground: {}",
            self.player.position.x,
            self.player.position.y,
            self.player.pose(),
            self.player.is_on_ground()
        );

        self.camera
            .update(self.player.position.x, self.world.pixel_width());

        if self.game_won() {
            if !self.won_reported {
                self.won_reported = true;
                log::info!("all coins collected in {}", self.hud().timer_text());
                events.push(GameEvent::Won);
            }
        } else {
            self.elapsed_ticks += 1;
        }

        Frame {
            events,
            ..self.snapshot()
        }
    }

    fn snapshot(&self) -> Frame {
        Frame {
            events: vec![],
            commands: self.draw_commands(),
            camera_x: self.camera.offset_x,
            hud: self.hud(),
        }
    }

    fn on_resize(&mut self, w: f32, h: f32) {
        self.camera.on_resize(w, h);
    }
}
