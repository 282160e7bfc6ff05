pub mod animation_handler;
pub mod common;
pub mod game_map;
pub mod game_state;
pub mod player;

pub use common::Vec2;
pub use game_map::{LevelTemplate, MapLike, TileKind, TileWorld};
pub use game_state::{DrawCommand, Frame, Game, GameState, HudInfo, InputState};
pub use player::PhysicsConstants;
