use crate::error::LoadError;
use crate::sound_handler::Sound;
use image::GenericImageView;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

macro_rules! define_sprites {
    ($($variant:ident => $file:literal),+ $(,)?) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum Sprite {
            $($variant),+
        }

        impl Sprite {
            pub const ALL: &'static [Sprite] = &[
                $(Sprite::$variant),+
            ];

            pub const fn file_name(self) -> &'static str {
                match self {
                    $(Sprite::$variant => $file),+
                }
            }
        }
    };
}

define_sprites! {
    GuyStand => "guy.png",
    GuyRun1  => "run1.png",
    GuyRun2  => "run2.png",
}

pub struct SpriteImage {
    pub w: u32,
    pub h: u32,
    pub rgba: Vec<u8>,
}

/// Every image and sample the game needs, loaded once at startup.
///
/// Loading is all-or-nothing: a missing or undecodable file fails the whole
/// bundle, so lookups afterwards cannot miss.
pub struct Resources {
    sprites: HashMap<Sprite, SpriteImage>,
    sounds: HashMap<Sound, Vec<u8>>,
}

fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_sprite(path: &Path) -> Result<SpriteImage, LoadError> {
    let bytes = read_file(path)?;
    let img = image::load_from_memory(&bytes).map_err(|source| LoadError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let (w, h) = img.dimensions();
    Ok(SpriteImage {
        w,
        h,
        rgba: img.to_rgba8().into_raw(),
    })
}

impl Resources {
    pub fn load(asset_dir: impl AsRef<Path>) -> Result<Resources, LoadError> {
        let asset_dir = asset_dir.as_ref();

        let mut sprites = HashMap::new();
        for sprite in Sprite::ALL {
            let image = load_sprite(&asset_dir.join("images").join(sprite.file_name()))?;
            sprites.insert(*sprite, image);
        }

        let mut sounds = HashMap::new();
        for sound in Sound::ALL {
            let bytes = read_file(&asset_dir.join("sounds").join(sound.file_name()))?;
            sounds.insert(*sound, bytes);
        }

        log::info!(
            "loaded {} sprites and {} sounds from {}",
            sprites.len(),
            sounds.len(),
            asset_dir.display()
        );

        Ok(Resources { sprites, sounds })
    }

    pub fn sprite(&self, sprite: Sprite) -> &SpriteImage {
        &self.sprites[&sprite]
    }

    pub fn sound_bytes(&self, sound: Sound) -> &[u8] {
        &self.sounds[&sound]
    }

    /// The standing sprite's size is the player's physical size.
    pub fn player_size(&self) -> (u32, u32) {
        let stand = self.sprite(Sprite::GuyStand);
        (stand.w, stand.h)
    }
}
