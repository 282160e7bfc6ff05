use crate::resources::Resources;
use quad_snd::{AudioContext, PlaySoundParams, Sound as SndSound};
use std::collections::HashMap;

macro_rules! define_sounds {
    ($($variant:ident => $file:literal),+ $(,)?) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum Sound {
            $($variant),+
        }

        impl Sound {
            pub const ALL: &'static [Sound] = &[
                $(Sound::$variant),+
            ];

            pub const fn file_name(self) -> &'static str {
                match self {
                    $(Sound::$variant => $file),+
                }
            }
        }
    };
}

define_sounds! {
    Jump => "jump.wav",
    Coin => "coin.wav",
}

/// One-shot sample playback. Calls never block and are never acknowledged.
pub struct SoundHandler {
    sounds: HashMap<Sound, SndSound>,
    audio_context: AudioContext,
}

impl SoundHandler {
    pub fn new(resources: &Resources) -> Self {
        let mut sounds: HashMap<Sound, SndSound> = HashMap::default();

        let audio_context = AudioContext::new();

        for sound in Sound::ALL {
            let snd = SndSound::load(&audio_context, resources.sound_bytes(*sound));
            sounds.insert(*sound, snd);
        }
        log::debug!("loaded {} sound samples", sounds.len());

        SoundHandler {
            sounds,
            audio_context,
        }
    }

    pub fn play(&self, sound: Sound) {
        if let Some(sound) = self.sounds.get(&sound) {
            sound.play(&self.audio_context, PlaySoundParams::default());
        }
    }
}
