use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound};

/// Sound effects the game can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sfx {
    Eat,
    GameOver,
}

/// Fire-and-forget playback. Implementations must not block and must
/// swallow their own failures.
pub trait SoundPlayer {
    fn play(&mut self, sfx: Sfx);
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _sfx: Sfx) {}
}

const SAMPLE_RATE: u32 = 44_100;

/// A short synthesized beep.
#[derive(Debug, Clone, Copy)]
pub struct Tone {
    pub frequency_hz: f32,
    pub seconds: f32,
    pub volume: f32,
}

impl Tone {
    pub const EAT: Tone = Tone { frequency_hz: 880.0, seconds: 0.08, volume: 0.6 };
    pub const GAME_OVER: Tone = Tone { frequency_hz: 110.0, seconds: 0.35, volume: 0.7 };

    /// Encode as a mono 16-bit PCM WAV file with a linear fade-out.
    pub fn to_wav(self) -> Vec<u8> {
        let samples = (self.seconds * SAMPLE_RATE as f32) as u32;
        let data_len = samples * 2;
        let mut out = Vec::with_capacity(44 + data_len as usize);

        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        out.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());

        let peak = self.volume.clamp(0.0, 1.0) * i16::MAX as f32;
        for n in 0..samples {
            let t = n as f32 / SAMPLE_RATE as f32;
            let fade = 1.0 - n as f32 / samples as f32;
            let s = (std::f32::consts::TAU * self.frequency_hz * t).sin() * peak * fade;
            out.extend_from_slice(&(s as i16).to_le_bytes());
        }
        out
    }
}

/// Sounds played through macroquad's mixer. A sound that failed to load is
/// simply skipped.
pub struct ToneBank {
    eat: Option<Sound>,
    game_over: Option<Sound>,
}

impl ToneBank {
    pub async fn load() -> Self {
        Self {
            eat: load_tone("eat", Tone::EAT).await,
            game_over: load_tone("game over", Tone::GAME_OVER).await,
        }
    }
}

async fn load_tone(name: &str, tone: Tone) -> Option<Sound> {
    match load_sound_from_bytes(&tone.to_wav()).await {
        Ok(sound) => Some(sound),
        Err(err) => {
            tracing::warn!(sound = name, error = ?err, "could not load sound, skipping it");
            None
        }
    }
}

impl SoundPlayer for ToneBank {
    fn play(&mut self, sfx: Sfx) {
        let (sound, volume) = match sfx {
            Sfx::Eat => (&self.eat, 0.35),
            Sfx::GameOver => (&self.game_over, 0.6),
        };
        if let Some(sound) = sound {
            play_sound(sound, PlaySoundParams { looped: false, volume });
        }
    }
}
