//! Sound collaborator
//!
//! Fire-and-forget requests queued for the host's audio backend.

/// Playback options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoundOptions {
    pub looping: bool,
}

impl SoundOptions {
    pub const LOOP: Self = Self { looping: true };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundRequest {
    pub name: String,
    pub options: SoundOptions,
}

/// Pending sound requests
#[derive(Debug, Clone, Default)]
pub struct SoundState {
    pub queue: Vec<SoundRequest>,
}

impl SoundState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play_sound(&mut self, name: &str, options: SoundOptions) {
        self.queue.push(SoundRequest {
            name: name.to_owned(),
            options,
        });
    }

    /// Hand every pending request to the host
    pub fn drain(&mut self) -> impl Iterator<Item = SoundRequest> + '_ {
        self.queue.drain(..)
    }
}
