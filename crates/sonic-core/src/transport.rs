//! Simulated playback transport
//!
//! Nothing is audible. The position advances by a fixed step on each
//! playback tick and stops (rewinding to zero) once it reaches the track
//! duration; it never loops.

#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    is_playing: bool,
    position_secs: f64,
    duration_secs: f64,
    step_secs: f64,
    /// 0-100
    master_volume: u8,
}

impl Transport {
    pub fn new(step_secs: f64, master_volume: u8) -> Self {
        Self {
            is_playing: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            step_secs,
            master_volume: master_volume.min(100),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn master_volume(&self) -> u8 {
        self.master_volume
    }

    pub fn set_master_volume(&mut self, volume: u8) {
        self.master_volume = volume.min(100);
    }

    /// Load a new track length; stops and rewinds
    pub fn load(&mut self, duration_secs: f64) {
        self.is_playing = false;
        self.position_secs = 0.0;
        self.duration_secs = duration_secs.max(0.0);
    }

    /// Forget the track; stops and rewinds
    pub fn unload(&mut self) {
        self.load(0.0);
    }

    /// Flip play/pause. Playback needs a track with a duration.
    pub fn toggle(&mut self) -> bool {
        if self.is_playing {
            self.is_playing = false;
        } else if self.duration_secs > 0.0 {
            self.is_playing = true;
        }
        self.is_playing
    }

    /// Jump to an absolute position, clamped to the track
    pub fn seek(&mut self, secs: f64) {
        self.position_secs = secs.clamp(0.0, self.duration_secs);
    }

    /// Jump to a fraction of the track
    pub fn seek_fraction(&mut self, fraction: f64) {
        self.seek(fraction.clamp(0.0, 1.0) * self.duration_secs);
    }

    /// Jump to the start of the track
    pub fn skip_back(&mut self) {
        self.seek(0.0);
    }

    /// Jump to the end of the track; the next tick stops playback
    pub fn skip_forward(&mut self) {
        self.seek(self.duration_secs);
    }

    /// Position as a fraction of the track, 0 when nothing is loaded
    pub fn progress(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            0.0
        } else {
            (self.position_secs / self.duration_secs).clamp(0.0, 1.0)
        }
    }

    /// Advance one playback tick
    ///
    /// Returns `true` when the end of the track stopped playback.
    pub fn tick(&mut self) -> bool {
        if !self.is_playing {
            return false;
        }
        if self.position_secs >= self.duration_secs {
            self.is_playing = false;
            self.position_secs = 0.0;
            log::debug!("transport: reached end of track, stopped");
            return true;
        }
        self.position_secs += self.step_secs;
        false
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(0.1, 80)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_play_without_track() {
        let mut transport = Transport::default();
        assert!(!transport.toggle());
        assert_eq!(transport.progress(), 0.0);
        assert!(!transport.tick());
    }

    #[test]
    fn test_playback_stops_and_rewinds_at_end() {
        let mut transport = Transport::new(0.5, 80);
        transport.load(1.0);
        assert!(transport.toggle());

        assert!(!transport.tick());
        assert!(!transport.tick());
        assert_eq!(transport.position_secs(), 1.0);
        assert!(transport.tick());
        assert!(!transport.is_playing());
        assert_eq!(transport.position_secs(), 0.0);
    }

    #[test]
    fn test_paused_transport_does_not_move() {
        let mut transport = Transport::default();
        transport.load(10.0);
        transport.seek(3.0);
        transport.tick();
        assert_eq!(transport.position_secs(), 3.0);
    }

    #[test]
    fn test_seek_and_skip_clamp() {
        let mut transport = Transport::default();
        transport.load(200.0);
        transport.seek_fraction(0.5);
        assert_eq!(transport.position_secs(), 100.0);
        assert!((transport.progress() - 0.5).abs() < 1e-9);
        transport.seek_fraction(3.0);
        assert_eq!(transport.position_secs(), 200.0);
        transport.seek(-5.0);
        assert_eq!(transport.position_secs(), 0.0);
        transport.skip_forward();
        assert_eq!(transport.position_secs(), 200.0);
        transport.skip_back();
        assert_eq!(transport.position_secs(), 0.0);
    }

    #[test]
    fn test_volume_is_capped() {
        let mut transport = Transport::new(0.1, 250);
        assert_eq!(transport.master_volume(), 100);
        transport.set_master_volume(30);
        assert_eq!(transport.master_volume(), 30);
    }
}
