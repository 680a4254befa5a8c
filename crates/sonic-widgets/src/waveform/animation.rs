//! Redraw loop bookkeeping
//!
//! While playback runs the waveform redraws every display frame. The shell
//! subscribes to frame events only while [`AnimationLoop::is_animating`] holds,
//! so dropping back to `Idle` is what tears the loop down. Each start hands out
//! a fresh [`AnimationHandle`]; cancelling with a stale handle is a no-op.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Idle,
    Animating { handle: AnimationHandle },
}

#[derive(Debug, Clone)]
pub struct AnimationLoop {
    state: LoopState,
    next_id: u64,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            next_id: 1,
            frames: 0,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, LoopState::Animating { .. })
    }

    /// Handle of the running loop, if any
    pub fn handle(&self) -> Option<AnimationHandle> {
        match self.state {
            LoopState::Animating { handle } => Some(handle),
            LoopState::Idle => None,
        }
    }

    /// Start the loop; a running loop keeps its handle
    pub fn start(&mut self) -> AnimationHandle {
        if let LoopState::Animating { handle } = self.state {
            return handle;
        }
        let handle = AnimationHandle(self.next_id);
        self.next_id += 1;
        self.frames = 0;
        self.state = LoopState::Animating { handle };
        log::debug!("animation: started {:?}", handle);
        handle
    }

    pub fn stop(&mut self) {
        if let LoopState::Animating { handle } = self.state {
            log::debug!("animation: stopped {:?} after {} frames", handle, self.frames);
        }
        self.state = LoopState::Idle;
    }

    /// Stop the loop only if `handle` is the current one
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        if self.handle() == Some(handle) {
            self.stop();
            true
        } else {
            false
        }
    }

    /// Follow the transport: animate while playing, idle otherwise
    pub fn sync(&mut self, is_playing: bool) {
        match (is_playing, self.is_animating()) {
            (true, false) => {
                self.start();
            }
            (false, true) => self.stop(),
            _ => {}
        }
    }

    /// Record a display frame; returns whether a redraw is due
    pub fn on_frame(&mut self) -> bool {
        if self.is_animating() {
            self.frames += 1;
            true
        } else {
            false
        }
    }

    /// Frames drawn since the current loop started
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_idempotent() {
        let mut anim = AnimationLoop::new();
        let first = anim.start();
        assert_eq!(anim.start(), first);
        assert!(anim.is_animating());
    }

    #[test]
    fn test_stale_handle_is_ignored() {
        let mut anim = AnimationLoop::new();
        let old = anim.start();
        anim.stop();
        let current = anim.start();
        assert_ne!(old, current);
        assert!(!anim.cancel(old));
        assert!(anim.is_animating());
        assert!(anim.cancel(current));
        assert!(!anim.is_animating());
    }

    #[test]
    fn test_sync_follows_playback() {
        let mut anim = AnimationLoop::new();
        anim.sync(false);
        assert!(!anim.is_animating());
        anim.sync(true);
        assert!(anim.is_animating());
        assert!(anim.on_frame());
        assert!(anim.on_frame());
        assert_eq!(anim.frames(), 2);
        anim.sync(false);
        assert!(!anim.is_animating());
        assert!(!anim.on_frame());
        assert_eq!(anim.handle(), None);
    }
}
