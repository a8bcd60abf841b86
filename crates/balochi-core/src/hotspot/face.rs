use tracing::debug;

use crate::content::AudioRef;
use crate::engine::{EngineCore, Session};
use crate::host::{Host, TimerId};
use crate::hotspot::{HotspotMatcher, PixelSampler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    Reopen,
}

/// Tap-the-face game.
///
/// There are no rounds: every tap on a colored area names that area, and the
/// next tap is accepted once the cue has finished.
#[derive(Debug)]
pub struct FaceGame<H, S> {
    core: EngineCore<H, Deferred>,
    sampler: S,
    matcher: HotspotMatcher,
    last_cues: Vec<AudioRef>,
}

impl<H: Host, S: PixelSampler> FaceGame<H, S> {
    pub fn new(host: H, sampler: S, matcher: HotspotMatcher) -> Self {
        let mut core = EngineCore::new(host);
        core.open_gate();
        Self {
            core,
            sampler,
            matcher,
            last_cues: Vec::new(),
        }
    }

    pub fn matcher(&self) -> &HotspotMatcher {
        &self.matcher
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Cues triggered by the last accepted tap.
    pub fn last_cues(&self) -> &[AudioRef] {
        &self.last_cues
    }

    /// Handle a tap at `(x, y)` on the overlay.
    pub fn tap(&mut self, x: u32, y: u32) {
        if !self.core.gate().is_open() {
            debug!("Tap at ({}, {}) ignored, gate closed", x, y);
            return;
        }
        let Some(color) = self.sampler.sample(x, y) else {
            debug!("Nothing to sample at ({}, {})", x, y);
            return;
        };
        let cues: Vec<AudioRef> = self.matcher.matches(color).into_iter().cloned().collect();
        if cues.is_empty() {
            debug!("No hotspot for {} at ({}, {})", color, x, y);
            return;
        }
        if !self.core.try_accept() {
            return;
        }

        let duration = self.core.play_all(&cues);
        self.last_cues = cues;
        self.core.defer(duration, Deferred::Reopen);
    }
}

impl<H: Host, S: PixelSampler> Session for FaceGame<H, S> {
    type Host = H;

    fn host(&self) -> &H {
        self.core.host()
    }

    fn host_mut(&mut self) -> &mut H {
        self.core.host_mut()
    }

    fn on_timer(&mut self, timer: TimerId) {
        if let Some(Deferred::Reopen) = self.core.fire(timer) {
            self.core.open_gate();
        }
    }

    fn cancel_pending(&mut self) {
        self.core.cancel_pending();
    }

    fn is_accepting(&self) -> bool {
        self.core.gate().is_open()
    }

    fn has_pending(&self) -> bool {
        self.core.has_pending()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::host::{MockHost, settle};
    use crate::hotspot::{FACE_REGIONS, HotspotEntry, MatchPolicy, Raster, Rgb};

    fn face(host: MockHost) -> FaceGame<MockHost, Raster> {
        FaceGame::new(host, Raster::face(), HotspotMatcher::default())
    }

    fn center_of(name: &str) -> (u32, u32) {
        FACE_REGIONS
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.center())
            .unwrap()
    }

    #[test]
    fn test_tap_plays_area_cue() {
        let mut game = face(MockHost::new());
        let (x, y) = center_of("lips");
        game.tap(x, y);

        assert_eq!(game.host().played_names(), ["colors_red"]);
        assert_eq!(game.last_cues(), [AudioRef::from("colors_red")]);
        assert!(!game.is_accepting());

        settle(&mut game);
        assert!(game.is_accepting());
    }

    #[test]
    fn test_tap_without_match_is_noop() {
        let mut game = face(MockHost::new());
        game.tap(39, 12);
        assert!(game.host().played().is_empty());
        assert!(game.is_accepting());
        assert!(!game.has_pending());
    }

    #[test]
    fn test_tap_outside_overlay_is_noop() {
        let mut game = face(MockHost::new());
        game.tap(400, 400);
        assert!(game.host().played().is_empty());
        assert!(game.is_accepting());
    }

    #[test]
    fn test_gate_blocks_taps_while_cue_plays() {
        let mut game = face(MockHost::new());
        let (x, y) = center_of("nose");
        game.tap(x, y);
        let (x, y) = center_of("hair");
        game.tap(x, y);
        assert_eq!(game.host().played_names(), ["colors_yellow"]);
    }

    #[test]
    fn test_all_matches_waits_for_longest_cue() {
        let table = vec![
            HotspotEntry::new(Rgb::new(0x40, 0x40, 0x40), "colors_black"),
            HotspotEntry::new(Rgb::DARK_GRAY, "colors_grey"),
        ];
        let matcher = HotspotMatcher::new(table, 25, MatchPolicy::AllMatches);
        let host = MockHost::new()
            .with_duration("colors_black", 400)
            .with_duration("colors_grey", 1300);
        let mut game = FaceGame::new(host, Raster::face(), matcher);

        let (x, y) = center_of("beard");
        game.tap(x, y);
        assert_eq!(game.host().played_names(), ["colors_black", "colors_grey"]);

        settle(&mut game);
        assert_eq!(game.host().now(), Duration::from_millis(1300));
        assert!(game.is_accepting());
    }
}
