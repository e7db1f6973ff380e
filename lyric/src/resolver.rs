use crate::types::SyncedLine;

/// Playback jumps larger than this many seconds between two consecutive
/// ticks are reported as seeks.
pub const SEEK_JUMP_SECS: f64 = 2.0;

/// The outcome of one resolver tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The currently active line, if any.
    pub index: Option<usize>,
    /// Whether the active line changed on this tick.
    pub changed: bool,
    /// Whether this tick followed a discontinuous jump in playback time.
    /// Display layers may use it to skip transition animation; the
    /// resolution itself never branches on it.
    pub seeked: bool,
}

/// Maps a playback clock onto a timed line list, one tick at a time.
///
/// The resolver owns the active-line index and the previous time sample
/// used for jump detection. It is created per track and discarded (or
/// [`reset`](LineResolver::reset)) when the track changes; the line list is
/// immutable input on every tick.
#[derive(Debug, Default)]
pub struct LineResolver {
    current_index: Option<usize>,
    last_observed_secs: f64,
}

impl LineResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active line index, `None` before any line has resolved.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Clear all bookkeeping. Call on track change.
    pub fn reset(&mut self) {
        self.current_index = None;
        self.last_observed_secs = 0.0;
    }

    /// Advance the resolver to `current_time_secs`.
    ///
    /// Picks the latest line not in the future: the greatest index whose
    /// `start_time_ms` is at or before the current time. The scan runs
    /// from the last element down and takes the first match, so duplicate
    /// timestamps resolve to the highest array index, and lines starting
    /// in the future are skipped individually rather than assuming the
    /// input is sorted.
    ///
    /// Once playback time is positive, a time with no matching line
    /// resolves to the first line instead of nothing, so lead-in silence
    /// does not blank the display. At exactly zero the index stays
    /// unresolved.
    pub fn advance(&mut self, current_time_secs: f64, lines: &[SyncedLine]) -> Resolution {
        if lines.is_empty() {
            return Resolution {
                index: self.current_index,
                changed: false,
                seeked: false,
            };
        }

        let seeked = (current_time_secs - self.last_observed_secs).abs() > SEEK_JUMP_SECS;
        self.last_observed_secs = current_time_secs;

        let current_time_ms = current_time_secs * 1000.0;

        let mut resolved = lines
            .iter()
            .enumerate()
            .rev()
            .find(|(_, line)| line.start_time_ms as f64 <= current_time_ms)
            .map(|(index, _)| index);

        if resolved.is_none() && current_time_ms > 0.0 {
            resolved = Some(0);
        }

        let changed = match resolved {
            Some(index) if index < lines.len() && self.current_index != Some(index) => {
                self.current_index = Some(index);
                true
            }
            _ => false,
        };

        Resolution {
            index: self.current_index,
            changed,
            seeked,
        }
    }
}

/// The lines surrounding the active one, each independently guarded
/// against the ends of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWindow<'a> {
    pub previous: Option<&'a SyncedLine>,
    pub current: Option<&'a SyncedLine>,
    pub next: Option<&'a SyncedLine>,
}

pub fn line_window(lines: &[SyncedLine], index: usize) -> LineWindow<'_> {
    LineWindow {
        previous: index.checked_sub(1).and_then(|i| lines.get(i)),
        current: lines.get(index),
        next: lines.get(index + 1),
    }
}
