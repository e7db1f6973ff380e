use std::{collections::HashMap, fmt, str::FromStr};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// An `[mm:ss.xx]` time tag. The fraction part accepts two digits
/// (centiseconds) or three digits (milliseconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTag {
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl TimeTag {
    pub fn as_millis(&self) -> u64 {
        (u64::from(self.minutes) * 60 + u64::from(self.seconds)) * 1000
            + u64::from(self.milliseconds)
    }
}

impl fmt::Display for TimeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:02}:{:02}.{:02}]",
            self.minutes,
            self.seconds,
            self.milliseconds / 10
        )
    }
}

impl FromStr for TimeTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        // Remove [] brackets
        let s = s.trim_start_matches('[').trim_end_matches(']');

        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            bail!("Invalid time format");
        }

        let minutes = parts[0].parse::<u32>()?;
        let second_parts: Vec<&str> = parts[1].split('.').collect();
        if second_parts.len() != 2 {
            bail!("Invalid seconds format");
        }

        let seconds = second_parts[0].parse::<u32>()?;
        let milliseconds = match second_parts[1].len() {
            2 => second_parts[1].parse::<u32>()? * 10,
            3 => second_parts[1].parse::<u32>()?,
            _ => bail!("Invalid fraction format"),
        };

        Ok(TimeTag {
            minutes,
            seconds,
            milliseconds,
        })
    }
}

/// A synchronized lyric line as delivered by the lyrics service. Every
/// field is optional on the wire; [`LyricsDocument::synced_lines`] produces
/// the sanitized form the resolver operates on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSyncedLine {
    pub text: Option<String>,
    pub start_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
}

/// A sanitized lyric line: the timestamp at which it becomes active, and
/// the displayed text, which may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedLine {
    pub start_time_ms: u64,
    pub text: String,
    pub line_id: Option<String>,
}

impl SyncedLine {
    pub fn new(start_time_ms: u64, text: impl Into<String>) -> Self {
        Self {
            start_time_ms,
            text: text.into(),
            line_id: None,
        }
    }
}

/// The lyrics payload for one track. Fetched by the surrounding data layer
/// and static for the lifetime of the track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LyricsDocument {
    pub has_synced_lyrics: bool,
    #[serde(default)]
    pub synced_lyrics: Option<Vec<RawSyncedLine>>,
    #[serde(default)]
    pub lyrics: Option<String>,
}

impl LyricsDocument {
    /// The line list the resolver operates on. Entries missing `text` or a
    /// finite `startTimeMs` are dropped; negative timestamps are clamped to
    /// zero. Input order is preserved, sorted or not; no validator enforces
    /// monotonic timestamps.
    pub fn synced_lines(&self) -> Vec<SyncedLine> {
        if !self.has_synced_lyrics {
            return Vec::new();
        }

        let Some(raw) = &self.synced_lyrics else {
            return Vec::new();
        };

        raw.iter()
            .filter_map(|line| {
                let text = line.text.clone()?;
                let start = line.start_time_ms.filter(|ms| ms.is_finite())?;
                Some(SyncedLine {
                    start_time_ms: start.max(0.0) as u64,
                    text,
                    line_id: line.line_id.clone(),
                })
            })
            .collect()
    }
}

/// A parsed lyrics file: ID tags plus the timed lines.
#[derive(Debug, Default)]
pub struct LyricFile {
    // ID tags
    pub metadata: HashMap<String, String>,
    // Lyrics content
    pub lines: Vec<SyncedLine>,
}

impl LyricFile {
    pub fn new() -> Self {
        Self {
            metadata: HashMap::new(),
            lines: Vec::new(),
        }
    }
}

impl From<LyricFile> for LyricsDocument {
    fn from(file: LyricFile) -> Self {
        let has_synced_lyrics = !file.lines.is_empty();
        let synced_lyrics = file
            .lines
            .into_iter()
            .map(|line| RawSyncedLine {
                text: Some(line.text),
                start_time_ms: Some(line.start_time_ms as f64),
                line_id: line.line_id,
            })
            .collect();

        LyricsDocument {
            has_synced_lyrics,
            synced_lyrics: Some(synced_lyrics),
            lyrics: None,
        }
    }
}
