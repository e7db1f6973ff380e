use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::Result;
use log::debug;

use crate::{lrc::parse_lrc, types::LyricsDocument};

/// Look for a lyrics sidecar next to an audio file, trying `.lrc` then
/// `.json` (a serialized lyrics document). Returns `None` when no sidecar
/// exists or could be read.
pub fn parse_audio_lyrics(path: PathBuf) -> Option<Result<LyricsDocument>> {
    // Try to find and parse the .lrc file
    if let Some(lyric) = parse_lyrics_with_extension(&path, "lrc", parse_lrc_document) {
        return Some(lyric);
    }

    // Try to find and parse the .json file
    if let Some(lyric) = parse_lyrics_with_extension(&path, "json", parse_json_document) {
        return Some(lyric);
    }

    None
}

/// Parse a lyrics file directly, dispatching on its extension.
pub fn parse_lyrics_file(path: &Path) -> Result<LyricsDocument> {
    let content = fs::read_to_string(path)?;

    if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
        parse_json_document(&content)
    } else {
        parse_lrc_document(&content)
    }
}

fn parse_lrc_document(content: &str) -> Result<LyricsDocument> {
    parse_lrc(content).map(LyricsDocument::from)
}

fn parse_json_document(content: &str) -> Result<LyricsDocument> {
    Ok(serde_json::from_str(content)?)
}

fn parse_lyrics_with_extension<F>(
    path: &Path,
    extension: &str,
    parse_fn: F,
) -> Option<Result<LyricsDocument>>
where
    F: Fn(&str) -> Result<LyricsDocument>,
{
    let mut file_path = path.to_path_buf();
    file_path.set_extension(extension);

    if file_path.exists() {
        let mut content = String::new();
        match fs::File::open(&file_path).and_then(|mut file| file.read_to_string(&mut content)) {
            Ok(_) => Some(parse_fn(&content)),
            Err(e) => {
                debug!("Skipping unreadable lyrics sidecar {file_path:?}: {e}");
                None
            }
        }
    } else {
        None
    }
}
