use std::str::FromStr;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{LyricFile, SyncedLine, TimeTag};

static TIME_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\d+):(\d{2})\.(\d{2,3})\]").unwrap());

pub fn parse_lrc(content: &str) -> Result<LyricFile> {
    let mut lrc = LyricFile::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Parse ID tags
        if line.starts_with('[') && !line[1..].starts_with(char::is_numeric) {
            if let Some(pos) = line.find(':') {
                if line.ends_with(']') && pos + 1 < line.len() {
                    let key = &line[1..pos];
                    let value = &line[pos + 1..line.len() - 1];
                    lrc.metadata.insert(key.to_string(), value.to_string());
                }
            }
            continue;
        }

        // Collect the leading time tags; a line may carry several, as in
        // [00:12.00][00:55.10]text
        let mut tags: Vec<TimeTag> = Vec::new();
        let mut rest = line;
        while let Some(found) = TIME_TAG_RE.find(rest) {
            tags.push(TimeTag::from_str(found.as_str())?);
            rest = &rest[found.end()..];
        }

        if tags.is_empty() {
            continue; // Invalid line
        }

        let text = rest.trim().to_string();
        for tag in tags {
            lrc.lines.push(SyncedLine {
                start_time_ms: tag.as_millis(),
                text: text.clone(),
                line_id: None,
            });
        }
    }

    Ok(lrc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lrc_parser() -> Result<()> {
        let lrc_content = r#"[ti:Blue Moon]
[ar:The Marcels]
[00:12.00]Blue moon
[00:15.30]You saw me standing alone
[00:21.10][01:21.10]Repeated chorus
[00:24.000]Millisecond tags"#;

        let lrc_file = parse_lrc(lrc_content)?;

        assert_eq!(lrc_file.metadata.get("ti").unwrap(), "Blue Moon");
        assert_eq!(lrc_file.metadata.get("ar").unwrap(), "The Marcels");

        // One line per time tag, in tag order
        assert_eq!(lrc_file.lines.len(), 5);

        let first = &lrc_file.lines[0];
        assert_eq!(first.start_time_ms, 12_000);
        assert_eq!(first.text, "Blue moon");

        let second = &lrc_file.lines[1];
        assert_eq!(second.start_time_ms, 15_300);
        assert_eq!(second.text, "You saw me standing alone");

        // The repeated chorus keeps both timestamps
        assert_eq!(lrc_file.lines[2].start_time_ms, 21_100);
        assert_eq!(lrc_file.lines[3].start_time_ms, 81_100);
        assert_eq!(lrc_file.lines[2].text, "Repeated chorus");
        assert_eq!(lrc_file.lines[3].text, "Repeated chorus");

        assert_eq!(lrc_file.lines[4].start_time_ms, 24_000);

        Ok(())
    }

    #[test]
    fn test_lrc_parser_keeps_empty_lines_and_skips_junk() -> Result<()> {
        let lrc_content = r#"[00:03.00]
not a lyric line
[al]
[00:06.50]After the gap"#;

        let lrc_file = parse_lrc(lrc_content)?;

        // An instrumental marker with no text survives as an empty line
        assert_eq!(lrc_file.lines.len(), 2);
        assert_eq!(lrc_file.lines[0].text, "");
        assert_eq!(lrc_file.lines[0].start_time_ms, 3000);
        assert_eq!(lrc_file.lines[1].text, "After the gap");

        assert!(lrc_file.metadata.is_empty());

        Ok(())
    }
}
