//! Episode view model, raw API records, and the shaping between them

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A single podcast episode, shaped for display.
///
/// Shaped once from the raw API record and immutable afterwards. The duration
/// string and the publication date are precomputed here so the views never
/// format on the render path.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub url: String,
    pub duration_secs: u32,
    pub duration_as_string: String,
    pub published_at: String,
    pub description: String,
}

impl Episode {
    pub fn from_raw(raw: RawEpisode) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            members: raw.members,
            thumbnail: raw.thumbnail,
            url: raw.file.url,
            duration_secs: raw.file.duration,
            duration_as_string: format_duration(raw.file.duration),
            published_at: format_published_at(&raw.published_at),
            description: raw.description,
        }
    }
}

/// Episode record as returned by the podcast API
#[derive(Clone, Debug, Deserialize)]
pub struct RawEpisode {
    pub id: String,
    pub title: String,
    pub members: String,
    #[serde(default)]
    pub thumbnail: String,
    pub published_at: String,
    #[serde(default)]
    pub description: String,
    pub file: RawEpisodeFile,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawEpisodeFile {
    pub url: String,
    #[serde(deserialize_with = "duration_from_api")]
    pub duration: u32,
}

/// The API serves `file.duration` either as a number or as a numeric string.
fn duration_from_api<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Secs {
        Num(f64),
        Text(String),
    }

    match Secs::deserialize(deserializer)? {
        Secs::Num(n) => Ok(n.max(0.0) as u32),
        Secs::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(|n| n.max(0.0) as u32)
            .map_err(serde::de::Error::custom),
    }
}

/// Format a duration in seconds as "HH:MM:SS"
pub fn format_duration(total_secs: u32) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format an ISO publication date as e.g. "22 Jan 21".
///
/// Falls back to the raw string if the API sends something unparsable.
pub fn format_published_at(iso: &str) -> String {
    let date = DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(iso, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%-d %b %y").to_string(),
        Err(_) => {
            tracing::debug!(published_at = %iso, "Unparsable publication date from API");
            iso.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_durations_with_hours() {
        assert_eq!(format_duration(5400), "01:30:00");
    }

    #[test]
    fn formats_durations_under_an_hour() {
        assert_eq!(format_duration(90), "00:01:30");
        assert_eq!(format_duration(0), "00:00:00");
    }

    #[test]
    fn formats_rfc3339_publication_dates() {
        assert_eq!(format_published_at("2021-01-22T11:34:48.000Z"), "22 Jan 21");
        assert_eq!(format_published_at("2021-04-08 10:05:02"), "8 Apr 21");
    }

    #[test]
    fn keeps_unparsable_dates_as_is() {
        assert_eq!(format_published_at("soon"), "soon");
    }

    #[test]
    fn shapes_raw_records_with_numeric_duration() {
        let raw: RawEpisode = serde_json::from_str(
            r#"{
                "id": "a-importancia-da-contribuicao-em-open-source",
                "title": "Faladev #30",
                "members": "Diego e Richard",
                "thumbnail": "https://example.com/thumb.jpg",
                "published_at": "2021-01-22T11:34:48.000Z",
                "description": "<p>Neste episódio...</p>",
                "file": {
                    "url": "https://example.com/audio.mp3",
                    "duration": 3981
                }
            }"#,
        )
        .unwrap();

        let episode = Episode::from_raw(raw);
        assert_eq!(episode.duration_secs, 3981);
        assert_eq!(episode.duration_as_string, "01:06:21");
        assert_eq!(episode.published_at, "22 Jan 21");
        assert_eq!(episode.url, "https://example.com/audio.mp3");
    }

    #[test]
    fn shapes_raw_records_with_string_duration() {
        let raw: RawEpisode = serde_json::from_str(
            r#"{
                "id": "ep-2",
                "title": "Episode two",
                "members": "Crew",
                "published_at": "2021-02-01T09:00:00.000Z",
                "file": { "url": "https://example.com/2.mp3", "duration": "90" }
            }"#,
        )
        .unwrap();

        assert_eq!(raw.file.duration, 90);
        assert_eq!(Episode::from_raw(raw).duration_as_string, "00:01:30");
    }
}
