//! Earthquake-report feed
//!
//! An independent subsystem over a fixed-schema JSON feed: a
//! `records.Earthquake` array of events, each carrying report metadata and
//! a `ShakingArea` list of per-area intensity readings. The live endpoint
//! requires a credential; without one, a static local copy of the same
//! document shape is used instead.

use crate::quake::ranking::IntensityArea;
use crate::{Result, ScrapeError};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;

/// Top-level feed document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub records: FeedRecords,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedRecords {
    #[serde(rename = "Earthquake", default)]
    pub earthquakes: Vec<Earthquake>,
}

/// One earthquake event as delivered by the feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Earthquake {
    #[serde(rename = "EarthquakeNo", default)]
    pub number: Option<u64>,

    #[serde(rename = "ReportImageURI", default)]
    pub report_image_uri: Option<String>,

    #[serde(rename = "ReportContent", default)]
    pub report_content: Option<String>,

    #[serde(rename = "EarthquakeInfo", default)]
    pub info: EarthquakeInfo,

    #[serde(rename = "Intensity", default)]
    pub intensity: Intensity,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EarthquakeInfo {
    #[serde(rename = "OriginTime", default)]
    pub origin_time: Option<String>,

    #[serde(rename = "EarthquakeMagnitude", default)]
    pub magnitude: Magnitude,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Magnitude {
    #[serde(rename = "MagnitudeType", default)]
    pub magnitude_type: Option<String>,

    #[serde(rename = "MagnitudeValue", default)]
    pub magnitude_value: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Intensity {
    #[serde(rename = "ShakingArea", default)]
    pub shaking_areas: Vec<ShakingArea>,
}

/// One county-level intensity reading, station detail excluded
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShakingArea {
    #[serde(rename = "CountyName", default)]
    pub county_name: Option<String>,

    #[serde(rename = "AreaDesc", default)]
    pub area_desc: Option<String>,

    #[serde(rename = "AreaIntensity", default)]
    pub area_intensity: Option<String>,
}

/// Flattened per-event report, the shape the rest of the crate consumes
#[derive(Debug, Clone, PartialEq)]
pub struct QuakeReport {
    pub number: Option<u64>,
    pub image_uri: Option<String>,
    pub content: Option<String>,
    pub origin_time: Option<String>,
    pub magnitude_value: Option<f64>,
    pub magnitude_type: Option<String>,
    pub areas: Vec<IntensityArea>,
}

/// Maps the raw feed document into flattened reports, first `limit` events
pub fn simplify(document: &FeedDocument, limit: usize) -> Vec<QuakeReport> {
    document
        .records
        .earthquakes
        .iter()
        .take(limit)
        .map(|quake| QuakeReport {
            number: quake.number,
            image_uri: quake.report_image_uri.clone(),
            content: quake.report_content.clone(),
            origin_time: quake.info.origin_time.clone(),
            magnitude_value: quake.info.magnitude.magnitude_value,
            magnitude_type: quake.info.magnitude.magnitude_type.clone(),
            areas: quake
                .intensity
                .shaking_areas
                .iter()
                .map(|area| IntensityArea {
                    county: area.county_name.clone().unwrap_or_default(),
                    description: area.area_desc.clone().unwrap_or_default(),
                    label: area.area_intensity.clone().unwrap_or_default(),
                })
                .collect(),
        })
        .collect()
}

/// Loads reports from the live feed endpoint
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `feed_url` - The feed endpoint
/// * `token` - The feed credential, sent as the `Authorization` query parameter
/// * `limit` - Maximum number of reports to take
pub async fn load_live(
    client: &Client,
    feed_url: &str,
    token: &str,
    limit: usize,
) -> Result<Vec<QuakeReport>> {
    let limit_param = limit.to_string();
    let response = client
        .get(feed_url)
        .query(&[("Authorization", token), ("limit", limit_param.as_str())])
        .send()
        .await
        .map_err(|e| ScrapeError::Transport {
            url: feed_url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Feed(format!(
            "feed returned HTTP {} for {}",
            status.as_u16(),
            feed_url
        )));
    }

    let body = response.text().await.map_err(|e| ScrapeError::Transport {
        url: feed_url.to_string(),
        source: e,
    })?;
    let document: FeedDocument = serde_json::from_str(&body)?;
    Ok(simplify(&document, limit))
}

/// Loads reports from the static local copy
///
/// Tolerates a leading UTF-8 BOM, which the published sample files carry.
pub fn load_sample(path: &Path, limit: usize) -> Result<Vec<QuakeReport>> {
    let raw = std::fs::read_to_string(path)?;
    let document: FeedDocument = serde_json::from_str(raw.trim_start_matches('\u{feff}'))?;
    Ok(simplify(&document, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FEED_JSON: &str = r#"{
        "success": "true",
        "records": {
            "Earthquake": [
                {
                    "EarthquakeNo": 113041,
                    "ReportImageURI": "https://example.com/report/113041.png",
                    "ReportContent": "4/23 震央位於花蓮縣近海",
                    "EarthquakeInfo": {
                        "OriginTime": "2024-04-23 07:52:42",
                        "EarthquakeMagnitude": {
                            "MagnitudeType": "芮氏規模",
                            "MagnitudeValue": 5.8
                        }
                    },
                    "Intensity": {
                        "ShakingArea": [
                            {"CountyName": "花蓮縣", "AreaDesc": "花蓮縣地區", "AreaIntensity": "5弱"},
                            {"CountyName": "南投縣", "AreaDesc": "南投縣地區", "AreaIntensity": "3級"}
                        ]
                    }
                },
                {
                    "EarthquakeNo": 113042,
                    "EarthquakeInfo": {},
                    "Intensity": {}
                }
            ]
        }
    }"#;

    #[test]
    fn test_simplify_maps_nested_fields() {
        let document: FeedDocument = serde_json::from_str(FEED_JSON).unwrap();
        let reports = simplify(&document, 10);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].number, Some(113041));
        assert_eq!(reports[0].origin_time.as_deref(), Some("2024-04-23 07:52:42"));
        assert_eq!(reports[0].magnitude_value, Some(5.8));
        assert_eq!(reports[0].magnitude_type.as_deref(), Some("芮氏規模"));
        assert_eq!(reports[0].areas.len(), 2);
        assert_eq!(reports[0].areas[0].county, "花蓮縣");
        assert_eq!(reports[0].areas[0].label, "5弱");
    }

    #[test]
    fn test_simplify_applies_limit() {
        let document: FeedDocument = serde_json::from_str(FEED_JSON).unwrap();
        let reports = simplify(&document, 1);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].number, Some(113041));
    }

    #[test]
    fn test_missing_fields_tolerated() {
        let document: FeedDocument = serde_json::from_str(FEED_JSON).unwrap();
        let reports = simplify(&document, 10);

        assert_eq!(reports[1].number, Some(113042));
        assert!(reports[1].image_uri.is_none());
        assert!(reports[1].magnitude_value.is_none());
        assert!(reports[1].areas.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let document: FeedDocument = serde_json::from_str("{}").unwrap();
        assert!(simplify(&document, 10).is_empty());
    }

    #[test]
    fn test_load_sample_strips_bom() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("\u{feff}".as_bytes()).unwrap();
        file.write_all(FEED_JSON.as_bytes()).unwrap();
        file.flush().unwrap();

        let reports = load_sample(file.path(), 5).unwrap();
        assert_eq!(reports.len(), 2);
    }

    #[test]
    fn test_load_sample_missing_file_errors() {
        let result = load_sample(Path::new("/nonexistent/sample.json"), 5);
        assert!(result.is_err());
    }
}
