// Deserialization of directory-service JSON into the domain model.
//
// Two distinct decoding policies meet here:
// - the record's identity fields (`id`, `name`, `managers`) are strict and
//   fail the whole record when absent or unusable;
// - every nested substructure is tolerant and decodes to `None` when its
//   source object is absent.
// Timestamps are the exception at the leaf level: a present-but-malformed
// timestamp anywhere fails the record.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::venue_models::{
    IntervalSpec, Location, ParseError, ScheduleComponent, ScheduleOverride, TimeOfDay,
    TimeResolution, UtcSchedule, VenueRecord,
};

/// Parse one directory record. Fails on missing identity fields, unusable
/// manager IDs, or malformed timestamps; everything else defaults.
pub fn parse_venue(raw: ApiVenue) -> Result<VenueRecord, ParseError> {
    let id = raw.id.ok_or(ParseError::MissingField("id"))?;
    let name = raw.name.ok_or(ParseError::MissingField("name"))?;
    let managers = parse_managers(raw.managers)?;

    let schedule = raw
        .schedule
        .unwrap_or_default()
        .into_iter()
        .map(parse_schedule_entry)
        .collect::<Result<Vec<_>, _>>()?;

    let schedule_overrides = raw
        .schedule_overrides
        .unwrap_or_default()
        .into_iter()
        .map(parse_schedule_override)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(VenueRecord {
        id,
        name,
        banner_uri: raw.banner_uri,
        added: parse_datetime(raw.added)?,
        description: raw.description.unwrap_or_default(),
        location: raw.location.map(parse_location),
        website: raw.website,
        discord: raw.discord,
        hiring: raw.hiring.unwrap_or(false),
        sfw: raw.sfw.unwrap_or(false),
        schedule,
        schedule_overrides,
        managers,
        // The service pads deleted tags with nulls rather than compacting.
        tags: raw
            .tags
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect(),
        approved: raw.approved.unwrap_or(false),
        last_modified: parse_datetime(raw.last_modified)?,
        mare_code: raw.mare_code,
        mare_password: raw.mare_password,
        resolution: parse_resolution(raw.resolution)?,
    })
}

/// Parse a bulk listing. One malformed record fails the batch; the unit of
/// failure for a bulk endpoint is the request.
pub fn parse_venues(raw: Vec<ApiVenue>) -> Result<Vec<VenueRecord>, ParseError> {
    raw.into_iter().map(parse_venue).collect()
}

fn parse_managers(raw: Option<Vec<Value>>) -> Result<Vec<u64>, ParseError> {
    let raw = raw.ok_or(ParseError::MissingField("managers"))?;
    if raw.is_empty() {
        return Err(ParseError::InvalidManagers("list is empty".to_string()));
    }

    raw.into_iter()
        .map(|entry| match entry {
            // IDs arrive as integer-like strings; bare numbers are accepted
            // in case the service ever stops stringifying them.
            Value::String(s) => s
                .parse::<u64>()
                .map_err(|_| ParseError::InvalidManagers(format!("`{s}` is not a user ID"))),
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| ParseError::InvalidManagers(format!("`{n}` is not a user ID"))),
            other => Err(ParseError::InvalidManagers(format!(
                "unexpected entry {other}"
            ))),
        })
        .collect()
}

fn parse_location(raw: ApiLocation) -> Location {
    Location {
        data_center: raw.data_center,
        world: raw.world,
        zone: raw.zone,
        ward: raw.ward,
        plot: raw.plot,
        apartment: raw.apartment,
        room: raw.room,
        subdivision: raw.subdivision.unwrap_or(false),
        shard: raw.shard,
        override_label: raw.override_label,
    }
}

fn parse_schedule_entry(raw: ApiScheduleEntry) -> Result<ScheduleComponent, ParseError> {
    Ok(ScheduleComponent {
        commencing: parse_datetime(raw.commencing)?,
        day: raw.day,
        start: raw.start.map(parse_time_of_day),
        end: raw.end.map(parse_time_of_day),
        interval: raw.interval.map(|i| IntervalSpec {
            interval_type: i.interval_type.unwrap_or(0),
            interval_argument: i.interval_argument.unwrap_or(0),
        }),
        location: raw.location.map(parse_location),
        resolution: parse_resolution(raw.resolution)?,
        utc: parse_utc(raw.utc)?,
    })
}

fn parse_time_of_day(raw: ApiTimeOfDay) -> TimeOfDay {
    TimeOfDay {
        hour: raw.hour.unwrap_or(0),
        minute: raw.minute.unwrap_or(0),
        time_zone: raw.time_zone,
        next_day: raw.next_day.unwrap_or(false),
    }
}

fn parse_resolution(raw: Option<ApiResolution>) -> Result<Option<TimeResolution>, ParseError> {
    let Some(raw) = raw else { return Ok(None) };
    Ok(Some(TimeResolution {
        start: parse_datetime(raw.start)?,
        end: parse_datetime(raw.end)?,
        is_now: raw.is_now.unwrap_or(false),
        is_within_week: raw.is_within_week.unwrap_or(false),
    }))
}

fn parse_utc(raw: Option<ApiUtcSchedule>) -> Result<Option<UtcSchedule>, ParseError> {
    let Some(raw) = raw else { return Ok(None) };
    Ok(Some(UtcSchedule {
        from: parse_datetime(raw.from)?,
        day: raw.day,
        start: raw.start.map(parse_time_of_day),
        end: raw.end.map(parse_time_of_day),
        location: raw.location,
    }))
}

fn parse_schedule_override(raw: ApiScheduleOverride) -> Result<ScheduleOverride, ParseError> {
    Ok(ScheduleOverride {
        open: raw.open.unwrap_or(false),
        start: parse_datetime(raw.start)?,
        end: parse_datetime(raw.end)?,
        is_now: raw.is_now.unwrap_or(false),
    })
}

/// ISO-8601 to UTC. The service usually sends an offset; a bare local
/// timestamp is taken as UTC. Present-but-malformed input is an error.
fn parse_datetime(value: Option<String>) -> Result<Option<DateTime<Utc>>, ParseError> {
    let Some(raw) = value else { return Ok(None) };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|_| ParseError::InvalidTimestamp(raw))
}

// ============================================================================
// WIRE TYPES
// ============================================================================
// Every field is optional at this level; the strict/tolerant split is applied
// by the parse functions above, not by serde.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVenue {
    pub id: Option<String>,
    pub name: Option<String>,
    pub banner_uri: Option<String>,
    pub added: Option<String>,
    pub description: Option<Vec<String>>,
    pub location: Option<ApiLocation>,
    pub website: Option<String>,
    pub discord: Option<String>,
    pub hiring: Option<bool>,
    pub sfw: Option<bool>,
    pub schedule: Option<Vec<ApiScheduleEntry>>,
    pub schedule_overrides: Option<Vec<ApiScheduleOverride>>,
    pub managers: Option<Vec<Value>>,
    pub tags: Option<Vec<Option<String>>>,
    pub approved: Option<bool>,
    pub last_modified: Option<String>,
    pub mare_code: Option<String>,
    pub mare_password: Option<String>,
    pub resolution: Option<ApiResolution>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLocation {
    pub data_center: Option<String>,
    pub world: Option<String>,
    pub zone: Option<String>,
    pub ward: Option<u32>,
    pub plot: Option<u32>,
    pub apartment: Option<u32>,
    pub room: Option<u32>,
    pub subdivision: Option<bool>,
    pub shard: Option<i64>,
    #[serde(rename = "override")]
    pub override_label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScheduleEntry {
    pub commencing: Option<String>,
    pub day: Option<String>,
    pub start: Option<ApiTimeOfDay>,
    pub end: Option<ApiTimeOfDay>,
    pub interval: Option<ApiInterval>,
    pub location: Option<ApiLocation>,
    pub resolution: Option<ApiResolution>,
    pub utc: Option<ApiUtcSchedule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTimeOfDay {
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub time_zone: Option<String>,
    pub next_day: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInterval {
    pub interval_type: Option<i32>,
    pub interval_argument: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResolution {
    pub start: Option<String>,
    pub end: Option<String>,
    pub is_now: Option<bool>,
    pub is_within_week: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUtcSchedule {
    pub from: Option<String>,
    pub day: Option<String>,
    pub start: Option<ApiTimeOfDay>,
    pub end: Option<ApiTimeOfDay>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScheduleOverride {
    pub open: Option<bool>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub is_now: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_fixture() -> Value {
        json!({
            "id": "cafe-aether",
            "name": "Café Aether",
            "bannerUri": "https://cdn.example.com/banners/cafe-aether.png",
            "added": "2023-04-02T19:30:00Z",
            "description": ["A cozy rooftop café.", "Walk-ins welcome."],
            "location": {
                "dataCenter": "Aether",
                "world": "Jenova",
                "zone": "Lavender Beds",
                "ward": 12,
                "plot": 34,
                "subdivision": true
            },
            "website": "https://cafe-aether.example.com",
            "discord": "https://discord.gg/cafeaether",
            "hiring": true,
            "sfw": true,
            "schedule": [
                {
                    "commencing": "2023-04-07T00:00:00Z",
                    "day": "Friday",
                    "start": {"hour": 20, "minute": 0, "timeZone": "America/New_York", "nextDay": false},
                    "end": {"hour": 1, "minute": 0, "timeZone": "America/New_York", "nextDay": true},
                    "interval": {"intervalType": 1, "intervalArgument": 1},
                    "resolution": {
                        "start": "2023-04-14T00:00:00Z",
                        "end": "2023-04-14T05:00:00Z",
                        "isNow": false,
                        "isWithinWeek": true
                    },
                    "utc": {"day": "Saturday", "start": {"hour": 0, "minute": 0}, "end": {"hour": 5, "minute": 0}}
                },
                {
                    "day": "Sunday",
                    "start": {"hour": 18, "minute": 30, "timeZone": "Europe/London"}
                }
            ],
            "scheduleOverrides": [
                {"open": false, "start": "2023-04-21T00:00:00Z", "end": "2023-04-22T00:00:00Z", "isNow": false}
            ],
            "managers": ["123456789012345678", "876543210987654321"],
            "tags": ["café", null, "rooftop"],
            "approved": true,
            "lastModified": "2023-04-10T08:15:00Z",
            "resolution": {"start": "2023-04-14T00:00:00Z", "end": "2023-04-14T05:00:00Z", "isNow": false, "isWithinWeek": true}
        })
    }

    fn parse_fixture(value: Value) -> Result<VenueRecord, ParseError> {
        let raw: ApiVenue = serde_json::from_value(value).unwrap();
        parse_venue(raw)
    }

    #[test]
    fn test_full_fixture_preserves_identity_and_counts() {
        let input = full_fixture();
        let venue = parse_fixture(input.clone()).unwrap();

        // String identity, no coercion.
        assert_eq!(venue.id, input["id"].as_str().unwrap());
        assert_eq!(venue.name, "Café Aether");

        // Round-trip: schedule component count and manager IDs survive.
        assert_eq!(venue.schedule.len(), input["schedule"].as_array().unwrap().len());
        assert_eq!(venue.managers, vec![123456789012345678, 876543210987654321]);
        assert_eq!(venue.schedule_overrides.len(), 1);
    }

    #[test]
    fn test_nested_fields_default_when_absent() {
        let venue = parse_fixture(json!({
            "id": "v1",
            "name": "Minimal",
            "managers": ["42"]
        }))
        .unwrap();

        assert!(venue.location.is_none());
        assert!(venue.schedule.is_empty());
        assert!(venue.schedule_overrides.is_empty());
        assert!(venue.resolution.is_none());
        assert!(venue.added.is_none());
        assert!(!venue.hiring);
        assert!(!venue.approved);
    }

    #[test]
    fn test_missing_managers_is_malformed() {
        let err = parse_fixture(json!({"id": "v1", "name": "No Managers"})).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("managers")));
    }

    #[test]
    fn test_empty_managers_is_malformed() {
        let err = parse_fixture(json!({"id": "v1", "name": "X", "managers": []})).unwrap_err();
        assert!(matches!(err, ParseError::InvalidManagers(_)));
    }

    #[test]
    fn test_non_numeric_manager_is_malformed() {
        let err =
            parse_fixture(json!({"id": "v1", "name": "X", "managers": ["not-a-number"]}))
                .unwrap_err();
        assert!(matches!(err, ParseError::InvalidManagers(_)));
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let err = parse_fixture(json!({"name": "X", "managers": ["42"]})).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("id")));
    }

    #[test]
    fn test_malformed_timestamp_fails_whole_record() {
        let err = parse_fixture(json!({
            "id": "v1",
            "name": "X",
            "managers": ["42"],
            "added": "yesterday-ish"
        }))
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_offsetless_timestamp_is_taken_as_utc() {
        let venue = parse_fixture(json!({
            "id": "v1",
            "name": "X",
            "managers": ["42"],
            "added": "2023-04-02T19:30:00"
        }))
        .unwrap();
        assert_eq!(venue.added.unwrap().to_rfc3339(), "2023-04-02T19:30:00+00:00");
    }

    #[test]
    fn test_unknown_interval_type_passes_through() {
        let venue = parse_fixture(json!({
            "id": "v1",
            "name": "X",
            "managers": ["42"],
            "schedule": [{"day": "Monday", "interval": {"intervalType": 99, "intervalArgument": 3}}]
        }))
        .unwrap();

        let interval = venue.schedule[0].interval.unwrap();
        assert_eq!(interval.interval_type, 99);
        assert_eq!(interval.interval_argument, 3);
    }

    #[test]
    fn test_null_tags_are_filtered() {
        let venue = parse_fixture(json!({
            "id": "v1",
            "name": "X",
            "managers": ["42"],
            "tags": [null, "den", null, "tavern"]
        }))
        .unwrap();
        assert_eq!(venue.tags, vec!["den", "tavern"]);
    }

    #[test]
    fn test_time_of_day_timezone_resolution() {
        let venue = parse_fixture(full_fixture()).unwrap();
        let start = venue.schedule[0].start.as_ref().unwrap();
        assert_eq!(start.timezone(), Some(chrono_tz::America::New_York));

        let sunday_start = venue.schedule[1].start.as_ref().unwrap();
        assert_eq!(sunday_start.timezone(), Some(chrono_tz::Europe::London));
    }

    #[test]
    fn test_parse_venues_fails_batch_on_one_bad_record() {
        let raw: Vec<ApiVenue> = serde_json::from_value(json!([
            {"id": "a", "name": "A", "managers": ["1"]},
            {"id": "b", "name": "B"}
        ]))
        .unwrap();
        assert!(parse_venues(raw).is_err());
    }
}
