// Venue domain model - the normalized in-memory representation of one venue
// as fetched from the external directory service.
//
// NO HTTP or Discord dependencies here - just owned data, the error taxonomy,
// and the port trait the infra layer implements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised by the directory fetch path.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory service answered with a non-success HTTP status.
    /// Not retried; the caller decides what to do with the failed request.
    #[error("directory service returned HTTP {status}")]
    Upstream { status: u16 },

    /// The request itself failed (connect, body read, JSON decode).
    #[error("directory request failed: {0}")]
    Transport(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A record failed to parse. Aborts that single record only.
#[derive(Debug, Error)]
pub enum ParseError {
    /// One of the identity fields (`id`, `name`, `managers`) is absent.
    #[error("venue record is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("venue record has unusable manager list: {0}")]
    InvalidManagers(String),

    #[error("invalid ISO-8601 timestamp: {0}")]
    InvalidTimestamp(String),
}

// ============================================================================
// MODELS
// ============================================================================

/// One venue's full descriptive and scheduling data. Produced fresh per fetch
/// and never mutated in place; callers merge it into their own storage.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueRecord {
    /// External identity, unique per directory source. Kept as the exact
    /// string the service returned - no coercion.
    pub id: String,
    pub name: String,
    pub banner_uri: Option<String>,
    pub added: Option<DateTime<Utc>>,
    pub description: Vec<String>,
    pub location: Option<Location>,
    pub website: Option<String>,
    pub discord: Option<String>,
    pub hiring: bool,
    pub sfw: bool,
    /// Ordered recurring weekly time slots. May be empty - a venue need not
    /// have a recurring schedule.
    pub schedule: Vec<ScheduleComponent>,
    pub schedule_overrides: Vec<ScheduleOverride>,
    /// Discord user IDs of the venue's managers. Never empty.
    pub managers: Vec<u64>,
    pub tags: Vec<String>,
    pub approved: bool,
    pub last_modified: Option<DateTime<Utc>>,
    pub mare_code: Option<String>,
    pub mare_password: Option<String>,
    /// Precomputed next-opening window so render paths never re-run the
    /// schedule logic.
    pub resolution: Option<TimeResolution>,
}

/// Raw location fields exactly as received, pre-normalization. The core
/// locations module translates the free-text names onto internal enums.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub data_center: Option<String>,
    pub world: Option<String>,
    pub zone: Option<String>,
    pub ward: Option<u32>,
    pub plot: Option<u32>,
    pub apartment: Option<u32>,
    pub room: Option<u32>,
    pub subdivision: bool,
    pub shard: Option<i64>,
    /// Free-text location the venue displays instead of the structured
    /// address, when set.
    pub override_label: Option<String>,
}

/// One recurring weekly time slot at which the venue is open.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleComponent {
    /// When this slot first takes effect.
    pub commencing: Option<DateTime<Utc>>,
    /// Day-of-week name as the service sends it ("Monday", ...).
    pub day: Option<String>,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
    pub interval: Option<IntervalSpec>,
    /// Per-slot location override (pop-up events away from the home address).
    pub location: Option<Location>,
    pub resolution: Option<TimeResolution>,
    pub utc: Option<UtcSchedule>,
}

/// A wall-clock time within a day, in the venue's own timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    /// IANA timezone label as received ("Europe/London", ...).
    pub time_zone: Option<String>,
    /// The slot rolls past midnight into the following day.
    pub next_day: bool,
}

impl TimeOfDay {
    /// Resolve the wire timezone label to a concrete [`Tz`]. Returns `None`
    /// when the label is absent or not a known IANA name.
    pub fn timezone(&self) -> Option<Tz> {
        self.time_zone.as_deref().and_then(|name| name.parse().ok())
    }
}

/// Repetition rule for a schedule slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSpec {
    /// Raw repetition kind as sent by the service. Deliberately NOT validated
    /// against a known set at parse time - an out-of-range value is preserved
    /// and only rejected by whichever consumer needs to interpret it.
    pub interval_type: i32,
    pub interval_argument: i32,
}

/// An explicit open/closed exception to the recurring schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOverride {
    /// `true` for an extra opening, `false` for a closure.
    pub open: bool,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub is_now: bool,
}

/// A precomputed opening window used for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeResolution {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub is_now: bool,
    pub is_within_week: bool,
}

/// The schedule slot translated into UTC by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct UtcSchedule {
    pub from: Option<DateTime<Utc>>,
    pub day: Option<String>,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
    pub location: Option<String>,
}

// ============================================================================
// PORT
// ============================================================================

/// Read-only access to the external venue directory.
///
/// Following the same pattern as the other infra-backed ports: the core layer
/// owns the trait, `infra::directory` implements it over HTTP.
#[async_trait]
pub trait VenueDirectory: Send + Sync {
    /// All venues managed by the given Discord user. Empty on zero matches.
    async fn fetch_by_manager(&self, manager_id: u64)
        -> Result<Vec<VenueRecord>, DirectoryError>;

    /// A single venue by its directory ID, or `None` when the service
    /// reports it does not exist.
    async fn fetch_by_id(&self, venue_id: &str)
        -> Result<Option<VenueRecord>, DirectoryError>;

    /// The entire directory in one pass. The service does not paginate.
    async fn fetch_all(&self) -> Result<Vec<VenueRecord>, DirectoryError>;
}
