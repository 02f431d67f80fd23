// Core venues module - the venue data model and the record parser.
// Following the same pattern as the locations module.

pub mod venue_models;
pub mod venue_parser;

pub use venue_models::*;
pub use venue_parser::{parse_venue, parse_venues, ApiVenue};
