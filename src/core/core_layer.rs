// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "venues/mod.rs"]
pub mod venues;

#[path = "locations/location_service.rs"]
pub mod locations;
