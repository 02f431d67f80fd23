// Venue directory ingestion pipeline.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic): data model, parser,
//   location normalization
// - `infra/` = Implementations of core traits (the HTTP directory client)
//
// The Discord-facing layers of the bot consume this crate; nothing in here
// renders embeds or touches the database. The pipeline fetches records,
// parses them into the domain model, and resolves location names onto the
// internal enums. Merging the result into venue storage is the caller's job.

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
pub mod core;
#[path = "infra/infra_layer.rs"]
pub mod infra;
