// Lullaby - bedtime stories with an LLM judge-and-revise loop
// Library exports

pub mod config;
pub mod errors;
pub mod generators;
pub mod story;

pub use errors::StoryError;

/// Sample requests shown by `lullaby --examples`
pub const EXAMPLE_REQUESTS: [&str; 4] = [
    "A cozy bedtime story about Alice and her best friend Bob, who happens to be a cat.",
    "A silly bedtime story about a penguin who learns to share.",
    "A calm bedtime story about a child who finds a tiny lost star and helps it go home.",
    "An adventurous bedtime story about a squirrel who feels brave for the first time (not scary!).",
];

/// Used when the reader enters an empty request
pub const DEFAULT_REQUEST: &str =
    "A cozy bedtime story about a child and a friendly cat who find a lost star.";
