/// Identifier minted for every generated artwork.
pub type ArtifactId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monotonic per-studio counter tagging each accepted submission.
pub type GenerationToken = u64;
