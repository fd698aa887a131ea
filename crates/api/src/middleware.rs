/// Bearer-token sessions and the actor extractor
pub mod auth;
/// Mapping of domain errors onto HTTP responses
pub mod error_handling;
/// Json, Path and Query extractors that reject through `AppError`
pub mod extract;
