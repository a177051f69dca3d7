pub mod common_name;
pub mod dedup;
pub mod extractor;
pub mod normalizer;
pub mod patterns;
pub mod reconciler;
pub mod record;
pub mod validator;
