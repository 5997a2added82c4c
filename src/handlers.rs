pub mod auth;
pub mod directory;
pub mod documents;
pub mod locations;
pub mod orders;
pub mod preferences;
pub mod stats;
pub mod stream;
pub mod tenancy;
