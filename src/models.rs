pub mod auth;
pub mod directory;
pub mod documents;
pub mod locations;
pub mod orders;
pub mod stats;
pub mod tenancy;
