pub mod jooble_client;

pub use jooble_client::JoobleSearchClient;
