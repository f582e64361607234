pub mod auth;
pub mod decks;
pub mod learn;
