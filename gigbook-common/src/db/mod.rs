//! Database access layer
//!
//! Initialization plus one repository per entity. Reads go straight to
//! the pool; every write takes an explicit transaction handle so the
//! caller owns the commit-or-rollback decision.

mod artists;
mod init;
mod models;
mod shows;
mod venues;

pub use artists::ArtistRepository;
pub use init::{create_schema, init_database, init_in_memory};
pub use models::{Artist, NewArtist, NewShow, NewVenue, ShowWithNames, Venue};
pub use shows::ShowRepository;
pub use venues::VenueRepository;

/// Transaction handle type used by all repository write operations
pub type Tx<'a> = sqlx::Transaction<'a, sqlx::Sqlite>;

/// Build the conjunctive name-match WHERE clause for a token search.
///
/// One `name LIKE ?` per token, all ANDed; SQLite LIKE is
/// case-insensitive. Callers bind one `%token%` pattern per token.
pub(crate) fn name_match_clause(token_count: usize) -> String {
    let mut clause = String::from("1=1");
    for _ in 0..token_count {
        clause.push_str(" AND name LIKE ?");
    }
    clause
}

/// Split a search phrase into whitespace tokens.
///
/// An empty or blank phrase yields no tokens; the repositories treat
/// that as "match nothing", not "match everything".
pub fn search_tokens(phrase: &str) -> Vec<String> {
    phrase.split_whitespace().map(str::to_string).collect()
}
