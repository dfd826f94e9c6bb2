//! Genre CSV codec
//!
//! Genres are stored as a single comma-joined string in the database and
//! exposed as a list everywhere else. All split/join goes through this
//! module so the two directions cannot drift apart.

/// Split a comma-delimited string into trimmed, non-empty tokens.
pub fn parse(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join genre tokens back into the stored representation.
pub fn join(genres: &[String]) -> String {
    genres.join(",")
}
