//! Database ID type definition.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
/// The server-assigned ID of a line item.
pub type LineItemId = DatabaseID;
