/// Hexadecimal encoding utilities.
pub mod hex;

/// String manipulation and formatting utilities.
pub mod strings;
