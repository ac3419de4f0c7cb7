use serde::Serialize;

use crate::error::Error;

/// A command result that can be printed as a single JSON line or as plain text.
pub trait CommandOutput: Serialize {
    /// Human readable rendering, one field per line.
    fn plain(&self) -> String;

    /// Renders the result for stdout, as plain text if `plain` is set and JSON otherwise.
    fn render(&self, plain: bool) -> Result<String, Error> {
        if plain {
            return Ok(self.plain());
        }
        Ok(serde_json::to_string(self)?)
    }
}
