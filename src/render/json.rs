//! JSON rendering of records.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Extent, Record};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct Export<'a> {
    extent: Option<Extent>,
    count: usize,
    records: Vec<&'a Record>,
}

/// Convert records and their extent to JSON.
pub fn to_json<'a, I>(records: I, extent: Option<Extent>, format: JsonFormat) -> Result<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let records: Vec<&Record> = records.into_iter().collect();
    let export = Export {
        extent,
        count: records.len(),
        records,
    };
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&export),
        JsonFormat::Compact => serde_json::to_string(&export),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
