// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool implementations, one module per domain family.

pub(crate) mod documents;
pub(crate) mod rooms;
pub(crate) mod tasks;

use crate::output::ToolOutput;

/// Deserializes a tool's JSON input into its typed struct, folding failure
/// into an error output.
pub(crate) fn parse_input<T: serde::de::DeserializeOwned>(
    input: serde_json::Value,
) -> Result<T, ToolOutput> {
    serde_json::from_value(input).map_err(|e| ToolOutput::error(format!("invalid input: {e}")))
}

/// Human display form of a stored normalized value: underscores to spaces,
/// each word title-cased ("STAY_OVER" shows as "Stay Over").
pub(crate) fn display_value(raw: &str) -> String {
    raw.split('_')
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
