//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{DocweaveArgs, OutputFormat};
use crate::error::Result;

/// Result structure for a build run.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildSummary {
    pub items_read: usize,
    pub documents_built: usize,
    pub fields_emitted: usize,
    pub failed_items: Vec<String>,
    pub duration_ms: u64,
}

/// Result structure for a configuration check.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub configured_fields: usize,
    pub configured_types: usize,
    pub computed_fields: Vec<String>,
    pub parallel_computed_fields: bool,
    pub degree_of_parallelism: usize,
    pub stop_on_crawl_field_error: bool,
}

/// Output result based on the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &DocweaveArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &DocweaveArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    match serde_json::to_value(result)? {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                println!("{key}: {}", format_value(&val));
            }
        }
        value => println!("{}", format_value(&value)),
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &DocweaveArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&serde_json::json!("x")), "x");
        assert_eq!(format_value(&serde_json::json!(["a", "b"])), "a, b");
        assert_eq!(format_value(&serde_json::json!(3)), "3");
        assert_eq!(format_value(&serde_json::json!(true)), "true");
    }
}
