use serde_json::Value;
use std::io::{self, Read};

/// JSON piped on stdin, if any.
///
/// Returns `None` when stdin is a terminal or the piped text is blank, so
/// the caller can fall back to command-line flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

/// Parse piped text as JSON; blank text is no input at all.
pub fn parse_piped(text: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    log::debug!("read {} bytes of JSON from stdin", trimmed.len());
    let value: Value = serde_json::from_str(trimmed)?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_text_is_no_input() {
        assert!(parse_piped("").unwrap().is_none());
        assert!(parse_piped(" \n\t ").unwrap().is_none());
    }

    #[test]
    fn test_json_text_is_parsed() {
        let value = parse_piped("  {\"principal\": 300000}\n").unwrap();
        assert_eq!(value, Some(json!({ "principal": 300000 })));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_piped("{\"principal\":").is_err());
    }
}
