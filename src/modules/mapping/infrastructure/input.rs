use std::fs;
use std::path::Path;

use crate::modules::matching::SourceId;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;

/// Read newline-delimited AniList ids from a file
pub fn load_ids_from_file(path: impl AsRef<Path>) -> AppResult<Vec<SourceId>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::IoError(format!(
            "Cannot read {} ({}). Create it with one AniList ID per line.",
            path.display(),
            e
        ))
    })?;
    Ok(parse_ids(&raw))
}

/// Parse ids one per line; blank lines are ignored, anything non-numeric is skipped with a warning
pub fn parse_ids(raw: &str) -> Vec<SourceId> {
    raw.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<SourceId>() {
                Ok(id) if trimmed.bytes().all(|b| b.is_ascii_digit()) => Some(id),
                _ => {
                    LogContext::skipped_input(index + 1, trimmed);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids_skips_blank_and_invalid_lines() {
        let raw = "20958\n\n  21 \nabc\n-5\n+7\n16498\n";
        assert_eq!(parse_ids(raw), vec![20958, 21, 16498]);
    }

    #[test]
    fn test_parse_ids_handles_crlf() {
        assert_eq!(parse_ids("1\r\n2\r\n"), vec![1, 2]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_ids_from_file("/definitely/not/here/input_ids.txt");
        assert!(matches!(result, Err(AppError::IoError(_))));
    }
}
