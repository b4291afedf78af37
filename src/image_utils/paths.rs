//! Windows to WSL path conversion

use crate::image_utils::common::error::{ProcessingError, Result};

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Converts a Windows path such as `C:\data\run1` to its WSL mount `/mnt/c/data/run1`.
///
/// The first character is taken as the drive letter and lowercased. A leading
/// `X:` is dropped and every run of backslashes becomes a single `/`.
pub fn convert_win_path_to_linux(path: &str) -> Result<String> {
    let mut chars = path.chars();
    let drive = match chars.next() {
        Some(ch) if is_word_char(ch) => ch,
        _ => return Err(ProcessingError::InvalidPath(path.to_string())),
    };

    let rest = chars.as_str();
    let suffix = match rest.strip_prefix(':') {
        Some(after_drive) => after_drive,
        None => path,
    };

    let mut converted = String::with_capacity(path.len() + 5);
    converted.push_str("/mnt/");
    converted.extend(drive.to_lowercase());

    let mut in_separator = false;
    for ch in suffix.chars() {
        if ch == '\\' {
            if !in_separator {
                converted.push('/');
            }
            in_separator = true;
        } else {
            converted.push(ch);
            in_separator = false;
        }
    }

    Ok(converted)
}
