use crate::puzzle::PuzzleState;
use std::fmt;
use std::fs;
use std::io;

/// Error type for level parsing operations.
#[derive(Debug)]
pub enum LevelError {
    /// IO error when reading from file
    Io(io::Error),
    /// Invalid level content
    InvalidLevel(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(err) => write!(f, "IO error: {}", err),
            LevelError::InvalidLevel(msg) => write!(f, "Invalid level: {}", msg),
        }
    }
}

impl From<io::Error> for LevelError {
    fn from(err: io::Error) -> Self {
        LevelError::Io(err)
    }
}

impl From<String> for LevelError {
    fn from(err: String) -> Self {
        LevelError::InvalidLevel(err)
    }
}

/// A collection of Sokoban levels in XSB format. This is the level
/// repository the search core consumes initial states from.
#[derive(Debug)]
pub struct Levels {
    levels: Vec<PuzzleState>,
}

impl Levels {
    /// Parse XSB-formatted levels from a string.
    ///
    /// Lines starting with `;` are comments/separators; a blank line
    /// ends the level in progress. Each level body is handed to
    /// [`PuzzleState::from_text`].
    pub fn from_text(contents: &str) -> Result<Self, LevelError> {
        let mut levels = Vec::new();
        let mut current = String::new();

        for line in contents.lines() {
            let is_separator = line.is_empty() || line.trim_start().starts_with(';');
            if is_separator {
                if !current.is_empty() {
                    levels.push(PuzzleState::from_text(current.trim_end())?);
                    current.clear();
                }
                continue;
            }
            current.push_str(line);
            current.push('\n');
        }

        // Files need not end with a separator.
        if !current.is_empty() {
            levels.push(PuzzleState::from_text(current.trim_end())?);
        }

        Ok(Levels { levels })
    }

    /// Parse XSB-formatted levels from a text file.
    pub fn from_file(path: &str) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    /// Get the nth level (0-indexed).
    pub fn get(&self, index: usize) -> Option<&PuzzleState> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_basic() {
        let level1 = "####
# .#
#  ###
#*@  #
#  $ #
#  ###
####";

        let level2 = "######
#    #
# #@ #
# $* #
# .* #
#    #
######";

        let xsb_content = format!("; 1\n\n{}\n\n; 2\n\n{}\n", level1, level2);
        let levels = Levels::from_text(&xsb_content).unwrap();

        assert_eq!(levels.len(), 2);
        assert_eq!(levels.get(0).unwrap().to_string().trim_end(), level1);
        assert_eq!(levels.get(1).unwrap().to_string().trim_end(), level2);
        assert!(levels.get(2).is_none());
    }

    #[test]
    fn test_from_text_no_trailing_separator() {
        let xsb_content = "####\n#@$.#\n####";
        let levels = Levels::from_text(xsb_content).unwrap();
        assert_eq!(levels.len(), 1);
    }

    #[test]
    fn test_from_text_invalid_level() {
        let xsb_content = "; 1\n\n####\n#@q#\n####\n";
        let result = Levels::from_text(xsb_content);
        assert!(matches!(result, Err(LevelError::InvalidLevel(_))));
    }

    #[test]
    fn test_from_file_no_file() {
        let result = Levels::from_file("nonexistent_file.xsb");
        assert!(matches!(result, Err(LevelError::Io(_))));
    }
}
