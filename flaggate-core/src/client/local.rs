//! Client backed by a static override file

use super::TreatmentClient;
use crate::error::LocalFactoryError;
use crate::models::treatment;
use std::collections::HashMap;
use std::path::Path;

/// Fixed treatments per flag, independent of the key.
///
/// The override file holds one `<flag> <treatment>` pair per line. Blank lines
/// and lines starting with `#` are ignored.
#[derive(Debug, Clone, Default)]
pub struct LocalClient {
    overrides: HashMap<String, String>,
}

impl LocalClient {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    pub fn from_file(path: &Path) -> Result<Self, LocalFactoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| LocalFactoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, LocalFactoryError> {
        let mut overrides = HashMap::new();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                [flag, value] => {
                    overrides.insert(flag.to_string(), value.to_string());
                }
                _ => {
                    return Err(LocalFactoryError::Parse {
                        path: path.to_path_buf(),
                        line: index + 1,
                        reason: format!("expected '<flag> <treatment>', got '{}'", line),
                    })
                }
            }
        }

        tracing::debug!(flag_count = overrides.len(), "Parsed override file");
        Ok(Self { overrides })
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl TreatmentClient for LocalClient {
    fn get_treatment(&self, _key: &str, flag: &str) -> String {
        self.overrides
            .get(flag)
            .cloned()
            .unwrap_or_else(|| treatment::CONTROL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<LocalClient, LocalFactoryError> {
        LocalClient::parse(Path::new("/tmp/.split"), content)
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let client = parse("# overrides\n\ncheckout on\n  search   off  \n").unwrap();
        assert_eq!(client.len(), 2);
        assert!(client.is_on("user", "checkout"));
        assert_eq!(client.get_treatment("user", "search"), "off");
    }

    #[test]
    fn test_later_lines_override_earlier() {
        let client = parse("checkout off\ncheckout on\n").unwrap();
        assert_eq!(client.get_treatment("user", "checkout"), "on");
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = parse("checkout on\nbroken\n").unwrap_err();
        match err {
            LocalFactoryError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_flag_is_control() {
        let client = LocalClient::default();
        assert!(client.is_empty());
        assert_eq!(client.get_treatment("user", "anything"), treatment::CONTROL);
    }
}
