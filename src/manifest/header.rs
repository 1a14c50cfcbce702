//! JAR manifest and OSGi header parsing
//!
//! Only the main section of a manifest is read. Attribute names are matched
//! case-insensitively, as the JAR specification requires.

use std::collections::HashMap;

/// Main-section attributes of a `META-INF/MANIFEST.MF`
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    headers: HashMap<String, String>,
}

impl Manifest {
    /// Parse manifest text
    ///
    /// Continuation lines start with a single space. The main section ends at
    /// the first empty line.
    pub fn parse(text: &str) -> Self {
        let mut headers = HashMap::new();
        let mut current: Option<(String, String)> = None;

        for line in text.lines() {
            if line.is_empty() {
                break;
            }
            if let Some(continued) = line.strip_prefix(' ') {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(continued);
                }
                continue;
            }
            if let Some((name, value)) = current.take() {
                headers.insert(name, value);
            }
            if let Some((name, value)) = line.split_once(':') {
                let value = value.strip_prefix(' ').unwrap_or(value);
                current = Some((name.trim().to_ascii_lowercase(), value.to_string()));
            }
        }
        if let Some((name, value)) = current {
            headers.insert(name, value);
        }

        Self { headers }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Parse an OSGi header into clauses; a missing header yields no clauses
    pub fn clauses(&self, name: &str) -> Vec<Clause> {
        self.get(name).map(parse_clauses).unwrap_or_default()
    }
}

/// One clause of an OSGi header, e.g. `org.foo;org.bar;version="1.0";resolution:=optional`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clause {
    pub names: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub directives: Vec<(String, String)>,
}

impl Clause {
    pub fn directive(&self, key: &str) -> Option<&str> {
        self.directives
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_optional(&self) -> bool {
        self.directive("resolution") == Some("optional")
    }
}

/// Split `value` on `separator`, ignoring separators inside double quotes
fn split_unquoted(value: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == separator && !in_quotes {
            parts.push(&value[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&value[start..]);
    parts
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .to_string()
}

/// Parse the value of an OSGi header into clauses
pub fn parse_clauses(value: &str) -> Vec<Clause> {
    split_unquoted(value, ',')
        .into_iter()
        .filter(|clause| !clause.trim().is_empty())
        .map(|clause| {
            let mut parsed = Clause::default();
            for segment in split_unquoted(clause, ';') {
                let segment = segment.trim();
                if segment.is_empty() {
                    continue;
                }
                if let Some((key, value)) = segment.split_once(":=") {
                    parsed
                        .directives
                        .push((key.trim().to_string(), unquote(value)));
                } else if let Some((key, value)) = segment.split_once('=') {
                    parsed
                        .attributes
                        .push((key.trim().to_string(), unquote(value)));
                } else {
                    parsed.names.push(segment.to_string());
                }
            }
            parsed
        })
        .collect()
}
