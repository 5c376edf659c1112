//! Path template compiler.
//!
//! `/api/users/:id/posts/:post` is scanned once into literal and parameter
//! parts. The server side compiles the parts into an anchored regex; the
//! client side substitutes positional values into the same parts. Sharing
//! the scan keeps parameter order identical on both sides.

use std::collections::BTreeMap;

use regex::Regex;

use crate::RouteError;

/// One piece of a scanned path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Param(String),
}

/// A scanned path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    parts: Vec<TemplatePart>,
}

fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl PathTemplate {
    /// Scan a template. A `:` not followed by a name character is literal.
    pub fn parse(template: &str) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(colon) = rest.find(':') {
            let after = &rest[colon + 1..];
            let name_len = after
                .find(|c: char| !is_param_char(c))
                .unwrap_or(after.len());

            if name_len == 0 {
                literal.push_str(&rest[..=colon]);
                rest = after;
                continue;
            }

            literal.push_str(&rest[..colon]);
            if !literal.is_empty() {
                parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
            }
            parts.push(TemplatePart::Param(after[..name_len].to_string()));
            rest = &after[name_len..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(TemplatePart::Literal(literal));
        }

        Self {
            source: template.to_string(),
            parts,
        }
    }

    /// The original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// Parameter names, left to right. Duplicates are kept.
    pub fn param_names(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Param(name) => Some(name.clone()),
                TemplatePart::Literal(_) => None,
            })
            .collect()
    }

    /// Regex source: literals escaped, params as `([^/]+)`, anchored, with
    /// an optional trailing slash.
    pub fn pattern_source(&self) -> String {
        let mut pattern = String::from("^");
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => pattern.push_str(&regex::escape(text)),
                TemplatePart::Param(_) => pattern.push_str("([^/]+)"),
            }
        }
        pattern.push_str("/?$");
        pattern
    }

    /// Substitute positional values in declared order.
    ///
    /// A parameter with no value keeps its literal `:name` text. Returns the
    /// rendered path and the names left unsubstituted.
    pub fn render<S: AsRef<str>>(&self, values: &[S]) -> (String, Vec<String>) {
        let mut path = String::with_capacity(self.source.len() + 16);
        let mut missing = Vec::new();
        let mut values = values.iter();

        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => path.push_str(text),
                TemplatePart::Param(name) => match values.next() {
                    Some(value) => path.push_str(value.as_ref()),
                    None => {
                        path.push(':');
                        path.push_str(name);
                        missing.push(name.clone());
                    }
                },
            }
        }
        (path, missing)
    }
}

/// Parameter names of a template, left to right.
pub fn param_names(template: &str) -> Vec<String> {
    PathTemplate::parse(template).param_names()
}

// ---------------------------------------------------------------------------
// Compiled Pattern
// ---------------------------------------------------------------------------

/// A compiled path matcher plus its ordered parameter names.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
    param_names: Vec<String>,
}

/// Compile a path template into a [`PathPattern`].
pub fn compile_path(template: &str) -> Result<PathPattern, RouteError> {
    PathPattern::compile(&PathTemplate::parse(template))
}

impl PathPattern {
    pub fn compile(template: &PathTemplate) -> Result<Self, RouteError> {
        let regex =
            Regex::new(&template.pattern_source()).map_err(|source| RouteError::InvalidPattern {
                path: template.source().to_string(),
                source,
            })?;
        Ok(Self {
            regex,
            param_names: template.param_names(),
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Capture groups in order, or `None` if the path does not match.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        let caps = self.regex.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map_or("", |m| m.as_str()))
                .collect(),
        )
    }

    /// Zip parameter names with captures. A repeated name keeps the value
    /// of its last occurrence.
    pub fn extract(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let captures = self.captures(path)?;
        Some(
            self.param_names
                .iter()
                .cloned()
                .zip(captures.into_iter().map(str::to_string))
                .collect(),
        )
    }
}
