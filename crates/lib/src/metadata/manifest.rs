//! Jar manifest attributes.

use serde::Serialize;

use crate::consts::{MANIFEST_LINE_LEN, MANIFEST_VERSION};

/// Ordered manifest attributes, starting with `Manifest-Version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestAttributes(Vec<(String, String)>);

impl Default for ManifestAttributes {
  fn default() -> Self {
    Self::new()
  }
}

impl ManifestAttributes {
  pub fn new() -> Self {
    Self(vec![("Manifest-Version".to_string(), MANIFEST_VERSION.to_string())])
  }

  /// Set an attribute, replacing the value of an existing one in place.
  ///
  /// Line breaks and NUL bytes are dropped from both name and value so a
  /// value can never start a new header line.
  pub fn insert(&mut self, name: &str, value: &str) {
    let name = single_line(name);
    let value = single_line(value);
    match self.0.iter_mut().find(|(n, _)| *n == name) {
      Some(entry) => entry.1 = value,
      None => self.0.push((name, value)),
    }
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Render as `META-INF/MANIFEST.MF` content.
  ///
  /// Lines end with CRLF and never exceed 72 bytes; longer attributes continue
  /// on lines starting with a single space. The main section ends with an
  /// empty line.
  pub fn render(&self) -> String {
    let mut out = String::new();
    for (name, value) in &self.0 {
      push_wrapped(&mut out, &format!("{}: {}", name, value));
    }
    out.push_str("\r\n");
    out
  }
}

fn single_line(text: &str) -> String {
  text.chars().filter(|c| !matches!(c, '\r' | '\n' | '\0')).collect()
}

fn push_wrapped(out: &mut String, line: &str) {
  let mut rest = line;
  let mut limit = MANIFEST_LINE_LEN;

  loop {
    if rest.len() <= limit {
      out.push_str(rest);
      out.push_str("\r\n");
      return;
    }

    let mut split = limit;
    while !rest.is_char_boundary(split) {
      split -= 1;
    }

    out.push_str(&rest[..split]);
    out.push_str("\r\n ");
    rest = &rest[split..];
    // continuation lines spend one byte on the leading space
    limit = MANIFEST_LINE_LEN - 1;
  }
}
