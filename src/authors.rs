//! # Authors Module
//!
//! Extracts copyright holders from existing file content so a rewritten
//! header keeps the people who were already credited.

use std::sync::LazyLock;

use regex::Regex;

use crate::templates::Author;

// Copyright [(c)|©] YEAR[ - YEAR][,] NAME
static COPYRIGHT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"Copyright[ \t]*(?:\([cC]\)|©)?[ \t]*(\d{4})(?:[ \t]*-[ \t]*(\d{4}))?,?[ \t]+(\w[\w .\-]*)")
    .expect("copyright regex must compile")
});

/// Finds every `Copyright (c) <year> <name>` line in `content`.
///
/// Year ranges are normalised to `YYYY-YYYY` and surrounding whitespace is
/// trimmed from names. Duplicates are dropped, and the result is ordered by
/// first year; authors sharing a year keep their order of appearance.
pub fn extract_authors(content: &str) -> Vec<Author> {
  let mut authors: Vec<Author> = Vec::new();

  for caps in COPYRIGHT_REGEX.captures_iter(content) {
    let year = match caps.get(2) {
      Some(to) if to.as_str() != &caps[1] => format!("{}-{}", &caps[1], to.as_str()),
      _ => caps[1].to_string(),
    };
    let name = caps[3].trim();
    if name.is_empty() {
      continue;
    }

    let author = Author::new(name, &year);
    if !authors.contains(&author) {
      authors.push(author);
    }
  }

  authors.sort_by(|a, b| first_year(a).cmp(first_year(b)));
  authors
}

fn first_year(author: &Author) -> &str {
  author.year.split('-').next().unwrap_or_default()
}

/// Authors found in `content`, or `fallback` when there are none.
pub fn authors_or(content: &str, fallback: &[Author]) -> Vec<Author> {
  let extracted = extract_authors(content);
  if extracted.is_empty() {
    fallback.to_vec()
  } else {
    extracted
  }
}
