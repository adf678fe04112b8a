use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::tokenizer::split_to_words;

/// Splits every line of `reader` into words, one list per line.
///
/// Line endings are not part of the words. Blank lines give empty lists, so
/// the index of a list is the line's position in the input.
pub fn split_lines<R: BufRead>(reader: R) -> anyhow::Result<Vec<Vec<String>>> {
    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", index + 1))?;
        lines.push(split_to_words(&line));
    }
    debug!(lines = lines.len(), "split input into words");
    Ok(lines)
}

/// Opens `path` and splits it with [`split_lines`].
pub fn split_file(path: impl AsRef<Path>) -> anyhow::Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    split_lines(BufReader::new(file)).with_context(|| format!("failed to split {}", path.display()))
}
