//! Label store and c.e file import
//!
//! File layout:
//!
//! ```text
//! 5
//! lat lon osm_id priority collision_time label_length size_factor label
//! 53.143155300000004 8.9351249 3627273522 1 1.4922737369836614 3300.0 11.0 'Timmersloh'
//! ...
//! ```
//!
//! The first line holds the number of records, the second line is a header
//! and is skipped. A source without any line is an empty store.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::observability::{ObservationScope, Phase};
use crate::primitives::Label;

use super::errors::{ParseError, ParseResult};
use super::parse::{parse_count, parse_label};

/// An immutable, ordered collection of labels.
///
/// Order follows the source and carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelStore {
    labels: Vec<Label>,
    declared_count: Option<usize>,
}

impl LabelStore {
    /// Wraps labels built in memory.
    pub fn from_labels(labels: Vec<Label>) -> Self {
        Self {
            labels,
            declared_count: None,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.labels.iter()
    }

    /// Label count announced by the file header, if the store came from a file
    pub fn declared_count(&self) -> Option<usize> {
        self.declared_count
    }

    /// Hands the labels over, e.g. to the index builder
    pub fn into_labels(self) -> Vec<Label> {
        self.labels
    }
}

impl<'a> IntoIterator for &'a LabelStore {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

/// Read a label store from any buffered source.
///
/// Blank record lines are skipped. The first malformed record aborts the
/// read.
pub fn read_labels<R: BufRead>(reader: R) -> ParseResult<LabelStore> {
    let mut labels = Vec::new();
    let mut declared: Option<usize> = None;

    for (idx, line_res) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line_res.map_err(|e| {
            ParseError::unreadable(format!("Failed to read line {}", line_no), e)
        })?;

        if idx == 0 {
            if line.trim().is_empty() {
                // a file consisting of blank lines only is still empty
                continue;
            }
            declared = Some(parse_count(&line).map_err(|e| e.at_line(line_no))?);
            continue;
        }
        if declared.is_none() {
            if line.trim().is_empty() {
                continue;
            }
            return Err(ParseError::malformed(
                "expected the number of labels on the first line",
            )
            .at_line(line_no));
        }
        if idx == 1 {
            // header
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        labels.push(parse_label(&line).map_err(|e| e.at_line(line_no))?);
    }

    if let Some(total) = declared {
        if total != labels.len() {
            return Err(ParseError::count_mismatch(total, labels.len()));
        }
    }

    Ok(LabelStore {
        labels,
        declared_count: declared,
    })
}

/// Import the label elimination data of the file at `path`.
///
/// # Errors
///   * the file cannot be opened or read
///   * a record is malformed or carries a negative value
///   * the number of records does not match the declared count
pub fn import_labels(path: &Path) -> ParseResult<LabelStore> {
    let path_str = path.display().to_string();
    let scope = ObservationScope::open(Phase::LabelImport, &[("path", path_str.as_str())]);

    let result = File::open(path)
        .map_err(|e| ParseError::unreadable(format!("Failed to open {}", path_str), e))
        .and_then(|file| read_labels(BufReader::new(file)));

    match &result {
        Ok(store) => scope.complete(&[("labels", store.len().to_string().as_str())]),
        Err(e) => scope.fail(&e.to_string()),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ParseErrorCode;
    use std::io::Cursor;

    const BREMEN: &str = "\
5
lat lon osm_id priority collision_time label_length size_factor label
53.143155300000004 8.9351249 3627273522 1 1.4922737369836614 3300.0 11.0 'Timmersloh'
53.200157000000004 8.528893 253042611 2 1.5769136968447124 1650.0 11.0 'Farge'
53.170524900000004 8.6238803 2147118476 3 2.2440622447579543 2880.0 12.0 'Vegesack'
53.5522264 8.5865509 660314734 4 4.751763965397364 7260.0 22.0 'Bremerhaven'
53.0758196 8.8071646 20982927 5 3686.835042292192 4320.0 24.0 'Bremen'
";

    #[test]
    fn test_read_labels() {
        let store = read_labels(Cursor::new(BREMEN)).unwrap();

        assert_eq!(store.len(), 5);
        assert_eq!(store.declared_count(), Some(5));
        assert_eq!(store.labels()[0].text(), "Timmersloh");
        assert_eq!(store.labels()[4].text(), "Bremen");
        assert_eq!(store.labels()[4].id(), 20982927);
    }

    #[test]
    fn test_empty_source() {
        let store = read_labels(Cursor::new("")).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.declared_count(), None);
    }

    #[test]
    fn test_zero_count_without_records() {
        let store = read_labels(Cursor::new("0\nlat lon osm_id\n")).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.declared_count(), Some(0));
    }

    #[test]
    fn test_trailing_blank_lines_ignored() {
        let content = format!("{}\n\n", BREMEN);
        let store = read_labels(Cursor::new(content)).unwrap();
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_count_mismatch() {
        let content = BREMEN.replacen('5', "6", 1);
        let err = read_labels(Cursor::new(content)).unwrap_err();
        assert_eq!(err.code(), ParseErrorCode::CountMismatch);
    }

    #[test]
    fn test_malformed_record_reports_line() {
        let content = "\
2
header
53.1 8.9 1 1 1.0 3300.0 11.0 'ok'
53.1 8.9 2 1 1.0 11.0 'missing length'
";
        let err = read_labels(Cursor::new(content)).unwrap_err();
        assert_eq!(err.code(), ParseErrorCode::MalformedRecord);
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_bad_count_line() {
        let err = read_labels(Cursor::new("many\nheader\n")).unwrap_err();
        assert_eq!(err.code(), ParseErrorCode::MalformedRecord);
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_import_missing_file() {
        let err = import_labels(Path::new("/nonexistent/labels.ce")).unwrap_err();
        assert_eq!(err.code(), ParseErrorCode::InputUnreadable);
    }

    #[test]
    fn test_store_iteration() {
        let store = LabelStore::from_labels(vec![
            Label::point(1, 0.0, 0.0, 1.0),
            Label::point(2, 1.0, 1.0, 2.0),
        ]);

        let ids: Vec<_> = store.iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec![1, 2]);
        let ids: Vec<_> = (&store).into_iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(store.into_labels().len(), 2);
    }
}
