//! Boundary Lifecycle Tests
//!
//! Tests for handle invariants:
//! - init never fails loudly; is_good tells whether an index exists
//! - Queries on a failed handle are rejected
//! - The C interface tolerates NULL and keeps result buffers alive until the
//!   next call

use elimination_index::boundary::ffi::{
    get_data, init, is_good, release, STATUS_INVALID_QUERY, STATUS_OK, STATUS_PRECONDITION,
};
use elimination_index::boundary::{BoundaryError, HandleState, IndexHandle};
use elimination_index::config::Config;
use elimination_index::primitives::BBox;
use std::ffi::{CStr, CString};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const BREMEN: &str = "\
5
lat lon osm_id priority collision_time label_length size_factor label
53.143155300000004 8.9351249 3627273522 1 1.4922737369836614 3300.0 11.0 'Timmersloh'
53.200157000000004 8.528893 253042611 2 1.5769136968447124 1650.0 11.0 'Farge'
53.170524900000004 8.6238803 2147118476 3 2.2440622447579543 2880.0 12.0 'Vegesack'
53.5522264 8.5865509 660314734 4 4.751763965397364 7260.0 22.0 'Bremerhaven'
53.0758196 8.8071646 20982927 5 3686.835042292192 4320.0 24.0 'Bremen'
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn bremen_area() -> BBox {
    BBox::new(8.0, 53.0, 9.0, 54.0)
}

// =============================================================================
// Safe Handle Tests
// =============================================================================

/// A valid file yields a good handle that answers queries.
#[test]
fn test_valid_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "bremen.ce", BREMEN);

    let handle = IndexHandle::init(&path);
    assert!(handle.is_good());
    assert!(matches!(handle.state(), HandleState::Ready(_)));

    let result = handle.query(&bremen_area(), 2.0).unwrap();
    let mut names: Vec<&str> = result.iter().map(|l| l.text()).collect();
    names.sort();
    assert_eq!(names, vec!["Bremen", "Bremerhaven", "Vegesack"]);

    handle.release();
}

/// An empty file is a good handle with nothing in it.
#[test]
fn test_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "empty.ce", "");

    let handle = IndexHandle::init(&path);
    assert!(handle.is_good());
    assert!(handle.query(&bremen_area(), 0.0).unwrap().is_empty());
}

/// A malformed file yields a failed handle whose queries are rejected.
#[test]
fn test_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "broken.ce", "2\nheader\n53.1 8.9 1 1 1.0 'x'\n");

    let handle = IndexHandle::init(&path);
    assert!(!handle.is_good());
    assert_eq!(
        handle.diagnostic().map(|e| e.code()),
        Some("ELIM_MALFORMED_RECORD")
    );

    let err = handle.query(&bremen_area(), 0.0).unwrap_err();
    assert!(matches!(err, BoundaryError::Precondition(_)));
    assert_eq!(handle.metrics().queries_rejected, 1);
}

/// Duplicate ids in a file fail construction, not parsing.
#[test]
fn test_duplicate_ids_in_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(
        &temp_dir,
        "dupes.ce",
        "2\nheader\n1.0 1.0 7 1 1.0 1.0 1.0 'a'\n2.0 2.0 7 1 1.0 1.0 1.0 'b'\n",
    );

    let handle = IndexHandle::init(&path);
    assert_eq!(handle.diagnostic().map(|e| e.code()), Some("ELIM_DUPLICATE_ID"));

    let relaxed = Config {
        require_unique_ids: false,
        ..Config::default()
    };
    assert!(IndexHandle::init_with_config(&path, &relaxed).is_good());
}

/// Configured limits are applied by init.
#[test]
fn test_resource_limit() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "bremen.ce", BREMEN);

    let config = Config {
        max_labels: 4,
        ..Config::default()
    };
    let handle = IndexHandle::init_with_config(&path, &config);
    assert_eq!(handle.diagnostic().map(|e| e.code()), Some("ELIM_RESOURCE_LIMIT"));
}

/// A handle can be shared between threads.
#[test]
fn test_handle_shared_between_threads() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "bremen.ce", BREMEN);
    let handle = IndexHandle::init(&path);

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..25 {
                    assert_eq!(handle.query(&bremen_area(), 0.0).unwrap().len(), 5);
                }
            });
        }
    });
    assert_eq!(handle.metrics().queries_executed, 100);
    assert_eq!(handle.metrics().labels_returned, 500);
}

// =============================================================================
// C Interface Tests
// =============================================================================

/// init, is_good, get_data and release on a valid file.
#[test]
fn test_ffi_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "bremen.ce", BREMEN);
    let c_path = CString::new(path.to_str().unwrap()).unwrap();

    unsafe {
        let ds = init(c_path.as_ptr());
        assert!(!ds.is_null());
        assert!(is_good(ds));

        let r = get_data(ds, 4.0, 8.0, 9.0, 53.0, 54.0);
        assert_eq!(r.status, STATUS_OK);
        assert_eq!(r.size, 2);

        let labels = std::slice::from_raw_parts(r.data, r.size as usize);
        let mut names: Vec<String> = labels
            .iter()
            .map(|l| CStr::from_ptr(l.label).to_str().unwrap().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Bremen", "Bremerhaven"]);

        let bremen = labels.iter().find(|l| l.osm_id == 20982927).unwrap();
        assert_eq!(bremen.x, 8.8071646);
        assert_eq!(bremen.y, 53.0758196);
        assert_eq!(bremen.prio, 5);
        assert_eq!(bremen.size_factor, 24.0);

        let r = get_data(ds, 0.0, 9.0, 8.0, 53.0, 54.0);
        assert_eq!(r.status, STATUS_INVALID_QUERY);
        assert_eq!(r.size, 0);

        release(ds);
    }
}

/// A missing file gives a handle that is not good and rejects queries.
#[test]
fn test_ffi_missing_file() {
    let c_path = CString::new("/nonexistent/labels.ce").unwrap();

    unsafe {
        let ds = init(c_path.as_ptr());
        assert!(!is_good(ds));

        let r = get_data(ds, 0.0, -180.0, 180.0, -90.0, 90.0);
        assert_eq!(r.status, STATUS_PRECONDITION);
        assert_eq!(r.size, 0);
        assert!(r.data.is_null());

        release(ds);
    }
}

/// NULL pointers are tolerated everywhere.
#[test]
fn test_ffi_null() {
    unsafe {
        let ds = init(std::ptr::null());
        assert!(!is_good(ds));
        release(ds);

        assert!(!is_good(std::ptr::null()));
        assert_eq!(
            get_data(std::ptr::null_mut(), 0.0, 0.0, 1.0, 0.0, 1.0).status,
            STATUS_PRECONDITION
        );
        release(std::ptr::null_mut());
    }
}
