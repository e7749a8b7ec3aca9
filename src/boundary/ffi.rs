//! C interface
//!
//! ```c
//! DataStructure *ds = init("labels.ce");
//! if (is_good(ds)) {
//!     C_Result r = get_data(ds, min_t, min_x, max_x, min_y, max_y);
//!     for (uint64_t i = 0; i < r.size; i++) { ... r.data[i].label ... }
//! }
//! release(ds);
//! ```
//!
//! The label array of a result and the strings it points to belong to the
//! handle. They stay valid until the next `get_data` on the same handle or
//! until `release`.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::input::ParseError;
use crate::observability::Logger;
use crate::primitives::{BBox, Label};

use super::handle::IndexHandle;

/// Query answered
pub const STATUS_OK: i32 = 0;
/// Handle is NULL or not good
pub const STATUS_PRECONDITION: i32 = 1;
/// Malformed box or NaN threshold
pub const STATUS_INVALID_QUERY: i32 = 2;

/// Opaque handle. Created by [`init`], freed by [`release`].
pub struct DataStructure {
    handle: IndexHandle,
    last_labels: Vec<CLabel>,
    last_texts: Vec<CString>,
}

/// One label of a query result.
///
/// `size_factor` comes last so that hosts reading only the first six fields
/// keep working.
///
/// C equivalent:
/// ```c
/// typedef struct {
///     double x;
///     double y;
///     double t;
///     int64_t osm_id;
///     int32_t prio;
///     const char *label;
///     double size_factor;
/// } C_Label;
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CLabel {
    pub x: f64,
    pub y: f64,
    pub t: f64,
    pub osm_id: i64,
    pub prio: i32,
    pub label: *const c_char,
    pub size_factor: f64,
}

/// Result of [`get_data`].
///
/// `status` follows `size` and `data` so that hosts reading only those two
/// fields keep working.
///
/// C equivalent:
/// ```c
/// typedef struct {
///     uint64_t size;
///     const C_Label *data;
///     int32_t status;
/// } C_Result;
/// ```
#[repr(C)]
#[derive(Debug)]
pub struct CResult {
    pub size: u64,
    pub data: *const CLabel,
    pub status: i32,
}

impl CResult {
    fn failed(status: i32) -> Self {
        Self {
            status,
            size: 0,
            data: ptr::null(),
        }
    }
}

impl DataStructure {
    fn new(handle: IndexHandle) -> Self {
        Self {
            handle,
            last_labels: Vec::new(),
            last_texts: Vec::new(),
        }
    }

    fn fill(&mut self, min_t: f64, bbox: &BBox) -> CResult {
        self.last_labels.clear();
        self.last_texts.clear();

        let result = match self.handle.query(bbox, min_t) {
            Ok(result) => result,
            Err(e) => return CResult::failed(e.status()),
        };

        self.last_labels.reserve(result.len());
        self.last_texts.reserve(result.len());
        for label in result {
            let text = c_text(label);
            self.last_labels.push(CLabel {
                x: label.x(),
                y: label.y(),
                t: label.elimination_time(),
                size_factor: label.size_factor(),
                osm_id: label.id(),
                prio: label.priority(),
                // the CString's heap buffer does not move with the CString
                label: text.as_ptr(),
            });
            self.last_texts.push(text);
        }

        CResult {
            status: STATUS_OK,
            size: self.last_labels.len() as u64,
            data: self.last_labels.as_ptr(),
        }
    }
}

/// Label text up to the first NUL byte.
fn c_text(label: &Label) -> CString {
    let text = label.text();
    let end = text.find('\0').unwrap_or(text.len());
    CString::new(&text[..end]).unwrap_or_default()
}

/// Import the c.e file at `input_path` and build an index.
///
/// Never returns NULL. A NULL path, a path that is not UTF-8, or any import
/// or construction failure yields a handle for which [`is_good`] is false.
///
/// Log lines of the library go to stderr from here on; the host's stdout
/// stays untouched.
///
/// # Safety
///
/// The following invariants must be upheld when calling this function:
/// - `input_path` is NULL or points to a NUL-terminated string that stays
///   valid for the duration of the call.
///
/// C equivalent:
/// ```c
/// DataStructure *init(const char *input_path);
/// ```
#[no_mangle]
pub unsafe extern "C" fn init(input_path: *const c_char) -> *mut DataStructure {
    Logger::route_all_to_stderr(true);

    let handle = if input_path.is_null() {
        IndexHandle::failed(ParseError::invalid_path("input path is NULL").into())
    } else {
        // SAFETY:
        // As per the safety invariants of this function:
        // - `input_path` is not NULL
        // - `input_path` points to a NUL-terminated string valid for this call
        let raw = unsafe { CStr::from_ptr(input_path) };
        match raw.to_str() {
            Ok(path) => IndexHandle::init(path),
            Err(e) => IndexHandle::failed(
                ParseError::invalid_path(format!("input path is not valid UTF-8: {}", e)).into(),
            ),
        }
    };

    Box::into_raw(Box::new(DataStructure::new(handle)))
}

/// Whether the handle holds an index. False for NULL.
///
/// # Safety
///
/// - `ds` is NULL or a pointer returned by [`init`] that was not yet passed to
///   [`release`].
///
/// C equivalent:
/// ```c
/// bool is_good(const DataStructure *ds);
/// ```
#[no_mangle]
pub unsafe extern "C" fn is_good(ds: *const DataStructure) -> bool {
    if ds.is_null() {
        return false;
    }
    // SAFETY: `ds` is not NULL and, per the invariants above, points to a live handle.
    let ds = unsafe { &*ds };
    ds.handle.is_good()
}

/// All labels with `min_x <= x <= max_x`, `min_y <= y <= max_y` and an
/// elimination time of at least `min_t`.
///
/// `status` is [`STATUS_OK`] on success, [`STATUS_PRECONDITION`] for a NULL or
/// failed handle and [`STATUS_INVALID_QUERY`] for a malformed query. Any status
/// other than [`STATUS_OK`] comes with `size == 0` and a NULL `data`.
///
/// The returned array replaces the one of the previous call on this handle.
///
/// # Safety
///
/// - `ds` is NULL or a pointer returned by [`init`] that was not yet passed to
///   [`release`].
/// - No other call on the same handle runs concurrently.
///
/// C equivalent:
/// ```c
/// C_Result get_data(DataStructure *ds, double min_t, double min_x, double max_x,
///                   double min_y, double max_y);
/// ```
#[no_mangle]
pub unsafe extern "C" fn get_data(
    ds: *mut DataStructure,
    min_t: f64,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
) -> CResult {
    if ds.is_null() {
        return CResult::failed(STATUS_PRECONDITION);
    }
    // SAFETY:
    // As per the safety invariants of this function:
    // - `ds` is not NULL and points to a live handle
    // - no other reference to the handle exists during this call
    let ds = unsafe { &mut *ds };
    ds.fill(min_t, &BBox::new(min_x, min_y, max_x, max_y))
}

/// Free the handle, its index and the buffers of the last result.
///
/// NULL is ignored.
///
/// # Safety
///
/// - `ds` is NULL or a pointer returned by [`init`] that was not yet passed to
///   [`release`].
///
/// C equivalent:
/// ```c
/// void release(DataStructure *ds);
/// ```
#[no_mangle]
pub unsafe extern "C" fn release(ds: *mut DataStructure) {
    if ds.is_null() {
        return;
    }
    // SAFETY: `ds` was created by `Box::into_raw` in `init` and is released only once.
    let ds = unsafe { Box::from_raw(ds) };
    ds.handle.release();
}
