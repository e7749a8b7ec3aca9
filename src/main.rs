//! elimindex: query, inspect or dump a label index built from a c.e file
//!
//! Errors are printed as `CODE: message` to stderr with exit status 1.

use elimination_index::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
