//! CLI command implementations
//!
//! Every command reads one c.e file, builds an index and writes a single
//! result to stdout. Log lines go to stderr.

use std::path::Path;

use serde_json::{json, Value};

use crate::boundary::IndexHandle;
use crate::config::Config;
use crate::index::{EliminationIndex, GeoIndex};
use crate::input::import_labels;
use crate::observability::{Logger, Severity};
use crate::primitives::{BBox, Label};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_response, write_text};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    Logger::route_all_to_stderr(true);

    match cmd {
        Command::Query {
            input,
            min_t,
            bbox,
            geo,
            config,
        } => query(&input, min_t, &bbox, geo, config.as_deref()),
        Command::Inspect { input, config } => inspect(&input, config.as_deref()),
        Command::Dump { input, config } => dump(&input, config.as_deref()),
    }
}

/// Answer one query and write the matching labels
pub fn query(
    input: &Path,
    min_t: f64,
    bbox: &str,
    geo: bool,
    config_path: Option<&Path>,
) -> CliResult<()> {
    let config = load_config(config_path)?;
    let data = query_value(input, min_t, &parse_bbox(bbox)?, geo, &config)?;
    write_response(data)
}

/// Write index statistics
pub fn inspect(input: &Path, config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let handle = open(input, &config)?;
    let index = ready_index(&handle)?;
    write_response(stats_value(index))
}

/// Write the tree dump
pub fn dump(input: &Path, config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let handle = open(input, &config)?;
    let index = ready_index(&handle)?;
    write_text(&index.render())
}

/// Parse `min_x,min_y,max_x,max_y`.
///
/// The order of the corners is not checked here; the index rejects inverted
/// boxes and the geographic index reads `min_x > max_x` as a wrap-around.
pub fn parse_bbox(raw: &str) -> CliResult<BBox> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim().parse::<f64>().map_err(|e| {
                CliError::invalid_argument(format!("bbox value '{}': {}", part.trim(), e))
            })
        })
        .collect::<CliResult<Vec<f64>>>()?;

    match values.as_slice() {
        [min_x, min_y, max_x, max_y] => Ok(BBox::new(*min_x, *min_y, *max_x, *max_y)),
        _ => Err(CliError::invalid_argument(format!(
            "bbox needs 4 comma separated numbers (min_x,min_y,max_x,max_y), got '{}'",
            raw
        ))),
    }
}

/// Defaults and a WARN threshold without a file, the file's values otherwise.
fn load_config(path: Option<&Path>) -> CliResult<Config> {
    match path {
        Some(path) => {
            let config = Config::load(path)?;
            config.apply_logging()?;
            Ok(config)
        }
        None => {
            Logger::set_min_severity(Severity::Warn);
            Ok(Config::default())
        }
    }
}

fn open(input: &Path, config: &Config) -> CliResult<IndexHandle> {
    let handle = IndexHandle::init_with_config(input, config);
    match handle.diagnostic() {
        Some(err) => Err(CliError::from(err)),
        None => Ok(handle),
    }
}

fn ready_index(handle: &IndexHandle) -> CliResult<&EliminationIndex> {
    handle
        .index()
        .ok_or_else(|| CliError::invalid_argument("handle holds no index"))
}

fn query_value(
    input: &Path,
    min_t: f64,
    bbox: &BBox,
    geo: bool,
    config: &Config,
) -> CliResult<Value> {
    if geo {
        let index = GeoIndex::build(import_labels(input)?, config)?;
        return labels_value(&index.query(bbox, min_t)?);
    }

    let handle = open(input, config)?;
    let labels = handle.query(bbox, min_t)?;
    labels_value(&labels)
}

fn labels_value(labels: &[&Label]) -> CliResult<Value> {
    Ok(serde_json::to_value(labels)?)
}

fn stats_value(index: &EliminationIndex) -> Value {
    json!({
        "labels": index.len(),
        "nodes": index.node_count(),
        "depth": index.depth(),
        "bucket_leaves": index.bucket_leaves(),
        "bounds": index.bounds(),
        "max_elimination_time": index.max_elimination_time(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LABELS: &str = "\
3
lat lon osm_id priority collision_time label_length size_factor label
1.0 1.0 1 0 5.0 10.0 1.0 'A'
2.0 2.0 2 0 1.0 10.0 1.0 'B'
9.0 9.0 3 0 9.0 10.0 1.0 'C'
";

    fn write_labels(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("labels.ce");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_bbox() {
        let bbox = parse_bbox("-10, -5,10,5").unwrap();
        assert_eq!(bbox, BBox::new(-10.0, -5.0, 10.0, 5.0));

        assert!(parse_bbox("1,2,3").is_err());
        assert!(parse_bbox("1,2,3,x").is_err());
        assert_eq!(
            parse_bbox("").unwrap_err().code_str(),
            "ELIM_CLI_INVALID_ARGUMENT"
        );
    }

    #[test]
    fn test_query_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_labels(&temp_dir, LABELS);

        let value = query_value(
            &path,
            2.0,
            &BBox::new(0.0, 0.0, 3.0, 3.0),
            false,
            &Config::default(),
        )
        .unwrap();
        let labels = value.as_array().unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0]["id"], 1);
        assert_eq!(labels[0]["text"], "A");
    }

    #[test]
    fn test_query_value_geo_wraps() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_labels(
            &temp_dir,
            "\
2
header
10.0 175.0 1 0 2.0 1.0 1.0 'east'
10.0 -175.0 2 0 2.0 1.0 1.0 'west'
",
        );

        let value = query_value(
            &path,
            0.0,
            &BBox::new(170.0, 0.0, -170.0, 20.0),
            true,
            &Config::default(),
        )
        .unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);

        let err = query_value(
            &path,
            0.0,
            &BBox::new(170.0, 0.0, -170.0, 20.0),
            false,
            &Config::default(),
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "ELIM_INVALID_QUERY");
    }

    #[test]
    fn test_malformed_input_reports_code() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_labels(&temp_dir, "1\nheader\nnot a record\n");

        let err = open(&path, &Config::default()).unwrap_err();
        assert_eq!(err.code_str(), "ELIM_MALFORMED_RECORD");
        assert!(err.message().contains("line 3"));
    }

    #[test]
    fn test_stats_value() {
        let index = EliminationIndex::from_labels(
            vec![Label::point(1, 0.0, 0.0, 2.0), Label::point(2, 4.0, 3.0, 7.0)],
            &Config::default(),
        )
        .unwrap();

        let stats = stats_value(&index);
        assert_eq!(stats["labels"], 2);
        assert_eq!(stats["nodes"], 1);
        assert_eq!(stats["max_elimination_time"], 7.0);
        assert_eq!(stats["bounds"]["max_x"], 4.0);
    }
}
