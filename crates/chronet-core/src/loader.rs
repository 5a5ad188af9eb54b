//! Edge-list file loading.

use crate::edge::{EdgeList, TemporalEdge};
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Load a comma-separated edge list.
///
/// Two record forms are accepted, decided per line:
///
/// - `source,target,start,end` - the edge is valid over `[start, end]`;
/// - `source,target,timestamp` - the edge becomes valid at `timestamp`
///   and stays valid through the final snapshot.
///
/// Blank lines and lines starting with `#` are skipped. Malformed
/// records, duplicate ordered pairs, and id-space gaps abort the load.
pub fn load_edge_list(path: impl AsRef<Path>) -> Result<EdgeList> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading edge list");

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    // Event-form records leave the end open until the whole file is read.
    let mut records: Vec<(u32, u32, u32, Option<u32>)> = Vec::new();
    let mut max_time = 0u32;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        if line_no % 1_000_000 == 0 {
            debug!(line = line_no, "reading edge list");
        }

        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        let record = match fields.as_slice() {
            [source, target, timestamp] => {
                let t = parse_field(timestamp, line_no)?;
                max_time = max_time.max(t);
                (
                    parse_field(source, line_no)?,
                    parse_field(target, line_no)?,
                    t,
                    None,
                )
            }
            [source, target, start, end] => {
                let start = parse_field(start, line_no)?;
                let end = parse_field(end, line_no)?;
                if start > end {
                    return Err(Error::Malformed {
                        line: line_no,
                        message: format!("interval start {start} exceeds end {end}"),
                    });
                }
                max_time = max_time.max(end);
                (
                    parse_field(source, line_no)?,
                    parse_field(target, line_no)?,
                    start,
                    Some(end),
                )
            }
            _ => {
                return Err(Error::Malformed {
                    line: line_no,
                    message: format!("expected 3 or 4 fields, got {}", fields.len()),
                });
            }
        };

        records.push(record);
    }

    let edges: Vec<TemporalEdge> = records
        .into_iter()
        .map(|(source, target, start, end)| {
            TemporalEdge::new(source, target, start, end.unwrap_or(max_time))
        })
        .collect();

    let list = EdgeList::new(edges)?;
    info!(
        edges = list.len(),
        vertices = list.num_vertices(),
        snapshots = list.num_snapshots(),
        "edge list loaded"
    );
    Ok(list)
}

fn parse_field(field: &str, line: usize) -> Result<u32> {
    field.trim().parse().map_err(|_| Error::Malformed {
        line,
        message: format!("not a non-negative integer: {field:?}"),
    })
}
