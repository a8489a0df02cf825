//! Loading points and rendering results.
//!
//! Text input holds one point per line as comma-separated floats; blank lines
//! are skipped. Keyed input carries the key in the first column. Results are
//! printed with four decimals, comma-separated, one vector per line.

use crate::error::KMeansError;
use csv::{ReaderBuilder, Trim};
use ndarray::{Array2, ArrayView2, Axis};
use ndarray_npy::ReadNpyExt;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse comma-separated points from a text reader.
///
/// Records with no non-empty field are skipped. Every remaining record must
/// have the width of the first one.
pub fn parse_points<R: Read>(reader: R) -> Result<Array2<f64>, KMeansError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut values = Vec::new();
    let mut width = None;
    let mut n_rows = 0;

    for record in rdr.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let line = record.position().map_or(0, |pos| pos.line());

        for field in record.iter() {
            let value: f64 = field.parse().map_err(|_| {
                KMeansError::Parse(format!("line {}: '{}' is not a number", line, field))
            })?;
            values.push(value);
        }

        match width {
            Some(expected) if expected != record.len() => {
                return Err(KMeansError::InvalidDimensions(format!(
                    "line {}: expected {} values, got {}",
                    line,
                    expected,
                    record.len()
                )));
            }
            Some(_) => {}
            None => width = Some(record.len()),
        }
        n_rows += 1;
    }

    let Some(dim) = width else {
        return Err(KMeansError::InsufficientData("no input provided".to_string()));
    };

    Array2::from_shape_vec((n_rows, dim), values)
        .map_err(|e| KMeansError::InvalidDimensions(e.to_string()))
}

/// Read a 2-D float64 array from `.npy` bytes.
pub fn read_npy<R: Read>(reader: R) -> Result<Array2<f64>, KMeansError> {
    Array2::<f64>::read_npy(reader).map_err(|e| KMeansError::Npy(e.to_string()))
}

/// Read points from a file; `.npy` files are decoded as arrays, anything else
/// is parsed as comma-separated text.
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<Array2<f64>, KMeansError> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let is_npy = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("npy"));
    if is_npy {
        read_npy(BufReader::new(file))
    } else {
        parse_points(BufReader::new(file))
    }
}

/// Row key read from the first column of a keyed file.
///
/// Keys are compared with [`f64::total_cmp`] so they can be sorted and used in
/// ordered maps.
#[derive(Debug, Clone, Copy)]
pub struct Key(pub f64);

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Points tagged with an opaque key per row.
///
/// Keys are only used for joining and reporting; clustering works on
/// `points` alone.
#[derive(Debug, Clone)]
pub struct KeyedPoints<K> {
    pub keys: Vec<K>,
    pub points: Array2<f64>,
}

impl KeyedPoints<Key> {
    /// Split the first column off as the key.
    pub fn from_rows(rows: Array2<f64>) -> Result<Self, KMeansError> {
        if rows.ncols() < 2 {
            return Err(KMeansError::InvalidDimensions(format!(
                "keyed rows need a key and at least one coordinate, got {} column(s)",
                rows.ncols()
            )));
        }

        let keys = rows.column(0).iter().map(|&k| Key(k)).collect();
        let points = rows.slice(ndarray::s![.., 1..]).to_owned();
        Ok(Self { keys, points })
    }
}

impl<K> KeyedPoints<K> {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.points.ncols()
    }
}

/// Read a keyed file (key in column 0).
pub fn read_keyed_points<P: AsRef<Path>>(path: P) -> Result<KeyedPoints<Key>, KMeansError> {
    KeyedPoints::from_rows(read_points(path)?)
}

/// Inner-join two keyed point sets on their keys.
///
/// Only keys present in both inputs are kept, in ascending key order. Each
/// joined row is the coordinates from `left` followed by those from `right`.
/// When a key repeats within one input, its last row wins.
pub fn inner_join<K: Ord + Clone>(left: &KeyedPoints<K>, right: &KeyedPoints<K>) -> KeyedPoints<K> {
    let left_rows: BTreeMap<&K, usize> =
        left.keys.iter().enumerate().map(|(i, k)| (k, i)).collect();
    let right_rows: BTreeMap<&K, usize> =
        right.keys.iter().enumerate().map(|(i, k)| (k, i)).collect();

    let mut keys = Vec::new();
    let mut left_idx = Vec::new();
    let mut right_idx = Vec::new();
    for (key, &i) in &left_rows {
        if let Some(&j) = right_rows.get(key) {
            keys.push((*key).clone());
            left_idx.push(i);
            right_idx.push(j);
        }
    }

    let left_part = left.points.select(Axis(0), &left_idx);
    let right_part = right.points.select(Axis(0), &right_idx);
    let mut points = Array2::zeros((keys.len(), left.dim() + right.dim()));
    points
        .slice_mut(ndarray::s![.., ..left.dim()])
        .assign(&left_part);
    points
        .slice_mut(ndarray::s![.., left.dim()..])
        .assign(&right_part);

    KeyedPoints { keys, points }
}

/// Render vectors with four decimals, comma-separated, one per line.
pub fn format_centroids(centroids: &ArrayView2<f64>) -> String {
    centroids
        .outer_iter()
        .map(|row| {
            row.iter()
                .map(|v| format!("{:.4}", v))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render selected row indices as a single comma-separated line.
pub fn format_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
