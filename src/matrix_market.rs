//! Matrix Market coordinate files
//!
//! This module loads `.mtx` files into any [`Matrix`] through its `put`
//! operation, mirroring entries of symmetric and skew-symmetric files, and
//! writes any enumerable matrix back out as a general coordinate file.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::ops::Neg;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{MatrixError, Result};
use crate::matrix::traits::{nonzeros, Matrix, Scalar};
use crate::matrix::{Format, StoreConfig};

/// Value type declared in the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Real,
    Integer,
    /// No value column; every listed entry is one
    Pattern,
}

/// Symmetry class declared in the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    General,
    /// Only the lower triangle is listed; `M[c][r] = M[r][c]`
    Symmetric,
    /// Only the strict lower triangle is listed; `M[c][r] = -M[r][c]`
    SkewSymmetric,
}

/// Banner and size line of a coordinate file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub field: Field,
    pub symmetry: Symmetry,
    pub rows: usize,
    pub cols: usize,
    /// Number of data lines
    pub entries: usize,
}

/// Outcome of loading a file into a matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub header: Header,
    /// Data lines stored in the destination
    pub inserted: usize,
    /// Extra transposed entries stored for symmetric files
    pub mirrored: usize,
    /// Puts the destination rejected because the value was zero
    pub skipped_zeros: usize,
}

/// Matrix Market format reader/writer
pub struct MatrixMarketIO;

impl MatrixMarketIO {
    /// Loads the file at `path` into `dest`
    ///
    /// The file's declared shape is applied with `declare_shape` before any
    /// entry is stored. On error the entries already stored stay in `dest`.
    pub fn read_into<T, P>(path: P, dest: &mut dyn Matrix<T>) -> Result<IngestReport>
    where
        T: Scalar + FromStr + Neg<Output = T>,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| io_error(path, e))?;
        log::info!("Reading Matrix Market file {}", path.display());
        Self::ingest(BufReader::new(file), path, dest)
    }

    /// Loads Matrix Market text from any buffered reader into `dest`
    pub fn read_from_reader<T, R>(reader: R, dest: &mut dyn Matrix<T>) -> Result<IngestReport>
    where
        T: Scalar + FromStr + Neg<Output = T>,
        R: BufRead,
    {
        Self::ingest(reader, Path::new("<reader>"), dest)
    }

    /// Loads the file at `path` into a new matrix of the given format
    pub fn read_matrix<T, P>(
        path: P,
        format: Format,
        config: &StoreConfig,
    ) -> Result<(Box<dyn Matrix<T>>, IngestReport)>
    where
        T: Scalar + FromStr + Neg<Output = T>,
        P: AsRef<Path>,
    {
        let mut matrix = format.empty::<T>(config);
        let report = Self::read_into(path, matrix.as_mut())?;
        Ok((matrix, report))
    }

    /// Writes `matrix` as a `coordinate real general` file
    ///
    /// # Errors
    ///
    /// [`MatrixError::Unsupported`] if the format cannot enumerate its
    /// nonzeros, [`MatrixError::Io`] on write failure.
    pub fn write_matrix<T, P>(path: P, matrix: &dyn Matrix<T>) -> Result<()>
    where
        T: Scalar,
        P: AsRef<Path>,
    {
        if !matrix.supports_nonzero_enumeration() {
            return Err(MatrixError::Unsupported(
                "writing requires a format with nonzero enumeration",
            ));
        }

        let path = path.as_ref();
        let file = File::create(path).map_err(|e| io_error(path, e))?;
        let mut out = BufWriter::new(file);

        write_entries(&mut out, matrix).map_err(|e| io_error(path, e))
    }

    fn ingest<T, R>(reader: R, origin: &Path, dest: &mut dyn Matrix<T>) -> Result<IngestReport>
    where
        T: Scalar + FromStr + Neg<Output = T>,
        R: BufRead,
    {
        let mut lines = reader.lines().enumerate().map(|(i, line)| (i + 1, line));

        // Banner
        let (banner_no, banner) = match lines.next() {
            Some((no, line)) => (no, line.map_err(|e| io_error(origin, e))?),
            None => return Err(parse_error(1, "empty file")),
        };
        let (field, symmetry) = parse_banner(banner_no, &banner)?;

        // Size line, after any comments
        let mut size = None;
        for (no, line) in lines.by_ref() {
            let line = line.map_err(|e| io_error(origin, e))?;
            if is_skippable(&line) {
                continue;
            }
            size = Some((no, parse_size(no, &line)?));
            break;
        }
        let (size_no, (rows, cols, entries)) =
            size.ok_or_else(|| parse_error(banner_no, "missing size line"))?;

        let header = Header {
            field,
            symmetry,
            rows,
            cols,
            entries,
        };
        log::info!(
            "{}: {} × {}, {} entries ({:?}, {:?})",
            origin.display(),
            rows,
            cols,
            entries,
            field,
            symmetry
        );

        dest.declare_shape(rows, cols)?;

        let mut report = IngestReport {
            header,
            inserted: 0,
            mirrored: 0,
            skipped_zeros: 0,
        };
        let mut read = 0;
        let mut last_no = size_no;

        while read < entries {
            let (no, line) = match lines.next() {
                Some((no, line)) => (no, line.map_err(|e| io_error(origin, e))?),
                None => {
                    return Err(parse_error(
                        last_no,
                        &format!("expected {} entries, found {}", entries, read),
                    ))
                }
            };
            last_no = no;
            if is_skippable(&line) {
                continue;
            }
            read += 1;

            let (r, c, value) = parse_entry::<T>(no, &line, field)?;

            if store(dest, r, c, value, &mut report)? {
                report.inserted += 1;
            }

            if r != c {
                let mirror = match symmetry {
                    Symmetry::General => None,
                    Symmetry::Symmetric => Some(value),
                    Symmetry::SkewSymmetric => Some(-value),
                };
                if let Some(mirror) = mirror {
                    if store(dest, c, r, mirror, &mut report)? {
                        report.mirrored += 1;
                    }
                }
            }
        }

        log::info!(
            "{}: stored {} entries, {} mirrored, {} zeros skipped",
            origin.display(),
            report.inserted,
            report.mirrored,
            report.skipped_zeros
        );

        Ok(report)
    }
}

fn write_entries<T: Scalar, W: Write>(out: &mut W, matrix: &dyn Matrix<T>) -> std::io::Result<()> {
    writeln!(out, "%%MatrixMarket matrix coordinate real general")?;
    writeln!(out, "{} {} {}", matrix.rows(), matrix.cols(), matrix.nnz())?;

    for element in nonzeros(matrix) {
        writeln!(
            out,
            "{} {} {}",
            element.row + 1, // Convert to 1-indexed
            element.col + 1, // Convert to 1-indexed
            element.value
        )?;
    }
    out.flush()
}

/// Puts one entry; a rejected zero is counted instead of failing the load
fn store<T: Scalar>(
    dest: &mut dyn Matrix<T>,
    row: usize,
    col: usize,
    value: T,
    report: &mut IngestReport,
) -> Result<bool> {
    match dest.put(row, col, value) {
        Ok(()) => Ok(true),
        Err(err) if err.is_explicit_zero() => {
            log::warn!("Skipping explicit zero at ({}, {})", row + 1, col + 1);
            report.skipped_zeros += 1;
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

fn io_error(path: &Path, source: std::io::Error) -> MatrixError {
    log::error!("I/O error on {}: {}", path.display(), source);
    MatrixError::Io {
        path: PathBuf::from(path),
        source,
    }
}

fn parse_error(line: usize, message: &str) -> MatrixError {
    MatrixError::Parse {
        line,
        message: message.to_string(),
    }
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('%')
}

fn parse_banner(no: usize, line: &str) -> Result<(Field, Symmetry)> {
    let tokens: Vec<String> = line
        .split_whitespace()
        .map(|t| t.to_ascii_lowercase())
        .collect();

    if tokens.len() != 5 || tokens[0] != "%%matrixmarket" {
        return Err(parse_error(no, "expected '%%MatrixMarket matrix coordinate <field> <symmetry>'"));
    }
    if tokens[1] != "matrix" {
        return Err(MatrixError::Unsupported("only matrix objects are supported"));
    }
    if tokens[2] != "coordinate" {
        return Err(MatrixError::Unsupported("only coordinate layout is supported"));
    }

    let field = match tokens[3].as_str() {
        "real" | "double" => Field::Real,
        "integer" => Field::Integer,
        "pattern" => Field::Pattern,
        "complex" => return Err(MatrixError::Unsupported("complex values are not supported")),
        _ => return Err(parse_error(no, &format!("unknown field '{}'", tokens[3]))),
    };

    let symmetry = match tokens[4].as_str() {
        "general" => Symmetry::General,
        "symmetric" => Symmetry::Symmetric,
        "skew-symmetric" => Symmetry::SkewSymmetric,
        "hermitian" => return Err(MatrixError::Unsupported("hermitian matrices are not supported")),
        _ => return Err(parse_error(no, &format!("unknown symmetry '{}'", tokens[4]))),
    };

    Ok((field, symmetry))
}

fn parse_size(no: usize, line: &str) -> Result<(usize, usize, usize)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(parse_error(no, "size line must be 'rows cols entries'"));
    }

    let number = |s: &str, what: &str| {
        s.parse::<usize>()
            .map_err(|_| parse_error(no, &format!("invalid number of {}", what)))
    };

    Ok((
        number(parts[0], "rows")?,
        number(parts[1], "columns")?,
        number(parts[2], "entries")?,
    ))
}

/// Parses "row col [value]" and converts to 0-based indices
fn parse_entry<T>(no: usize, line: &str, field: Field) -> Result<(usize, usize, T)>
where
    T: Scalar + FromStr,
{
    let parts: Vec<&str> = line.split_whitespace().collect();
    let expected = if field == Field::Pattern { 2 } else { 3 };
    if parts.len() < expected {
        return Err(parse_error(
            no,
            &format!("expected {} fields, found {}", expected, parts.len()),
        ));
    }

    let index = |s: &str, what: &str| -> Result<usize> {
        match s.parse::<usize>() {
            Ok(0) | Err(_) => Err(parse_error(no, &format!("invalid {} index '{}'", what, s))),
            Ok(i) => Ok(i - 1),
        }
    };
    let row = index(parts[0], "row")?;
    let col = index(parts[1], "column")?;

    let value = match field {
        Field::Pattern => T::one(),
        Field::Real | Field::Integer => parts[2]
            .parse::<T>()
            .map_err(|_| parse_error(no, &format!("invalid value '{}'", parts[2])))?,
    };

    Ok((row, col, value))
}
