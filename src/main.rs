use std::process::ExitCode;

use sparsestore::{Format, MatrixMarketIO, StoreConfig};

const USAGE: &str = "usage: sparsestore <file.mtx> [csr|csc|dense] [--print]";

fn main() -> ExitCode {
    env_logger::init();

    let mut path = None;
    let mut format = Format::Csr;
    let mut print = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--print" => print = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return ExitCode::SUCCESS;
            }
            _ if path.is_none() => path = Some(arg),
            other => match other.parse::<Format>() {
                Ok(f) => format = f,
                Err(err) => {
                    eprintln!("{}\n{}", err, USAGE);
                    return ExitCode::FAILURE;
                }
            },
        }
    }

    let Some(path) = path else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    println!("sparsestore {}", sparsestore::VERSION);

    let config = StoreConfig::from_env();
    let (matrix, report) = match MatrixMarketIO::read_matrix::<f64, _>(&path, format, &config) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!("\nLoaded {} as {}:", path, matrix.format_name());
    println!("  Declared: {} × {}, {} entries", report.header.rows, report.header.cols, report.header.entries);
    println!("  Field / symmetry: {:?} / {:?}", report.header.field, report.header.symmetry);
    println!("  Stored: {} (+{} mirrored, {} zeros skipped)", report.inserted, report.mirrored, report.skipped_zeros);
    println!("  Dimensions: {} × {}", matrix.rows(), matrix.cols());
    println!("  Nonzeros: {}", matrix.nnz());
    println!("  Estimated size: {} bytes", matrix.size_bytes());

    if print {
        println!();
        matrix.print();
    }

    ExitCode::SUCCESS
}
