// Matrix data structures and operations

pub mod config;
pub mod conversion;
pub mod csc;
pub mod csr;
pub mod dense;
pub mod format;
pub mod traits;

pub use config::{GrowthPolicy, StoreConfig};
pub use conversion::{convert_dense, convert_sparse};
pub use csc::CscMatrix;
pub use csr::CsrMatrix;
pub use dense::DenseMatrix;
pub use format::Format;
pub use traits::{nonzeros, Matrix, NonzeroElement, Nonzeros, Scalar};
