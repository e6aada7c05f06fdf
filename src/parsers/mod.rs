pub mod csv;
pub mod traits;
pub mod xlsx;

pub mod prelude {
    pub use super::csv::prelude::*;
    pub use super::traits::SheetDecoder;
    pub use super::xlsx::prelude::*;
}
