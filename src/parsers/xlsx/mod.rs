mod parser;

pub mod prelude {
    pub use super::parser::XlsxDecoder;
}
