use crate::errors::StatementResult;
use crate::grid::RawGrid;

/// Decodes one worksheet of a statement file into a [`RawGrid`].
pub trait SheetDecoder {
    /// Reads `sheet`, or the first sheet when `None`.
    fn decode(content: &[u8], sheet: Option<&str>) -> StatementResult<RawGrid>;

    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool;
}
