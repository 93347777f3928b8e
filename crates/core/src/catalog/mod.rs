//! Word catalog ingestion: delimited rows in, word drafts out.

mod loader;
mod row;

pub use loader::{
    CATALOG_FIELD_COUNT, CatalogError, CatalogLoad, CatalogSource, SkippedRow, load_catalog,
    parse_catalog,
};
pub use row::{RowParser, parse_row};
