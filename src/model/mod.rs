//! Data model of the constraint pipeline: identifiers, range values,
//! property datatypes and typed constraints

mod constraint;
mod datatype;
mod date;
mod ids;

pub use constraint::*;
pub use datatype::{Datatype, PropertyTypeRegistry, PropertyTypeResolver};
pub use date::{parse_date, parse_date_in, DateAndNow, Decimal, RangeValueError, NOW};
pub use ids::{IdError, ItemId, PropertyId, WIKIDATA_BASE_IRI};
