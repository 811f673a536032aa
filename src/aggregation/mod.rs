//! The reshape and rollup stages.
//!
//! Each stage exists twice: as a MongoDB aggregation pipeline that
//! [`MongoStore`](crate::store::MongoStore) sends to the server, and as plain
//! functions over records that the default [`Store`](crate::store::Store)
//! methods use. Both follow the server's rules for missing and non-numeric
//! values so the two agree on the same input.

pub mod reshape;
pub mod rollup;

pub use reshape::ReshapeReport;

use mongodb::bson::Bson;

/// Numeric value as `$avg`/`$max` see it; anything else is skipped.
pub(crate) fn as_number(value: Option<&Bson>) -> Option<f64> {
    match value? {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

/// Integer contribution to a `$sum` counter; missing and non-numeric values add nothing.
pub(crate) fn as_count(value: Option<&Bson>) -> i64 {
    match value {
        Some(Bson::Int32(v)) => i64::from(*v),
        Some(Bson::Int64(v)) => *v,
        Some(Bson::Double(v)) => *v as i64,
        _ => 0,
    }
}
