mod league;
mod match_detail;
mod match_ids;
mod participant;
mod rollup;
mod routing;

pub use league::*;
pub use match_detail::*;
pub use match_ids::*;
pub use participant::*;
pub use rollup::*;
pub use routing::*;
