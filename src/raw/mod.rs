mod bucket;
mod map;
mod table;

pub use bucket::{Chain, IntoIter, Iter, IterMut, Segment};
pub use map::{HashMap, InsertResult};
pub use table::Stats;
