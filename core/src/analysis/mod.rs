pub use reachability::*;

mod reachability;
