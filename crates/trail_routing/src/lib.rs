//! Named routes tried in order, plus reverse routing by name.

mod builder;
mod cache;
mod table;


pub use builder::{RouteBuildError, RouteTableBuilder};
pub use cache::RouteCache;
pub use table::{NamedRoute, RouteError, RouteMatch, RouteTable};
