//! tocbar - a documentation sidebar that highlights the current page, opens
//! the groups leading to it and keeps its scroll position across page loads.

pub mod cli;
pub mod config;
pub mod logger;
pub mod nav;
pub mod page;
pub mod session;
pub mod sidebar;
pub mod utils;
