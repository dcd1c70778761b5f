//! Utility modules shared by the loaders and the sidebar.

pub mod link;
pub mod url;
pub mod xml;
