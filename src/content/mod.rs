//! Content tree boundary: nodes, headers and the host lookup capability.

pub mod node;
pub mod tree;

pub use node::{ContentNode, Header, HEADER_AUTHOR, HEADER_PERMISSIONS, parent_path, path_depth};
pub use tree::{ContentTree, MemoryTree, branch_up, branch_down, find_closest};
