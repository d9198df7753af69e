//! Node metadata lookup
//!
//! Membership checks against the compiled-in builtin registry, plus
//! repository descriptors for everything else.

pub mod lookup;
pub mod registry;

pub use lookup::{
    batch_describe, builtin_snapshot, describe, fabricate_repo_info, parse_node_types,
    BuiltinTypes, GitInfo, RepoInfo, RepoSummary,
};
pub use registry::{builtin_count, builtin_types, is_builtin};
