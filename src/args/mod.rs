//! Argument translation for pathbox.
//!
//! Every command-line token flows through the same stages:
//!
//! ```text
//! Raw token → Classify → Resolve → Register mount → Container argument
//! ```
//!
//! Tokens that are not host paths skip straight to the output. Each stage is
//! a plain function over explicit inputs and can be unit-tested on its own.

mod classifier;
mod git_config;
mod pipeline;
mod registry;
mod resolver;

pub use classifier::{classify, unescape, ClassifiedToken};
pub use git_config::{mount_git_config, GIT_CONFIG_FILES};
pub use pipeline::{translate, TranslateResult};
pub use registry::{MountEntry, MountOutcome, MountRegistry, MountRejection};
pub use resolver::{resolve, PathContext, ResolvedPath};
