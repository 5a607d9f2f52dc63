//! Document reader port.

use std::path::Path;

use crate::domain::errors::ConfigResult;
use crate::domain::models::tree::ConfigNode;

/// Supplies the parsed configuration tree for a document path.
///
/// Implementations decode text and parse it; callers only see the tree.
pub trait DocumentReader {
    fn read(&self, path: &Path) -> ConfigResult<ConfigNode>;
}

impl<T: DocumentReader + ?Sized> DocumentReader for &T {
    fn read(&self, path: &Path) -> ConfigResult<ConfigNode> {
        (**self).read(path)
    }
}
