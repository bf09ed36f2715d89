use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::template::Template;

/// Named partial templates, shared read-only by a render.
/// Cloning is cheap; `register` copies the map only if it is shared.
#[derive(Clone, Default)]
pub struct Partials {
    inner: Arc<HashMap<String, Arc<Template>>>,
}

impl Partials {
    pub fn new() -> Self { Self::default() }

    pub fn register(&mut self, name: impl Into<String>, template: Template) {
        let map = Arc::make_mut(&mut self.inner);
        map.insert(name.into(), Arc::new(template));
    }

    /// Builder form of [`Partials::register`].
    pub fn with(mut self, name: impl Into<String>, template: Template) -> Self {
        self.register(name, template);
        self
    }

    /// Exact-name lookup; no path resolution or namespacing.
    pub fn get(&self, name: &str) -> Option<&Arc<Template>> {
        self.inner.get(name)
    }

    pub fn len(&self) -> usize { self.inner.len() }

    pub fn is_empty(&self) -> bool { self.inner.is_empty() }
}

impl<K: Into<String>> FromIterator<(K, Template)> for Partials {
    fn from_iter<I: IntoIterator<Item = (K, Template)>>(iter: I) -> Self {
        let mut partials = Partials::new();
        for (name, template) in iter {
            partials.register(name, template);
        }
        partials
    }
}

impl fmt::Debug for Partials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.inner.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Partials").field("names", &names).finish()
    }
}
