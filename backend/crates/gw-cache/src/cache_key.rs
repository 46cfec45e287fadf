use std::fmt;

/// Structured cache key.
///
/// Rendered as `namespace` followed by each part as `:<byte length>:<part>`.
/// The length prefix makes the rendering injective: two keys render to the
/// same string only if they have the same namespace and identical parts,
/// whatever characters the parts contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    namespace: &'static str,
    parts: Vec<String>,
}

impl CacheKey {
    pub fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            parts: Vec::new(),
        }
    }

    pub fn part(mut self, value: impl Into<String>) -> Self {
        self.parts.push(value.into());
        self
    }

    pub fn render(&self) -> String {
        let capacity = self.namespace.len()
            + self
                .parts
                .iter()
                .map(|part| part.len() + 8)
                .sum::<usize>();
        let mut rendered = String::with_capacity(capacity);
        rendered.push_str(self.namespace);
        for part in &self.parts {
            rendered.push(':');
            rendered.push_str(&part.len().to_string());
            rendered.push(':');
            rendered.push_str(part);
        }
        rendered
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
