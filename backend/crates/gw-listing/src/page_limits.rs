pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 50;

/// Server-side bounds for the `limit` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl PageLimits {
    pub fn new(default_limit: u32, max_limit: u32) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }

    /// Absent, unparsable or non-positive values yield the default;
    /// anything above the maximum is clamped to it.
    pub fn resolve(&self, raw: Option<&str>) -> u32 {
        match raw.map(str::trim).and_then(|value| value.parse::<i64>().ok()) {
            Some(requested) if requested > 0 => {
                u32::try_from(requested).map_or(self.max_limit, |n| n.min(self.max_limit))
            }
            _ => self.default_limit,
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, MAX_LIMIT)
    }
}
