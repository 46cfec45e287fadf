/// Column a listing is ordered by. `id` is always the tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    CreatedAt,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Listing sort selected by the `sort` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    NameAsc,
    NameDesc,
    CreatedAsc,
    #[default]
    CreatedDesc,
}

impl SortOrder {
    /// Unknown or absent values fall back to newest first.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("az") => Self::NameAsc,
            Some("za") => Self::NameDesc,
            Some("old") => Self::CreatedAsc,
            _ => Self::CreatedDesc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameAsc => "az",
            Self::NameDesc => "za",
            Self::CreatedAsc => "old",
            Self::CreatedDesc => "new",
        }
    }

    pub fn column(&self) -> SortColumn {
        match self {
            Self::NameAsc | Self::NameDesc => SortColumn::Name,
            Self::CreatedAsc | Self::CreatedDesc => SortColumn::CreatedAt,
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, Self::NameDesc | Self::CreatedDesc)
    }
}
