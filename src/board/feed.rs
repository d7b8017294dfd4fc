//! Feed query model: ordering mode and club filter.

/// How the feed is ordered when no club filter is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedMode {
    /// Grouped by club, newest first within each club.
    #[default]
    ByClub,
    /// Strictly newest first.
    List,
}

impl FeedMode {
    /// Parse the `mode` query parameter. Only `"list"` selects [`FeedMode::List`].
    pub fn from_param(mode: Option<&str>) -> Self {
        match mode {
            Some("list") => FeedMode::List,
            _ => FeedMode::ByClub,
        }
    }

    /// Query-string value for this mode, if any.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            FeedMode::List => Some("list"),
            FeedMode::ByClub => None,
        }
    }
}

/// A feed request: ordering mode plus an optional exact-match club filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedQuery {
    /// Ordering mode.
    pub mode: FeedMode,
    /// Exact club to filter by.
    pub club: Option<String>,
}

impl FeedQuery {
    /// Build a query from raw `mode` and `club` parameters.
    ///
    /// An empty `club` is the same as no filter.
    pub fn from_params(mode: Option<&str>, club: Option<&str>) -> Self {
        Self {
            mode: FeedMode::from_param(mode),
            club: club.filter(|c| !c.is_empty()).map(str::to_string),
        }
    }

    /// Set the club filter.
    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club = Some(club.into());
        self
    }

    /// Set the ordering mode.
    pub fn with_mode(mut self, mode: FeedMode) -> Self {
        self.mode = mode;
        self
    }

    /// SQL `ORDER BY` clause for this query.
    ///
    /// A club filter always orders newest first; grouping only applies to
    /// the unfiltered default view.
    pub fn order_by(&self) -> &'static str {
        match (&self.club, self.mode) {
            (None, FeedMode::ByClub) => " ORDER BY club, id DESC",
            _ => " ORDER BY id DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_param() {
        assert_eq!(FeedMode::from_param(Some("list")), FeedMode::List);
        assert_eq!(FeedMode::from_param(Some("LIST")), FeedMode::ByClub);
        assert_eq!(FeedMode::from_param(Some("club")), FeedMode::ByClub);
        assert_eq!(FeedMode::from_param(None), FeedMode::ByClub);
    }

    #[test]
    fn test_empty_club_is_no_filter() {
        let query = FeedQuery::from_params(Some("list"), Some(""));
        assert_eq!(query.club, None);
        assert_eq!(query.mode, FeedMode::List);
    }

    #[test]
    fn test_order_by() {
        assert_eq!(FeedQuery::default().order_by(), " ORDER BY club, id DESC");
        assert_eq!(
            FeedQuery::default().with_mode(FeedMode::List).order_by(),
            " ORDER BY id DESC"
        );
        assert_eq!(
            FeedQuery::default().with_club("chess").order_by(),
            " ORDER BY id DESC"
        );
        assert_eq!(
            FeedQuery::from_params(Some("list"), Some("chess")).order_by(),
            " ORDER BY id DESC"
        );
    }
}
