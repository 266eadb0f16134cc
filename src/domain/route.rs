//! Route entity.

/// A named bus service grouping one or more trips.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// GTFS route id, unique within the feed.
    pub id: String,
    /// Short rider-facing name, e.g. "42".
    pub short_name: Option<String>,
    /// Long rider-facing name, e.g. "Downtown - Airport".
    pub long_name: Option<String>,
    /// GTFS route type code, kept verbatim.
    pub route_type: Option<String>,
}

impl Route {
    /// The name shown to riders: short name, else long name, else the id.
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.long_name.as_deref())
            .unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(short: Option<&str>, long: Option<&str>) -> Route {
        Route {
            id: "R7".into(),
            short_name: short.map(Into::into),
            long_name: long.map(Into::into),
            route_type: None,
        }
    }

    #[test]
    fn display_name_prefers_short() {
        assert_eq!(route(Some("42"), Some("Downtown")).display_name(), "42");
    }

    #[test]
    fn display_name_falls_back_to_long() {
        assert_eq!(route(None, Some("Downtown")).display_name(), "Downtown");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        assert_eq!(route(None, None).display_name(), "R7");
    }
}
