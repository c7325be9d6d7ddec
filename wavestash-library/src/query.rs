//! Filters over stored assets, built from `key=value` request arguments.

use tracing::trace;

use crate::{AssetInfo, LibraryError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryOption {
    /// Keep assets strictly longer than this many seconds.
    MinDuration(f64),
    /// Keep assets strictly shorter than this many seconds.
    MaxDuration(f64),
}

impl QueryOption {
    pub const MIN_DURATION: &'static str = "minduration";
    pub const MAX_DURATION: &'static str = "maxduration";

    /// Parses a single request argument. Unknown keys yield `Ok(None)`; an empty value selects
    /// the option's neutral default.
    pub fn parse(key: &str, value: &str) -> Result<Option<Self>, LibraryError> {
        let make: fn(f64) -> Self = match key {
            Self::MIN_DURATION => Self::MinDuration,
            Self::MAX_DURATION => Self::MaxDuration,
            _ => return Ok(None),
        };
        if value.is_empty() {
            return Ok(Some(Self::default_for(key)));
        }
        let number = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| !number.is_nan())
            .ok_or_else(|| LibraryError::InvalidQuery {
                key: key.to_owned(),
                value: value.to_owned(),
            })?;
        Ok(Some(make(number)))
    }

    fn default_for(key: &str) -> Self {
        if key == Self::MIN_DURATION {
            Self::MinDuration(0.0)
        } else {
            Self::MaxDuration(f64::INFINITY)
        }
    }

    pub fn matches(&self, info: &AssetInfo) -> bool {
        match *self {
            Self::MinDuration(min) => info.runtime_sec > min,
            Self::MaxDuration(max) => info.runtime_sec < max,
        }
    }
}

/// All options must match for an asset to be listed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    options: Vec<QueryOption>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_args<'a>(
        args: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, LibraryError> {
        let mut query = Self::new();
        for (key, value) in args {
            match QueryOption::parse(key, value)? {
                Some(option) => query.options.push(option),
                None => trace!(key, "Ignoring unknown query option"),
            }
        }
        Ok(query)
    }

    pub fn with(mut self, option: QueryOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn options(&self) -> &[QueryOption] {
        &self.options
    }

    pub fn matches(&self, info: &AssetInfo) -> bool {
        self.options.iter().all(|option| option.matches(info))
    }
}

#[cfg(test)]
mod tests {
    use super::{Query, QueryOption};
    use crate::{AssetInfo, LibraryError};

    fn info(runtime_sec: f64) -> AssetInfo {
        AssetInfo {
            name: "a.wav".into(),
            size: 0,
            runtime_sec,
            channels: 1,
            bitwidth: 8,
            sample_rate: 8000,
        }
    }

    #[test]
    fn bounds_are_strict() {
        let query = Query::new()
            .with(QueryOption::MinDuration(1.0))
            .with(QueryOption::MaxDuration(2.0));
        assert!(!query.matches(&info(1.0)));
        assert!(query.matches(&info(1.5)));
        assert!(!query.matches(&info(2.0)));
    }

    #[test]
    fn empty_values_select_defaults() {
        let query = Query::from_args([("minduration", ""), ("maxduration", "")]).unwrap();
        assert_eq!(
            query.options(),
            [
                QueryOption::MinDuration(0.0),
                QueryOption::MaxDuration(f64::INFINITY)
            ]
        );
        assert!(query.matches(&info(10_000.0)));
        // A zero-length file is not strictly longer than zero seconds.
        assert!(!query.matches(&info(0.0)));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let query = Query::from_args([("submit", "List files"), ("minduration", "3")]).unwrap();
        assert_eq!(query.options(), [QueryOption::MinDuration(3.0)]);
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        for value in ["abc", "NaN", "1.5s"] {
            let error = Query::from_args([("maxduration", value)]).unwrap_err();
            assert!(
                matches!(&error, LibraryError::InvalidQuery { key, .. } if key == "maxduration"),
                "{value}: {error:?}"
            );
            assert!(error.is_client_error());
        }
    }
}
