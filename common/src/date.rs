//! Calendar date utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{fmt, str::FromStr};

use derive_more::{From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::macros::format_description;

/// Calendar date without a time-of-day component.
#[derive(Clone, Copy, Debug, Eq, From, Into, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Creates a new [`Date`] from the provided [ISO 8601] `[year]-[month]-[day]`
    /// string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [ISO 8601] date.
    ///
    /// [ISO 8601]: https://wikipedia.org/wiki/ISO_8601
    pub fn from_iso8601(input: &str) -> Result<Self, time::error::Parse> {
        time::Date::parse(input, format_description!("[year]-[month]-[day]"))
            .map(Self)
    }

    /// Returns the [`Date`] as an [ISO 8601] `[year]-[month]-[day]` string.
    ///
    /// [ISO 8601]: https://wikipedia.org/wiki/ISO_8601
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|e| {
                panic!("cannot format `Date` as ISO 8601: {e}")
            })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl FromStr for Date {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso8601(s)
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Date {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Date::from_sql(ty, raw).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Date {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.0.to_sql(ty, w)
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::Date;

    impl serde::Serialize for Date {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_iso8601())
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            Date::from_iso8601(&String::deserialize(deserializer)?)
                .map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Date;

    #[test]
    fn from_iso8601() {
        let date = Date::from_iso8601("2024-03-01").unwrap();
        assert_eq!(date.to_iso8601(), "2024-03-01");

        assert!(Date::from_iso8601("2024-13-01").is_err());
        assert!(Date::from_iso8601("2024-02-30").is_err());
        assert!(Date::from_iso8601("01/03/2024").is_err());
        assert!(Date::from_iso8601("").is_err());
    }

    #[test]
    fn ordering() {
        let earlier = Date::from_iso8601("2024-03-01").unwrap();
        let later = Date::from_iso8601("2024-03-05").unwrap();
        assert!(earlier < later);
    }
}
