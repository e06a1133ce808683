/// Implements `serde::Serialize` and `serde::Deserialize` for a type through
/// its string form (`Display` / `FromStr` with a displayable error).
///
/// Configuration structs can then hold the typed value directly while the
/// file keeps the compact string.
macro_rules! serde_via_str {
    ($ty:ty) => {
        impl ::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let text = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                text.parse::<$ty>().map_err(::serde::de::Error::custom)
            }
        }
    };
}
