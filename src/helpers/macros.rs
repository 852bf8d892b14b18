//! Helper macros used throughout the crate.

/// Implements [`From`] for an error type by going through an intermediate type.
///
/// Useful when an error can be converted into one of our [`Error`](crate::Error) variants'
/// sources, but not directly into [`Error`](crate::Error) itself.
///
/// # Examples
///
/// ```ignore
/// forward_from!(diesel_async::pooled_connection::PoolError => PoolError => Error);
/// ```
#[macro_export]
macro_rules! forward_from {
    ( $src:ty => $intermediate:ty => $dst:ty ) => {
        impl std::convert::From<$src> for $dst {
            #[doc = concat!(
                "Converts a [`", stringify!($src), "`] into a [`", stringify!($dst),
                "`] by going through [`", stringify!($intermediate), "`]."
            )]
            fn from(value: $src) -> Self {
                <$intermediate>::from(value).into()
            }
        }
    };
}
