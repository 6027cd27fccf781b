//! `define_port_error!`: adapter error enums with `thiserror` messages and
//! snake-case constructors.
//!
//! Every variant carries named fields. Each field gets an `impl Into<T>`
//! constructor parameter, so `ResourceStoreError::query("relation missing")`
//! works without `.to_owned()` at call sites.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = "Build a `" $variant "` error."]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum SampleError {
            Timeout { message: String, attempts: u32 } => "timed out after {attempts}: {message}",
            StaleDigest { resource: String } => "digest changed for {resource}",
        }
    }

    #[rstest]
    fn constructors_convert_each_field() {
        let err = SampleError::timeout("pool busy", 3_u32);
        assert_eq!(
            err,
            SampleError::Timeout {
                message: "pool busy".to_owned(),
                attempts: 3,
            }
        );
        assert_eq!(err.to_string(), "timed out after 3: pool busy");
    }

    #[rstest]
    fn constructor_names_are_snake_case() {
        let err = SampleError::stale_digest(String::from("post 7"));
        assert_eq!(err.to_string(), "digest changed for post 7");
    }
}
