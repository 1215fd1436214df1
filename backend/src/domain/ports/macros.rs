//! Macros for declaring driven-port error enums.
//!
//! `define_port_error!` gives each variant a snake-case constructor whose
//! `String` fields accept anything `Into<String>`, so services can write
//! `MedicalLibraryError::timeout("deadline exceeded")`.
//!
//! Every HTTP-backed port shares the same four failure categories;
//! `impl_upstream_error!` implements [`super::UpstreamError`] for them so the
//! outbound transport helpers can build any port error generically.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

macro_rules! impl_upstream_error {
    ($name:ident) => {
        impl $crate::domain::ports::UpstreamError for $name {
            fn transport_failure(message: String) -> Self {
                Self::Transport { message }
            }

            fn timeout_failure(message: String) -> Self {
                Self::Timeout { message }
            }

            fn status_failure(status: u16, message: String) -> Self {
                Self::Status { status, message }
            }

            fn decode_failure(message: String) -> Self {
                Self::Decode { message }
            }
        }
    };
}

pub(crate) use define_port_error;
pub(crate) use impl_upstream_error;
