//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything convertible into the field types, so adapters can
//! write `BookingRepositoryError::query(err.to_string())` or
//! `BookingRepositoryError::not_found("bungalow 9")`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_fields $variant [] [] $( $field : $ty, )*);
    };

    (@ctor_fields $variant:ident [$($params:tt)*] [$($inits:tt)*]) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_fields $variant:ident [$($params:tt)*] [$($inits:tt)*] $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_fields
            $variant
            [$($params)* $field: impl Into<$ty>,]
            [$($inits)* $field: $field.into(),]
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

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    define_port_error! {
        pub enum LedgerPortError {
            Closed => "ledger closed",
            Rejected { reason: String } => "rejected: {reason}",
            Overbooked { unit: i32, nights: u32 } => "unit {unit} overbooked by {nights} nights",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LedgerPortError::closed(), LedgerPortError::Closed);
        assert_eq!(LedgerPortError::closed().to_string(), "ledger closed");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = LedgerPortError::rejected("dates clash");
        assert_eq!(err.to_string(), "rejected: dates clash");
    }

    #[test]
    fn numeric_fields_keep_their_types() {
        let err = LedgerPortError::overbooked(3, 2_u32);
        assert_eq!(err.to_string(), "unit 3 overbooked by 2 nights");
    }
}
