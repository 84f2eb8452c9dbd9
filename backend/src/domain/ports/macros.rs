//! Helper macro generating domain port error enums.
//!
//! Each variant is either a unit variant or carries a single field. Every
//! variant gets a snake_case constructor; field constructors accept anything
//! convertible into the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $field:ident : $ty:ty }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($field: impl Into<$ty>) -> Self {
                Self::$variant { $field: $field.into() }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $field:ident : $ty:ty } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $field : $ty } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $field : $ty } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LookupError {
            Missing => "record missing",
            Rejected { status: u16 } => "rejected with status {status}",
            Broken { message: String } => "broken: {message}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LookupError::missing(), LookupError::Missing);
        assert_eq!(LookupError::missing().to_string(), "record missing");
    }

    #[test]
    fn field_constructors_convert_their_argument() {
        assert_eq!(
            LookupError::rejected(503_u16).to_string(),
            "rejected with status 503"
        );
        assert_eq!(
            LookupError::broken("socket closed"),
            LookupError::Broken {
                message: "socket closed".to_owned()
            }
        );
    }
}
