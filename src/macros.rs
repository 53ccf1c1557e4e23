/// Implements [`Inspect`](crate::Inspect) and [`Model`](crate::Model) for a
/// struct, declaring each field's rules.
///
/// Every field of the struct must be listed, in declaration order. Rules are
/// written in brackets as bare flags or `rule = value` pairs; values may be
/// any expression implementing `ToString`. The `name` rule sets the wire name
/// (it must agree with any serde rename on the field). Capabilities are opted
/// into after the field list with `+ SelfCheck` or `+ DynamicField`.
///
/// The rules are compiled on first use and cached for the life of the
/// process; see [`Validator::register_model`](crate::Validator::register_model)
/// to surface rule errors eagerly.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use strictbind::{model, SelfCheck, ValidationError};
///
/// #[derive(Deserialize)]
/// struct Account {
///     #[serde(rename = "type")]
///     kind: String,
///     email: String,
///     nickname: Option<String>,
///     #[serde(default)]
///     internal_id: Option<u64>,
/// }
///
/// model!(Account {
///     kind: [name = "type", required, enums = "personal,business"],
///     email: [required, format = "email"],
///     nickname: [min = 3, max = 20],
///     internal_id: [ignore],
/// } + SelfCheck);
///
/// impl SelfCheck for Account {
///     fn self_check(&self) -> Result<(), ValidationError> {
///         Ok(())
///     }
/// }
/// ```
#[macro_export]
macro_rules! model {
    (@capability SelfCheck) => {
        fn as_self_check(&self) -> ::core::option::Option<&dyn $crate::SelfCheck> {
            ::core::option::Option::Some(self)
        }
    };
    (@capability DynamicField) => {
        fn as_dynamic_field(&self) -> ::core::option::Option<&dyn $crate::DynamicField> {
            ::core::option::Option::Some(self)
        }
    };
    (
        $ty:ident {
            $( $field:ident $( : [ $( $rule:tt $( = $param:expr )? ),* $(,)? ] )? ),* $(,)?
        }
        $( + $capability:ident )*
    ) => {
        impl $crate::Inspect for $ty {
            fn kind(&self) -> $crate::Kind<'_> {
                $crate::Kind::Model(self)
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }

        impl $crate::Model for $ty {
            fn compiled(
            ) -> &'static ::core::result::Result<$crate::ModelSchema, $crate::AnnotationError> {
                static SCHEMA: ::std::sync::LazyLock<
                    ::core::result::Result<$crate::ModelSchema, $crate::AnnotationError>,
                > = ::std::sync::LazyLock::new(|| {
                    $crate::ModelSchema::compile(
                        ::core::stringify!($ty),
                        ::std::vec![
                            $(
                                $crate::schema::FieldDecl::new(
                                    ::core::stringify!($field),
                                    ::std::vec![
                                        $($(
                                            (
                                                ::core::stringify!($rule),
                                                ::core::option::Option::<::std::string::String>::None
                                                    $(.or(::core::option::Option::Some(
                                                        ::std::string::ToString::to_string(&$param),
                                                    )))?,
                                            ),
                                        )*)?
                                    ],
                                ),
                            )*
                        ],
                    )
                });
                &SCHEMA
            }

            fn schema(
                &self,
            ) -> ::core::result::Result<&'static $crate::ModelSchema, &'static $crate::AnnotationError>
            {
                <Self as $crate::Model>::compiled().as_ref()
            }

            fn field_values(&self) -> ::std::vec::Vec<&dyn $crate::Inspect> {
                ::std::vec![$(&self.$field as &dyn $crate::Inspect),*]
            }

            $( $crate::model!(@capability $capability); )*
        }
    };
}
