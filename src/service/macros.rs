// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Declarative message definitions.
//!
//! Each field is declared with a wire kind; the kind picks the Rust field
//! type, the encoder/decoder calls and the schema [`Type`](crate::schema::Type)
//! so all three stay in lockstep:
//!
//! | kind | Rust type | wire |
//! |---|---|---|
//! | `bool`, `uint8`, `uint32`, `int64`, `uint64`, `string` | scalar | primitive |
//! | `bytes` | `Vec<u8>` | count + raw bytes |
//! | `strings` | `Vec<String>` | count + strings |
//! | `string_map` | `BTreeMap<String, String>` | count + key/value strings |
//! | `id` | `TypeId` | 20 raw bytes |
//! | `any` | `Value` | variant |
//! | `(interface N)` | `Option<ObjectRef>` | tagged object |
//! | `(pointer T)` | `Option<T>` | tagged object |
//! | `(pointers T)` | `Vec<T>` | count + tagged objects |
//! | `(value T)` | `T` | fields only |
//! | `(values T)` | `Vec<T>` | count + fields only |
//! | `(enum32 E)` | `E` | zig-zag int32 |
//! | `(enums32 E)` | `Vec<E>` | count + zig-zag int32s |

macro_rules! field_type {
    (bool) => { bool };
    (uint8) => { u8 };
    (uint32) => { u32 };
    (int64) => { i64 };
    (uint64) => { u64 };
    (string) => { String };
    (bytes) => { Vec<u8> };
    (strings) => { Vec<String> };
    (string_map) => { std::collections::BTreeMap<String, String> };
    (id) => { $crate::core::TypeId };
    (any) => { $crate::core::Value };
    ((interface $n:ident)) => { Option<$crate::core::ObjectRef> };
    ((pointer $t:ident)) => { Option<$t> };
    ((pointers $t:ident)) => { Vec<$t> };
    ((value $t:ident)) => { $t };
    ((values $t:ident)) => { Vec<$t> };
    ((enum32 $t:ident)) => { $t };
    ((enums32 $t:ident)) => { Vec<$t> };
}

macro_rules! field_encode {
    (bool, $e:ident, $v:expr) => { $e.bool(*$v) };
    (uint8, $e:ident, $v:expr) => { $e.uint8(*$v) };
    (uint32, $e:ident, $v:expr) => { $e.uint32(*$v) };
    (int64, $e:ident, $v:expr) => { $e.int64(*$v) };
    (uint64, $e:ident, $v:expr) => { $e.uint64(*$v) };
    (string, $e:ident, $v:expr) => { $e.string($v) };
    (bytes, $e:ident, $v:expr) => { $e.bytes($v) };
    (strings, $e:ident, $v:expr) => { $e.slice($v, |e, s| e.string(s)) };
    (string_map, $e:ident, $v:expr) => {
        $e.slice(&$v.iter().collect::<Vec<_>>(), |e, (k, v)| {
            e.string(k)?;
            e.string(v)
        })
    };
    (id, $e:ident, $v:expr) => { $e.id($v) };
    (any, $e:ident, $v:expr) => { $e.variant($v) };
    ((interface $n:ident), $e:ident, $v:expr) => { $e.object($v.as_deref()) };
    ((pointer $t:ident), $e:ident, $v:expr) => {
        $e.object($v.as_ref().map(|v| v as &dyn $crate::core::BinaryObject))
    };
    ((pointers $t:ident), $e:ident, $v:expr) => {
        $e.slice($v, |e, item| e.object(Some(item as &dyn $crate::core::BinaryObject)))
    };
    ((value $t:ident), $e:ident, $v:expr) => { $e.struct_value($v) };
    ((values $t:ident), $e:ident, $v:expr) => { $e.slice($v, |e, item| e.struct_value(item)) };
    ((enum32 $t:ident), $e:ident, $v:expr) => { $e.int32(i32::from(*$v)) };
    ((enums32 $t:ident), $e:ident, $v:expr) => {
        $e.slice($v, |e, item| e.int32(i32::from(*item)))
    };
}

macro_rules! field_decode {
    (bool, $d:ident) => { $d.bool() };
    (uint8, $d:ident) => { $d.uint8() };
    (uint32, $d:ident) => { $d.uint32() };
    (int64, $d:ident) => { $d.int64() };
    (uint64, $d:ident) => { $d.uint64() };
    (string, $d:ident) => { $d.string() };
    (bytes, $d:ident) => { $d.bytes() };
    (strings, $d:ident) => { $d.slice(|d| d.string()) };
    (string_map, $d:ident) => {
        $d.slice(|d| Ok((d.string()?, d.string()?)))
            .map(|pairs| pairs.into_iter().collect())
    };
    (id, $d:ident) => { $d.id() };
    (any, $d:ident) => { $d.variant() };
    ((interface $n:ident), $d:ident) => { $d.object() };
    ((pointer $t:ident), $d:ident) => { $d.object_as::<$t>() };
    ((pointers $t:ident), $d:ident) => {
        $d.slice(|d| {
            d.object_as::<$t>()?.ok_or_else(|| {
                $crate::core::CodecError::type_mismatch(
                    <$t as $crate::core::Message>::NAME,
                    "null",
                )
            })
        })
    };
    ((value $t:ident), $d:ident) => { $d.struct_value::<$t>() };
    ((values $t:ident), $d:ident) => { $d.slice(|d| d.struct_value::<$t>()) };
    ((enum32 $t:ident), $d:ident) => {{
        let position = $d.position();
        let raw = $d.int32()?;
        <$t>::try_from(raw).map_err(|_| {
            $crate::core::CodecError::malformed(
                position,
                format!(concat!("invalid ", stringify!($t), " value {}"), raw),
            )
        })
    }};
    ((enums32 $t:ident), $d:ident) => { $d.slice(|d| field_decode!((enum32 $t), d)) };
}

macro_rules! field_schema {
    (bool) => { $crate::schema::Type::primitive($crate::schema::Method::Bool) };
    (uint8) => { $crate::schema::Type::primitive($crate::schema::Method::Uint8) };
    (uint32) => { $crate::schema::Type::primitive($crate::schema::Method::Uint32) };
    (int64) => { $crate::schema::Type::primitive($crate::schema::Method::Int64) };
    (uint64) => { $crate::schema::Type::primitive($crate::schema::Method::Uint64) };
    (string) => { $crate::schema::Type::primitive($crate::schema::Method::String) };
    (bytes) => { $crate::schema::Type::slice(field_schema!(uint8)) };
    (strings) => { $crate::schema::Type::slice(field_schema!(string)) };
    (string_map) => { $crate::schema::Type::map(field_schema!(string), field_schema!(string)) };
    (id) => {
        $crate::schema::Type::Array {
            alias: "ID".to_string(),
            size: $crate::core::TYPE_ID_SIZE as u32,
            value_type: Box::new(field_schema!(uint8)),
        }
    };
    (any) => { $crate::schema::Type::Any };
    ((interface $n:ident)) => { $crate::schema::Type::interface(stringify!($n)) };
    ((pointer $t:ident)) => { $crate::schema::Type::pointer_to::<$t>() };
    ((pointers $t:ident)) => { $crate::schema::Type::slice($crate::schema::Type::pointer_to::<$t>()) };
    ((value $t:ident)) => { $crate::schema::Type::value_of::<$t>() };
    ((values $t:ident)) => { $crate::schema::Type::slice($crate::schema::Type::value_of::<$t>()) };
    ((enum32 $t:ident)) => {
        $crate::schema::Type::alias(stringify!($t), $crate::schema::Method::Int32)
    };
    ((enums32 $t:ident)) => { $crate::schema::Type::slice(field_schema!((enum32 $t))) };
}

/// Declare an entity-keyed message.
///
/// ```ignore
/// message! {
///     /// Path to a capture.
///     pub struct CapturePath = entity("path", "Capture") {
///         pub id / "ID": id,
///     }
/// }
/// ```
///
/// A trailing `error(e) => expr` clause makes the message an application
/// error payload whose message text is `expr`.
macro_rules! message {
    (@remote_error $err:ident) => {
        fn remote_error(&self) -> Option<&dyn $crate::core::RemoteError> {
            Some(self)
        }
    };
    (@remote_error) => {};
    (
        $(#[$meta:meta])*
        pub struct $name:ident = entity($package:literal, $identity:literal) {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident / $declared:literal : $kind:tt
            ),* $(,)?
        }
        $(error($err:ident) => $msg:expr)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: field_type!($kind),
            )*
        }

        impl $name {
            fn static_entity() -> &'static $crate::schema::StaticEntity {
                fn build() -> $crate::schema::Entity {
                    $crate::schema::Entity::new($package, $identity)
                        $(.with_field($declared, field_schema!($kind)))*
                }
                static ENTITY: $crate::schema::StaticEntity =
                    $crate::schema::StaticEntity::new(build);
                &ENTITY
            }
        }

        impl $crate::core::Message for $name {
            const NAME: &'static str = concat!($package, ".", $identity);

            fn type_identity() -> $crate::core::TypeId {
                Self::static_entity().id()
            }

            fn entity() -> Option<&'static $crate::schema::Entity> {
                Some(Self::static_entity().get())
            }

            #[allow(unused_variables)]
            fn encode_fields(
                &self,
                e: &mut $crate::encoding::Encoder<'_>,
            ) -> $crate::core::Result<()> {
                $( field_encode!($kind, e, &self.$field)?; )*
                Ok(())
            }

            #[allow(unused_variables)]
            fn decode_fields(
                &mut self,
                d: &mut $crate::encoding::Decoder<'_>,
            ) -> $crate::core::Result<()> {
                $( self.$field = field_decode!($kind, d)?; )*
                Ok(())
            }

            message!(@remote_error $($err)?);
        }

        $(
            impl $crate::core::RemoteError for $name {
                fn kind(&self) -> &'static str {
                    stringify!($name)
                }

                fn message(&self) -> String {
                    let $err = self;
                    $msg
                }
            }
        )?
    };
}

/// Pair a call message with its result message.
macro_rules! call {
    ($call:ident => $result:ident : $value:ty, $method:literal) => {
        impl $crate::service::Call for $call {
            const METHOD: &'static str = $method;
            type Result = $result;
        }

        impl $crate::service::CallResult for $result {
            type Value = $value;

            fn from_value(value: $value) -> Self {
                Self { value }
            }

            fn into_value(self) -> $value {
                self.value
            }
        }
    };
}
