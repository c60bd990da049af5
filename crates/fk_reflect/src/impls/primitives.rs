use core::any::Any;
use core::time::Duration;

use crate::Value;

// Leaf impls with per-type omission predicates; `$v` binds `&self`.
macro_rules! impl_value_leaf {
    ($($ty:ty),+ => |$v:ident| { empty: $empty:expr, zero: $zero:expr, falsy: $falsy:expr $(,)? }) => {
        $(
            impl Value for $ty {
                #[inline]
                fn as_any(&self) -> &dyn Any {
                    self
                }

                #[inline]
                fn as_any_mut(&mut self) -> &mut dyn Any {
                    self
                }

                #[inline]
                #[allow(unused_variables)]
                fn is_empty(&self) -> bool {
                    let $v = self;
                    $empty
                }

                #[inline]
                #[allow(unused_variables)]
                fn is_zero(&self) -> bool {
                    let $v = self;
                    $zero
                }

                #[inline]
                #[allow(unused_variables)]
                fn is_false(&self) -> bool {
                    let $v = self;
                    $falsy
                }

                #[inline]
                fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
                    Some(self)
                }
            }
        )+
    };
}

impl_value_leaf!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize
    => |v| { empty: false, zero: *v == 0, falsy: false }
);

impl_value_leaf!(
    f32, f64
    => |v| { empty: false, zero: *v == 0.0, falsy: false }
);

impl_value_leaf!(
    bool
    => |v| { empty: false, zero: false, falsy: !*v }
);

impl_value_leaf!(
    char
    => |v| { empty: false, zero: *v == '\0', falsy: false }
);

impl_value_leaf!(
    String, &'static str
    => |v| { empty: str::is_empty(v), zero: false, falsy: false }
);

impl_value_leaf!(
    Duration
    => |v| { empty: false, zero: Duration::is_zero(v), falsy: false }
);

impl_value_leaf!(
    ()
    => |_v| { empty: true, zero: false, falsy: false }
);

#[cfg(test)]
mod tests {
    use crate::Value;
    use core::time::Duration;

    #[test]
    fn numeric_zero() {
        assert!(Value::is_zero(&0_i64));
        assert!(Value::is_zero(&0.0_f32));
        assert!(!Value::is_zero(&-1_i8));
        assert!(!Value::is_empty(&0_u8));
        assert!(Value::is_zero(&Duration::ZERO));
    }

    #[test]
    fn bool_and_strings() {
        assert!(Value::is_false(&false));
        assert!(!Value::is_false(&true));
        assert!(!Value::is_zero(&false));
        assert!(Value::is_empty(&String::new()));
        assert!(!Value::is_empty(&"x"));
    }

    #[test]
    fn serialize_view() {
        let value: &dyn Value = &42_u16;
        let json = serde_json::to_string(value.as_serialize().unwrap()).unwrap();
        assert_eq!(json, "42");
    }
}
