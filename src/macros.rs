/// Builds a [`FieldMap`](crate::FieldMap) from `key => value` pairs, in order.
///
/// Values go through `Into<Value>`. A pair may name a quoting rule with
/// `key => value; Quote::Double`.
///
/// # Examples
///
/// ```rust
/// use moose_input::{fields, Quote, Reference, Value};
///
/// let fields = fields! {
///     "type" => "ADComputeSmallStrain",
///     "displacements" => Value::references(["disp_x", "disp_y"]),
///     "eigenstrain_names" => "thermal_expansion",
///     "block" => "hs:copper"; Quote::Double,
/// };
///
/// assert_eq!(fields.len(), 4);
/// assert_eq!(fields.get_field("block").map(|f| f.quote), Some(Quote::Double));
/// ```
#[macro_export]
macro_rules! fields {
    (@insert $map:ident, $key:expr, $value:expr) => {
        $map.insert($key, $value);
    };

    (@insert $map:ident, $key:expr, $value:expr, $quote:expr) => {
        $map.insert_quoted($key, $value, $quote);
    };

    () => {
        $crate::FieldMap::new()
    };

    ($($key:expr => $value:expr $(; $quote:expr)?),+ $(,)?) => {{
        let mut map = $crate::FieldMap::new();
        $(
            $crate::fields!(@insert map, $key, $value $(, $quote)?);
        )+
        map
    }};
}
