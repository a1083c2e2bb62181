/// A fixed, ordered list of named fields.
///
/// The field order is the wire order. Encoder and decoder must agree on it;
/// nothing about it is written out.
pub trait Record {
    const NAME: &'static str;
    const FIELDS: &'static [&'static str];
}

/// Describes a struct's fields once, for every operation.
///
/// Expands to [`Record`] and [`Traverse`](crate::Traverse) impls that visit
/// the listed fields in the order given. Fields not listed are neither
/// written nor read.
///
/// ```
/// use traverse::{traverse_record, render, to_vec, from_slice};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// traverse_record!(Point { x, y });
///
/// let point = Point { x: 3, y: -5 };
/// assert_eq!(render(&point), "Point{x:3, y:-5}");
///
/// let bytes = to_vec(&point);
/// assert_eq!(bytes, [6, 9]);
/// assert_eq!(from_slice::<Point>(&bytes).unwrap(), point);
/// ```
#[macro_export]
macro_rules! traverse_record {
    ($name:ident { $($field:ident),* $(,)? }) => {
        impl $crate::Record for $name {
            const NAME: &'static str = stringify!($name);
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];
        }

        impl $crate::Traverse for $name {
            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn traverse<V: $crate::Visitor>(&self, visitor: &mut V) {
                visitor.begin_record(
                    <Self as $crate::Record>::NAME,
                    <Self as $crate::Record>::FIELDS,
                );
                let mut index = 0usize;
                $(
                    visitor.field(index, stringify!($field));
                    $crate::Traverse::traverse(&self.$field, visitor);
                    index += 1;
                )*
                visitor.end_record();
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn traverse_mut<V: $crate::VisitorMut>(&mut self, visitor: &mut V) {
                if !visitor.begin_record(
                    <Self as $crate::Record>::NAME,
                    <Self as $crate::Record>::FIELDS,
                ) {
                    return;
                }
                let mut index = 0usize;
                $(
                    if visitor.field(index, stringify!($field)) {
                        $crate::Traverse::traverse_mut(&mut self.$field, visitor);
                    }
                    index += 1;
                )*
                visitor.end_record();
            }
        }
    };
}
