//! PostgreSQL array helpers used to maintain `users.pets`.

use diesel::sql_types::{Array, Uuid};

diesel::define_sql_function! {
    /// `array_append(array, element)`.
    fn array_append(array: Array<Uuid>, element: Uuid) -> Array<Uuid>;
}

diesel::define_sql_function! {
    /// `array_remove(array, element)`: drops every occurrence of `element`.
    fn array_remove(array: Array<Uuid>, element: Uuid) -> Array<Uuid>;
}
