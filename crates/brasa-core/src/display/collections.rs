//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{Order, TimeTrack};

/// Newtype wrapper for displaying a list of orders.
///
/// # Examples
///
/// ```rust
/// use brasa_core::display::Orders;
///
/// let orders = Orders(Vec::new());
/// assert_eq!(orders.to_string(), "No orders found.\n");
/// ```
pub struct Orders(pub Vec<Order>);

impl Orders {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.0.iter()
    }
}

impl Index<usize> for Orders {
    type Output = Order;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Orders {
    type Item = Order;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Orders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No orders found.")
        } else {
            for order in &self.0 {
                write!(f, "{order}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a list of shifts.
pub struct Shifts(pub Vec<TimeTrack>);

impl fmt::Display for Shifts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No shifts found.")
        } else {
            for shift in &self.0 {
                write!(f, "{shift}")?;
            }
            Ok(())
        }
    }
}
