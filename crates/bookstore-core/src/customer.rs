//! Customers and their loyalty status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::CustomerId;

/// A store customer.
///
/// Loyalty membership starts off and can only be switched on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    is_loyalty_member: bool,
}

impl Customer {
    /// Creates a customer who is not (yet) a loyalty member.
    pub fn new(id: CustomerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Customer {
            id,
            name: name.into(),
            email: email.into(),
            is_loyalty_member: false,
        }
    }

    #[inline]
    pub fn is_loyalty_member(&self) -> bool {
        self.is_loyalty_member
    }

    /// Enrolls the customer in the loyalty program. There is no way back.
    pub fn enable_loyalty(&mut self) {
        self.is_loyalty_member = true;
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer(ID: {}, Name: {})", self.id, self.name)
    }
}
