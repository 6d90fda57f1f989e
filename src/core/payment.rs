//! Invoice payment state machine
//!
//! `paid_date` is never supplied by clients. It records the last transition
//! into the paid state and is recomputed on every invoice update from the
//! persisted `paid` flag and the requested one:
//!
//! | current | requested | `paid_date` after   |
//! |---------|-----------|---------------------|
//! | paid    | paid      | unchanged           |
//! | unpaid  | paid      | stamped with `now`  |
//! | paid    | unpaid    | cleared             |
//! | unpaid  | unpaid    | unchanged (null)    |
//!
//! Whatever the transition, `paid_date.is_some() == paid` holds for the
//! computed state.

use chrono::{DateTime, Utc};

/// Persisted payment columns of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentState {
    pub paid: bool,
    pub paid_date: Option<DateTime<Utc>>,
}

impl PaymentState {
    /// State of a freshly created invoice
    pub fn unpaid() -> Self {
        Self {
            paid: false,
            paid_date: None,
        }
    }

    /// `paid_date` is set exactly when `paid` is
    pub fn is_consistent(&self) -> bool {
        self.paid == self.paid_date.is_some()
    }
}

/// The four possible moves over `(current paid, requested paid)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTransition {
    /// paid -> paid: only the amount changes
    StayPaid,
    /// unpaid -> paid: stamp `paid_date`
    Pay,
    /// paid -> unpaid: clear `paid_date`
    Unpay,
    /// unpaid -> unpaid: only the amount changes
    StayUnpaid,
}

impl PaymentTransition {
    pub fn between(current_paid: bool, requested_paid: bool) -> Self {
        match (current_paid, requested_paid) {
            (true, true) => PaymentTransition::StayPaid,
            (false, true) => PaymentTransition::Pay,
            (true, false) => PaymentTransition::Unpay,
            (false, false) => PaymentTransition::StayUnpaid,
        }
    }

    /// Apply the transition to `current`, using `now` as the payment stamp
    pub fn apply(self, current: PaymentState, now: DateTime<Utc>) -> PaymentState {
        match self {
            PaymentTransition::StayPaid | PaymentTransition::StayUnpaid => current,
            PaymentTransition::Pay => PaymentState {
                paid: true,
                paid_date: Some(now),
            },
            PaymentTransition::Unpay => PaymentState {
                paid: false,
                paid_date: None,
            },
        }
    }
}

/// Full set of columns written by an invoice update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceUpdate {
    pub amt: f64,
    pub paid: bool,
    pub paid_date: Option<DateTime<Utc>>,
}

/// Compute the row to persist for a requested `(amt, paid)` change
pub fn plan_update(
    current: PaymentState,
    amt: f64,
    requested_paid: bool,
    now: DateTime<Utc>,
) -> InvoiceUpdate {
    let transition = PaymentTransition::between(current.paid, requested_paid);
    let next = transition.apply(current, now);
    tracing::debug!(?transition, paid = next.paid, "planned invoice payment transition");

    InvoiceUpdate {
        amt,
        paid: next.paid,
        paid_date: next.paid_date,
    }
}
