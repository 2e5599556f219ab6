// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed errors for the domain rules that the store and aggregator enforce.

use rust_decimal::Decimal;

use crate::models::Kind;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A monthly series must contain at least one month.
    #[error("a monthly series needs at least one month")]
    EmptySeries,

    /// Amounts are unsigned; the kind carries the direction.
    #[error("amount {0} is negative, use the kind to record an expense")]
    NegativeAmount(Decimal),

    #[error("amount {0} is above the supported maximum of {max}", max = crate::models::MAX_AMOUNT)]
    AmountTooLarge(Decimal),

    #[error("category '{category}' is for {category_kind} but the transaction is {kind}")]
    KindMismatch {
        category: String,
        category_kind: Kind,
        kind: Kind,
    },

    /// The piggy bank cannot go below zero.
    #[error("piggy bank holds {balance}, cannot withdraw {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("invalid kind '{0}', expected income or expense")]
    InvalidKind(String),

    #[error("{0} not found")]
    NotFound(String),
}
