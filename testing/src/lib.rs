//! # Roombook Testing
//!
//! Testing utilities and helpers for the Roombook client architecture.
//!
//! The crate's centerpiece is [`ReducerTest`], a fluent given/when/then
//! harness for exercising reducers without a store or a network. Feature
//! crates pair it with a scripted mock of their backend trait to cover
//! every status-dispatch branch.
//!
//! ## Example
//!
//! ```ignore
//! use roombook_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(GuardlessReducer::new())
//!     .with_env(test_environment())
//!     .given_state(HistoryState::new())
//!     .when_action(HistoryAction::RequestCancellation { reservation_id })
//!     .then_state(|state| assert!(state.pending_cancel.is_some()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};
