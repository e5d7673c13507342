//! Fuzz harness: seeded adversarial inputs through every algorithm.
//!
//! [`CaseGenerator`] derives each [`FuzzCase`] from the run seed and the
//! case index, covering empty strings, whitespace, digits, control
//! characters, combining marks, mixed scripts and long or repetitive
//! inputs. [`FuzzHarness`] feeds every case to every registered algorithm
//! on the supervised worker pool. A panic becomes a
//! [`Fault`](crate::Error::Fault), a call outliving its budget a
//! [`Timeout`](crate::Error::Timeout) and a broken declared constraint an
//! [`InvariantViolation`](crate::Error::InvariantViolation). The failure's
//! case label carries the seed and index needed to replay it.

mod generator;
mod harness;

pub use generator::{CaseGenerator, FuzzCase, Shape, MAX_LEN};
pub use harness::{check_comparator, check_encoder, FuzzHarness};
