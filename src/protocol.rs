//! Wire-level types shared by the bridge and its channels.
//!
//! ## Module Structure
//!
//! - `operation` - The seven lifecycle operations and their field lists
//! - `envelope` - Ordered per-call field bundles
//! - `outcome` - The three-way result a channel yields
//! - `request_id` - Correlation IDs for in-flight calls

mod envelope;
mod operation;
mod outcome;
mod request_id;

pub use envelope::{CallEnvelope, PageMap};
pub use operation::Operation;
pub use outcome::Outcome;
pub use request_id::RequestId;
