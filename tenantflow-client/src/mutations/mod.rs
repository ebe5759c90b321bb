//! Mutation orchestrators
//!
//! Mutating operations never write tenant-scoped data directly: they invoke
//! named serverless procedures through the mutation gateway under the current
//! tenant context and report the outcome back into the originating store's
//! status fields.

pub mod checkout;
pub mod members;

pub use checkout::CheckoutFlow;
pub use members::MemberAdmin;
