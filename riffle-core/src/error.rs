//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// Structural precondition violations (inserting into a full store, mismatched
/// id/td-error lengths, a record whose shape disagrees with the negotiated
/// example) are not represented here: they indicate a wiring bug in the
/// surrounding loop and panic at the call site instead. Likewise, "batch not
/// ready yet" is `Option::None`, never an error.
#[derive(Error, Debug)]
pub enum RiffleError {
    /// The consumer end of a batch channel hung up.
    #[error("Batch consumer disconnected")]
    BatchConsumerDisconnected,
}
