//! The booking transaction
//!
//! A reservation and its save succeed or fail together: when the save fails
//! the reservation is released before the error is returned.

use tracing::error;

use crate::intent::RoomType;
use crate::store::{DataStore, InventoryDocument, ReserveError, StoreError};

/// Why a booking did not go through
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Reserve(#[from] ReserveError),

    #[error("booking could not be saved: {0}")]
    Persist(#[source] StoreError),
}

/// Reserve one unit of `room` and persist the whole document.
///
/// Returns the number of units left. On any error `document` is left exactly
/// as it was.
pub fn book_room(
    document: &mut InventoryDocument,
    store: &dyn DataStore,
    room: RoomType,
) -> Result<u32, BookingError> {
    let remaining = document.reserve(room)?;

    if let Err(e) = store.save(document) {
        error!(%room, error = %e, "failed to save booking, rolling back");
        document.release(room);
        return Err(BookingError::Persist(e));
    }

    Ok(remaining)
}
